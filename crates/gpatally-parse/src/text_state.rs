//! Text-object state: matrices and parameters behind the text operators.
//!
//! Tracks the text matrix and line matrix plus the scalar text parameters
//! (font size, character/word spacing, horizontal scaling, leading, rise)
//! through `BT`/`ET`, positioning, and show operators. The render matrix
//! it produces is what positions every emitted fragment.

/// A 2×3 affine transform `[a b c d e f]`, row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Construct from the six components.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// A pure translation.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Compose: apply `self`, then `other` (`self × other` under the
    /// row-vector convention).
    pub fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }
}

/// The state a text object carries between operators.
#[derive(Debug, Clone)]
pub struct TextState {
    in_text: bool,
    tm: Matrix,
    tlm: Matrix,
    font_name: String,
    font_size: f64,
    char_spacing: f64,
    word_spacing: f64,
    h_scaling: f64,
    leading: f64,
    rise: f64,
}

impl TextState {
    /// Fresh state: identity matrices, no font, default parameters.
    pub fn new() -> Self {
        Self {
            in_text: false,
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            font_name: String::new(),
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scaling: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }

    /// `BT`: enter a text object, resetting both matrices to identity.
    pub fn begin_text(&mut self) {
        self.in_text = true;
        self.tm = Matrix::IDENTITY;
        self.tlm = Matrix::IDENTITY;
    }

    /// `ET`: leave the text object.
    pub fn end_text(&mut self) {
        self.in_text = false;
    }

    /// `Tf`: select font and size.
    pub fn set_font(&mut self, name: String, size: f64) {
        self.font_name = name;
        self.font_size = size;
    }

    /// The currently selected font resource name.
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// The current font size.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn char_spacing(&self) -> f64 {
        self.char_spacing
    }

    pub fn word_spacing(&self) -> f64 {
        self.word_spacing
    }

    /// Horizontal scaling as a fraction (1.0 = 100%).
    pub fn h_scaling(&self) -> f64 {
        self.h_scaling
    }

    /// `Tc`: character spacing.
    pub fn set_char_spacing(&mut self, spacing: f64) {
        self.char_spacing = spacing;
    }

    /// `Tw`: word spacing.
    pub fn set_word_spacing(&mut self, spacing: f64) {
        self.word_spacing = spacing;
    }

    /// `Tz`: horizontal scaling, given in percent.
    pub fn set_h_scaling(&mut self, percent: f64) {
        self.h_scaling = percent / 100.0;
    }

    /// `TL`: leading.
    pub fn set_leading(&mut self, leading: f64) {
        self.leading = leading;
    }

    /// `Ts`: text rise.
    pub fn set_rise(&mut self, rise: f64) {
        self.rise = rise;
    }

    /// `Tm`: replace both the text matrix and the line matrix.
    pub fn set_text_matrix(&mut self, m: Matrix) {
        self.tm = m;
        self.tlm = m;
    }

    /// `Td`: translate the line matrix and restart the text matrix there.
    pub fn move_text_position(&mut self, tx: f64, ty: f64) {
        self.tlm = Matrix::translation(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    /// `TD`: like `Td`, but also sets the leading to `-ty`.
    pub fn move_text_position_and_set_leading(&mut self, tx: f64, ty: f64) {
        self.leading = -ty;
        self.move_text_position(tx, ty);
    }

    /// `T*`: move to the start of the next line using the current leading.
    pub fn next_line(&mut self) {
        self.move_text_position(0.0, -self.leading);
    }

    /// The render matrix for a show operation: the font parameters applied
    /// to the text matrix, then the current transformation matrix.
    pub fn render_matrix(&self, ctm: &Matrix) -> Matrix {
        Matrix::new(
            self.font_size * self.h_scaling,
            0.0,
            0.0,
            self.font_size,
            0.0,
            self.rise,
        )
        .then(&self.tm)
        .then(ctm)
    }

    /// Advance the text matrix horizontally by `tx` text-space units
    /// (the displacement accumulated while showing a string).
    pub fn advance(&mut self, tx: f64) {
        self.tm = Matrix::translation(tx, 0.0).then(&self.tm);
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // --- Matrix tests ---

    #[test]
    fn identity_composition_is_neutral() {
        let m = Matrix::new(2.0, 0.0, 0.0, 3.0, 10.0, 20.0);
        assert_eq!(m.then(&Matrix::IDENTITY), m);
        assert_eq!(Matrix::IDENTITY.then(&m), m);
    }

    #[test]
    fn translations_compose_additively() {
        let m = Matrix::translation(5.0, 7.0).then(&Matrix::translation(1.0, 2.0));
        assert!(approx(m.e, 6.0));
        assert!(approx(m.f, 9.0));
    }

    #[test]
    fn translation_through_scale_is_scaled() {
        let scale = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let m = Matrix::translation(3.0, 4.0).then(&scale);
        assert!(approx(m.e, 6.0));
        assert!(approx(m.f, 8.0));
    }

    // --- TextState tests ---

    #[test]
    fn begin_text_resets_matrices() {
        let mut state = TextState::new();
        state.move_text_position(50.0, 60.0);
        state.begin_text();
        assert_eq!(state.render_matrix(&Matrix::IDENTITY).e, 0.0);
    }

    #[test]
    fn td_positions_the_render_origin() {
        let mut state = TextState::new();
        state.begin_text();
        state.set_font("F1".to_string(), 12.0);
        state.move_text_position(72.0, 720.0);
        let trm = state.render_matrix(&Matrix::IDENTITY);
        assert!(approx(trm.e, 72.0));
        assert!(approx(trm.f, 720.0));
        assert!(approx(trm.a, 12.0));
        assert!(approx(trm.d, 12.0));
    }

    #[test]
    fn successive_td_moves_are_relative() {
        let mut state = TextState::new();
        state.begin_text();
        state.move_text_position(72.0, 720.0);
        state.move_text_position(100.0, 0.0);
        let trm = state.render_matrix(&Matrix::IDENTITY);
        assert!(approx(trm.e, 172.0));
        assert!(approx(trm.f, 720.0));
    }

    #[test]
    fn td_resets_to_line_start_not_advanced_position() {
        let mut state = TextState::new();
        state.begin_text();
        state.move_text_position(72.0, 720.0);
        state.advance(40.0);
        state.move_text_position(0.0, -14.0);
        let trm = state.render_matrix(&Matrix::IDENTITY);
        // The advance is discarded: Td is relative to the line matrix.
        assert!(approx(trm.e, 72.0));
        assert!(approx(trm.f, 706.0));
    }

    #[test]
    fn t_star_uses_leading() {
        let mut state = TextState::new();
        state.begin_text();
        state.move_text_position(72.0, 720.0);
        state.set_leading(14.0);
        state.next_line();
        let trm = state.render_matrix(&Matrix::IDENTITY);
        assert!(approx(trm.f, 706.0));
    }

    #[test]
    fn big_td_sets_leading() {
        let mut state = TextState::new();
        state.begin_text();
        state.move_text_position_and_set_leading(0.0, -12.0);
        state.next_line();
        let trm = state.render_matrix(&Matrix::IDENTITY);
        assert!(approx(trm.f, -24.0));
    }

    #[test]
    fn set_text_matrix_replaces_position() {
        let mut state = TextState::new();
        state.begin_text();
        state.set_font("F1".to_string(), 1.0);
        state.set_text_matrix(Matrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 700.0));
        let trm = state.render_matrix(&Matrix::IDENTITY);
        assert!(approx(trm.a, 2.0));
        assert!(approx(trm.d, 2.0));
        assert!(approx(trm.e, 10.0));
        assert!(approx(trm.f, 700.0));
    }

    #[test]
    fn render_matrix_applies_ctm() {
        let mut state = TextState::new();
        state.begin_text();
        state.set_font("F1".to_string(), 10.0);
        state.move_text_position(10.0, 20.0);
        let ctm = Matrix::translation(100.0, 200.0);
        let trm = state.render_matrix(&ctm);
        assert!(approx(trm.e, 110.0));
        assert!(approx(trm.f, 220.0));
    }

    #[test]
    fn h_scaling_is_percent() {
        let mut state = TextState::new();
        state.set_h_scaling(50.0);
        assert!(approx(state.h_scaling(), 0.5));
        state.set_font("F1".to_string(), 10.0);
        let trm = state.render_matrix(&Matrix::IDENTITY);
        assert!(approx(trm.a, 5.0));
        assert!(approx(trm.d, 10.0));
    }

    #[test]
    fn advance_shifts_along_the_line() {
        let mut state = TextState::new();
        state.begin_text();
        state.move_text_position(72.0, 720.0);
        state.advance(30.0);
        let trm = state.render_matrix(&Matrix::IDENTITY);
        assert!(approx(trm.e, 102.0));
        assert!(approx(trm.f, 720.0));
    }
}
