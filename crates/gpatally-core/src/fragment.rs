//! Positioned text fragments, the extractor/reconstructor interchange type.
//!
//! Everything downstream of the Text-Position Extractor operates purely on
//! these values, keeping the line reconstructor and row parser independent
//! of any document format.

/// A positioned run of text on a page, in top-left-origin coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFragment {
    /// Horizontal position of the run origin.
    pub x: f64,
    /// Vertical position of the run baseline, measured from the page top.
    pub y: f64,
    /// The text content of the run.
    pub text: String,
    /// Name of the font the run was set in.
    pub font_name: String,
    /// Glyph height derived from the render transform scale.
    pub height: f64,
}

impl TextFragment {
    /// Create a fragment with default font metadata; positions and text are
    /// all the reconstruction pipeline consumes.
    pub fn at(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            font_name: String::new(),
            height: 0.0,
        }
    }
}

/// One extracted page: metadata plus its flat fragment list.
///
/// Created during extraction, consumed by line reconstruction, then
/// discarded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageText {
    /// 1-based page number.
    pub number: usize,
    /// Page width in document units.
    pub width: f64,
    /// Page height in document units.
    pub height: f64,
    /// Page rotation in degrees: 0, 90, 180, or 270.
    pub rotation: i32,
    /// Positioned text runs, in content-stream order.
    pub fragments: Vec<TextFragment>,
}
