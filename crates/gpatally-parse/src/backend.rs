//! Document backend: the decoding seam and its lopdf implementation.
//!
//! [`TranscriptBackend`] abstracts what the import pipeline needs from a
//! document library: open bytes, count pages, and extract one page's
//! positioned text fragments. [`LopdfBackend`] is the production
//! implementation; everything downstream consumes [`PageText`] values and
//! never touches the document structure.

use std::collections::HashMap;

use gpatally_core::{PageText, TextFragment, TranscriptError};

use crate::error::BackendError;
use crate::font::{SimpleFont, resolve};
use crate::scanner::{Operand, Operator, scan_operators};
use crate::text_state::{Matrix, TextState};

/// Abstraction over document decoding.
///
/// A backend opens raw bytes and produces per-page positioned text. The
/// fragment coordinate contract: top-left origin, `y = page height − raw
/// baseline y`, except on 90°-rotated pages where the raw x/y transform
/// components are swapped instead.
pub trait TranscriptBackend {
    /// The parsed document type.
    type Document;

    /// Backend-specific error type, convertible to [`TranscriptError`].
    type Error: std::error::Error + Into<TranscriptError>;

    /// Parse raw bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid document, or the
    /// document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Extract one page's metadata and positioned text fragments.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index or an uninterpretable
    /// page; any single page failure fails the whole import.
    fn extract_page(doc: &Self::Document, index: usize) -> Result<PageText, Self::Error>;
}

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    inner: lopdf::Document,
    /// Ordered page ObjectIds, indexed by 0-based page number.
    page_ids: Vec<lopdf::ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The lopdf-based backend, the default for gpatally.
pub struct LopdfBackend;

impl TranscriptBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        // Encrypted transcripts are unsupported: abort before extraction.
        if inner.is_encrypted() {
            return Err(BackendError::Core(TranscriptError::EncryptedDocument));
        }

        let page_ids: Vec<lopdf::ObjectId> = inner.get_pages().values().copied().collect();
        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn extract_page(doc: &Self::Document, index: usize) -> Result<PageText, Self::Error> {
        let page_id = *doc.page_ids.get(index).ok_or_else(|| {
            BackendError::Parse(format!(
                "page index {index} out of range (0..{})",
                doc.page_ids.len()
            ))
        })?;

        let inner = &doc.inner;
        let page_dict = inner
            .get_object(page_id)
            .and_then(|obj| obj.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        let (width, height) = page_dimensions(inner, page_id)?;
        let rotation = page_rotation(inner, page_id)?;

        let content = page_content_bytes(inner, page_dict)?;
        let resources = page_resources(inner, page_id)?;
        let operators = scan_operators(&content)?;
        let fragments = extract_fragments(inner, &operators, resources, height, rotation);

        Ok(PageText {
            number: index + 1,
            width,
            height,
            rotation,
            fragments,
        })
    }
}

/// Interpret scanned operators and collect positioned text fragments.
///
/// Each show operator emits one fragment positioned by the render matrix
/// at the start of the run; the text matrix then advances by the run's
/// displacement so later runs on the same line land to its right.
fn extract_fragments(
    doc: &lopdf::Document,
    operators: &[Operator],
    resources: Option<&lopdf::Dictionary>,
    page_height: f64,
    rotation: i32,
) -> Vec<TextFragment> {
    let mut fragments = Vec::new();
    let mut ctm = Matrix::IDENTITY;
    let mut saved: Vec<(Matrix, TextState)> = Vec::new();
    let mut state = TextState::new();
    let mut fonts: HashMap<String, SimpleFont> = HashMap::new();

    for op in operators {
        match op.name.as_str() {
            // --- Graphics state ---
            "q" => saved.push((ctm, state.clone())),
            "Q" => {
                if let Some((restored_ctm, restored_state)) = saved.pop() {
                    ctm = restored_ctm;
                    state = restored_state;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operands(&op.operands) {
                    ctm = m.then(&ctm);
                }
            }

            // --- Text state ---
            "BT" => state.begin_text(),
            "ET" => state.end_text(),
            "Tf" => {
                if let (Some(Operand::Name(name)), Some(size)) =
                    (op.operands.first(), nth_f64(&op.operands, 1))
                {
                    state.set_font(name.clone(), size);
                    fonts
                        .entry(name.clone())
                        .or_insert_with(|| load_font(doc, resources, name));
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operands(&op.operands) {
                    state.set_text_matrix(m);
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (nth_f64(&op.operands, 0), nth_f64(&op.operands, 1))
                {
                    state.move_text_position(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (nth_f64(&op.operands, 0), nth_f64(&op.operands, 1))
                {
                    state.move_text_position_and_set_leading(tx, ty);
                }
            }
            "T*" => state.next_line(),
            "Tc" => {
                if let Some(v) = nth_f64(&op.operands, 0) {
                    state.set_char_spacing(v);
                }
            }
            "Tw" => {
                if let Some(v) = nth_f64(&op.operands, 0) {
                    state.set_word_spacing(v);
                }
            }
            "Tz" => {
                if let Some(v) = nth_f64(&op.operands, 0) {
                    state.set_h_scaling(v);
                }
            }
            "TL" => {
                if let Some(v) = nth_f64(&op.operands, 0) {
                    state.set_leading(v);
                }
            }
            "Ts" => {
                if let Some(v) = nth_f64(&op.operands, 0) {
                    state.set_rise(v);
                }
            }

            // --- Show operators ---
            "Tj" => {
                if let Some(Operand::Str(bytes)) = op.operands.first() {
                    show_string(
                        bytes,
                        &mut state,
                        &ctm,
                        &fonts,
                        page_height,
                        rotation,
                        &mut fragments,
                    );
                }
            }
            "TJ" => {
                if let Some(Operand::Array(items)) = op.operands.first() {
                    show_array(
                        items,
                        &mut state,
                        &ctm,
                        &fonts,
                        page_height,
                        rotation,
                        &mut fragments,
                    );
                }
            }
            "'" => {
                state.next_line();
                if let Some(Operand::Str(bytes)) = op.operands.first() {
                    show_string(
                        bytes,
                        &mut state,
                        &ctm,
                        &fonts,
                        page_height,
                        rotation,
                        &mut fragments,
                    );
                }
            }
            "\"" => {
                if op.operands.len() >= 3 {
                    if let Some(aw) = nth_f64(&op.operands, 0) {
                        state.set_word_spacing(aw);
                    }
                    if let Some(ac) = nth_f64(&op.operands, 1) {
                        state.set_char_spacing(ac);
                    }
                    state.next_line();
                    if let Operand::Str(bytes) = &op.operands[2] {
                        show_string(
                            bytes,
                            &mut state,
                            &ctm,
                            &fonts,
                            page_height,
                            rotation,
                            &mut fragments,
                        );
                    }
                }
            }

            // Paths, colors, XObjects, marked content: no text positions.
            _ => {}
        }
    }

    fragments
}

/// Show a single string: emit a fragment at the current render origin,
/// then advance the text matrix by the string's displacement.
fn show_string(
    bytes: &[u8],
    state: &mut TextState,
    ctm: &Matrix,
    fonts: &HashMap<String, SimpleFont>,
    page_height: f64,
    rotation: i32,
    fragments: &mut Vec<TextFragment>,
) {
    let font = current_font(fonts, state);
    let text = font.decode(bytes);
    if !text.is_empty() {
        emit(&text, font.name(), state, ctm, page_height, rotation, fragments);
    }
    let advance = string_displacement(bytes, font, state);
    state.advance(advance);
}

/// Show a `TJ` array as one combined fragment, the way text runs arrive
/// from the decoding layer. Numeric elements adjust the displacement by
/// `-n/1000 · size`, which shifts everything after the array.
fn show_array(
    items: &[Operand],
    state: &mut TextState,
    ctm: &Matrix,
    fonts: &HashMap<String, SimpleFont>,
    page_height: f64,
    rotation: i32,
    fragments: &mut Vec<TextFragment>,
) {
    let font = current_font(fonts, state);
    let mut text = String::new();
    let mut advance = 0.0;

    for item in items {
        match item {
            Operand::Str(bytes) => {
                text.push_str(&font.decode(bytes));
                advance += string_displacement(bytes, font, state);
            }
            _ => {
                if let Some(adjust) = item.as_f64() {
                    advance -= adjust / 1000.0 * state.font_size() * state.h_scaling();
                }
            }
        }
    }

    if !text.is_empty() {
        emit(&text, font.name(), state, ctm, page_height, rotation, fragments);
    }
    state.advance(advance);
}

/// Push a fragment positioned by the render matrix.
///
/// `y` flips to a top-left origin; on 90°-rotated pages the raw transform
/// components are swapped instead. Glyph height is the vertical scale of
/// the render matrix.
fn emit(
    text: &str,
    font_name: &str,
    state: &TextState,
    ctm: &Matrix,
    page_height: f64,
    rotation: i32,
    fragments: &mut Vec<TextFragment>,
) {
    let trm = state.render_matrix(ctm);
    let (x, y) = if rotation == 90 {
        (trm.f, trm.e)
    } else {
        (trm.e, page_height - trm.f)
    };
    let height = (trm.c * trm.c + trm.d * trm.d).sqrt();
    fragments.push(TextFragment {
        x,
        y,
        text: text.to_string(),
        font_name: font_name.to_string(),
        height,
    });
}

/// Total horizontal displacement of a shown string, in user-space units.
fn string_displacement(bytes: &[u8], font: &SimpleFont, state: &TextState) -> f64 {
    let mut width = 0.0;
    for &code in bytes {
        let mut glyph =
            font.glyph_width(code) / 1000.0 * state.font_size() + state.char_spacing();
        if code == b' ' {
            glyph += state.word_spacing();
        }
        width += glyph;
    }
    width * state.h_scaling()
}

static FALLBACK_FONT: std::sync::LazyLock<SimpleFont> =
    std::sync::LazyLock::new(|| SimpleFont::fallback(""));

fn current_font<'a>(fonts: &'a HashMap<String, SimpleFont>, state: &TextState) -> &'a SimpleFont {
    fonts.get(state.font_name()).unwrap_or(&FALLBACK_FONT)
}

/// Look up `/Resources /Font /<name>` and build its metrics; a missing or
/// malformed entry degrades to fallback metrics.
fn load_font(
    doc: &lopdf::Document,
    resources: Option<&lopdf::Dictionary>,
    name: &str,
) -> SimpleFont {
    let font_dict = resources
        .and_then(|res| res.get(b"Font").ok())
        .map(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|font_map| font_map.get(name.as_bytes()).ok())
        .map(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok());

    match font_dict {
        Some(dict) => SimpleFont::from_dict(doc, dict, name),
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!(font = name, "font resource not found; using fallback metrics");
            SimpleFont::fallback(name)
        }
    }
}

/// First operand at `index` as f64.
fn nth_f64(operands: &[Operand], index: usize) -> Option<f64> {
    operands.get(index).and_then(Operand::as_f64)
}

/// Six leading numeric operands as a matrix.
fn matrix_operands(operands: &[Operand]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    Some(Matrix::new(
        nth_f64(operands, 0)?,
        nth_f64(operands, 1)?,
        nth_f64(operands, 2)?,
        nth_f64(operands, 3)?,
        nth_f64(operands, 4)?,
        nth_f64(operands, 5)?,
    ))
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
fn object_to_f64(obj: &lopdf::Object) -> Result<f64, BackendError> {
    match obj {
        lopdf::Object::Integer(i) => Ok(*i as f64),
        lopdf::Object::Real(f) => Ok(*f as f64),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Look up a key in the page dictionary, walking up the page tree via
/// /Parent if the key is not found on the page itself.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
    key: &[u8],
) -> Result<Option<&'a lopdf::Object>, BackendError> {
    let mut current_id = page_id;
    loop {
        let dict = doc
            .get_object(current_id)
            .and_then(|obj| obj.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent) => {
                current_id = parent
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
}

/// Page dimensions from the (inherited) MediaBox.
fn page_dimensions(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<(f64, f64), BackendError> {
    let obj = resolve_inherited(doc, page_id, b"MediaBox")?
        .ok_or_else(|| BackendError::Parse("MediaBox not found on page or ancestors".into()))?;
    let array = resolve(doc, obj)
        .as_array()
        .map_err(|e| BackendError::Parse(format!("MediaBox is not an array: {e}")))?;
    if array.len() != 4 {
        return Err(BackendError::Parse(format!(
            "expected 4-element MediaBox, got {}",
            array.len()
        )));
    }
    let x0 = object_to_f64(resolve(doc, &array[0]))?;
    let y0 = object_to_f64(resolve(doc, &array[1]))?;
    let x1 = object_to_f64(resolve(doc, &array[2]))?;
    let y1 = object_to_f64(resolve(doc, &array[3]))?;
    Ok(((x1 - x0).abs(), (y1 - y0).abs()))
}

/// Page rotation from the (inherited) /Rotate entry, normalized to
/// 0/90/180/270. Defaults to 0.
fn page_rotation(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Result<i32, BackendError> {
    match resolve_inherited(doc, page_id, b"Rotate")? {
        Some(obj) => {
            let rotation = resolve(doc, obj)
                .as_i64()
                .map_err(|e| BackendError::Parse(format!("Rotate is not an integer: {e}")))?;
            Ok((rotation as i32).rem_euclid(360))
        }
        None => Ok(0),
    }
}

/// Concatenated, decompressed content stream bytes for a page.
///
/// Handles a single stream reference, an array of references, and the
/// (non-conforming but seen in the wild) direct stream object.
fn page_content_bytes(
    doc: &lopdf::Document,
    page_dict: &lopdf::Dictionary,
) -> Result<Vec<u8>, BackendError> {
    let contents = match page_dict.get(b"Contents") {
        Ok(obj) => obj,
        Err(_) => return Ok(Vec::new()), // page with no content
    };

    match resolve(doc, contents) {
        lopdf::Object::Stream(stream) => decode_stream(stream),
        lopdf::Object::Array(array) => {
            let mut content = Vec::new();
            for item in array {
                let stream = resolve(doc, item).as_stream().map_err(|e| {
                    BackendError::Parse(format!("/Contents array item is not a stream: {e}"))
                })?;
                if !content.is_empty() {
                    content.push(b' ');
                }
                content.extend_from_slice(&decode_stream(stream)?);
            }
            Ok(content)
        }
        other => Err(BackendError::Parse(format!(
            "/Contents is not a stream or array: {other:?}"
        ))),
    }
}

/// Decompress a content stream if it carries a filter.
fn decode_stream(stream: &lopdf::Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Parse(format!("failed to decompress content stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

/// The (inherited) /Resources dictionary, if any.
fn page_resources(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<Option<&lopdf::Dictionary>, BackendError> {
    match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => resolve(doc, obj)
            .as_dict()
            .map(Some)
            .map_err(|_| BackendError::Parse("/Resources is not a dictionary".to_string())),
        None => Ok(None),
    }
}
