//! Minimal simple-font model: advance widths and text decoding.
//!
//! Transcripts set their tabular text in simple (single-byte) fonts, so
//! the model here is deliberately small: a /FirstChar + /Widths lookup
//! with a default fallback, Latin-1 byte decoding, and UTF-16BE for
//! BOM-tagged strings. Widths only influence how far the cursor advances
//! between runs on a line — the downstream pipeline consumes positions,
//! never glyph outlines.

use lopdf::{Dictionary, Document, Object};

/// Advance width assumed when a font provides no metrics, in glyph-space
/// units (1/1000 em).
const DEFAULT_GLYPH_WIDTH: f64 = 500.0;

/// Width metrics and identity for one font resource.
#[derive(Debug, Clone)]
pub struct SimpleFont {
    name: String,
    first_char: i64,
    widths: Vec<f64>,
    missing_width: f64,
}

impl SimpleFont {
    /// A font with no metrics: every glyph advances by the default width.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            first_char: 0,
            widths: Vec::new(),
            missing_width: DEFAULT_GLYPH_WIDTH,
        }
    }

    /// Build from a font dictionary. Best-effort: missing or malformed
    /// entries degrade to fallback metrics rather than failing.
    pub fn from_dict(doc: &Document, dict: &Dictionary, resource_name: &str) -> Self {
        let name = dict
            .get(b"BaseFont")
            .ok()
            .map(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_name().ok())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .unwrap_or(resource_name)
            .to_string();

        let first_char = dict
            .get(b"FirstChar")
            .ok()
            .map(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_i64().ok())
            .unwrap_or(0);

        let widths = dict
            .get(b"Widths")
            .ok()
            .map(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_array().ok())
            .map(|array| {
                array
                    .iter()
                    .map(|obj| number_or_default(resolve(doc, obj)))
                    .collect()
            })
            .unwrap_or_default();

        let missing_width = dict
            .get(b"FontDescriptor")
            .ok()
            .map(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_dict().ok())
            .and_then(|descriptor| descriptor.get(b"MissingWidth").ok())
            .and_then(|obj| obj.as_i64().ok())
            .map(|w| w as f64)
            .unwrap_or(DEFAULT_GLYPH_WIDTH);

        Self {
            name,
            first_char,
            widths,
            missing_width,
        }
    }

    /// The font's display name (BaseFont, or the resource name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Advance width for a character code, in glyph-space units.
    pub fn glyph_width(&self, code: u8) -> f64 {
        let index = i64::from(code) - self.first_char;
        if index >= 0 {
            if let Some(&width) = self.widths.get(index as usize) {
                return width;
            }
        }
        self.missing_width
    }

    /// Decode a string object's bytes to text.
    ///
    /// BOM-tagged UTF-16BE strings decode as such; everything else is
    /// treated as a single-byte Latin-1 encoding, which covers the
    /// standard text encodings for the printable range transcripts use.
    pub fn decode(&self, bytes: &[u8]) -> String {
        if bytes.starts_with(&[0xFE, 0xFF]) {
            let (text, _, _) = encoding_rs::UTF_16BE.decode(&bytes[2..]);
            text.into_owned()
        } else {
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

/// Resolve an indirect reference one level, returning the object itself
/// when it is direct or the reference is dangling.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Numeric object as f64; non-numbers read as zero width.
fn number_or_default(obj: &Object) -> f64 {
    match obj {
        Object::Integer(i) => *i as f64,
        Object::Real(f) => f64::from(*f),
        _ => 0.0,
    }
}
