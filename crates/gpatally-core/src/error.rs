//! Error and warning types for gpatally.
//!
//! Provides [`TranscriptError`] for fatal errors that abort an import,
//! and [`ImportWarning`] for non-fatal row-level issues that are skipped
//! and reported while the import continues.

use std::fmt;

/// Fatal error types for transcript processing.
///
/// These errors indicate conditions that prevent further processing of the
/// document or current operation. An extraction failure aborts the whole
/// import — no partial page results are merged into the course collection.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptError {
    /// Error parsing document structure or syntax.
    ParseError(String),
    /// I/O error reading document data.
    IoError(String),
    /// Error during content stream interpretation.
    InterpreterError(String),
    /// The document is encrypted; encrypted transcripts are unsupported.
    EncryptedDocument,
    /// A projection input was out of domain (zero pending credits,
    /// non-finite goal). Callers suppress output rather than surface this.
    InvalidInput(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::ParseError(msg) => write!(f, "parse error: {msg}"),
            TranscriptError::IoError(msg) => write!(f, "I/O error: {msg}"),
            TranscriptError::InterpreterError(msg) => write!(f, "interpreter error: {msg}"),
            TranscriptError::EncryptedDocument => {
                write!(f, "document is encrypted and cannot be imported")
            }
            TranscriptError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            TranscriptError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TranscriptError {}

impl From<std::io::Error> for TranscriptError {
    fn from(err: std::io::Error) -> Self {
        TranscriptError::IoError(err.to_string())
    }
}

/// Machine-readable warning code for categorizing import issues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum ImportWarningCode {
    /// A candidate course line failed structural decomposition.
    MalformedRow,
    /// A completed row carried a grade letter outside the A–E scale.
    UnknownGrade,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl ImportWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            ImportWarningCode::MalformedRow => "MALFORMED_ROW",
            ImportWarningCode::UnknownGrade => "UNKNOWN_GRADE",
            ImportWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for ImportWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal warning encountered while importing a transcript.
///
/// Warnings let the import continue past lines that look like course rows
/// but cannot be decomposed. They carry a structured code, a description,
/// and optional source context (page number, offending line).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportWarning {
    /// Machine-readable warning code.
    pub code: ImportWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Page number where the warning occurred (1-indexed), if known.
    pub page: Option<usize>,
    /// The reconstructed line that triggered the warning, if applicable.
    pub line: Option<String>,
}

impl ImportWarning {
    /// Create a warning with a specific code and description.
    pub fn new(code: ImportWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            line: None,
        }
    }

    /// Attach the offending line to this warning.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        Ok(())
    }
}
