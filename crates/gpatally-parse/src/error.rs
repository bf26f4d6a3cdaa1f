//! Error types for the extraction layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides
//! [`BackendError`] that wraps document-level failures and converts them to
//! [`TranscriptError`] for unified handling across the library.

use gpatally_core::TranscriptError;
use thiserror::Error;

/// Error type for PDF backend operations.
///
/// Everything here is fatal to the import: the error policy recovers from
/// malformed *rows*, never from malformed *documents*.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error during content stream interpretation.
    #[error("interpreter error: {0}")]
    Interpreter(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] TranscriptError),
}

impl From<BackendError> for TranscriptError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => TranscriptError::ParseError(msg),
            BackendError::Io(e) => TranscriptError::IoError(e.to_string()),
            BackendError::Interpreter(msg) => TranscriptError::InterpreterError(msg),
            BackendError::Core(e) => e,
        }
    }
}
