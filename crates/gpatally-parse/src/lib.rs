//! gpatally-parse: PDF text-position extraction backend.
//!
//! This crate turns raw PDF bytes into per-page lists of positioned text
//! fragments — the only place in gpatally that touches the document
//! structure. It scans content streams, tracks the text state machine,
//! and emits [`gpatally_core::TextFragment`] values in a top-left-origin
//! coordinate space for the line reconstructor to consume.

pub mod backend;
pub mod error;
pub mod font;
pub mod scanner;
pub mod text_state;

pub use backend::{LopdfBackend, LopdfDocument, TranscriptBackend};
pub use error::BackendError;
pub use font::SimpleFont;
pub use scanner::{Operand, Operator, scan_operators};
pub use text_state::{Matrix, TextState};

pub use gpatally_core;
