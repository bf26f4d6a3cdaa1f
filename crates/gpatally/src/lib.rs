//! gpatally: Import PDF transcripts and compute GPA readouts.
//!
//! This is the public API facade. It re-exports the data model and
//! algorithms from gpatally-core, uses gpatally-parse for PDF reading,
//! and adds the import pipeline that ties them together.
//!
//! # Architecture
//!
//! - **gpatally-core**: course data model, line reconstruction, row
//!   parsing, GPA calculation, advisories (no PDF dependency)
//! - **gpatally-parse**: content-stream interpretation and positioned
//!   text extraction over lopdf
//! - **gpatally** (this crate): [`Transcript`], [`import_transcript`],
//!   and the re-exported surface
//!
//! # Example
//!
//! ```ignore
//! use gpatally::{CourseCollection, ImportOptions, calculate_gpa, import_transcript};
//!
//! let bytes = std::fs::read("transcript.pdf")?;
//! let mut courses = CourseCollection::new();
//! let report = import_transcript(&bytes, &mut courses, &ImportOptions::default())?;
//! println!("imported {} courses, GPA {}", report.added, calculate_gpa(&courses));
//! ```

mod import;
mod transcript;

pub use import::{ImportOptions, ImportReport, import_transcript};
pub use transcript::Transcript;

pub use gpatally_core;
pub use gpatally_parse;

pub use gpatally_core::{
    Advisories, AdvisoryFlags, BCPM_DEPARTMENTS, CourseCollection, CourseRecord, Grade,
    HonorsTier, ImportWarning, ImportWarningCode, LETTER_GRADES, Merge, PageText, Readouts,
    SCHOLARSHIP_WARNING_TEXT, TextFragment, TranscriptError, calculate_gpa, evaluate,
    evaluate_for, gpa_value, is_course_row, parse_course_row, project_goal, readouts,
    reconstruct_lines,
};
