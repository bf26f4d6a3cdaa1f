//! gpatally-core: Document-format-independent data types and algorithms.
//!
//! This crate provides the course data model (grades, records, the owning
//! collection), the line reconstructor that rebuilds text lines from
//! positioned fragments, the course-row parser, the GPA calculator with
//! its readout and projection variants, and the advisory thresholds.
//! It knows nothing about PDFs — extraction lives in `gpatally-parse`.

pub mod advisory;
pub mod course;
pub mod error;
pub mod fragment;
pub mod gpa;
pub mod grade;
pub mod lines;
pub mod rows;

pub use advisory::{
    Advisories, AdvisoryFlags, HonorsTier, SCHOLARSHIP_WARNING_TEXT, evaluate, evaluate_for,
};
pub use course::{CourseCollection, CourseRecord, Merge};
pub use error::{ImportWarning, ImportWarningCode, TranscriptError};
pub use fragment::{PageText, TextFragment};
pub use gpa::{BCPM_DEPARTMENTS, Readouts, calculate_gpa, gpa_value, project_goal, readouts};
pub use grade::{Grade, LETTER_GRADES};
pub use lines::{DEFAULT_Y_TOLERANCE, reconstruct_lines};
pub use rows::{is_course_row, parse_course_row};
