//! The transcript import pipeline.
//!
//! Raw bytes → per-page fragments → reconstructed lines → course rows →
//! collection merge. Extraction failures abort the whole import before
//! any record is merged; row-level failures are skipped and reported.

use gpatally_core::{
    CourseCollection, ImportWarning, TranscriptError, is_course_row, lines::DEFAULT_Y_TOLERANCE,
    parse_course_row, reconstruct_lines,
};

use crate::transcript::Transcript;

/// Options for a transcript import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Y tolerance for the line reconstructor. The default disables
    /// fuzziness: only fragments at identical Y coordinates share a line.
    pub y_tolerance: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
        }
    }
}

/// Summary of a completed import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Pages processed.
    pub pages: usize,
    /// Course records merged into the collection.
    pub added: usize,
    /// Prior records removed by retake supersession.
    pub superseded: usize,
    /// Row-level issues that were skipped.
    pub warnings: Vec<ImportWarning>,
}

/// Import a transcript into `courses`.
///
/// All pages are extracted before any record is merged, so a failing page
/// leaves the collection untouched. Candidate course lines that fail to
/// parse are skipped and reported in the returned
/// [`warnings`](ImportReport::warnings); they never fail the import.
///
/// # Errors
///
/// [`TranscriptError`] if the document cannot be opened or any page fails
/// to extract.
pub fn import_transcript(
    bytes: &[u8],
    courses: &mut CourseCollection,
    options: &ImportOptions,
) -> Result<ImportReport, TranscriptError> {
    let transcript = Transcript::open(bytes)?;
    let pages = transcript.extract_pages()?;

    let mut report = ImportReport {
        pages: pages.len(),
        ..ImportReport::default()
    };

    for page in &pages {
        let lines = reconstruct_lines(&page.fragments, options.y_tolerance);
        for line in lines.iter().filter(|line| is_course_row(line)) {
            match parse_course_row(line) {
                Ok(Some(record)) => {
                    let merge = courses.merge_imported(record);
                    report.added += 1;
                    if merge.removed.is_some() {
                        report.superseded += 1;
                    }
                }
                Ok(None) => {} // pass/withdraw/transfer: no GPA impact
                Err(mut warning) => {
                    warning.page = Some(page.number);
                    report.warnings.push(warning);
                }
            }
        }
    }

    Ok(report)
}
