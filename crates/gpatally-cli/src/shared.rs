//! Helpers shared by the subcommand implementations.

use std::path::Path;

use gpatally::{CourseCollection, ImportOptions, ImportReport, import_transcript};

/// Read a transcript file and import it into a fresh collection.
///
/// Warnings are printed to stderr as they are non-fatal; fatal errors are
/// printed and mapped to exit code 1.
pub fn import_file(
    file: &Path,
    y_tolerance: f64,
) -> Result<(CourseCollection, ImportReport), i32> {
    let bytes = std::fs::read(file).map_err(|e| {
        eprintln!("Error reading {}: {e}", file.display());
        1
    })?;

    let mut courses = CourseCollection::new();
    let options = ImportOptions { y_tolerance };
    let report = import_transcript(&bytes, &mut courses, &options).map_err(|e| {
        eprintln!("Error importing {}: {e}", file.display());
        1
    })?;

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    Ok((courses, report))
}

/// Parse the projection inputs the way a form field would: a failed parse
/// or a zero credit count yields `None` and the projection is suppressed.
pub fn parse_projection_inputs(
    goal: Option<&str>,
    pending_credits: Option<&str>,
) -> Option<(f64, u32)> {
    let goal: f64 = goal?.trim().parse().ok()?;
    let pending: u32 = pending_credits?.trim().parse().ok()?;
    if pending == 0 {
        return None;
    }
    Some((goal, pending))
}
