//! Import a transcript PDF and print the GPA readouts.
//!
//! Usage: cargo run --example import_gpa -- transcript.pdf

use gpatally::{CourseCollection, ImportOptions, import_transcript, readouts};

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("usage: import_gpa <transcript.pdf>");
        std::process::exit(2);
    });

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("failed to read {path}: {e}");
            std::process::exit(1);
        }
    };

    let mut courses = CourseCollection::new();
    let report = match import_transcript(&bytes, &mut courses, &ImportOptions::default()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("import failed: {e}");
            std::process::exit(1);
        }
    };

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    println!(
        "{} pages, {} courses imported ({} superseded)",
        report.pages, report.added, report.superseded
    );

    let readouts = readouts(&courses, false);
    println!("Cumulative GPA: {}", readouts.cumulative);
    if let Some(projected) = &readouts.projected {
        println!("Projected GPA: {projected}");
    }
}
