use std::path::Path;

use gpatally::{Transcript, is_course_row, reconstruct_lines};

pub fn run(file: &Path, y_tolerance: f64, course_rows: bool) -> Result<(), i32> {
    let bytes = std::fs::read(file).map_err(|e| {
        eprintln!("Error reading {}: {e}", file.display());
        1
    })?;

    let transcript = Transcript::open(&bytes).map_err(|e| {
        eprintln!("Error opening {}: {e}", file.display());
        1
    })?;

    for index in 0..transcript.page_count() {
        let page = transcript.extract_page(index).map_err(|e| {
            eprintln!("Error reading page {}: {e}", index + 1);
            1
        })?;

        println!("--- Page {} ---", page.number);
        for line in reconstruct_lines(&page.fragments, y_tolerance) {
            if !course_rows || is_course_row(&line) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
