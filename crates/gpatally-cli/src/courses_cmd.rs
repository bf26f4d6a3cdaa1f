use std::path::Path;

use crate::cli::OutputFormat;
use crate::shared::import_file;

pub fn run(file: &Path, y_tolerance: f64, format: &OutputFormat) -> Result<(), i32> {
    let (courses, _report) = import_file(file, y_tolerance)?;

    match format {
        OutputFormat::Text => {
            for record in &courses {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.name,
                    record.credits,
                    record.grade,
                    if record.completed { "completed" } else { "in progress" },
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(courses.records()).unwrap());
        }
    }

    Ok(())
}
