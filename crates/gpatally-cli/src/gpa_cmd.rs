use std::path::Path;

use gpatally::{AdvisoryFlags, SCHOLARSHIP_WARNING_TEXT, evaluate_for, project_goal, readouts};

use crate::cli::OutputFormat;
use crate::shared::{import_file, parse_projection_inputs};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: &Path,
    goal: Option<&str>,
    pending_credits: Option<&str>,
    merit_scholar: bool,
    pre_health: bool,
    graduating_soon: bool,
    y_tolerance: f64,
    format: &OutputFormat,
) -> Result<(), i32> {
    let (courses, report) = import_file(file, y_tolerance)?;

    let flags = AdvisoryFlags {
        merit_scholar,
        pre_health,
        graduating_soon,
    };
    let readouts = readouts(&courses, pre_health);
    let advisories = evaluate_for(&courses, flags);

    // Out-of-domain projection inputs suppress the readout, never error.
    let projection = parse_projection_inputs(goal, pending_credits)
        .and_then(|(goal, pending)| {
            project_goal(&courses, goal, pending)
                .ok()
                .map(|required| (goal, pending, required))
        });

    match format {
        OutputFormat::Text => {
            println!("Imported {} courses from {} pages", report.added, report.pages);
            println!("Cumulative GPA: {}", readouts.cumulative);
            if let Some(projected) = &readouts.projected {
                println!("Projected GPA: {projected}");
            }
            if let Some(bcpm) = &readouts.bcpm {
                println!("BCPM GPA: {bcpm}");
            }
            if let Some(honors) = advisories.honors {
                println!("Latin honors: {honors}");
            }
            if advisories.graduation_danger {
                println!("DANGER: GPA is below the 2.0 graduation requirement range");
            }
            if advisories.scholarship_warning {
                println!("WARNING: {SCHOLARSHIP_WARNING_TEXT}");
            }
            if let Some((goal, pending, required)) = projection {
                println!(
                    "If you took {pending} credits, you would need a {required:.3} \
                     in order to make it to your goal GPA of {goal}."
                );
            }
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "pages": report.pages,
                "imported": report.added,
                "superseded": report.superseded,
                "cumulative": readouts.cumulative,
                "projected": readouts.projected,
                "bcpm": readouts.bcpm,
                "honors": advisories.honors.map(|h| h.as_str()),
                "graduation_danger": advisories.graduation_danger,
                "scholarship_warning": advisories.scholarship_warning,
                "goal_projection": projection.map(|(goal, pending, required)| {
                    serde_json::json!({
                        "goal": goal,
                        "pending_credits": pending,
                        "required_average": format!("{required:.3}"),
                    })
                }),
            });
            println!("{}", serde_json::to_string(&obj).unwrap());
        }
    }

    Ok(())
}
