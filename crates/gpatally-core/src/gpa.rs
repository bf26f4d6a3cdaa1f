//! GPA accumulation, readouts, and goal projection.

use crate::course::{CourseCollection, CourseRecord};
use crate::error::TranscriptError;

/// Departments counted toward the BCPM (Bio/Chem/Phys/Math/Stat) GPA.
pub const BCPM_DEPARTMENTS: [&str; 5] = ["BIOL", "CHEM", "MATH", "PHYS", "STAT"];

/// Sum grade points and credits over the records that count toward GPA
/// (non-zero credits and a letter grade).
fn tally<'a>(records: impl IntoIterator<Item = &'a CourseRecord>) -> (u64, u64) {
    let mut grade_points = 0u64;
    let mut credits_taken = 0u64;
    for record in records {
        if record.counts_toward_gpa() {
            grade_points += u64::from(record.credits) * u64::from(record.grade.weight());
            credits_taken += u64::from(record.credits);
        }
    }
    (grade_points, credits_taken)
}

/// Calculate the GPA for a set of records as a display string.
///
/// The result has exactly three fractional digits when both accumulated
/// credits and grade points are positive; otherwise the literal `"0.0"`
/// placeholder is returned. Note the quirk this preserves: a non-zero
/// credit load of all E grades also reports `"0.0"`, indistinguishable
/// from an empty collection.
pub fn calculate_gpa<'a>(records: impl IntoIterator<Item = &'a CourseRecord>) -> String {
    let (grade_points, credits_taken) = tally(records);
    if credits_taken > 0 && grade_points > 0 {
        format!("{:.3}", grade_points as f64 / credits_taken as f64)
    } else {
        "0.0".to_string()
    }
}

/// The GPA readouts a presentation layer displays.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Readouts {
    /// Completed-course GPA when any completed record exists, else the GPA
    /// over all records.
    pub cumulative: String,
    /// GPA over all records; present only when it differs in scope from
    /// the cumulative readout (i.e. some record is completed).
    pub projected: Option<String>,
    /// BCPM-department GPA; present only for pre-health students.
    pub bcpm: Option<String>,
}

/// Compute the readouts for a collection.
pub fn readouts(courses: &CourseCollection, pre_health: bool) -> Readouts {
    let (cumulative, projected) = if courses.any_completed() {
        (
            calculate_gpa(courses.iter().filter(|r| r.completed)),
            Some(calculate_gpa(courses)),
        )
    } else {
        (calculate_gpa(courses), None)
    };

    let bcpm = pre_health.then(|| {
        calculate_gpa(
            courses
                .iter()
                .filter(|r| BCPM_DEPARTMENTS.contains(&r.department())),
        )
    });

    Readouts {
        cumulative,
        projected,
        bcpm,
    }
}

/// The GPA of a collection as a number, through the same formatting as the
/// display string (so thresholds see exactly what the user sees).
pub fn gpa_value(courses: &CourseCollection) -> f64 {
    calculate_gpa(courses).parse().unwrap_or(0.0)
}

/// Required per-credit average over a pending term to reach `goal`.
///
/// With `credits_taken` and `grade_points` accumulated from the current
/// records, the requirement is
/// `(goal * (credits_taken + pending) - grade_points) / pending`.
///
/// # Errors
///
/// [`TranscriptError::InvalidInput`] when `pending_credits` is zero or
/// `goal` is not a finite number. Callers suppress the projection output
/// instead of surfacing this.
pub fn project_goal(
    courses: &CourseCollection,
    goal: f64,
    pending_credits: u32,
) -> Result<f64, TranscriptError> {
    if pending_credits == 0 {
        return Err(TranscriptError::InvalidInput(
            "pending credit count must be non-zero".to_string(),
        ));
    }
    if !goal.is_finite() {
        return Err(TranscriptError::InvalidInput(
            "goal GPA must be a number".to_string(),
        ));
    }

    let (grade_points, credits_taken) = tally(courses);
    let points_needed = goal * (credits_taken + u64::from(pending_credits)) as f64
        - grade_points as f64;
    Ok(points_needed / f64::from(pending_credits))
}
