//! Course-row parsing: from reconstructed line strings to course records.
//!
//! Transcript pages mix course rows with headers, addresses, and GPA
//! summary blocks. A cheap textual filter selects candidate rows, then a
//! structural decomposition recovers the course code, free-length course
//! name, and the trailing data columns despite the variable column count.

use std::sync::LazyLock;

use regex::Regex;

use crate::course::CourseRecord;
use crate::error::{ImportWarning, ImportWarningCode};
use crate::grade::Grade;

/// Summary lines carrying credit totals that must not parse as courses.
const GPA_SUMMARY_MARKERS: [&str; 5] = [
    "Overall Cum GPA",
    "UMBC Cum GPA",
    "UMBC Term GPA",
    "Overall Term GPA",
    "Test Trans GPA",
];

/// Grades that carry no GPA weight; rows with one are dropped entirely.
const NON_GPA_GRADES: [&str; 3] = ["P", "W", "T"];

/// A token "parses as a number" when it begins with one, matching the
/// permissive numeric prefix parse the column detection relies on.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)").expect("static pattern"));

/// Candidate filter: course rows always format credit and quality-point
/// values with two decimals, and summary rows are excluded by marker.
pub fn is_course_row(line: &str) -> bool {
    line.contains(".00") && !GPA_SUMMARY_MARKERS.iter().any(|m| line.contains(m))
}

/// Parse one candidate course line.
///
/// Returns `Ok(Some(record))` for a parsed row, `Ok(None)` for a valid row
/// that carries no GPA weight (pass/withdraw/transfer), and `Err(warning)`
/// for a line that cannot be decomposed. The caller skips warned lines and
/// continues — a malformed row never fails the import.
pub fn parse_course_row(line: &str) -> Result<Option<CourseRecord>, ImportWarning> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let (subject, number) = match tokens.as_slice() {
        [subject, number, ..] => (*subject, *number),
        _ => {
            return Err(malformed(line, "fewer than two tokens for the course code"));
        }
    };

    // The course name runs until the first numeric column. Names are never
    // purely numeric, so this is where the data columns begin.
    let rest = &tokens[2..];
    let name_len = rest
        .iter()
        .position(|token| LEADING_NUMBER.is_match(token))
        .ok_or_else(|| malformed(line, "no numeric column found after the course name"))?;

    let name = course_name(subject, number, &rest[..name_len]);
    let columns = &rest[name_len..];

    if columns.len() == 4 {
        // {attempted, earned, grade, quality points}: a completed course.
        let grade_token = columns[2];
        if NON_GPA_GRADES.contains(&grade_token) {
            return Ok(None);
        }
        let grade = Grade::from_letter(grade_token)
            .filter(|g| g.is_letter())
            .ok_or_else(|| {
                ImportWarning::new(
                    ImportWarningCode::UnknownGrade,
                    format!("grade {grade_token:?} is not on the A-E scale"),
                )
                .with_line(line)
            })?;
        let credits = leading_integer(columns[0])
            .ok_or_else(|| malformed(line, "attempted-credits column is not numeric"))?;
        Ok(Some(CourseRecord::new(name, credits, grade, true)))
    } else {
        // {attempted, earned, quality points} (or any other count): an
        // in-progress row with no grade yet.
        let credits = leading_integer(columns[0])
            .ok_or_else(|| malformed(line, "attempted-credits column is not numeric"))?;
        Ok(Some(CourseRecord::in_progress(name, credits)))
    }
}

fn malformed(line: &str, description: &str) -> ImportWarning {
    ImportWarning::new(ImportWarningCode::MalformedRow, description).with_line(line)
}

/// Join the course code and name tokens: `"CMSC 201 Computer Science I"`.
fn course_name(subject: &str, number: &str, name_tokens: &[&str]) -> String {
    let mut name = format!("{subject} {number}");
    for token in name_tokens {
        name.push(' ');
        name.push_str(token);
    }
    name
}

/// Integer prefix of a token: `"3.00"` → 3. `None` when the token does not
/// start with a digit.
fn leading_integer(token: &str) -> Option<u32> {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
