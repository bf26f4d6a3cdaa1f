//! Integration tests for the `gpa` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("gpatally").unwrap()
}

/// Build a one-page transcript PDF with one course row per entry of
/// `rows`, each row a (name, attempted, earned, grade, points) tuple laid
/// out in the fixed column positions.
fn transcript_pdf(rows: &[(&str, &str, &str, &str, &str)]) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut content = String::new();
    for (i, (name, attempted, earned, grade, points)) in rows.iter().enumerate() {
        let y = 700 - 20 * i as i64;
        for (x, text) in [
            (72, *name),
            (300, *attempted),
            (350, *earned),
            (400, *grade),
            (450, *points),
        ] {
            if !text.is_empty() {
                content.push_str(&format!("BT /F1 10 Tf {x} {y} Td ({text}) Tj ET\n"));
            }
        }
    }

    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        },
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    });

    if let Ok(page_obj) = doc.get_object_mut(page_id) {
        if let Ok(dict) = page_obj.as_dict_mut() {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}

fn two_course_fixture() -> tempfile::NamedTempFile {
    write_temp_pdf(&transcript_pdf(&[
        ("CMSC 201 Computer Science I", "3.00", "3.00", "B", "9.00"),
        ("CMSC 202 Computer Science II", "3.00", "3.00", "A", "12.00"),
    ]))
}

// --- Readout tests ---

#[test]
fn gpa_prints_cumulative_readout() {
    let f = two_course_fixture();

    cmd()
        .args(["gpa", f.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cumulative GPA: 3.500"));
}

#[test]
fn gpa_bcpm_readout_requires_pre_health() {
    let f = write_temp_pdf(&transcript_pdf(&[
        ("BIOL 141 Foundations of Biology", "4.00", "4.00", "A", "16.00"),
        ("ENGL 100 Composition", "3.00", "3.00", "C", "6.00"),
    ]));

    cmd()
        .args(["gpa", f.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("BCPM").not());

    cmd()
        .args(["gpa", f.path().to_str().unwrap(), "--pre-health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BCPM GPA: 4.000"));
}

#[test]
fn gpa_honors_readout_requires_graduating_soon() {
    let f = write_temp_pdf(&transcript_pdf(&[(
        "CMSC 201 Computer Science I",
        "3.00",
        "3.00",
        "A",
        "12.00",
    )]));

    cmd()
        .args(["gpa", f.path().to_str().unwrap(), "--graduating-soon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summa cum laude"));

    cmd()
        .args(["gpa", f.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Latin honors").not());
}

#[test]
fn gpa_danger_signal_below_threshold() {
    let f = write_temp_pdf(&transcript_pdf(&[(
        "CMSC 201 Computer Science I",
        "3.00",
        "3.00",
        "D",
        "3.00",
    )]));

    cmd()
        .args(["gpa", f.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("DANGER"));
}

#[test]
fn gpa_scholarship_warning_for_merit_scholars() {
    // A single B sits at 3.000, inside the warning band but above danger.
    let f = write_temp_pdf(&transcript_pdf(&[(
        "CMSC 201 Computer Science I",
        "3.00",
        "3.00",
        "B",
        "9.00",
    )]));

    cmd()
        .args(["gpa", f.path().to_str().unwrap(), "--merit-scholar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"));

    cmd()
        .args(["gpa", f.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING").not());
}

// --- Goal projection tests ---

#[test]
fn gpa_goal_projection_matches_worked_example() {
    let f = two_course_fixture();

    cmd()
        .args([
            "gpa",
            f.path().to_str().unwrap(),
            "--goal",
            "3.5",
            "--pending-credits",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("you would need a 0.500"));
}

#[test]
fn gpa_non_numeric_goal_suppresses_projection() {
    let f = two_course_fixture();

    cmd()
        .args([
            "gpa",
            f.path().to_str().unwrap(),
            "--goal",
            "soon",
            "--pending-credits",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("you would need").not());
}

#[test]
fn gpa_zero_pending_credits_suppresses_projection() {
    let f = two_course_fixture();

    cmd()
        .args([
            "gpa",
            f.path().to_str().unwrap(),
            "--goal",
            "3.5",
            "--pending-credits",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("you would need").not());
}

// --- JSON output tests ---

#[test]
fn gpa_json_format_is_machine_readable() {
    let f = two_course_fixture();

    let output = cmd()
        .args(["gpa", f.path().to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["cumulative"], "3.500");
    assert_eq!(v["imported"], 2);
    assert_eq!(v["graduation_danger"], false);
}

#[test]
fn gpa_json_includes_projection_when_valid() {
    let f = two_course_fixture();

    let output = cmd()
        .args([
            "gpa",
            f.path().to_str().unwrap(),
            "--format",
            "json",
            "--goal",
            "3.5",
            "--pending-credits",
            "3",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["goal_projection"]["required_average"], "0.500");
}

// --- Error handling tests ---

#[test]
fn gpa_file_not_found_error() {
    cmd()
        .args(["gpa", "nonexistent_transcript.pdf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn gpa_invalid_pdf_error() {
    let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    f.write_all(b"this is not a pdf").unwrap();
    f.flush().unwrap();

    cmd()
        .args(["gpa", f.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error importing"));
}
