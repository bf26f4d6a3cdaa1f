//! Serde serialization round-trip tests for the public data types.

#![cfg(feature = "serde")]

use gpatally_core::*;

/// Serialize to JSON, deserialize back, assert equality.
fn roundtrip<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("serialize failed");
    let restored: T = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(*value, restored, "round-trip mismatch for JSON: {json}");
}

#[test]
fn serde_grade() {
    for grade in LETTER_GRADES {
        roundtrip(&grade);
    }
    roundtrip(&Grade::Ungraded);
}

#[test]
fn serde_ungraded_serializes_as_dash() {
    let json = serde_json::to_string(&Grade::Ungraded).unwrap();
    assert_eq!(json, "\"-\"");
}

#[test]
fn serde_course_record() {
    roundtrip(&CourseRecord::new(
        "CMSC 201 Computer Science I",
        3,
        Grade::B,
        true,
    ));
    roundtrip(&CourseRecord::in_progress("CMSC 341 Data Structures", 3));
}

#[test]
fn serde_course_collection() {
    let mut courses = CourseCollection::new();
    courses.add(CourseRecord::new("MATH 151 Calculus I", 4, Grade::A, true));
    courses.add(CourseRecord::in_progress("PHYS 121 Physics", 4));
    roundtrip(&courses);
}

#[test]
fn serde_fragment_and_page() {
    let fragment = TextFragment {
        x: 72.0,
        y: 92.0,
        text: "CMSC".to_string(),
        font_name: "Helvetica".to_string(),
        height: 10.0,
    };
    roundtrip(&fragment);
    roundtrip(&PageText {
        number: 1,
        width: 612.0,
        height: 792.0,
        rotation: 0,
        fragments: vec![fragment],
    });
}

#[test]
fn serde_import_warning() {
    let mut warning = ImportWarning::new(
        ImportWarningCode::MalformedRow,
        "no numeric column found",
    )
    .with_line("BIOL 100L");
    warning.page = Some(2);
    roundtrip(&warning);
    roundtrip(&ImportWarningCode::Other("custom".to_string()));
}

#[test]
fn serde_readouts_and_advisories() {
    roundtrip(&Readouts {
        cumulative: "3.500".to_string(),
        projected: Some("3.250".to_string()),
        bcpm: None,
    });
    roundtrip(&Advisories {
        honors: Some(HonorsTier::CumLaude),
        graduation_danger: false,
        scholarship_warning: true,
    });
    roundtrip(&AdvisoryFlags {
        merit_scholar: true,
        pre_health: false,
        graduating_soon: true,
    });
}
