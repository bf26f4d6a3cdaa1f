//! Advisory alerts derived from the GPA: honors tiers, academic danger,
//! and the scholarship-minimum warning.

use std::fmt;

use crate::course::CourseCollection;
use crate::gpa::gpa_value;

/// Opt-in student attributes that gate advisory output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvisoryFlags {
    /// Merit scholarship holder: warn below the retention minimum.
    pub merit_scholar: bool,
    /// Pre-health track: the BCPM readout is displayed.
    pub pre_health: bool,
    /// Graduating soon: honors tiers are evaluated.
    pub graduating_soon: bool,
}

/// Latin honors tier at graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HonorsTier {
    SummaCumLaude,
    MagnaCumLaude,
    CumLaude,
}

impl HonorsTier {
    /// The display name of the tier.
    pub fn as_str(self) -> &'static str {
        match self {
            HonorsTier::SummaCumLaude => "Summa cum laude",
            HonorsTier::MagnaCumLaude => "Magna cum laude",
            HonorsTier::CumLaude => "Cum laude",
        }
    }
}

impl fmt::Display for HonorsTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warning text shown to merit scholars below the retention minimum.
pub const SCHOLARSHIP_WARNING_TEXT: &str = "Merit scholars must maintain a minimum \
cumulative 3.25 grade point average in order to remain eligible for their scholarship.";

/// The advisory signals derived from a GPA value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Advisories {
    /// Honors tier reached, when graduating soon.
    pub honors: Option<HonorsTier>,
    /// GPA is below the graduation-risk line (2.2) with at least one
    /// graded course on record.
    pub graduation_danger: bool,
    /// Merit scholar near or below the scholarship minimum (GPA below 3.4,
    /// not already in the danger band).
    pub scholarship_warning: bool,
}

/// Evaluate the advisories for a GPA value.
///
/// `has_graded_course` suppresses the danger signal for a collection with
/// no grades at all, whose GPA reads as zero.
pub fn evaluate(gpa: f64, flags: AdvisoryFlags, has_graded_course: bool) -> Advisories {
    let honors = if flags.graduating_soon {
        if gpa > 3.95 {
            Some(HonorsTier::SummaCumLaude)
        } else if gpa > 3.75 && gpa < 3.9499 {
            Some(HonorsTier::MagnaCumLaude)
        } else if gpa > 3.5 && gpa < 3.7499 {
            Some(HonorsTier::CumLaude)
        } else {
            None
        }
    } else {
        None
    };

    let mut graduation_danger = false;
    let mut scholarship_warning = false;
    if gpa < 2.2 {
        graduation_danger = has_graded_course;
    } else if gpa < 3.4 {
        scholarship_warning = flags.merit_scholar;
    }

    Advisories {
        honors,
        graduation_danger,
        scholarship_warning,
    }
}

/// Evaluate the advisories for a collection, using the same all-records
/// GPA the projected readout displays.
pub fn evaluate_for(courses: &CourseCollection, flags: AdvisoryFlags) -> Advisories {
    evaluate(gpa_value(courses), flags, courses.has_graded())
}
