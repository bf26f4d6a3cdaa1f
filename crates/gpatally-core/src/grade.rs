//! Letter grades and the fixed grade-weight table.

use std::fmt;

/// A course grade on the five-letter scale, or the unset placeholder.
///
/// `Ungraded` displays as `"-"` and marks a record whose credit/grade pair
/// is not yet meaningful (in-progress courses, blank manual rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    /// No grade recorded; displays (and serializes) as `"-"`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "-"))]
    Ungraded,
}

/// The letter grades in best-to-worst order. The position in this table is
/// both the supersession rank and the index into the weight mapping.
pub const LETTER_GRADES: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E];

impl Grade {
    /// The fixed grade weight: A=4, B=3, C=2, D=1, E=0. `Ungraded` weighs
    /// nothing (it is excluded from accumulation before this is consulted).
    pub fn weight(self) -> u32 {
        match self {
            Grade::A => 4,
            Grade::B => 3,
            Grade::C => 2,
            Grade::D => 1,
            Grade::E | Grade::Ungraded => 0,
        }
    }

    /// Whether this is one of the five letter grades (not `Ungraded`).
    pub fn is_letter(self) -> bool {
        !matches!(self, Grade::Ungraded)
    }

    /// Parse a single grade token: `"A"`–`"E"` or `"-"`.
    pub fn from_letter(token: &str) -> Option<Grade> {
        match token {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            "E" => Some(Grade::E),
            "-" => Some(Grade::Ungraded),
            _ => None,
        }
    }

    /// Strict better-than comparison on the A>B>C>D>E ordering.
    ///
    /// An `Ungraded` value is never better than anything and nothing is
    /// better than it: a completed retake never supersedes an in-progress
    /// record of the same name.
    pub fn is_better_than(self, other: Grade) -> bool {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    /// Position in [`LETTER_GRADES`] (0 = best), `None` for `Ungraded`.
    fn rank(self) -> Option<usize> {
        LETTER_GRADES.iter().position(|&g| g == self)
    }

    /// The display string for this grade.
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::Ungraded => "-",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_match_fixed_table() {
        assert_eq!(Grade::A.weight(), 4);
        assert_eq!(Grade::B.weight(), 3);
        assert_eq!(Grade::C.weight(), 2);
        assert_eq!(Grade::D.weight(), 1);
        assert_eq!(Grade::E.weight(), 0);
    }

    #[test]
    fn from_letter_round_trips() {
        for grade in LETTER_GRADES {
            assert_eq!(Grade::from_letter(grade.as_str()), Some(grade));
        }
        assert_eq!(Grade::from_letter("-"), Some(Grade::Ungraded));
    }

    #[test]
    fn from_letter_rejects_unknown_tokens() {
        assert_eq!(Grade::from_letter("P"), None);
        assert_eq!(Grade::from_letter("W"), None);
        assert_eq!(Grade::from_letter("a"), None);
        assert_eq!(Grade::from_letter(""), None);
    }

    #[test]
    fn better_than_is_strict() {
        assert!(Grade::A.is_better_than(Grade::B));
        assert!(Grade::D.is_better_than(Grade::E));
        assert!(!Grade::B.is_better_than(Grade::B));
        assert!(!Grade::C.is_better_than(Grade::A));
    }

    #[test]
    fn ungraded_never_participates_in_ordering() {
        assert!(!Grade::A.is_better_than(Grade::Ungraded));
        assert!(!Grade::Ungraded.is_better_than(Grade::E));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Grade::A.to_string(), "A");
        assert_eq!(Grade::Ungraded.to_string(), "-");
    }
}
