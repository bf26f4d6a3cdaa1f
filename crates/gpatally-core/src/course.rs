//! Course records and the owning collection.

use crate::grade::Grade;

/// A single course: the unit of GPA accounting.
///
/// Invariant: `credits` and `grade` are either both unset (0 / `Ungraded`)
/// or both meaningful. Identity is the `name` string; see
/// [`CourseCollection::merge_imported`] for the retake-supersession rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseRecord {
    /// Full course name, e.g. `"CMSC 201 Computer Science I"`.
    pub name: String,
    /// Attempted credits.
    pub credits: u32,
    /// Letter grade, or `Ungraded` for in-progress rows.
    pub grade: Grade,
    /// Whether the course was imported as completed.
    pub completed: bool,
}

impl CourseRecord {
    /// Create a record with explicit fields.
    pub fn new(name: impl Into<String>, credits: u32, grade: Grade, completed: bool) -> Self {
        Self {
            name: name.into(),
            credits,
            grade,
            completed,
        }
    }

    /// Create an in-progress record (no grade yet).
    pub fn in_progress(name: impl Into<String>, credits: u32) -> Self {
        Self::new(name, credits, Grade::Ungraded, false)
    }

    /// The department prefix: the first whitespace-delimited token of the
    /// name (e.g. `"CMSC"`), or `""` for an empty name.
    pub fn department(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Whether the record contributes to GPA accumulation.
    pub fn counts_toward_gpa(&self) -> bool {
        self.credits > 0 && self.grade.is_letter()
    }
}

/// The result of merging an imported record into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    /// Index of the prior record removed by supersession, if any. The
    /// presentation layer uses this to drop the corresponding row before
    /// rendering the inserted one.
    pub removed: Option<usize>,
}

/// Insertion-ordered collection of course records.
///
/// Owned by the caller and passed by reference into the parser and
/// calculator; there is no ambient global state. Uniqueness by name is
/// enforced only through the supersession rule — duplicate names with
/// equal or worse grades, and duplicate in-progress rows, coexist.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseCollection {
    records: Vec<CourseRecord>,
}

impl CourseCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record (manual entry path). Returns its index.
    pub fn add(&mut self, record: CourseRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Record at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&CourseRecord> {
        self.records.get(index)
    }

    /// Mutable record at `index` (the edit path for a presentation layer).
    pub fn get_mut(&mut self, index: usize) -> Option<&mut CourseRecord> {
        self.records.get_mut(index)
    }

    /// Remove the record at `index`, preserving insertion order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<CourseRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CourseRecord> {
        self.records.iter()
    }

    /// All records as a slice.
    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    /// Index of the first record with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    /// Whether any record is marked completed.
    pub fn any_completed(&self) -> bool {
        self.records.iter().any(|r| r.completed)
    }

    /// Whether any record carries a letter grade.
    pub fn has_graded(&self) -> bool {
        self.records.iter().any(|r| r.grade.is_letter())
    }

    /// Merge an imported record under the retake-supersession rule.
    ///
    /// For a completed record, if an earlier record of the same name exists
    /// and the new grade is strictly better (A>B>C>D>E), the earlier record
    /// is removed first. In every case the new record is then appended —
    /// equal or worse retakes are inserted alongside, and in-progress rows
    /// are never deduplicated.
    pub fn merge_imported(&mut self, record: CourseRecord) -> Merge {
        let mut removed = None;
        if record.completed {
            if let Some(index) = self.find_by_name(&record.name) {
                if record.grade.is_better_than(self.records[index].grade) {
                    self.records.remove(index);
                    removed = Some(index);
                }
            }
        }
        self.records.push(record);
        Merge { removed }
    }
}

impl<'a> IntoIterator for &'a CourseCollection {
    type Item = &'a CourseRecord;
    type IntoIter = std::slice::Iter<'a, CourseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
