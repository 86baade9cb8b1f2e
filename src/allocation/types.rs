//! Allocation state, snapshots and the applicant trait.

use crate::error::{Result, SimError};
use crate::population::{StudentId, StudentRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared, immutable category name.
///
/// Snapshots copy their maps by value; names are shared so each copy only
/// duplicates the map structure.
pub type CategoryName = Arc<str>;

/// An input record the allocation engine can rank and place.
///
/// Records lacking an id or score make the run fail with
/// [`SimError::MissingRequiredField`] before anything is allocated.
///
/// # Examples
///
/// ```ignore
/// struct Row { id: Option<u64>, score: Option<f64>, choices: Vec<String> }
///
/// impl Applicant for Row {
///     fn id(&self) -> Option<u64> { self.id }
///     fn score(&self) -> Option<f64> { self.score }
///     fn preference_slots(&self) -> usize { self.choices.len() }
///     fn preference_at(&self, slot: usize) -> Option<&str> {
///         self.choices.get(slot).map(String::as_str)
///     }
/// }
/// ```
pub trait Applicant {
    /// Student identifier, if present.
    fn id(&self) -> Option<StudentId>;

    /// Merit score, if present. A NaN score counts as absent.
    fn score(&self) -> Option<f64>;

    /// Number of rank slots, including empty ones.
    fn preference_slots(&self) -> usize;

    /// Category at a zero-based rank slot, or `None` for an empty slot.
    fn preference_at(&self, slot: usize) -> Option<&str>;
}

impl Applicant for StudentRecord {
    fn id(&self) -> Option<StudentId> {
        Some(self.id)
    }

    fn score(&self) -> Option<f64> {
        Some(self.score)
    }

    fn preference_slots(&self) -> usize {
        self.preferences.len()
    }

    fn preference_at(&self, slot: usize) -> Option<&str> {
        self.preferences.get(slot).and_then(|p| p.as_deref())
    }
}

/// Remaining seats per category, in configuration order.
///
/// The configured categories form the closed set the engine allocates
/// into. Values at or below zero mean "no space".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityState {
    entries: Vec<(CategoryName, i64)>,
}

impl CapacityState {
    /// Builds the state from `(name, seats)` pairs.
    ///
    /// Names must be non-empty and unique. Negative seat counts are kept;
    /// whether they are tolerated is decided per run.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_allocsim::allocation::CapacityState;
    ///
    /// let caps = CapacityState::from_pairs([("Software", 2), ("Civil", 0)]).unwrap();
    /// assert_eq!(caps.remaining("Software"), Some(2));
    /// assert!(!caps.has_space("Civil"));
    /// assert_eq!(caps.remaining("Unknown"), None);
    /// ```
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(CategoryName, i64)> = Vec::new();
        for (name, seats) in pairs {
            let name = name.as_ref();
            if name.trim().is_empty() {
                return Err(SimError::InvalidConfig("category name must not be empty".into()));
            }
            if entries.iter().any(|(n, _)| n.as_ref() == name) {
                return Err(SimError::InvalidConfig(format!("duplicate category {name:?}")));
            }
            entries.push((Arc::from(name), seats));
        }
        Ok(Self { entries })
    }

    /// Remaining seats, or `None` for a category outside the configured set.
    pub fn remaining(&self, name: &str) -> Option<i64> {
        self.position(name).map(|i| self.entries[i].1)
    }

    /// Whether `name` is configured and has at least one seat left.
    pub fn has_space(&self, name: &str) -> bool {
        self.remaining(name).is_some_and(|r| r > 0)
    }

    /// Whether `name` belongs to the configured set.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// `(name, remaining)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryName, i64)> {
        self.entries.iter().map(|(n, r)| (n, *r))
    }

    /// Category names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &CategoryName> {
        self.entries.iter().map(|(n, _)| n)
    }

    /// Shared handle for a configured name.
    pub fn name(&self, name: &str) -> Option<&CategoryName> {
        self.position(name).map(|i| &self.entries[i].0)
    }

    /// Sum of positive remaining seats.
    pub fn open_seats(&self) -> i64 {
        self.entries.iter().map(|(_, r)| (*r).max(0)).sum()
    }

    /// Number of configured categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no categories are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n.as_ref() == name)
    }

    /// Takes one seat in `name` if it has space.
    pub(crate) fn take_seat(&mut self, name: &str) -> Option<CategoryName> {
        let i = self.position(name)?;
        self.take_at(i)
    }

    pub(crate) fn take_at(&mut self, index: usize) -> Option<CategoryName> {
        let (name, remaining) = self.entries.get_mut(index)?;
        if *remaining > 0 {
            *remaining -= 1;
            Some(Arc::clone(name))
        } else {
            None
        }
    }

    /// Indices of categories with space that are not in `excluded`,
    /// in configuration order.
    pub(crate) fn open_outside(&self, excluded: &[CategoryName]) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, (name, remaining))| *remaining > 0 && !excluded.contains(name))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Cumulative student → category assignments of one run.
///
/// `None` marks a processed student left unassigned. Entries are only ever
/// added, never changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentMap {
    entries: BTreeMap<StudentId, Option<CategoryName>>,
}

impl AssignmentMap {
    /// Outcome for a student: `None` if not yet processed,
    /// `Some(None)` if processed but unassigned.
    pub fn get(&self, id: StudentId) -> Option<Option<&str>> {
        self.entries.get(&id).map(|c| c.as_deref())
    }

    /// Whether the student has been processed.
    pub fn contains(&self, id: StudentId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of processed students.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no student has been processed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by student id.
    pub fn iter(&self) -> impl Iterator<Item = (StudentId, Option<&str>)> {
        self.entries.iter().map(|(id, c)| (*id, c.as_deref()))
    }

    /// Students placed in `category`.
    pub fn count_for(&self, category: &str) -> usize {
        self.entries
            .values()
            .filter(|c| c.as_deref() == Some(category))
            .count()
    }

    /// Students processed but left unassigned.
    pub fn unassigned_count(&self) -> usize {
        self.entries.values().filter(|c| c.is_none()).count()
    }

    pub(crate) fn record(&mut self, id: StudentId, category: Option<CategoryName>) {
        self.entries.insert(id, category);
    }
}

/// Immutable view of the run after processing exactly one student.
///
/// `remaining` and `assignments` are full copies, so any step can be
/// inspected without replaying the steps before it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// 1-based position in processing order.
    pub step: usize,
    /// Student processed at this step.
    pub student_id: StudentId,
    /// That student's score.
    pub score: f64,
    /// Effective preference list considered for the student.
    pub preferences: Vec<CategoryName>,
    /// Category the student was placed in, if any.
    pub chosen: Option<CategoryName>,
    /// Whether `chosen` came from the fallback rule.
    pub fallback: bool,
    /// Seats left in every category after this step.
    pub remaining: CapacityState,
    /// All assignments made up to and including this step.
    pub assignments: AssignmentMap,
}
