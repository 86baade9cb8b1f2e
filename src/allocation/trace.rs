//! Allocation results: the snapshot sequence and final statistics.

use super::types::{AssignmentMap, CapacityState, CategoryName, Snapshot};
use crate::population::StudentId;

/// Score range and head count of one category in the final allocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategorySummary {
    /// Category name.
    pub category: CategoryName,
    /// Lowest score admitted (the effective cutoff).
    pub min_score: f64,
    /// Highest score admitted.
    pub max_score: f64,
    /// Students placed in the category.
    pub count: usize,
}

/// Ordered snapshots of one allocation run.
///
/// Steps are 1-based; the last snapshot is the final outcome.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationTrace {
    initial: CapacityState,
    snapshots: Vec<Snapshot>,
    unknown_categories: Vec<String>,
}

impl AllocationTrace {
    pub(crate) fn new(
        initial: CapacityState,
        snapshots: Vec<Snapshot>,
        unknown_categories: Vec<String>,
    ) -> Self {
        Self {
            initial,
            snapshots,
            unknown_categories,
        }
    }

    /// Snapshot at a 1-based step, or `None` when out of range.
    pub fn step(&self, step: usize) -> Option<&Snapshot> {
        step.checked_sub(1).and_then(|i| self.snapshots.get(i))
    }

    /// The last snapshot; `None` for an empty population.
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Final assignment map (empty for an empty population).
    pub fn final_assignments(&self) -> AssignmentMap {
        self.final_snapshot()
            .map(|s| s.assignments.clone())
            .unwrap_or_default()
    }

    /// Capacities the run started from.
    pub fn initial_capacities(&self) -> &CapacityState {
        &self.initial
    }

    /// Capacities after the last student (the initial ones if none ran).
    pub fn final_capacities(&self) -> &CapacityState {
        self.final_snapshot().map_or(&self.initial, |s| &s.remaining)
    }

    /// All snapshots in processing order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Consumes the trace, returning its snapshots.
    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }

    /// Iterates snapshots in processing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Number of steps (one per student).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no student was processed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Preference names that matched no configured category.
    pub fn unknown_categories(&self) -> &[String] {
        &self.unknown_categories
    }

    /// Students left unassigned, in processing order.
    pub fn unassigned(&self) -> Vec<StudentId> {
        self.snapshots
            .iter()
            .filter(|s| s.chosen.is_none())
            .map(|s| s.student_id)
            .collect()
    }

    /// Students placed through the fallback rule.
    pub fn fallback_count(&self) -> usize {
        self.snapshots.iter().filter(|s| s.fallback).count()
    }

    /// Seats consumed in `category`: initial minus final remaining.
    pub fn seats_taken(&self, category: &str) -> Option<i64> {
        let start = self.initial.remaining(category)?;
        let end = self.final_capacities().remaining(category)?;
        Some(start - end)
    }

    /// Per-category score range and count, in configuration order.
    ///
    /// Categories that received nobody are omitted.
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        self.initial
            .names()
            .filter_map(|name| {
                let scores: Vec<f64> = self
                    .snapshots
                    .iter()
                    .filter(|s| s.chosen.as_ref() == Some(name))
                    .map(|s| s.score)
                    .collect();
                if scores.is_empty() {
                    return None;
                }
                Some(CategorySummary {
                    category: CategoryName::clone(name),
                    min_score: scores.iter().copied().fold(f64::INFINITY, f64::min),
                    max_score: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                    count: scores.len(),
                })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a AllocationTrace {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
