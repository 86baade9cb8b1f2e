//! Greedy allocation loop.
//!
//! [`AllocationRunner`] visits students by score descending and, for each:
//! seats them in the first effective preference with space, otherwise
//! (when enabled) in a uniformly drawn category outside their list,
//! otherwise leaves them unassigned. A [`Snapshot`] is recorded after
//! every student.

use super::config::{AllocationConfig, NegativeCapacityPolicy};
use super::order::processing_order;
use super::trace::AllocationTrace;
use super::types::{Applicant, AssignmentMap, CapacityState, CategoryName, Snapshot};
use crate::error::{Result, SimError};
use crate::population::StudentId;
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Mutable state owned by a single run.
///
/// Snapshots receive copies; the live state is never shared.
#[derive(Debug)]
struct RunState {
    capacities: CapacityState,
    assignments: AssignmentMap,
}

/// How one student was placed.
enum Placement {
    Preferred(CategoryName),
    Fallback(CategoryName),
    Unassigned,
}

impl RunState {
    fn new(capacities: CapacityState) -> Self {
        Self {
            capacities,
            assignments: AssignmentMap::default(),
        }
    }

    fn place<R: Rng>(
        &mut self,
        preferences: &[CategoryName],
        allow_fallback: bool,
        rng: &mut R,
    ) -> Placement {
        for pref in preferences {
            if let Some(name) = self.capacities.take_seat(pref) {
                return Placement::Preferred(name);
            }
        }

        if !allow_fallback {
            return Placement::Unassigned;
        }

        let open = self.capacities.open_outside(preferences);
        if open.is_empty() {
            return Placement::Unassigned;
        }
        let pick = open[rng.random_range(0..open.len())];
        match self.capacities.take_at(pick) {
            Some(name) => Placement::Fallback(name),
            None => Placement::Unassigned,
        }
    }
}

/// Executes allocation runs.
pub struct AllocationRunner;

impl AllocationRunner {
    /// Runs an allocation, seeding fallback draws from `config.seed`.
    ///
    /// `capacities` is left untouched; the run works on its own copy.
    pub fn run<A: Applicant>(
        students: &[A],
        capacities: &CapacityState,
        config: &AllocationConfig,
    ) -> Result<AllocationTrace> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(students, capacities, config, &mut rng)
    }

    /// Runs an allocation drawing fallback choices from `rng`.
    ///
    /// Fails before producing any snapshot when a record lacks an id or
    /// score, when an id repeats, or when a negative capacity meets
    /// [`NegativeCapacityPolicy::Reject`].
    pub fn run_with_rng<A: Applicant, R: Rng>(
        students: &[A],
        capacities: &CapacityState,
        config: &AllocationConfig,
        rng: &mut R,
    ) -> Result<AllocationTrace> {
        let keys = validated_keys(students)?;

        if config.negative_capacity == NegativeCapacityPolicy::Reject {
            if let Some((name, seats)) = capacities.iter().find(|&(_, seats)| seats < 0) {
                return Err(SimError::NegativeCapacity {
                    category: name.to_string(),
                    seats,
                });
            }
        }

        let preferences: Vec<Vec<CategoryName>> = students
            .iter()
            .map(|s| effective_preferences(s, capacities, config.max_preferences))
            .collect();

        let unknown = unknown_categories(&preferences, capacities);
        for name in &unknown {
            tracing::warn!(
                category = %name,
                "preference names a category with no configured capacity"
            );
        }

        let mut state = RunState::new(capacities.clone());
        let mut snapshots = Vec::with_capacity(students.len());

        for (step, idx) in processing_order(&keys, config.tie_break).into_iter().enumerate() {
            let (student_id, score) = keys[idx];
            let prefs = &preferences[idx];

            let (chosen, fallback) = match state.place(prefs, config.allow_fallback, rng) {
                Placement::Preferred(name) => (Some(name), false),
                Placement::Fallback(name) => {
                    tracing::debug!(student_id, category = %name, "fallback allocation");
                    (Some(name), true)
                }
                Placement::Unassigned => (None, false),
            };

            state.assignments.record(student_id, chosen.clone());
            snapshots.push(Snapshot {
                step: step + 1,
                student_id,
                score,
                preferences: prefs.clone(),
                chosen,
                fallback,
                remaining: state.capacities.clone(),
                assignments: state.assignments.clone(),
            });
        }

        let trace = AllocationTrace::new(capacities.clone(), snapshots, unknown);
        let unassigned = trace.unassigned().len();
        tracing::info!(
            students = trace.len(),
            assigned = trace.len() - unassigned,
            unassigned,
            fallbacks = trace.fallback_count(),
            "allocation finished"
        );
        Ok(trace)
    }
}

/// Extracts `(id, score)` for every record, rejecting absent fields and
/// repeated ids.
fn validated_keys<A: Applicant>(students: &[A]) -> Result<Vec<(StudentId, f64)>> {
    let mut seen = BTreeSet::new();
    let mut keys = Vec::with_capacity(students.len());

    for (row, student) in students.iter().enumerate() {
        let id = student.id().ok_or(SimError::MissingRequiredField {
            field: "id",
            row: Some(row),
        })?;
        let score = student
            .score()
            .filter(|s| !s.is_nan())
            .ok_or(SimError::MissingRequiredField {
                field: "score",
                row: Some(row),
            })?;
        if !seen.insert(id) {
            return Err(SimError::DuplicateStudent(id));
        }
        keys.push((id, score));
    }

    Ok(keys)
}

/// Rank slots up to `max_preferences` with empty slots dropped.
///
/// Configured names reuse the capacity state's shared handle.
fn effective_preferences<A: Applicant>(
    student: &A,
    capacities: &CapacityState,
    max_preferences: usize,
) -> Vec<CategoryName> {
    (0..student.preference_slots().min(max_preferences))
        .filter_map(|slot| student.preference_at(slot))
        .map(|name| match capacities.name(name) {
            Some(shared) => Arc::clone(shared),
            None => Arc::from(name),
        })
        .collect()
}

/// Distinct preference names outside the configured set, in first-seen order.
fn unknown_categories(
    preferences: &[Vec<CategoryName>],
    capacities: &CapacityState,
) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();
    for name in preferences.iter().flatten() {
        if !capacities.contains(name) && !unknown.iter().any(|u| u.as_str() == &**name) {
            unknown.push(name.to_string());
        }
    }
    unknown
}
