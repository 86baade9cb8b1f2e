//! Independent what-if runs over several seeds.

use super::config::AllocationConfig;
use super::engine::AllocationRunner;
use super::trace::AllocationTrace;
use super::types::{Applicant, CapacityState};
use crate::error::Result;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs one allocation per seed, each with its own capacity and
/// assignment state.
///
/// `config.seed` is replaced by each entry of `seeds`. Results are returned
/// in seed order. With the `parallel` feature the runs execute on the rayon
/// pool; the traces are identical either way.
///
/// # Examples
///
/// ```
/// use u_allocsim::allocation::{run_scenarios, AllocationConfig, CapacityState};
/// use u_allocsim::population::StudentRecord;
///
/// let students = vec![
///     StudentRecord::new(1, 9.0, ["A"]),
///     StudentRecord::new(2, 8.0, ["A"]),
/// ];
/// let caps = CapacityState::from_pairs([("A", 1), ("B", 1), ("C", 1)]).unwrap();
/// let runs = run_scenarios(&students, &caps, &AllocationConfig::default(), &[1, 2, 3]);
/// assert_eq!(runs.len(), 3);
/// assert!(runs.iter().all(|r| r.as_ref().unwrap().len() == 2));
/// ```
pub fn run_scenarios<A: Applicant + Sync>(
    students: &[A],
    capacities: &CapacityState,
    config: &AllocationConfig,
    seeds: &[u64],
) -> Vec<Result<AllocationTrace>> {
    let run_one = |&seed: &u64| {
        let config = config.clone().with_seed(seed);
        AllocationRunner::run(students, capacities, &config)
    };

    #[cfg(feature = "parallel")]
    let results = seeds.par_iter().map(run_one).collect();

    #[cfg(not(feature = "parallel"))]
    let results = seeds.iter().map(run_one).collect();

    results
}
