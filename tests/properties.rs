//! Property tests for population generation and allocation traces.

use proptest::prelude::*;
use u_allocsim::allocation::{AllocationConfig, AllocationRunner, CapacityState};
use u_allocsim::population::{PopulationConfig, PopulationGenerator, ScoreSampling};
use u_allocsim::sampling::{round_score, ScoreGrid};

const SPECS: [&str; 5] = ["Software", "Mechanical", "Civil", "Chemical", "Biomedical"];

fn population_config(n: usize, seed: u64, without: bool) -> PopulationConfig {
    let sampling = if without {
        ScoreSampling::WithoutReplacement
    } else {
        ScoreSampling::WithReplacement
    };
    PopulationConfig::new(SPECS)
        .with_students(n)
        .with_preferences(3)
        .with_score_range(0.75, 9.0)
        .with_normal(6.0, 1.25)
        .with_sampling(sampling)
        .with_seed(seed)
}

fn capacities(seats: &[i64]) -> CapacityState {
    CapacityState::from_pairs(SPECS.iter().zip(seats.iter()).map(|(s, &n)| (*s, n))).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generated_scores_lie_on_grid(
        n in 1usize..120,
        seed in any::<u64>(),
        without in any::<bool>(),
    ) {
        let pop = PopulationGenerator::generate(&population_config(n, seed, without)).unwrap();
        let grid = ScoreGrid::new(0.75, 9.0);
        let levels: Vec<f64> = grid.levels().iter().map(|&l| round_score(l)).collect();

        prop_assert_eq!(pop.len(), n);
        for s in &pop {
            prop_assert!(levels.iter().any(|&l| l == s.score), "score {} off grid", s.score);
        }
    }

    #[test]
    fn one_snapshot_per_student_in_score_order(
        n in 0usize..80,
        seed in any::<u64>(),
        seats in prop::collection::vec(0i64..12, 5),
        fallback in any::<bool>(),
    ) {
        let pop = PopulationGenerator::generate(&population_config(n, seed, false)).unwrap();
        let config = AllocationConfig::default().with_fallback(fallback).with_seed(seed ^ 0x5eed);
        let trace = AllocationRunner::run(pop.records(), &capacities(&seats), &config).unwrap();

        prop_assert_eq!(trace.len(), n);
        for w in trace.snapshots().windows(2) {
            prop_assert!(w[0].score >= w[1].score);
        }
        if let Some(last) = trace.final_snapshot() {
            prop_assert_eq!(last.assignments.len(), n);
        }
    }

    #[test]
    fn assignment_map_grows_monotonically(
        n in 1usize..60,
        seed in any::<u64>(),
        seats in prop::collection::vec(0i64..8, 5),
    ) {
        let pop = PopulationGenerator::generate(&population_config(n, seed, false)).unwrap();
        let trace = AllocationRunner::run(
            pop.records(),
            &capacities(&seats),
            &AllocationConfig::default().with_seed(seed),
        )
        .unwrap();

        for w in trace.snapshots().windows(2) {
            let (earlier, later) = (&w[0].assignments, &w[1].assignments);
            prop_assert_eq!(later.len(), earlier.len() + 1);
            for (id, category) in earlier.iter() {
                prop_assert_eq!(later.get(id), Some(category));
            }
        }
    }

    #[test]
    fn capacity_is_conserved(
        n in 1usize..80,
        seed in any::<u64>(),
        seats in prop::collection::vec(-2i64..10, 5),
        fallback in any::<bool>(),
    ) {
        let pop = PopulationGenerator::generate(&population_config(n, seed, true)).unwrap();
        let caps = capacities(&seats);
        let config = AllocationConfig::default().with_fallback(fallback).with_seed(seed);
        let trace = AllocationRunner::run(pop.records(), &caps, &config).unwrap();

        let last = trace.final_snapshot().unwrap();
        for (name, initial) in caps.iter() {
            let remaining = last.remaining.remaining(name).unwrap();
            prop_assert!(remaining >= initial.min(0));
            prop_assert_eq!((initial - remaining) as usize, last.assignments.count_for(name));
        }
    }

    #[test]
    fn fallback_only_when_seats_remain_outside_list(
        n in 1usize..60,
        seed in any::<u64>(),
        seats in prop::collection::vec(0i64..6, 5),
    ) {
        let pop = PopulationGenerator::generate(&population_config(n, seed, false)).unwrap();
        let trace = AllocationRunner::run(
            pop.records(),
            &capacities(&seats),
            &AllocationConfig::default().with_seed(seed),
        )
        .unwrap();

        for (i, snap) in trace.snapshots().iter().enumerate() {
            let before = if i == 0 {
                trace.initial_capacities()
            } else {
                &trace.snapshots()[i - 1].remaining
            };
            match &snap.chosen {
                Some(chosen) if snap.fallback => {
                    prop_assert!(!snap.preferences.contains(chosen));
                    prop_assert!(snap.preferences.iter().all(|p| !before.has_space(p)));
                }
                Some(chosen) => {
                    let first_open = snap.preferences.iter().find(|p| before.has_space(p));
                    prop_assert_eq!(first_open, Some(chosen));
                }
                None => {
                    prop_assert_eq!(before.open_seats(), 0);
                }
            }
        }
    }

    #[test]
    fn identical_seeds_give_identical_traces(n in 1usize..60, seed in any::<u64>()) {
        let config = population_config(n, seed, false);
        let caps = capacities(&[3, 3, 3, 3, 3]);
        let alloc = AllocationConfig::default().with_seed(seed.wrapping_add(1));

        let first = PopulationGenerator::generate(&config).unwrap();
        let second = PopulationGenerator::generate(&config).unwrap();
        prop_assert_eq!(&first, &second);

        let a = AllocationRunner::run(first.records(), &caps, &alloc).unwrap();
        let b = AllocationRunner::run(second.records(), &caps, &alloc).unwrap();
        prop_assert_eq!(a, b);
    }
}
