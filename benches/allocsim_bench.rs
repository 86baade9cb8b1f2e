//! Criterion benchmarks for population generation and allocation runs.
//!
//! Uses the ten-category layout and population sizes a what-if session
//! typically explores.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_allocsim::allocation::{AllocationConfig, AllocationRunner, CapacityState};
use u_allocsim::population::{PopulationConfig, PopulationGenerator, ScoreSampling};

const SPECS: [(&str, i64); 10] = [
    ("Biomedical", 35),
    ("Chemical and Materials", 80),
    ("Civil and Environmental", 210),
    ("Computer Systems", 100),
    ("Electrical and Electronic", 100),
    ("Engineering Science", 80),
    ("Mechanical", 125),
    ("Mechatronics", 105),
    ("Software", 125),
    ("Structural", 80),
];

fn population_config(n: usize, sampling: ScoreSampling) -> PopulationConfig {
    PopulationConfig::new(SPECS.iter().map(|(s, _)| *s))
        .with_students(n)
        .with_score_range(0.75, 9.0)
        .with_normal(6.0, 1.25)
        .with_sampling(sampling)
        .with_seed(42)
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    for &n in &[100usize, 1000, 5000] {
        for (label, sampling) in [
            ("with", ScoreSampling::WithReplacement),
            ("without", ScoreSampling::WithoutReplacement),
        ] {
            let config = population_config(n, sampling);
            group.bench_with_input(BenchmarkId::new(label, n), &config, |b, config| {
                b.iter(|| {
                    let pop = PopulationGenerator::generate(black_box(config)).unwrap();
                    black_box(pop)
                })
            });
        }
    }
    group.finish();
}

fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");
    group.sample_size(10);

    let caps = CapacityState::from_pairs(SPECS).unwrap();
    let alloc = AllocationConfig::default().with_seed(123);

    for &n in &[100usize, 1000, 2000] {
        let config = population_config(n, ScoreSampling::WithReplacement);
        let pop = PopulationGenerator::generate(&config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &pop, |b, pop| {
            b.iter(|| {
                let trace =
                    AllocationRunner::run(black_box(pop.records()), &caps, &alloc).unwrap();
                black_box(trace)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_allocate);
criterion_main!(benches);
