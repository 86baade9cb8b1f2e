//! Synthetic population generation.

use super::config::{PopulationConfig, ScoreSampling};
use super::types::{Population, StudentRecord};
use crate::error::{Result, SimError};
use crate::sampling::{
    round_score, sample_with_replacement, sample_without_replacement, ExhaustedMass,
    LevelWeights, ScoreGrid,
};
use rand::Rng;
use u_numflow::random::create_rng;

/// Generates synthetic student populations.
///
/// All scores are drawn first, then each student's preferences, from a
/// single generator. Ids run from 1 in generation order and are assigned
/// before the population is sorted by score.
///
/// # Examples
///
/// ```
/// use u_allocsim::population::{PopulationConfig, PopulationGenerator};
///
/// let config = PopulationConfig::new(["Software", "Mechanical", "Civil"])
///     .with_students(50)
///     .with_preferences(2)
///     .with_seed(7);
/// let population = PopulationGenerator::generate(&config).unwrap();
///
/// assert_eq!(population.len(), 50);
/// assert!(population.iter().all(|s| s.preferences.len() == 2));
/// ```
pub struct PopulationGenerator;

impl PopulationGenerator {
    /// Generates a population, seeding from `config.seed`.
    pub fn generate(config: &PopulationConfig) -> Result<Population> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::generate_with_rng(config, &mut rng)
    }

    /// Generates a population drawing from the supplied generator.
    pub fn generate_with_rng<R: Rng>(
        config: &PopulationConfig,
        rng: &mut R,
    ) -> Result<Population> {
        config.validate().map_err(SimError::InvalidConfig)?;

        let grid = ScoreGrid::new(config.score_min, config.score_max);
        let weights =
            LevelWeights::gaussian(&grid, config.effective_mean(), config.effective_std());

        tracing::debug!(
            n_students = config.n_students,
            mean = config.effective_mean(),
            std = config.effective_std(),
            sampling = ?config.sampling,
            "generating population"
        );

        let scores = draw_scores(&grid, &weights, config.n_students, config.sampling, rng);
        let popularity = popularity_weights(config);
        let n_prefs = config.effective_preferences();

        let records: Vec<StudentRecord> = scores
            .into_iter()
            .enumerate()
            .map(|(i, score)| {
                let picks = match &popularity {
                    Some(w) => sample_without_replacement(w, n_prefs, ExhaustedMass::Uniform, rng),
                    None => uniform_ranking(config.categories.len(), n_prefs, rng),
                };
                StudentRecord::new(
                    i as u64 + 1,
                    score,
                    picks.into_iter().map(|c| config.categories[c].clone()),
                )
            })
            .collect();

        let mut population = Population::new(records);
        population.sort_by_score();
        Ok(population)
    }
}

/// Draws `n` scores on the grid, rounded to storage precision.
fn draw_scores<R: Rng>(
    grid: &ScoreGrid,
    weights: &LevelWeights,
    n: usize,
    sampling: ScoreSampling,
    rng: &mut R,
) -> Vec<f64> {
    let mut picks = match sampling {
        ScoreSampling::WithReplacement => sample_with_replacement(weights.as_slice(), n, rng),
        ScoreSampling::WithoutReplacement => {
            sample_without_replacement(weights.as_slice(), n, ExhaustedMass::TakeLast, rng)
        }
    };

    // Grid exhausted: top up with independent draws over the full grid.
    if picks.len() < n {
        let extra = sample_with_replacement(weights.as_slice(), n - picks.len(), rng);
        picks.extend(extra);
    }

    picks
        .into_iter()
        .map(|i| round_score(grid.levels()[i]))
        .collect()
}

/// Per-category popularity in `config.categories` order, or `None` when
/// unweighted sampling applies.
fn popularity_weights(config: &PopulationConfig) -> Option<Vec<f64>> {
    let supplied = config.preference_weights.as_ref()?;
    let weights: Vec<f64> = config
        .categories
        .iter()
        .map(|name| {
            supplied
                .iter()
                .find(|(s, _)| s == name)
                .map_or(0.0, |&(_, w)| w.max(0.0))
        })
        .collect();

    if weights.iter().sum::<f64>() > 0.0 {
        Some(weights)
    } else {
        tracing::debug!("preference weights carry no mass, using uniform preferences");
        None
    }
}

/// Uniform ranking without replacement: the first `k` entries of a shuffle.
fn uniform_ranking<R: Rng>(n_categories: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n_categories).collect();
    u_numflow::random::shuffle(&mut order, rng);
    order.truncate(k);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::GRID_LEVELS;
    use std::collections::HashSet;

    fn specs() -> Vec<&'static str> {
        vec!["Software", "Mechanical", "Civil", "Chemical", "Biomedical"]
    }

    #[test]
    fn test_scores_on_grid() {
        let config = PopulationConfig::new(["Software", "Mechanical"])
            .with_students(10)
            .with_preferences(2)
            .with_score_range(0.0, 9.0)
            .with_normal(6.0, 1.25)
            .with_seed(123);
        let pop = PopulationGenerator::generate(&config).unwrap();

        let grid = ScoreGrid::new(0.0, 9.0);
        assert!(pop.iter().all(|s| grid.contains_rounded(s.score)));
    }

    #[test]
    fn test_replacement_produces_duplicates_with_tiny_std() {
        let config = PopulationConfig::new(["Software", "Mechanical", "Civil"])
            .with_students(5)
            .with_preferences(2)
            .with_score_range(0.0, 9.0)
            .with_normal(0.0, 1e-6)
            .with_seed(12345);
        let pop = PopulationGenerator::generate(&config).unwrap();

        let distinct: HashSet<u64> = pop.iter().map(|s| s.score.to_bits()).collect();
        assert!(distinct.len() < 5);
    }

    #[test]
    fn test_without_replacement_distinct_scores() {
        let config = PopulationConfig::new(specs())
            .with_students(40)
            .with_sampling(ScoreSampling::WithoutReplacement)
            .with_seed(9);
        let pop = PopulationGenerator::generate(&config).unwrap();

        let distinct: HashSet<u64> = pop.iter().map(|s| s.score.to_bits()).collect();
        assert_eq!(distinct.len(), 40);
    }

    #[test]
    fn test_without_replacement_overflow_fills() {
        let config = PopulationConfig::new(specs())
            .with_students(GRID_LEVELS + 16)
            .with_sampling(ScoreSampling::WithoutReplacement)
            .with_seed(9);
        let pop = PopulationGenerator::generate(&config).unwrap();

        assert_eq!(pop.len(), GRID_LEVELS + 16);
        let distinct: HashSet<u64> = pop.iter().map(|s| s.score.to_bits()).collect();
        assert_eq!(distinct.len(), GRID_LEVELS);
    }

    #[test]
    fn test_sorted_desc_with_generation_ids() {
        let config = PopulationConfig::new(specs()).with_students(30).with_seed(1);
        let pop = PopulationGenerator::generate(&config).unwrap();

        for w in pop.records().windows(2) {
            assert!(w[0].score >= w[1].score);
        }
        let mut ids: Vec<u64> = pop.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=30).collect::<Vec<u64>>());
    }

    #[test]
    fn test_preferences_distinct_and_capped() {
        let config = PopulationConfig::new(["A", "B", "C"])
            .with_students(20)
            .with_preferences(5)
            .with_seed(4);
        let pop = PopulationGenerator::generate(&config).unwrap();

        for s in &pop {
            assert_eq!(s.preferences.len(), 3);
            let set: HashSet<&str> = s.declared_preferences().collect();
            assert_eq!(set.len(), 3);
        }
    }

    #[test]
    fn test_weighted_preferences_bias_first_choice() {
        let config = PopulationConfig::new(["Popular", "Rare"])
            .with_students(500)
            .with_preferences(1)
            .with_preference_weights([("Popular", 9.0), ("Rare", 1.0)])
            .with_seed(21);
        let pop = PopulationGenerator::generate(&config).unwrap();

        let popular = pop
            .iter()
            .filter(|s| s.declared_preferences().next() == Some("Popular"))
            .count();
        let ratio = popular as f64 / 500.0;
        assert!((ratio - 0.9).abs() < 0.06, "ratio {ratio}");
    }

    #[test]
    fn test_weighted_zero_mass_category_still_ranked() {
        let config = PopulationConfig::new(["A", "B", "C"])
            .with_students(10)
            .with_preferences(3)
            .with_preference_weights([("A", 1.0)])
            .with_seed(2);
        let pop = PopulationGenerator::generate(&config).unwrap();

        for s in &pop {
            assert_eq!(s.declared_preferences().next(), Some("A"));
            assert_eq!(s.preferences.len(), 3);
        }
    }

    #[test]
    fn test_all_zero_weights_fall_back_to_uniform() {
        let base = PopulationConfig::new(specs()).with_students(25).with_seed(77);
        let weighted = base.clone().with_preference_weights([("Software", 0.0), ("Civil", -3.0)]);

        let a = PopulationGenerator::generate(&base).unwrap();
        let b = PopulationGenerator::generate(&weighted).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let config = PopulationConfig::new(specs()).with_students(100).with_seed(42);
        let a = PopulationGenerator::generate(&config).unwrap();
        let b = PopulationGenerator::generate(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PopulationConfig::new(["A"]).with_score_range(5.0, 1.0);
        let err = PopulationGenerator::generate(&config).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_no_categories_yields_empty_preferences() {
        let config = PopulationConfig::new(Vec::<String>::new())
            .with_students(3)
            .with_seed(1);
        let pop = PopulationGenerator::generate(&config).unwrap();
        assert!(pop.iter().all(|s| s.preferences.is_empty()));
    }
}
