//! Population generation configuration.

/// How score levels are drawn from the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreSampling {
    /// Independent draws; repeated scores are expected.
    #[default]
    WithReplacement,

    /// Each drawn level is removed until the grid is exhausted, after which
    /// the remaining students fall back to independent draws.
    WithoutReplacement,
}

/// Configuration for [`PopulationGenerator`](super::PopulationGenerator).
///
/// # Examples
///
/// ```
/// use u_allocsim::population::{PopulationConfig, ScoreSampling};
///
/// let config = PopulationConfig::new(["Software", "Mechanical", "Civil"])
///     .with_students(200)
///     .with_score_range(0.75, 9.0)
///     .with_normal(6.0, 1.25)
///     .with_sampling(ScoreSampling::WithoutReplacement)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationConfig {
    /// Number of students to generate.
    pub n_students: usize,

    /// Category names preferences are drawn from, in a fixed order.
    pub categories: Vec<String>,

    /// Requested preferences per student; capped at `categories.len()`.
    pub n_preferences: usize,

    /// Lower end of the score range.
    pub score_min: f64,

    /// Upper end of the score range.
    pub score_max: f64,

    /// Gaussian mean. `None` uses the centre of the range.
    pub mean: Option<f64>,

    /// Gaussian standard deviation. `None` uses one sixth of the range.
    pub std: Option<f64>,

    /// Score sampling mode.
    pub sampling: ScoreSampling,

    /// Optional popularity weight per category.
    ///
    /// Categories missing from the list weigh zero; negative weights are
    /// treated as zero.
    pub preference_weights: Option<Vec<(String, f64)>>,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            n_students: 100,
            categories: Vec::new(),
            n_preferences: 5,
            score_min: 4.0,
            score_max: 9.0,
            mean: None,
            std: None,
            sampling: ScoreSampling::default(),
            preference_weights: None,
            seed: None,
        }
    }
}

impl PopulationConfig {
    /// Creates a default configuration over the given categories.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_students(mut self, n: usize) -> Self {
        self.n_students = n;
        self
    }

    pub fn with_preferences(mut self, n: usize) -> Self {
        self.n_preferences = n;
        self
    }

    pub fn with_score_range(mut self, min: f64, max: f64) -> Self {
        self.score_min = min;
        self.score_max = max;
        self
    }

    /// Sets the Gaussian mean and standard deviation.
    pub fn with_normal(mut self, mean: f64, std: f64) -> Self {
        self.mean = Some(mean);
        self.std = Some(std);
        self
    }

    pub fn with_sampling(mut self, sampling: ScoreSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets popularity weights, biasing which categories rank highly.
    pub fn with_preference_weights<I, S>(mut self, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.preference_weights = Some(weights.into_iter().map(|(s, w)| (s.into(), w)).collect());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Gaussian mean actually used for sampling.
    pub fn effective_mean(&self) -> f64 {
        self.mean
            .unwrap_or((self.score_min + self.score_max) / 2.0)
    }

    /// Gaussian standard deviation actually used for sampling.
    pub fn effective_std(&self) -> f64 {
        self.std.unwrap_or((self.score_max - self.score_min) / 6.0)
    }

    /// Preferences each generated student receives.
    pub fn effective_preferences(&self) -> usize {
        self.n_preferences.min(self.categories.len())
    }

    /// Validates the configuration.
    ///
    /// A non-positive `std` is accepted; it degrades to uniform weights.
    pub fn validate(&self) -> Result<(), String> {
        if !self.score_min.is_finite() || !self.score_max.is_finite() {
            return Err("score range must be finite".into());
        }
        if self.score_min > self.score_max {
            return Err(format!(
                "score_min ({}) must not exceed score_max ({})",
                self.score_min, self.score_max
            ));
        }
        if self.mean.is_some_and(|m| !m.is_finite()) {
            return Err("mean must be finite".into());
        }
        if self.std.is_some_and(|s| s.is_nan()) {
            return Err("std must not be NaN".into());
        }
        for (i, name) in self.categories.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(format!("category {i} has an empty name"));
            }
            if self.categories[..i].contains(name) {
                return Err(format!("duplicate category {name:?}"));
            }
        }
        if let Some(weights) = &self.preference_weights {
            if let Some((name, w)) = weights.iter().find(|(_, w)| !w.is_finite()) {
                return Err(format!("weight for {name:?} must be finite, got {w}"));
            }
        }
        Ok(())
    }
}
