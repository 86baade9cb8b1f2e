//! Discrete score grid and Gaussian level weights.

/// Number of levels in every [`ScoreGrid`].
pub const GRID_LEVELS: usize = 64;

/// Rounds a value to 3 decimal places, the storage precision of scores.
pub fn round_score(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// A fixed discretization of `[min, max]` into [`GRID_LEVELS`] evenly
/// spaced levels, both endpoints included.
///
/// The grid depends only on `(min, max)`; sampling never alters it.
///
/// # Examples
///
/// ```
/// use u_allocsim::sampling::ScoreGrid;
///
/// let grid = ScoreGrid::new(0.0, 9.0);
/// assert_eq!(grid.len(), 64);
/// assert_eq!(grid.levels()[0], 0.0);
/// assert!((grid.levels()[63] - 9.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreGrid {
    min: f64,
    max: f64,
    levels: Vec<f64>,
}

impl ScoreGrid {
    /// Builds the grid for `[min, max]`.
    ///
    /// The last level is pinned to `max` so accumulated floating-point
    /// error never pushes it outside the range.
    pub fn new(min: f64, max: f64) -> Self {
        let step = (max - min) / (GRID_LEVELS - 1) as f64;
        let mut levels: Vec<f64> = (0..GRID_LEVELS).map(|i| min + i as f64 * step).collect();
        levels[GRID_LEVELS - 1] = max;
        Self { min, max, levels }
    }

    /// Lower bound of the range.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the range.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Distance between adjacent levels.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (GRID_LEVELS - 1) as f64
    }

    /// The levels in increasing order.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Number of levels (always [`GRID_LEVELS`]).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the grid has no levels; never true for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether `score` equals some level after rounding to 3 decimals.
    pub fn contains_rounded(&self, score: f64) -> bool {
        self.levels
            .iter()
            .any(|&level| (round_score(level) - score).abs() < 1e-9)
    }
}

/// Normal probability density. Returns 0 for a non-positive `sigma`.
fn normal_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    if sigma <= 0.0 || !sigma.is_finite() {
        return 0.0;
    }
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * std::f64::consts::PI).sqrt())
}

/// A probability mass over the levels of a [`ScoreGrid`].
///
/// Weights are non-negative and sum to 1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelWeights {
    probs: Vec<f64>,
}

impl LevelWeights {
    /// Evaluates a Gaussian density at every grid level and normalizes it.
    ///
    /// When the density sums to zero (non-positive `std_dev`, or every level far
    /// in the tail) the weights silently become uniform.
    pub fn gaussian(grid: &ScoreGrid, mean: f64, std_dev: f64) -> Self {
        let density: Vec<f64> = grid
            .levels()
            .iter()
            .map(|&level| normal_pdf(level, mean, std_dev))
            .collect();
        let total: f64 = density.iter().sum();

        if total <= 0.0 || !total.is_finite() {
            tracing::debug!(mean, std_dev, "degenerate score density, using uniform weights");
            return Self::uniform(grid.len());
        }

        Self {
            probs: density.into_iter().map(|d| d / total).collect(),
        }
    }

    /// Equal mass on each of `n` levels.
    pub fn uniform(n: usize) -> Self {
        let p = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self { probs: vec![p; n] }
    }

    /// The normalized weights in grid order.
    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Whether there are no weights.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}
