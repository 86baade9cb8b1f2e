//! Discretized weighted sampling.
//!
//! Scores are drawn from a fixed 64-level [`ScoreGrid`] under a Gaussian
//! mass ([`LevelWeights`]); categorical draws with and without replacement
//! are shared by score and preference generation.
//!
//! Every function takes an explicit `&mut R: Rng`, so a whole run draws from
//! one seeded generator in a fixed order.

mod categorical;
mod grid;

pub use categorical::{
    draw_index, sample_with_replacement, sample_without_replacement, ExhaustedMass,
};
pub use grid::{round_score, LevelWeights, ScoreGrid, GRID_LEVELS};
