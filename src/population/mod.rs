//! Student populations: synthetic generation and tabular import.
//!
//! A [`PopulationGenerator`] draws scores from a Gaussian mass over a
//! 64-level grid and ranked preferences from the configured categories,
//! optionally biased by popularity weights. Externally prepared populations
//! enter through [`StudentTable`] / [`parse_population`].
//!
//! Both paths produce [`StudentRecord`]s, which the allocation engine
//! consumes directly.

mod config;
mod generator;
mod import;
mod types;

pub use config::{PopulationConfig, ScoreSampling};
pub use generator::PopulationGenerator;
pub use import::{parse_population, StudentTable, MAX_PREFERENCE_RANK};
pub use types::{Population, StudentId, StudentRecord};
