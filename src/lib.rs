//! Merit-based seat allocation simulator.
//!
//! Two independent components, composed by the caller:
//!
//! - **Population sampling**: synthesizes students whose scores follow a
//!   Gaussian mass over a fixed 64-level grid (with or without replacement)
//!   and whose ranked preferences are drawn uniformly or by popularity.
//! - **Allocation**: a single-pass greedy engine that visits students by
//!   score descending, seats each in the first preferred category with
//!   space, optionally falls back to a random unlisted category, and
//!   records a self-contained snapshot after every student.
//!
//! Every random choice draws from one explicitly seeded generator per run,
//! so identical inputs and seeds reproduce identical traces.
//!
//! # Example
//!
//! ```
//! use u_allocsim::allocation::{AllocationConfig, AllocationRunner, CapacityState};
//! use u_allocsim::population::{PopulationConfig, PopulationGenerator};
//!
//! let specs = ["Software", "Mechanical", "Civil"];
//! let population = PopulationGenerator::generate(
//!     &PopulationConfig::new(specs).with_students(30).with_preferences(2).with_seed(42),
//! )
//! .unwrap();
//!
//! let capacities =
//!     CapacityState::from_pairs([("Software", 10), ("Mechanical", 10), ("Civil", 10)]).unwrap();
//! let config = AllocationConfig::default().with_seed(123);
//! let trace = AllocationRunner::run(population.records(), &capacities, &config).unwrap();
//!
//! assert_eq!(trace.len(), 30);
//! assert_eq!(trace.final_snapshot().unwrap().assignments.len(), 30);
//! ```
//!
//! # Architecture
//!
//! Like the other U-Engine algorithm crates, each component is a directory
//! module with its configuration, core types and runner kept apart. The
//! crate performs no I/O beyond parsing text handed to it.

pub mod allocation;
pub mod error;
pub mod population;
pub mod sampling;

pub use error::{Result, SimError};
