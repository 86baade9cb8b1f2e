//! Greedy priority allocation with a replayable trace.
//!
//! Students are visited strictly by score descending. Each is placed in the
//! first category of their effective preference list (declared ranks up to
//! [`AllocationConfig::max_preferences`], empty ranks dropped) that still has
//! a seat. If none has, and fallback is enabled, a category with space that
//! the student did not list is drawn uniformly at random. Otherwise the
//! student stays unassigned.
//!
//! This is deliberately not a stable or optimal matching: there is no
//! exchange pass, and the result depends on processing order and seed.
//!
//! # Key Types
//!
//! - [`CapacityState`]: remaining seats per configured category
//! - [`AssignmentMap`]: cumulative student → category outcome
//! - [`Snapshot`]: self-contained state after one student
//! - [`AllocationRunner`]: executes a run
//! - [`AllocationTrace`]: the ordered snapshots plus final statistics

mod config;
mod engine;
mod order;
mod scenarios;
mod trace;
mod types;

pub use config::{AllocationConfig, NegativeCapacityPolicy};
pub use engine::AllocationRunner;
pub use order::{processing_order, TieBreak};
pub use scenarios::run_scenarios;
pub use trace::{AllocationTrace, CategorySummary};
pub use types::{Applicant, AssignmentMap, CapacityState, CategoryName, Snapshot};
