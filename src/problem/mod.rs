//! Objective evaluation.
//!
//! - [`Problem`]: the contract between a benchmark and the optimizer
//!   (variable count, objective count, bounds, batch evaluation)
//! - [`SquaredDistanceProblem`]: sums of squared distances to fixed
//!   target values, with the two presets used by the bundled programs

mod benchmark;
mod types;

pub use benchmark::SquaredDistanceProblem;
pub use types::Problem;
pub(crate) use types::validate_bounds;
