//! Multi-objective evolutionary optimization.
//!
//! Two Pareto-based algorithms share one evolutionary loop (tournament
//! mating, SBX crossover, polynomial mutation, elitist survival):
//!
//! - [`Nsga2`]: survival by non-dominated rank, then crowding distance.
//! - [`Nsga3`]: survival by non-dominated rank, then niching around
//!   [`ReferenceDirections`].
//!
//! # Usage
//!
//! ```
//! use u_pareto::moea::{minimize, MoeaConfig, Nsga2};
//! use u_pareto::SquaredDistanceProblem;
//!
//! let problem = SquaredDistanceProblem::three_objective(3).unwrap();
//! let config = MoeaConfig::nsga2()
//!     .with_population_size(20)
//!     .with_max_generations(10)
//!     .with_seed(1);
//!
//! let result = minimize(&problem, &Nsga2, &config).unwrap();
//! assert!(result.f.n_rows() > 0);
//! assert_eq!(result.history.len(), 10);
//! assert_eq!(result.n_eval, 200);
//! ```

mod config;
pub mod multi_objective;
mod nsga2;
mod nsga3;
pub mod operators;
mod reference;
mod runner;
mod selection;
mod types;

pub use config::MoeaConfig;
pub use nsga2::Nsga2;
pub use nsga3::Nsga3;
pub use reference::ReferenceDirections;
pub use selection::Tournament;
pub use types::{best_per_generation, Algorithm, GenerationSnapshot, OptimizationResult, Solution};

use crate::error::Result;
use crate::problem::Problem;

/// Minimizes `problem` with `algorithm`.
///
/// The configuration is validated before any evaluation happens.
pub fn minimize<P: Problem, A: Algorithm>(
    problem: &P,
    algorithm: &A,
    config: &MoeaConfig,
) -> Result<OptimizationResult> {
    config.validate()?;
    algorithm.minimize(problem, config)
}
