//! Multi-objective optimization benchmark pipeline.
//!
//! Runs Pareto-based evolutionary optimizers on sum-of-squared-distance
//! benchmarks and turns the result into plots:
//!
//! - **Objective evaluation** ([`problem`]): the [`Problem`] contract and
//!   the [`SquaredDistanceProblem`] benchmark family.
//! - **Optimization** ([`moea`]): NSGA-II and NSGA-III behind the
//!   [`Algorithm`](moea::Algorithm) trait, with per-generation history.
//! - **Sanitizing** ([`sanitize`]): drops rows with NaN or infinite
//!   objectives.
//! - **Reduction** ([`pca`]): PCA to two components for display.
//! - **Plotting** ([`plot`]): Pareto-front scatter plots with a color bar
//!   and convergence lines, written as PNG or SVG files.
//! - **Scenarios** ([`scenario`]): the two bundled end-to-end runs.
//!
//! # Example
//!
//! ```
//! use u_pareto::moea::{minimize, MoeaConfig, Nsga2};
//! use u_pareto::sanitize::clean_results;
//! use u_pareto::SquaredDistanceProblem;
//!
//! let problem = SquaredDistanceProblem::three_objective(3).unwrap();
//! let config = MoeaConfig::nsga2().with_population_size(20).with_max_generations(20);
//! let result = minimize(&problem, &Nsga2, &config).unwrap();
//!
//! let clean = clean_results(&result.f);
//! assert_eq!(clean.n_cols(), 3);
//! assert_eq!(result.best_per_generation().len(), 20);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate batches with rayon (`MoeaConfig::parallel`).
//! - `serde`: derive `Serialize`/`Deserialize` on configuration and
//!   result types.
//! - `fonts`: enables PNG output, rasterizing text with system fonts.
//!   Without it only SVG (the default) is written.

pub mod error;
mod matrix;
pub mod moea;
pub mod pca;
pub mod plot;
pub mod problem;
pub mod sanitize;
pub mod scenario;

pub use error::{Error, Result};
pub use matrix::ObjectiveMatrix;
pub use problem::{Problem, SquaredDistanceProblem};
