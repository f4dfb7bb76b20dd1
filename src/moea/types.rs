//! Optimizer result types and the algorithm contract.

use super::config::MoeaConfig;
use crate::error::Result;
use crate::matrix::ObjectiveMatrix;
use crate::problem::Problem;

/// A multi-objective optimization algorithm.
///
/// Implementations own their selection and survival mechanics; callers
/// only see [`minimize`](Algorithm::minimize). Use
/// [`moea::minimize`](super::minimize) to validate the configuration
/// first.
pub trait Algorithm {
    /// Short display name, e.g. `"NSGA-II"`.
    fn name(&self) -> &'static str;

    /// Runs the algorithm on `problem` and returns the final result.
    fn minimize<P: Problem>(&self, problem: &P, config: &MoeaConfig) -> Result<OptimizationResult>;
}

/// A member of the population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Decision vector.
    pub x: Vec<f64>,
    /// Objective values (NaN-filled when evaluation failed).
    pub f: Vec<f64>,
    /// Pareto rank within the population it was last ranked in.
    pub rank: usize,
    /// Crowding distance (NSGA-II) or 0.0 (NSGA-III).
    pub crowding: f64,
}

impl Solution {
    pub(crate) fn new(x: Vec<f64>, f: Vec<f64>) -> Self {
        Self {
            x,
            f,
            rank: usize::MAX,
            crowding: 0.0,
        }
    }
}

/// Objectives of one generation's population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationSnapshot {
    /// Generation number (1 = initial population).
    pub n_gen: usize,
    /// Total evaluations performed so far.
    pub n_eval: usize,
    /// Objective matrix of the population after survival.
    pub f: ObjectiveMatrix,
}

/// Result of an optimization run. Read-only once returned.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    /// Name of the algorithm that produced the result.
    pub algorithm: String,

    /// Decision vectors of the non-dominated members of the final
    /// population.
    pub x: Vec<Vec<f64>>,

    /// Objective matrix matching `x` row by row.
    pub f: ObjectiveMatrix,

    /// The whole final population.
    pub population: Vec<Solution>,

    /// Generations executed, the initial population included.
    pub n_gen: usize,

    /// Total objective evaluations.
    pub n_eval: usize,

    /// One snapshot per generation, the initial population first.
    /// Empty unless `save_history` was set.
    pub history: Vec<GenerationSnapshot>,
}

impl OptimizationResult {
    /// Objective matrix of the whole final population.
    pub fn population_f(&self) -> ObjectiveMatrix {
        let n_obj = self.f.n_cols();
        let rows = self.population.iter().map(|s| s.f.clone()).collect();
        ObjectiveMatrix::from_rows_with_columns(n_obj, rows)
            .unwrap_or_else(|_| ObjectiveMatrix::with_columns(n_obj))
    }

    /// Minimum of each objective over each saved generation.
    ///
    /// Row `g` is generation `g`; column `k` is objective `k`. NaN
    /// entries are ignored.
    pub fn best_per_generation(&self) -> Vec<Vec<f64>> {
        best_per_generation(&self.history)
    }
}

/// Minimum of each objective over each snapshot.
pub fn best_per_generation(history: &[GenerationSnapshot]) -> Vec<Vec<f64>> {
    history.iter().map(|h| h.f.column_min()).collect()
}
