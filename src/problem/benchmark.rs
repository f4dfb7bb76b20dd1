//! Sum-of-squared-distance benchmark problems.
//!
//! Objective `k` of a decision vector `x` is `Σ_i (x_i - t_k)²` where
//! `t_k` is the k-th target value. Each objective pulls every variable
//! towards its own target, so the Pareto set is the segment of the
//! diagonal between the smallest and largest target.

use log::{info, warn};

use super::types::{validate_bounds, Problem};
use crate::error::{Error, Result};
use crate::matrix::ObjectiveMatrix;

/// Benchmark with one scalar target per objective.
///
/// # Example
///
/// ```
/// use u_pareto::{Problem, SquaredDistanceProblem};
///
/// let problem = SquaredDistanceProblem::three_objective(3).unwrap();
/// let f = problem.evaluate(&[vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]]);
/// assert_eq!(f.row(0)[0], 0.0); // target 0
/// assert_eq!(f.row(1)[1], 0.0); // target 1
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquaredDistanceProblem {
    targets: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl SquaredDistanceProblem {
    /// Creates a problem with `targets.len()` objectives over the box
    /// `[lower, upper]`.
    pub fn new(targets: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if targets.is_empty() {
            return Err(Error::InvalidConfig("at least one target is required".into()));
        }
        if let Some(t) = targets.iter().find(|t| !t.is_finite()) {
            return Err(Error::InvalidConfig(format!("target {t} is not finite")));
        }
        validate_bounds(lower.len(), &lower, &upper)?;
        Ok(Self {
            targets,
            lower,
            upper,
        })
    }

    /// Creates a problem with the same scalar bounds on every variable.
    pub fn uniform(targets: Vec<f64>, n_var: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(targets, vec![lower; n_var], vec![upper; n_var])
    }

    /// Three objectives (targets 0, 1, 0.5) over `[0, 1]^n_var`.
    pub fn three_objective(n_var: usize) -> Result<Self> {
        Self::uniform(vec![0.0, 1.0, 0.5], n_var, 0.0, 1.0)
    }

    /// Four objectives (targets 0, 1, -1, 0.5) over `[-5, 5]^10`.
    pub fn four_objective() -> Result<Self> {
        Self::uniform(vec![0.0, 1.0, -1.0, 0.5], 10, -5.0, 5.0)
    }

    /// The target value of each objective.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Evaluates the all-lower and all-upper corner points and logs each
    /// objective at info level. Returns the two rows.
    pub fn probe_initial_conditions(&self) -> ObjectiveMatrix {
        let corners = vec![self.lower.clone(), self.upper.clone()];
        let f = self.evaluate(&corners);
        for k in 0..self.n_obj() {
            info!("initial f{}: {:?}", k + 1, f.column(k));
        }
        f
    }

    fn objectives(&self, x: &[f64]) -> Vec<f64> {
        self.targets
            .iter()
            .map(|&t| x.iter().map(|&xi| (xi - t).powi(2)).sum())
            .collect()
    }
}

impl Problem for SquaredDistanceProblem {
    fn n_var(&self) -> usize {
        self.lower.len()
    }

    fn n_obj(&self) -> usize {
        self.targets.len()
    }

    fn lower_bounds(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bounds(&self) -> &[f64] {
        &self.upper
    }

    /// Evaluates the batch. If any objective of any row is NaN or
    /// infinite, every row of the batch is replaced by NaN.
    fn evaluate(&self, x: &[Vec<f64>]) -> ObjectiveMatrix {
        let n_obj = self.n_obj();
        let mut rows: Vec<Vec<f64>> = x.iter().map(|xi| self.objectives(xi)).collect();
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            warn!("NaN or Inf detected in objectives");
            rows = vec![vec![f64::NAN; n_obj]; x.len()];
        }
        ObjectiveMatrix::from_rows_with_columns(n_obj, rows)
            .unwrap_or_else(|_| ObjectiveMatrix::with_columns(n_obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_three_objective_shape() {
        let p = SquaredDistanceProblem::three_objective(3).unwrap();
        assert_eq!(p.n_var(), 3);
        assert_eq!(p.n_obj(), 3);
        assert_eq!(p.lower_bounds(), &[0.0; 3]);
        assert_eq!(p.upper_bounds(), &[1.0; 3]);
    }

    #[test]
    fn test_four_objective_shape() {
        let p = SquaredDistanceProblem::four_objective().unwrap();
        assert_eq!(p.n_var(), 10);
        assert_eq!(p.n_obj(), 4);
        assert_eq!(p.targets(), &[0.0, 1.0, -1.0, 0.5]);
        assert_eq!(p.lower_bounds(), &[-5.0; 10]);
    }

    #[test]
    fn test_origin_zero_for_target_zero() {
        let p = SquaredDistanceProblem::three_objective(3).unwrap();
        let f = p.evaluate(&[vec![0.0, 0.0, 0.0]]);
        assert_eq!(f.row(0)[0], 0.0);
        assert!((f.row(0)[1] - 3.0).abs() < 1e-12);
        assert!((f.row(0)[2] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_ones_zero_for_target_one() {
        let p = SquaredDistanceProblem::three_objective(3).unwrap();
        let f = p.evaluate(&[vec![1.0, 1.0, 1.0]]);
        assert_eq!(f.row(0)[1], 0.0);
        assert!((f.row(0)[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_target() {
        let p = SquaredDistanceProblem::four_objective().unwrap();
        let f = p.evaluate(&[vec![-1.0; 10]]);
        assert_eq!(f.row(0)[2], 0.0);
        assert!((f.row(0)[0] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_input_fills_whole_batch() {
        let p = SquaredDistanceProblem::three_objective(2).unwrap();
        let f = p.evaluate(&[vec![0.5, 0.5], vec![f64::NAN, 0.0], vec![0.0, 0.0]]);
        assert_eq!(f.n_rows(), 3);
        assert_eq!(f.n_cols(), 3);
        for i in 0..3 {
            assert!(f.row(i).iter().all(|v| v.is_nan()), "row {i}: {:?}", f.row(i));
        }
    }

    #[test]
    fn test_overflow_fills_whole_batch() {
        let p = SquaredDistanceProblem::uniform(vec![0.0, 1.0], 1, -f64::MAX, f64::MAX).unwrap();
        let f = p.evaluate(&[vec![0.0], vec![f64::MAX]]);
        assert!(f.iter().flatten().all(|v| v.is_nan()));
    }

    #[test]
    fn test_finite_batch_untouched() {
        let p = SquaredDistanceProblem::three_objective(2).unwrap();
        let f = p.evaluate(&[vec![0.5, 0.5], vec![0.0, 0.0]]);
        assert!(f.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_empty_batch() {
        let p = SquaredDistanceProblem::three_objective(3).unwrap();
        let f = p.evaluate(&[]);
        assert!(f.is_empty());
        assert_eq!(f.n_cols(), 3);
    }

    #[test]
    fn test_probe_initial_conditions() {
        let p = SquaredDistanceProblem::three_objective(3).unwrap();
        let f = p.probe_initial_conditions();
        assert_eq!(f.column(0), vec![0.0, 3.0]);
        assert_eq!(f.column(1), vec![3.0, 0.0]);
        assert_eq!(f.column(2), vec![0.75, 0.75]);
    }

    #[test]
    fn test_rejects_bad_construction() {
        assert!(SquaredDistanceProblem::uniform(vec![], 3, 0.0, 1.0).is_err());
        assert!(SquaredDistanceProblem::uniform(vec![0.0], 0, 0.0, 1.0).is_err());
        assert!(SquaredDistanceProblem::uniform(vec![0.0], 2, 1.0, 0.0).is_err());
        assert!(SquaredDistanceProblem::uniform(vec![f64::NAN], 2, 0.0, 1.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_in_bounds_objectives_finite_non_negative(
            x in prop::collection::vec(-5.0f64..=5.0, 10)
        ) {
            let p = SquaredDistanceProblem::four_objective().unwrap();
            let f = p.evaluate(&[x]);
            prop_assert_eq!(f.n_cols(), 4);
            for &v in f.row(0) {
                prop_assert!(v.is_finite());
                prop_assert!(v >= 0.0);
            }
        }

        #[test]
        fn prop_batch_rows_match_input(n in 0usize..20) {
            let p = SquaredDistanceProblem::three_objective(3).unwrap();
            let x = vec![vec![0.25; 3]; n];
            prop_assert_eq!(p.evaluate(&x).n_rows(), n);
        }
    }
}
