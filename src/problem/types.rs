//! Problem definition contract.
//!
//! A [`Problem`] tells the optimizer how many decision variables and
//! objectives there are, where the box bounds lie, and how to turn a batch
//! of decision vectors into an [`ObjectiveMatrix`].

use crate::error::{Error, Result};
use crate::matrix::ObjectiveMatrix;

/// Defines a box-bounded multi-objective minimization problem.
///
/// All objectives are **minimized**.
///
/// # Thread Safety
///
/// `Problem` must be `Send + Sync` because the driver may split a batch
/// across threads when the `parallel` feature is enabled.
///
/// # Implementing
///
/// ```
/// use u_pareto::{ObjectiveMatrix, Problem};
///
/// struct Schaffer;
///
/// impl Problem for Schaffer {
///     fn n_var(&self) -> usize { 1 }
///     fn n_obj(&self) -> usize { 2 }
///     fn lower_bounds(&self) -> &[f64] { &[-10.0] }
///     fn upper_bounds(&self) -> &[f64] { &[10.0] }
///
///     fn evaluate(&self, x: &[Vec<f64>]) -> ObjectiveMatrix {
///         let rows = x.iter().map(|v| vec![v[0] * v[0], (v[0] - 2.0).powi(2)]).collect();
///         ObjectiveMatrix::from_rows_with_columns(2, rows).unwrap()
///     }
/// }
/// ```
pub trait Problem: Send + Sync {
    /// Number of decision variables.
    fn n_var(&self) -> usize;

    /// Number of objectives.
    fn n_obj(&self) -> usize;

    /// Per-variable lower bounds (length `n_var`).
    fn lower_bounds(&self) -> &[f64];

    /// Per-variable upper bounds (length `n_var`).
    fn upper_bounds(&self) -> &[f64];

    /// Evaluates a batch of decision vectors.
    ///
    /// Must return one row per input vector and `n_obj` columns. Rows the
    /// implementation cannot evaluate should be filled with NaN rather
    /// than panicking.
    fn evaluate(&self, x: &[Vec<f64>]) -> ObjectiveMatrix;
}

/// Checks that bounds have length `n_var` and `lower <= upper`.
pub(crate) fn validate_bounds(n_var: usize, lower: &[f64], upper: &[f64]) -> Result<()> {
    if n_var == 0 {
        return Err(Error::InvalidConfig("n_var must be at least 1".into()));
    }
    for bounds in [lower, upper] {
        if bounds.len() != n_var {
            return Err(Error::DimensionMismatch {
                expected: n_var,
                got: bounds.len(),
            });
        }
    }
    for (index, (&lo, &hi)) in lower.iter().zip(upper).enumerate() {
        if !(lo <= hi) {
            return Err(Error::InvalidBounds {
                index,
                lower: lo,
                upper: hi,
            });
        }
    }
    Ok(())
}
