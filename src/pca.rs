//! Principal component analysis for displaying wide objective matrices.
//!
//! The covariance of the centered data is eigendecomposed with nalgebra;
//! components are ordered by descending variance and each one's sign is
//! fixed so that its largest-magnitude loading is positive.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};
use crate::matrix::ObjectiveMatrix;

/// A fitted PCA projection.
///
/// Input must be finite; run
/// [`clean_results`](crate::sanitize::clean_results) first.
///
/// # Example
///
/// ```
/// use u_pareto::{pca::Pca, ObjectiveMatrix};
///
/// let f = ObjectiveMatrix::from_rows(vec![
///     vec![0.0, 0.0, 0.0],
///     vec![1.0, 1.0, 1.0],
///     vec![2.0, 2.0, 2.1],
/// ])
/// .unwrap();
/// let pca = Pca::fit(&f, 2).unwrap();
/// assert!(pca.explained_variance_ratio()[0] > 0.99);
/// assert_eq!(pca.transform(&f).unwrap().n_cols(), 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pca {
    components: Vec<Vec<f64>>,
    mean: Vec<f64>,
    explained_variance: Vec<f64>,
    explained_variance_ratio: Vec<f64>,
}

impl Pca {
    /// Fits `n_components` principal components to the rows of `f`.
    ///
    /// Returns [`Error::EmptyMatrix`] when `f` has no rows and
    /// [`Error::InvalidConfig`] when `n_components` is zero or exceeds the
    /// column count, or when `f` holds a NaN or infinite value.
    pub fn fit(f: &ObjectiveMatrix, n_components: usize) -> Result<Self> {
        if f.is_empty() {
            return Err(Error::EmptyMatrix);
        }
        ensure_finite(f)?;
        let (n, d) = (f.n_rows(), f.n_cols());
        if n_components == 0 || n_components > d {
            return Err(Error::InvalidConfig(format!(
                "n_components must be in 1..={d}, got {n_components}"
            )));
        }

        let data = DMatrix::from_fn(n, d, |r, c| f.row(r)[c]);
        let mean: DVector<f64> = data.row_mean().transpose();
        let centered = DMatrix::from_fn(n, d, |r, c| data[(r, c)] - mean[c]);

        let dof = (n.max(2) - 1) as f64;
        let cov = (centered.transpose() * &centered) / dof;
        let eigen = cov.symmetric_eigen();

        let mut order: Vec<usize> = (0..d).collect();
        order.sort_by(|&a, &b| {
            eigen.eigenvalues[b]
                .partial_cmp(&eigen.eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total: f64 = eigen.eigenvalues.iter().map(|v| v.max(0.0)).sum();
        let mut components = Vec::with_capacity(n_components);
        let mut explained_variance = Vec::with_capacity(n_components);
        let mut explained_variance_ratio = Vec::with_capacity(n_components);

        for &idx in order.iter().take(n_components) {
            let mut axis: Vec<f64> = eigen.eigenvectors.column(idx).iter().copied().collect();
            let pivot = axis
                .iter()
                .copied()
                .max_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(std::cmp::Ordering::Equal))
                .unwrap_or(0.0);
            if pivot < 0.0 {
                axis.iter_mut().for_each(|v| *v = -*v);
            }

            let variance = eigen.eigenvalues[idx].max(0.0);
            components.push(axis);
            explained_variance.push(variance);
            explained_variance_ratio.push(if total > 0.0 { variance / total } else { 0.0 });
        }

        Ok(Self {
            components,
            mean: mean.iter().copied().collect(),
            explained_variance,
            explained_variance_ratio,
        })
    }

    /// Principal axes, one row per component, strongest first.
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    /// Per-column mean of the fitted data.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Variance captured by each component.
    pub fn explained_variance(&self) -> &[f64] {
        &self.explained_variance
    }

    /// Share of the total variance captured by each component.
    pub fn explained_variance_ratio(&self) -> &[f64] {
        &self.explained_variance_ratio
    }

    /// Number of fitted components.
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Projects the rows of `f` onto the fitted components.
    pub fn transform(&self, f: &ObjectiveMatrix) -> Result<ObjectiveMatrix> {
        if f.n_cols() != self.mean.len() {
            return Err(Error::DimensionMismatch {
                expected: self.mean.len(),
                got: f.n_cols(),
            });
        }
        let rows = f
            .iter()
            .map(|row| {
                self.components
                    .iter()
                    .map(|axis| {
                        row.iter()
                            .zip(&self.mean)
                            .zip(axis)
                            .map(|((v, m), a)| (v - m) * a)
                            .sum()
                    })
                    .collect()
            })
            .collect();
        ObjectiveMatrix::from_rows_with_columns(self.n_components(), rows)
    }
}

/// Reduces `f` to at most two columns for display.
///
/// Matrices with one or two columns are returned as they are; wider ones
/// are projected onto their first two principal components. Non-finite
/// input is rejected with [`Error::InvalidConfig`].
pub fn reduce_to_2d(f: &ObjectiveMatrix) -> Result<ObjectiveMatrix> {
    if f.is_empty() {
        return Err(Error::EmptyMatrix);
    }
    ensure_finite(f)?;
    if f.n_cols() <= 2 {
        return Ok(f.clone());
    }
    Pca::fit(f, 2)?.transform(f)
}

fn ensure_finite(f: &ObjectiveMatrix) -> Result<()> {
    match f.iter().position(|row| row.iter().any(|v| !v.is_finite())) {
        Some(r) => Err(Error::InvalidConfig(format!(
            "row {r} has a NaN or infinite value"
        ))),
        None => Ok(()),
    }
}
