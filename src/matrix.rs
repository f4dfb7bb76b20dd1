//! Row-major objective matrix.
//!
//! One row per decision vector, one column per objective. Rows carry no
//! identity beyond their position. The column count is kept even when
//! the matrix has no rows, so filtering everything out still yields a
//! well-shaped (empty) matrix.

use crate::error::{Error, Result};

/// Objective values for a batch of decision vectors.
///
/// # Example
///
/// ```
/// use u_pareto::ObjectiveMatrix;
///
/// let f = ObjectiveMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(f.n_rows(), 2);
/// assert_eq!(f.n_cols(), 2);
/// assert_eq!(f.column(1), vec![2.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveMatrix {
    rows: Vec<Vec<f64>>,
    n_cols: usize,
}

impl ObjectiveMatrix {
    /// Creates an empty matrix with `n_cols` columns.
    pub fn with_columns(n_cols: usize) -> Self {
        Self {
            rows: Vec::new(),
            n_cols,
        }
    }

    /// Builds a matrix from rows. The column count is taken from the
    /// first row; an empty `rows` gives a zero-column matrix.
    ///
    /// Returns [`Error::DimensionMismatch`] if rows have unequal lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        Self::from_rows_with_columns(n_cols, rows)
    }

    /// Builds a matrix from rows that must all have `n_cols` values.
    pub fn from_rows_with_columns(n_cols: usize, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(Error::DimensionMismatch {
                expected: n_cols,
                got: bad.len(),
            });
        }
        Ok(Self { rows, n_cols })
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.n_cols {
            return Err(Error::DimensionMismatch {
                expected: self.n_cols,
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (objectives).
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns row `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    /// All rows as a slice.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Iterates over rows.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Copies column `j` out.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[j]).collect()
    }

    /// Column-wise minimum. NaN entries are skipped; a column with no
    /// finite-or-infinite value left is NaN.
    pub fn column_min(&self) -> Vec<f64> {
        (0..self.n_cols)
            .map(|j| {
                self.rows
                    .iter()
                    .map(|r| r[j])
                    .filter(|v| !v.is_nan())
                    .fold(f64::NAN, f64::min)
            })
            .collect()
    }

    /// Column-wise maximum, skipping NaN.
    pub fn column_max(&self) -> Vec<f64> {
        (0..self.n_cols)
            .map(|j| {
                self.rows
                    .iter()
                    .map(|r| r[j])
                    .filter(|v| !v.is_nan())
                    .fold(f64::NAN, f64::max)
            })
            .collect()
    }

    /// Keeps only the rows at `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            n_cols: self.n_cols,
        }
    }

    /// Appends all rows of `other`.
    pub fn extend(&mut self, other: ObjectiveMatrix) -> Result<()> {
        if other.n_cols != self.n_cols && !other.is_empty() {
            return Err(Error::DimensionMismatch {
                expected: self.n_cols,
                got: other.n_cols,
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Consumes the matrix and returns its rows.
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let m = ObjectiveMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.n_cols(), 3);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = ObjectiveMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_empty_keeps_columns() {
        let m = ObjectiveMatrix::with_columns(4);
        assert!(m.is_empty());
        assert_eq!(m.n_cols(), 4);
        assert!(m.column_min().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_column_min_skips_nan() {
        let m = ObjectiveMatrix::from_rows(vec![
            vec![3.0, f64::NAN],
            vec![1.0, 5.0],
            vec![2.0, 4.0],
        ])
        .unwrap();
        assert_eq!(m.column_min(), vec![1.0, 4.0]);
        assert_eq!(m.column_max(), vec![3.0, 5.0]);
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut m = ObjectiveMatrix::with_columns(2);
        assert!(m.push_row(vec![1.0, 2.0]).is_ok());
        assert!(m.push_row(vec![1.0]).is_err());
        assert_eq!(m.n_rows(), 1);
    }

    #[test]
    fn test_select_rows_preserves_given_order() {
        let m = ObjectiveMatrix::from_rows(vec![vec![0.0], vec![1.0], vec![2.0]]).unwrap();
        let s = m.select_rows(&[2, 0]);
        assert_eq!(s.into_rows(), vec![vec![2.0], vec![0.0]]);
    }
}
