//! Removal of invalid objective rows.
//!
//! A row is valid when every value is finite. Evaluation marks failed
//! rows with NaN; [`clean_results`] drops them (and any row carrying an
//! infinity) before reduction and plotting.

use log::warn;

use crate::matrix::ObjectiveMatrix;

/// Per-row validity: `true` when the row has no NaN and no infinity.
pub fn valid_row_mask(f: &ObjectiveMatrix) -> Vec<bool> {
    f.iter().map(|row| row.iter().all(|v| v.is_finite())).collect()
}

/// Keeps the valid rows of `f` in their original order.
///
/// The column count is preserved, so an all-invalid input gives an empty
/// matrix of the same width. Calling it twice changes nothing.
///
/// # Example
///
/// ```
/// use u_pareto::{sanitize::clean_results, ObjectiveMatrix};
///
/// let f = ObjectiveMatrix::from_rows(vec![
///     vec![1.0, 2.0],
///     vec![f64::NAN, 3.0],
///     vec![4.0, 5.0],
/// ])
/// .unwrap();
/// let clean = clean_results(&f);
/// assert_eq!(clean.rows(), &[vec![1.0, 2.0], vec![4.0, 5.0]]);
/// ```
pub fn clean_results(f: &ObjectiveMatrix) -> ObjectiveMatrix {
    let mask = valid_row_mask(f);
    let keep: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(i, &ok)| ok.then_some(i))
        .collect();

    let dropped = f.n_rows() - keep.len();
    if dropped > 0 {
        warn!("dropped {dropped} of {} rows with NaN or infinite objectives", f.n_rows());
    }
    f.select_rows(&keep)
}
