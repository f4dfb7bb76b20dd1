//! Reference directions for NSGA-III.
//!
//! Das-Dennis (simplex-lattice) points: every combination of `m`
//! non-negative multiples of `1/p` that sum to one. They are generated
//! once before a run and never modified.
//!
//! # References
//!
//! - Das & Dennis (1998), "Normal-Boundary Intersection: A New Method for
//!   Generating the Pareto Surface in Nonlinear Multicriteria Optimization
//!   Problems"

use crate::error::{Error, Result};

/// An immutable set of reference directions on the unit simplex.
///
/// # Example
///
/// ```
/// use u_pareto::moea::ReferenceDirections;
///
/// let dirs = ReferenceDirections::das_dennis(3, 12).unwrap();
/// assert_eq!(dirs.len(), 91);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceDirections {
    points: Vec<Vec<f64>>,
    n_obj: usize,
}

impl ReferenceDirections {
    /// Generates `C(p + m - 1, m - 1)` Das-Dennis points for `n_obj = m`
    /// objectives and `n_partitions = p` gaps per axis.
    pub fn das_dennis(n_obj: usize, n_partitions: usize) -> Result<Self> {
        if n_obj == 0 {
            return Err(Error::InvalidConfig("n_obj must be at least 1".into()));
        }
        if n_partitions == 0 {
            if n_obj == 1 {
                return Ok(Self {
                    points: vec![vec![1.0]],
                    n_obj,
                });
            }
            return Err(Error::InvalidConfig(
                "n_partitions must be at least 1 for two or more objectives".into(),
            ));
        }

        let mut points = Vec::with_capacity(n_combinations(n_partitions + n_obj - 1, n_obj - 1));
        let mut current = vec![0usize; n_obj];
        lattice(n_partitions, 0, n_partitions, &mut current, &mut points);
        Ok(Self { points, n_obj })
    }

    /// Wraps caller-supplied directions. Every point must have `n_obj`
    /// non-negative finite components and a positive sum.
    pub fn from_points(points: Vec<Vec<f64>>) -> Result<Self> {
        let n_obj = points.first().map_or(0, Vec::len);
        if n_obj == 0 {
            return Err(Error::InvalidConfig("reference directions must not be empty".into()));
        }
        for p in &points {
            if p.len() != n_obj {
                return Err(Error::DimensionMismatch {
                    expected: n_obj,
                    got: p.len(),
                });
            }
            if p.iter().any(|v| !v.is_finite() || *v < 0.0) || p.iter().sum::<f64>() <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "reference direction {p:?} must be non-negative with a positive sum"
                )));
            }
        }
        Ok(Self { points, n_obj })
    }

    /// Number of directions.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty. Never true for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension of every direction.
    pub fn n_obj(&self) -> usize {
        self.n_obj
    }

    /// The direction vectors.
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }
}

#[allow(clippy::cast_precision_loss)]
fn lattice(
    divisions: usize,
    depth: usize,
    remaining: usize,
    current: &mut [usize],
    out: &mut Vec<Vec<f64>>,
) {
    let n_obj = current.len();
    if depth == n_obj - 1 {
        current[depth] = remaining;
        out.push(current.iter().map(|&c| c as f64 / divisions as f64).collect());
        return;
    }
    for i in 0..=remaining {
        current[depth] = i;
        lattice(divisions, depth + 1, remaining - i, current, out);
    }
}

/// `C(n, k)`.
pub(crate) fn n_combinations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: usize = 1;
    for i in 0..k {
        result = result.saturating_mul(n - i) / (i + 1);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_objectives() {
        let dirs = ReferenceDirections::das_dennis(2, 4).unwrap();
        assert_eq!(dirs.len(), 5);
        assert_eq!(dirs.points()[0], vec![0.0, 1.0]);
        assert_eq!(dirs.points()[4], vec![1.0, 0.0]);
    }

    #[test]
    fn test_four_objectives_twelve_partitions() {
        let dirs = ReferenceDirections::das_dennis(4, 12).unwrap();
        assert_eq!(dirs.len(), 455);
        assert_eq!(dirs.n_obj(), 4);
        for p in dirs.points() {
            let sum: f64 = p.iter().sum();
            assert!((sum - 1.0).abs() < 1e-10, "point {p:?} doesn't sum to 1");
            assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_points_are_distinct() {
        let dirs = ReferenceDirections::das_dennis(3, 5).unwrap();
        for (i, a) in dirs.points().iter().enumerate() {
            for b in &dirs.points()[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_single_objective() {
        let dirs = ReferenceDirections::das_dennis(1, 0).unwrap();
        assert_eq!(dirs.points(), &[vec![1.0]]);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(ReferenceDirections::das_dennis(0, 4).is_err());
        assert!(ReferenceDirections::das_dennis(3, 0).is_err());
    }

    #[test]
    fn test_from_points_validation() {
        assert!(ReferenceDirections::from_points(vec![vec![0.5, 0.5], vec![1.0, 0.0]]).is_ok());
        assert!(ReferenceDirections::from_points(vec![]).is_err());
        assert!(ReferenceDirections::from_points(vec![vec![0.5, 0.5], vec![1.0]]).is_err());
        assert!(ReferenceDirections::from_points(vec![vec![-0.5, 1.5]]).is_err());
        assert!(ReferenceDirections::from_points(vec![vec![0.0, 0.0]]).is_err());
    }

    #[test]
    fn test_n_combinations() {
        assert_eq!(n_combinations(5, 2), 10);
        assert_eq!(n_combinations(4, 0), 1);
        assert_eq!(n_combinations(15, 3), 455);
        assert_eq!(n_combinations(2, 3), 0);
    }
}
