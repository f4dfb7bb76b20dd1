//! Pareto ranking primitives shared by NSGA-II and NSGA-III.
//!
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance for diversity preservation
//!
//! Rows containing NaN or infinity are treated as dominated by every
//! finite row, so degenerate evaluations always land in the last front.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting.
///
/// All objectives are **minimized**. Indices inside each front are in
/// ascending order.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_pareto::moea::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult {
            ranks: Vec::new(),
            fronts: Vec::new(),
        };
    }

    let valid: Vec<bool> = objectives
        .iter()
        .map(|o| o.iter().all(|v| v.is_finite()))
        .collect();

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&objectives[i], valid[i], &objectives[j], valid[j]) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    let mut fronts = vec![front_0];
    loop {
        let Some(current) = fronts.last() else {
            break;
        };
        let mut next_front = Vec::new();

        for &i in current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len();
                    next_front.push(j);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        next_front.sort_unstable();
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Dominance comparison result.
#[derive(Debug, PartialEq)]
enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Compare two solutions for Pareto dominance (minimization).
fn dominance_cmp(a: &[f64], a_valid: bool, b: &[f64], b_valid: bool) -> Dominance {
    match (a_valid, b_valid) {
        (true, false) => return Dominance::Left,
        (false, true) => return Dominance::Right,
        (false, false) => return Dominance::Neither,
        (true, true) => {}
    }

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Returns `true` if `a` Pareto-dominates `b` (minimization).
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let a_valid = a.iter().all(|v| v.is_finite());
    let b_valid = b.iter().all(|v| v.is_finite());
    dominance_cmp(a, a_valid, b, b_valid) == Dominance::Left
}

/// Crowding distance assignment for diversity preservation.
///
/// Boundary solutions (min/max for any objective) receive `f64::INFINITY`.
/// Interior solutions accumulate the normalized gap between their
/// neighbors on each objective.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_pareto::moea::multi_objective::crowding_distance;
///
/// let distances = crowding_distance(&[vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]]);
/// assert!(distances[0].is_infinite());
/// assert!(distances[1].is_finite());
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    #[allow(clippy::needless_range_loop)] // obj_idx is a column index into 2D data
    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            objectives[a][obj_idx]
                .partial_cmp(&objectives[b][obj_idx])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 && range.is_finite() {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                let gap = (next - prev) / range;
                if gap.is_finite() {
                    distances[indices[i]] += gap;
                }
            }
        }
    }

    distances
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Non-dominated sort ----

    #[test]
    fn test_empty() {
        let result = non_dominated_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());
    }

    #[test]
    fn test_single_solution() {
        let result = non_dominated_sort(&[vec![1.0, 2.0]]);
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_clear_dominance() {
        let objs = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 1, 2]);
        assert_eq!(result.fronts.len(), 3);
    }

    #[test]
    fn test_mixed_fronts() {
        let objs = vec![
            vec![1.0, 5.0], // front 0
            vec![3.0, 3.0], // front 0
            vec![5.0, 1.0], // front 0
            vec![4.0, 4.0], // dominated by [1]
            vec![6.0, 6.0], // dominated by [3]
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 0, 0, 1, 2]);
        assert_eq!(result.fronts[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_all_equal() {
        let objs = vec![vec![2.0, 2.0]; 3];
        let result = non_dominated_sort(&objs);
        assert!(result.ranks.iter().all(|&r| r == 0));
    }

    #[test]
    fn test_four_objectives_incomparable() {
        let objs = vec![
            vec![1.0, 5.0, 3.0, 2.0],
            vec![3.0, 1.0, 5.0, 2.0],
            vec![5.0, 3.0, 1.0, 2.0],
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.fronts.len(), 1);
    }

    #[test]
    fn test_nan_rows_ranked_last() {
        let objs = vec![
            vec![f64::NAN, f64::NAN],
            vec![10.0, 10.0],
            vec![1.0, 1.0],
            vec![f64::NAN, f64::NAN],
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks[2], 0);
        assert_eq!(result.ranks[1], 1);
        assert_eq!(result.ranks[0], 2);
        assert_eq!(result.ranks[3], 2);
        assert_eq!(result.fronts.last().unwrap(), &vec![0, 3]);
    }

    #[test]
    fn test_dominates() {
        assert!(dominates(&[1.0, 1.0], &[2.0, 1.0]));
        assert!(!dominates(&[1.0, 1.0], &[1.0, 1.0]));
        assert!(!dominates(&[1.0, 3.0], &[2.0, 1.0]));
        assert!(dominates(&[100.0, 100.0], &[f64::NAN, 0.0]));
    }

    // ---- Crowding distance ----

    #[test]
    fn test_crowding_two() {
        let dist = crowding_distance(&[vec![1.0, 3.0], vec![3.0, 1.0]]);
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let objs = vec![
            vec![0.0, 4.0],
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            vec![3.0, 1.0],
            vec![4.0, 0.0],
        ];
        let dist = crowding_distance(&objs);

        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        assert!((dist[1] - dist[2]).abs() < 1e-10, "expected equal: {} vs {}", dist[1], dist[2]);
        assert!((dist[2] - dist[3]).abs() < 1e-10, "expected equal: {} vs {}", dist[2], dist[3]);
        // each objective contributes 2/4
        assert!((dist[2] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let objs = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        let dist = crowding_distance(&objs);
        assert!(dist[1].is_finite());
        assert!((dist[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_sort_then_distance_on_front() {
        let objs = vec![
            vec![1.0, 5.0],
            vec![3.0, 3.0],
            vec![5.0, 1.0],
            vec![4.0, 4.0],
        ];
        let sort_result = non_dominated_sort(&objs);
        let front: Vec<Vec<f64>> = sort_result.fronts[0].iter().map(|&i| objs[i].clone()).collect();
        let dist = crowding_distance(&front);
        assert_eq!(dist.len(), 3);
        assert!(dist[1].is_finite());
    }
}
