//! NSGA-III (reference-direction based survival).
//!
//! NSGA-III replaces crowding distance with niching around a fixed set
//! of [`ReferenceDirections`], which keeps many-objective (3+) fronts
//! spread out where crowding distance loses its meaning.
//!
//! # Survival
//!
//! 1. **Non-dominated sorting**: keep whole fronts while they fit.
//! 2. **Normalization**: translate by the ideal point and scale by the
//!    intercepts of the hyperplane through the extreme points (falling
//!    back to the worst point of the front when the plane is degenerate).
//! 3. **Association**: attach each candidate to the reference direction
//!    with the smallest perpendicular distance.
//! 4. **Niching**: fill the remaining slots from the last front, always
//!    serving the least-populated niche first.
//!
//! # References
//!
//! - Deb & Jain (2014), "An Evolutionary Many-Objective Optimization
//!   Algorithm Using Reference-Point-Based Nondominated Sorting Approach,
//!   Part I"

use log::warn;
use nalgebra::{DMatrix, DVector};
use rand::Rng;

use super::config::MoeaConfig;
use super::multi_objective::non_dominated_sort;
use super::reference::ReferenceDirections;
use super::runner::{self, Survival};
use super::selection::Tournament;
use super::types::{Algorithm, OptimizationResult, Solution};
use crate::error::{Error, Result};
use crate::problem::Problem;

/// Values below this are treated as zero in normalization.
const EPS: f64 = 1e-6;

/// NSGA-III with SBX crossover and polynomial mutation.
///
/// # Example
///
/// ```
/// use u_pareto::moea::{minimize, MoeaConfig, Nsga3, ReferenceDirections};
/// use u_pareto::SquaredDistanceProblem;
///
/// let problem = SquaredDistanceProblem::four_objective().unwrap();
/// let ref_dirs = ReferenceDirections::das_dennis(4, 4).unwrap();
/// let config = MoeaConfig::nsga3().with_population_size(36).with_max_generations(5);
/// let result = minimize(&problem, &Nsga3::new(ref_dirs), &config).unwrap();
/// assert_eq!(result.f.n_cols(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Nsga3 {
    ref_dirs: ReferenceDirections,
}

impl Nsga3 {
    /// Creates NSGA-III guided by `ref_dirs`.
    pub fn new(ref_dirs: ReferenceDirections) -> Self {
        Self { ref_dirs }
    }

    /// The reference directions guiding survival.
    pub fn ref_dirs(&self) -> &ReferenceDirections {
        &self.ref_dirs
    }
}

impl Algorithm for Nsga3 {
    fn name(&self) -> &'static str {
        "NSGA-III"
    }

    fn minimize<P: Problem>(&self, problem: &P, config: &MoeaConfig) -> Result<OptimizationResult> {
        if self.ref_dirs.n_obj() != problem.n_obj() {
            return Err(Error::DimensionMismatch {
                expected: problem.n_obj(),
                got: self.ref_dirs.n_obj(),
            });
        }
        if config.population_size < self.ref_dirs.len() {
            warn!(
                "population size {} is smaller than the number of reference directions {}",
                config.population_size,
                self.ref_dirs.len()
            );
        }
        let mut survival = ReferenceDirectionSurvival::new(&self.ref_dirs);
        runner::run(self.name(), problem, config, &mut survival)
    }
}

/// Survival state carried across generations.
pub(crate) struct ReferenceDirectionSurvival<'a> {
    ref_dirs: &'a ReferenceDirections,
    ideal: Vec<f64>,
    worst: Vec<f64>,
    extremes: Option<Vec<Vec<f64>>>,
}

impl<'a> ReferenceDirectionSurvival<'a> {
    pub(crate) fn new(ref_dirs: &'a ReferenceDirections) -> Self {
        let m = ref_dirs.n_obj();
        Self {
            ref_dirs,
            ideal: vec![f64::INFINITY; m],
            worst: vec![f64::NEG_INFINITY; m],
            extremes: None,
        }
    }

    fn update_bounds(&mut self, objs: &[Vec<f64>]) {
        for row in objs.iter().filter(|r| is_valid(r)) {
            for (k, &v) in row.iter().enumerate() {
                self.ideal[k] = self.ideal[k].min(v);
                self.worst[k] = self.worst[k].max(v);
            }
        }
    }

    /// Nadir estimate for normalization.
    fn nadir(&mut self, objs: &[Vec<f64>], first_front: &[usize], considered: &[usize]) -> Vec<f64> {
        let m = self.ideal.len();
        let front: Vec<&Vec<f64>> = first_front.iter().map(|&i| &objs[i]).collect();

        let mut pool: Vec<Vec<f64>> = front.iter().map(|r| (*r).clone()).collect();
        if let Some(prev) = &self.extremes {
            pool.extend(prev.iter().cloned());
        }
        let extremes = extreme_points(&pool, &self.ideal);

        let worst_of_front = column_max(front.iter().copied(), m);
        let worst_of_population = column_max(considered.iter().map(|&i| &objs[i]), m);

        let mut nadir = hyperplane_nadir(&extremes, &self.ideal, &self.worst)
            .unwrap_or(worst_of_front);
        for k in 0..m {
            if nadir[k] - self.ideal[k] <= EPS {
                nadir[k] = worst_of_population[k];
            }
        }
        self.extremes = Some(extremes);
        nadir
    }
}

impl Survival for ReferenceDirectionSurvival<'_> {
    fn tournament(&self) -> Tournament {
        Tournament::Random
    }

    fn survive<R: Rng>(&mut self, candidates: Vec<Solution>, n: usize, rng: &mut R) -> Vec<Solution> {
        let objs: Vec<Vec<f64>> = candidates.iter().map(|s| s.f.clone()).collect();
        let sorted = non_dominated_sort(&objs);
        self.update_bounds(&objs);

        // Fronts that fit entirely, and the one that overflows.
        let mut selected: Vec<usize> = Vec::with_capacity(n);
        let mut last_front: &[usize] = &[];
        for front in &sorted.fronts {
            if selected.len() + front.len() <= n {
                selected.extend_from_slice(front);
            } else {
                last_front = front.as_slice();
                break;
            }
        }

        if selected.len() < n && !last_front.is_empty() {
            let mut considered = selected.clone();
            considered.extend_from_slice(last_front);

            let first_front = sorted.fronts.first().map(Vec::as_slice).unwrap_or_default();
            let nadir = self.nadir(&objs, first_front, &considered);
            let normalized = normalize(&objs, &self.ideal, &nadir);
            let associations = associate(&normalized, self.ref_dirs.points());

            let chosen = niching(
                rng,
                &associations,
                &selected,
                last_front,
                self.ref_dirs.len(),
                n - selected.len(),
            );
            selected.extend(chosen);
        }

        let mut slots: Vec<Option<Solution>> = candidates.into_iter().map(Some).collect();
        selected
            .into_iter()
            .filter_map(|i| {
                slots[i].take().map(|mut s| {
                    s.rank = sorted.ranks[i];
                    s.crowding = 0.0;
                    s
                })
            })
            .collect()
    }
}

fn is_valid(row: &[f64]) -> bool {
    row.iter().all(|v| v.is_finite())
}

fn column_max<'r>(rows: impl Iterator<Item = &'r Vec<f64>>, m: usize) -> Vec<f64> {
    let mut out = vec![f64::NEG_INFINITY; m];
    for row in rows.filter(|r| is_valid(r)) {
        for (k, &v) in row.iter().enumerate() {
            out[k] = out[k].max(v);
        }
    }
    out
}

/// Achievement scalarizing function with an axis-aligned weight.
fn asf(point: &[f64], ideal: &[f64], axis: usize) -> f64 {
    point
        .iter()
        .zip(ideal)
        .enumerate()
        .map(|(k, (&p, &z))| {
            let shifted = p - z;
            let shifted = if shifted < 1e-3 { 0.0 } else { shifted };
            let w = if k == axis { 1.0 } else { EPS };
            shifted / w
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// One extreme point per objective: the point minimizing the ASF along
/// that axis.
fn extreme_points(pool: &[Vec<f64>], ideal: &[f64]) -> Vec<Vec<f64>> {
    (0..ideal.len())
        .filter_map(|axis| {
            pool.iter()
                .filter(|p| is_valid(p))
                .min_by(|a, b| {
                    asf(a, ideal, axis)
                        .partial_cmp(&asf(b, ideal, axis))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .cloned()
        })
        .collect()
}

/// Nadir from the intercepts of the hyperplane through the extreme
/// points, capped at `worst`. `None` when the plane is degenerate.
fn hyperplane_nadir(extremes: &[Vec<f64>], ideal: &[f64], worst: &[f64]) -> Option<Vec<f64>> {
    let m = ideal.len();
    if extremes.len() != m {
        return None;
    }
    let a = DMatrix::from_fn(m, m, |r, c| extremes[r][c] - ideal[c]);
    let b = DVector::from_element(m, 1.0);
    let plane = a.clone().lu().solve(&b)?;

    let residual = (&a * &plane - &b).amax();
    if !residual.is_finite() || residual > 1e-6 {
        return None;
    }
    let intercepts: Vec<f64> = plane.iter().map(|&p| 1.0 / p).collect();
    if intercepts.iter().any(|&v| !v.is_finite() || v <= EPS) {
        return None;
    }

    Some(
        intercepts
            .iter()
            .zip(ideal)
            .zip(worst)
            .map(|((&icpt, &z), &w)| (z + icpt).min(w))
            .collect(),
    )
}

/// Translate by `ideal` and scale by `nadir - ideal`.
fn normalize(objs: &[Vec<f64>], ideal: &[f64], nadir: &[f64]) -> Vec<Vec<f64>> {
    objs.iter()
        .map(|row| {
            row.iter()
                .zip(ideal)
                .zip(nadir)
                .map(|((&v, &z), &zn)| {
                    let denom = zn - z;
                    let denom = if denom > EPS { denom } else { EPS };
                    (v - z) / denom
                })
                .collect()
        })
        .collect()
}

/// Perpendicular distance from `point` to the line spanned by `direction`.
fn perpendicular_distance(point: &[f64], direction: &[f64]) -> f64 {
    let norm_sq: f64 = direction.iter().map(|d| d * d).sum();
    if norm_sq < 1e-30 {
        return f64::INFINITY;
    }
    let dot: f64 = point.iter().zip(direction).map(|(p, d)| p * d).sum();
    let t = dot / norm_sq;
    point
        .iter()
        .zip(direction)
        .map(|(&p, &d)| (p - t * d).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// `(niche, distance)` of each row's closest reference direction.
fn associate(normalized: &[Vec<f64>], directions: &[Vec<f64>]) -> Vec<(usize, f64)> {
    normalized
        .iter()
        .map(|point| {
            let mut best = (0, f64::INFINITY);
            for (j, dir) in directions.iter().enumerate() {
                let d = perpendicular_distance(point, dir);
                if d < best.1 {
                    best = (j, d);
                }
            }
            best
        })
        .collect()
}

/// Picks `remaining` members of `last_front`, serving the niche with the
/// fewest members first. An empty niche takes its closest candidate; an
/// occupied one takes a random candidate.
fn niching<R: Rng>(
    rng: &mut R,
    associations: &[(usize, f64)],
    already_selected: &[usize],
    last_front: &[usize],
    n_niches: usize,
    remaining: usize,
) -> Vec<usize> {
    let mut niche_count = vec![0usize; n_niches];
    for &idx in already_selected {
        niche_count[associations[idx].0] += 1;
    }

    let mut pending: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n_niches];
    for &idx in last_front {
        let (niche, dist) = associations[idx];
        pending[niche].push((idx, dist));
    }

    let mut chosen = Vec::with_capacity(remaining);
    while chosen.len() < remaining {
        let Some(min_count) = (0..n_niches)
            .filter(|&j| !pending[j].is_empty())
            .map(|j| niche_count[j])
            .min()
        else {
            break;
        };

        let candidates: Vec<usize> = (0..n_niches)
            .filter(|&j| !pending[j].is_empty() && niche_count[j] == min_count)
            .collect();
        let niche = candidates[rng.random_range(0..candidates.len())];

        let pick = if niche_count[niche] == 0 {
            pending[niche]
                .iter()
                .enumerate()
                .min_by(|a, b| {
                    a.1 .1
                        .partial_cmp(&b.1 .1)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map_or(0, |(pos, _)| pos)
        } else {
            rng.random_range(0..pending[niche].len())
        };

        let (idx, _) = pending[niche].swap_remove(pick);
        chosen.push(idx);
        niche_count[niche] += 1;
    }

    chosen
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moea::minimize;
    use crate::problem::SquaredDistanceProblem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_perpendicular_distance() {
        let d = perpendicular_distance(&[1.0, 0.0], &[1.0, 1.0]);
        assert!((d - 0.5_f64.sqrt()).abs() < 1e-10);
        assert!(perpendicular_distance(&[2.0, 2.0], &[1.0, 1.0]) < 1e-10);
        assert!(perpendicular_distance(&[1.0, 1.0], &[0.0, 0.0]).is_infinite());
    }

    #[test]
    fn test_normalize() {
        let normalized = normalize(&[vec![2.0, 4.0], vec![4.0, 2.0]], &[1.0, 1.0], &[4.0, 4.0]);
        assert!((normalized[0][0] - 1.0 / 3.0).abs() < 1e-10);
        assert!((normalized[0][1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_associate_picks_closest_direction() {
        let dirs = vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]];
        let assoc = associate(&[vec![0.9, 0.1], vec![0.4, 0.5], vec![0.0, 2.0]], &dirs);
        assert_eq!(assoc[0].0, 0);
        assert_eq!(assoc[1].0, 1);
        assert_eq!(assoc[2].0, 2);
        assert!(assoc[2].1 < 1e-12);
    }

    #[test]
    fn test_hyperplane_nadir_on_simplex() {
        // Extremes on the plane f1 + f2 + f3 = 2: intercepts at 2.
        let extremes = vec![vec![2.0, 0.0, 0.0], vec![0.0, 2.0, 0.0], vec![0.0, 0.0, 2.0]];
        let nadir = hyperplane_nadir(&extremes, &[0.0; 3], &[10.0; 3]).unwrap();
        for v in nadir {
            assert!((v - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hyperplane_nadir_degenerate() {
        let extremes = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        assert!(hyperplane_nadir(&extremes, &[0.0; 2], &[5.0; 2]).is_none());
    }

    #[test]
    fn test_niching_prefers_empty_niches() {
        let mut rng = StdRng::seed_from_u64(3);
        // Niche 0 already holds index 0; last front has one candidate in
        // niche 0 and one in niche 1.
        let associations = vec![(0, 0.1), (0, 0.2), (1, 0.3)];
        let chosen = niching(&mut rng, &associations, &[0], &[1, 2], 2, 1);
        assert_eq!(chosen, vec![2]);
    }

    #[test]
    fn test_niching_closest_in_empty_niche() {
        let mut rng = StdRng::seed_from_u64(3);
        let associations = vec![(0, 0.5), (0, 0.1), (0, 0.3)];
        let chosen = niching(&mut rng, &associations, &[], &[0, 1, 2], 1, 1);
        assert_eq!(chosen, vec![1]);
    }

    #[test]
    fn test_niching_stops_when_exhausted() {
        let mut rng = StdRng::seed_from_u64(3);
        let associations = vec![(0, 0.5)];
        let chosen = niching(&mut rng, &associations, &[], &[0], 1, 5);
        assert_eq!(chosen, vec![0]);
    }

    #[test]
    fn test_survival_size() {
        let dirs = ReferenceDirections::das_dennis(2, 4).unwrap();
        let mut survival = ReferenceDirectionSurvival::new(&dirs);
        let mut rng = StdRng::seed_from_u64(0);
        let candidates: Vec<Solution> = (0..10)
            .map(|i| {
                let t = f64::from(i) / 9.0;
                Solution::new(vec![t], vec![t, 1.0 - t])
            })
            .collect();
        let survivors = survival.survive(candidates, 5, &mut rng);
        assert_eq!(survivors.len(), 5);
        assert!(survivors.iter().all(|s| s.rank == 0));
        // The two extremes sit exactly on the axis directions.
        let fs: Vec<Vec<f64>> = survivors.iter().map(|s| s.f.clone()).collect();
        assert!(fs.contains(&vec![0.0, 1.0]));
        assert!(fs.contains(&vec![1.0, 0.0]));
    }

    #[test]
    fn test_mismatched_ref_dirs_rejected() {
        let problem = SquaredDistanceProblem::three_objective(3).unwrap();
        let algo = Nsga3::new(ReferenceDirections::das_dennis(4, 3).unwrap());
        let config = MoeaConfig::nsga3().with_population_size(10).with_max_generations(1);
        assert!(matches!(
            minimize(&problem, &algo, &config),
            Err(Error::DimensionMismatch { expected: 3, got: 4 })
        ));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let problem = SquaredDistanceProblem::four_objective().unwrap();
        let algo = Nsga3::new(ReferenceDirections::das_dennis(4, 4).unwrap());
        let config = MoeaConfig::nsga3()
            .with_population_size(36)
            .with_max_generations(10)
            .with_seed(1);
        let a = minimize(&problem, &algo, &config).unwrap();
        let b = minimize(&problem, &algo, &config).unwrap();
        assert_eq!(a.x, b.x);
        assert_eq!(a.f, b.f);
    }

    #[test]
    fn test_improves_over_initial_population() {
        let problem = SquaredDistanceProblem::four_objective().unwrap();
        let algo = Nsga3::new(ReferenceDirections::das_dennis(4, 4).unwrap());
        let config = MoeaConfig::nsga3()
            .with_population_size(36)
            .with_max_generations(40);
        let result = minimize(&problem, &algo, &config).unwrap();
        let best = result.best_per_generation();
        let first = &best[0];
        let last = &best[best.len() - 1];
        for k in 0..4 {
            assert!(last[k] < first[k], "objective {k}: {} !< {}", last[k], first[k]);
        }
    }
}
