//! NSGA-II.
//!
//! Survival keeps whole Pareto fronts while they fit and fills the rest
//! from the first front that does not fit, preferring the largest
//! crowding distance. Parents are picked by binary tournament on
//! (rank, crowding distance).
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use rand::Rng;

use super::config::MoeaConfig;
use super::multi_objective::{crowding_distance, non_dominated_sort};
use super::runner::{self, Survival};
use super::selection::Tournament;
use super::types::{Algorithm, OptimizationResult, Solution};
use crate::error::Result;
use crate::problem::Problem;

/// NSGA-II with SBX crossover and polynomial mutation.
///
/// # Example
///
/// ```
/// use u_pareto::moea::{minimize, MoeaConfig, Nsga2};
/// use u_pareto::SquaredDistanceProblem;
///
/// let problem = SquaredDistanceProblem::three_objective(3).unwrap();
/// let config = MoeaConfig::nsga2().with_population_size(20).with_max_generations(10);
/// let result = minimize(&problem, &Nsga2, &config).unwrap();
/// assert_eq!(result.history.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Nsga2;

impl Algorithm for Nsga2 {
    fn name(&self) -> &'static str {
        "NSGA-II"
    }

    fn minimize<P: Problem>(&self, problem: &P, config: &MoeaConfig) -> Result<OptimizationResult> {
        runner::run(self.name(), problem, config, &mut RankAndCrowdingSurvival)
    }
}

/// Non-dominated sorting followed by crowding-distance truncation.
pub(crate) struct RankAndCrowdingSurvival;

impl Survival for RankAndCrowdingSurvival {
    fn tournament(&self) -> Tournament {
        Tournament::RankAndCrowding
    }

    fn survive<R: Rng>(&mut self, candidates: Vec<Solution>, n: usize, _rng: &mut R) -> Vec<Solution> {
        let objs: Vec<Vec<f64>> = candidates.iter().map(|s| s.f.clone()).collect();
        let sorted = non_dominated_sort(&objs);
        let mut slots: Vec<Option<Solution>> = candidates.into_iter().map(Some).collect();
        let mut survivors = Vec::with_capacity(n);

        for (rank, front) in sorted.fronts.iter().enumerate() {
            if survivors.len() >= n {
                break;
            }
            let front_objs: Vec<Vec<f64>> = front.iter().map(|&i| objs[i].clone()).collect();
            let crowding = crowding_distance(&front_objs);

            let mut order: Vec<usize> = (0..front.len()).collect();
            let remaining = n - survivors.len();
            if front.len() > remaining {
                // Most isolated first; stable sort keeps index order on ties.
                order.sort_by(|&a, &b| {
                    crowding[b]
                        .partial_cmp(&crowding[a])
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                order.truncate(remaining);
            }

            for k in order {
                if let Some(mut s) = slots[front[k]].take() {
                    s.rank = rank;
                    s.crowding = crowding[k];
                    survivors.push(s);
                }
            }
        }

        survivors
    }
}

// ============================================================================
// Tests
// ============================================================================
