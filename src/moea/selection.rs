//! Mating selection.
//!
//! Binary tournaments over a ranked population. All comparisons assume
//! **minimization**: lower rank is better. Problems here carry no
//! constraints, so a feasibility comparison never decides a tournament.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective GA: NSGA-II"
//! - Deb & Jain (2014), "An Evolutionary Many-Objective Optimization
//!   Algorithm Using Reference-Point-Based Nondominated Sorting Approach"

use rand::Rng;

use super::types::Solution;

/// Tournament rule used to pick parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tournament {
    /// Lower rank wins; ties go to the larger crowding distance, then to
    /// a coin flip. Used by NSGA-II.
    #[default]
    RankAndCrowding,

    /// A coin flip between the two contestants. Used by NSGA-III, which
    /// applies all selection pressure in its survival step.
    Random,
}

impl Tournament {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Solution], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let n = population.len();
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        let (sa, sb) = (&population[a], &population[b]);

        if *self == Tournament::RankAndCrowding && sa.rank != sb.rank {
            return if sa.rank < sb.rank { a } else { b };
        }
        if *self == Tournament::RankAndCrowding && sa.crowding != sb.crowding {
            return if sa.crowding > sb.crowding { a } else { b };
        }
        if rng.random_bool(0.5) {
            a
        } else {
            b
        }
    }
}
