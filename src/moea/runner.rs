//! Evolutionary loop execution.
//!
//! [`run`] drives the loop shared by NSGA-II and NSGA-III:
//! initialization → evaluation → survival, then (mating → variation →
//! evaluation → survival) for each remaining generation. The initial
//! population is generation 1. The algorithms differ only in
//! their [`Survival`] strategy and tournament rule.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::MoeaConfig;
use super::multi_objective::non_dominated_sort;
use super::operators::{polynomial_mutation, random_vector, sbx_crossover};
use super::selection::Tournament;
use super::types::{GenerationSnapshot, OptimizationResult, Solution};
use crate::error::{Error, Result};
use crate::matrix::ObjectiveMatrix;
use crate::problem::{validate_bounds, Problem};

/// Environmental selection strategy.
pub(crate) trait Survival {
    /// Tournament rule used for mating selection.
    fn tournament(&self) -> Tournament;

    /// Reduces `candidates` to at most `n` members and sets their `rank`
    /// (and `crowding`, where used).
    fn survive<R: Rng>(&mut self, candidates: Vec<Solution>, n: usize, rng: &mut R) -> Vec<Solution>;
}

/// Runs the evolutionary loop with the given survival strategy.
pub(crate) fn run<P: Problem, S: Survival>(
    name: &str,
    problem: &P,
    config: &MoeaConfig,
    survival: &mut S,
) -> Result<OptimizationResult> {
    config.validate()?;
    validate_bounds(problem.n_var(), problem.lower_bounds(), problem.upper_bounds())?;
    if problem.n_obj() == 0 {
        return Err(Error::InvalidConfig("problem must have at least one objective".into()));
    }

    let n = config.population_size;
    let n_obj = problem.n_obj();
    let lower = problem.lower_bounds();
    let upper = problem.upper_bounds();
    let tournament = survival.tournament();
    let mutation_rate = config.effective_mutation_rate(problem.n_var());
    let mut rng = StdRng::seed_from_u64(config.seed);

    info!(
        "{name}: population {n}, {} variables, {n_obj} objectives, {} generations, seed {}",
        problem.n_var(),
        config.max_generations,
        config.seed
    );

    // 1. Initialize and evaluate
    let xs: Vec<Vec<f64>> = (0..n).map(|_| random_vector(lower, upper, &mut rng)).collect();
    let f = evaluate_batch(problem, &xs, config.parallel)?;
    let mut n_eval = xs.len();
    let mut population = survival.survive(pair_up(xs, f), n, &mut rng);

    let mut history = Vec::new();
    if config.save_history {
        history.reserve(config.max_generations);
        history.push(snapshot(1, n_eval, &population, n_obj));
    }
    log_generation(1, n_eval, &population, n_obj);

    // 2. Evolutionary loop
    for gen in 2..=config.max_generations {
        let mut offspring = Vec::with_capacity(n);
        while offspring.len() < n {
            let p1 = &population[tournament.select(&population, &mut rng)];
            let p2 = &population[tournament.select(&population, &mut rng)];

            let (mut c1, mut c2) = if rng.random::<f64>() < config.crossover_rate {
                sbx_crossover(&p1.x, &p2.x, lower, upper, config.crossover_eta, &mut rng)
            } else {
                (p1.x.clone(), p2.x.clone())
            };

            polynomial_mutation(&mut c1, lower, upper, config.mutation_eta, mutation_rate, &mut rng);
            polynomial_mutation(&mut c2, lower, upper, config.mutation_eta, mutation_rate, &mut rng);

            offspring.push(c1);
            if offspring.len() < n {
                offspring.push(c2);
            }
        }

        let f = evaluate_batch(problem, &offspring, config.parallel)?;
        n_eval += offspring.len();

        let mut merged = population;
        merged.extend(pair_up(offspring, f));
        population = survival.survive(merged, n, &mut rng);

        if config.save_history {
            history.push(snapshot(gen, n_eval, &population, n_obj));
        }
        log_generation(gen, n_eval, &population, n_obj);
    }

    // 3. Non-dominated members of the final population
    let objs: Vec<Vec<f64>> = population.iter().map(|s| s.f.clone()).collect();
    let front = non_dominated_sort(&objs).fronts.into_iter().next().unwrap_or_default();
    let x = front.iter().map(|&i| population[i].x.clone()).collect();
    let f = ObjectiveMatrix::from_rows_with_columns(
        n_obj,
        front.iter().map(|&i| population[i].f.clone()).collect(),
    )?;

    info!(
        "{name} finished: {} generations, {n_eval} evaluations, {} non-dominated solutions",
        config.max_generations,
        f.n_rows()
    );

    Ok(OptimizationResult {
        algorithm: name.to_string(),
        x,
        f,
        population,
        n_gen: config.max_generations,
        n_eval,
        history,
    })
}

/// Evaluates a batch and checks the returned shape.
pub(crate) fn evaluate_batch<P: Problem>(
    problem: &P,
    xs: &[Vec<f64>],
    parallel: bool,
) -> Result<ObjectiveMatrix> {
    let f = evaluate_maybe_parallel(problem, xs, parallel)?;
    if f.n_rows() != xs.len() {
        return Err(Error::DimensionMismatch {
            expected: xs.len(),
            got: f.n_rows(),
        });
    }
    if f.n_cols() != problem.n_obj() {
        return Err(Error::DimensionMismatch {
            expected: problem.n_obj(),
            got: f.n_cols(),
        });
    }
    Ok(f)
}

#[cfg(feature = "parallel")]
fn evaluate_maybe_parallel<P: Problem>(
    problem: &P,
    xs: &[Vec<f64>],
    parallel: bool,
) -> Result<ObjectiveMatrix> {
    if !parallel || xs.len() < 2 {
        return Ok(problem.evaluate(xs));
    }
    let chunk = (xs.len() / rayon::current_num_threads()).max(1);
    let parts: Vec<ObjectiveMatrix> = xs.par_chunks(chunk).map(|c| problem.evaluate(c)).collect();
    // A problem may answer a degenerate batch as a whole, so chunks with
    // non-finite values are redone on the full batch.
    if parts.iter().any(|p| p.iter().flatten().any(|v| !v.is_finite())) {
        return Ok(problem.evaluate(xs));
    }
    let mut f = ObjectiveMatrix::with_columns(problem.n_obj());
    for part in parts {
        f.extend(part)?;
    }
    Ok(f)
}

#[cfg(not(feature = "parallel"))]
fn evaluate_maybe_parallel<P: Problem>(
    problem: &P,
    xs: &[Vec<f64>],
    _parallel: bool,
) -> Result<ObjectiveMatrix> {
    Ok(problem.evaluate(xs))
}

fn pair_up(xs: Vec<Vec<f64>>, f: ObjectiveMatrix) -> Vec<Solution> {
    xs.into_iter()
        .zip(f.into_rows())
        .map(|(x, f)| Solution::new(x, f))
        .collect()
}

fn objectives(population: &[Solution], n_obj: usize) -> ObjectiveMatrix {
    let rows = population.iter().map(|s| s.f.clone()).collect();
    ObjectiveMatrix::from_rows_with_columns(n_obj, rows)
        .unwrap_or_else(|_| ObjectiveMatrix::with_columns(n_obj))
}

fn snapshot(n_gen: usize, n_eval: usize, population: &[Solution], n_obj: usize) -> GenerationSnapshot {
    GenerationSnapshot {
        n_gen,
        n_eval,
        f: objectives(population, n_obj),
    }
}

fn log_generation(n_gen: usize, n_eval: usize, population: &[Solution], n_obj: usize) {
    if log::log_enabled!(log::Level::Debug) {
        let front = population.iter().filter(|s| s.rank == 0).count();
        let best = objectives(population, n_obj).column_min();
        debug!("n_gen {n_gen:>4} | n_eval {n_eval:>6} | n_nds {front:>4} | best {best:.4?}");
    }
}

// ============================================================================
// Tests
// ============================================================================
