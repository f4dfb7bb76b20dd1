//! Optimizer driver configuration.
//!
//! [`MoeaConfig`] holds all parameters that control the evolutionary loop
//! shared by NSGA-II and NSGA-III.

use crate::error::{Error, Result};

/// Configuration for an NSGA-II / NSGA-III run.
///
/// # Defaults
///
/// ```
/// use u_pareto::moea::MoeaConfig;
///
/// let config = MoeaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 200);
/// assert_eq!(config.seed, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pareto::moea::MoeaConfig;
///
/// let config = MoeaConfig::default()
///     .with_population_size(50)
///     .with_max_generations(200)
///     .with_seed(1)
///     .with_save_history(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoeaConfig {
    /// Number of individuals kept between generations.
    pub population_size: usize,

    /// Total number of generations. The initial population counts as
    /// generation 1, so a run performs `max_generations - 1` variation
    /// steps and `population_size * max_generations` evaluations.
    pub max_generations: usize,

    /// Random seed. Identical seeds and configurations reproduce
    /// identical results.
    pub seed: u64,

    /// Whether to keep one objective snapshot per generation.
    pub save_history: bool,

    /// Probability of applying SBX to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the children are copies of the
    /// parents.
    pub crossover_rate: f64,

    /// SBX distribution index. Larger values keep children closer to
    /// their parents.
    pub crossover_eta: f64,

    /// Polynomial mutation distribution index.
    pub mutation_eta: f64,

    /// Per-variable mutation probability.
    ///
    /// `None` uses `1 / n_var`.
    pub mutation_rate: Option<f64>,

    /// Whether to evaluate batches in parallel using rayon.
    ///
    /// Only honored when the crate is built with the `parallel` feature.
    /// Results do not depend on this flag.
    pub parallel: bool,
}

impl Default for MoeaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            seed: 1,
            save_history: true,
            crossover_rate: 0.9,
            crossover_eta: 15.0,
            mutation_eta: 20.0,
            mutation_rate: None,
            parallel: false,
        }
    }
}

impl MoeaConfig {
    /// Operator settings conventional for NSGA-II
    /// (SBX rate 0.9, eta 15; mutation eta 20).
    pub fn nsga2() -> Self {
        Self::default()
    }

    /// Operator settings conventional for NSGA-III
    /// (SBX rate 1.0, eta 30; mutation eta 20).
    pub fn nsga3() -> Self {
        Self {
            crossover_rate: 1.0,
            crossover_eta: 30.0,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables per-generation history.
    pub fn with_save_history(mut self, save: bool) -> Self {
        self.save_history = save;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the SBX distribution index.
    pub fn with_crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = eta;
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Sets the per-variable mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate.clamp(0.0, 1.0));
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Per-variable mutation probability for a problem with `n_var`
    /// variables.
    #[allow(clippy::cast_precision_loss)]
    pub fn effective_mutation_rate(&self, n_var: usize) -> f64 {
        self.mutation_rate
            .unwrap_or_else(|| 1.0 / n_var.max(1) as f64)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(Error::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if !(self.crossover_eta >= 0.0 && self.crossover_eta.is_finite()) {
            return Err(Error::InvalidConfig(
                "crossover_eta must be finite and non-negative".into(),
            ));
        }
        if !(self.mutation_eta >= 0.0 && self.mutation_eta.is_finite()) {
            return Err(Error::InvalidConfig(
                "mutation_eta must be finite and non-negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::InvalidConfig(
                "crossover_rate must be within [0, 1]".into(),
            ));
        }
        if let Some(rate) = self.mutation_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidConfig(
                    "mutation_rate must be within [0, 1]".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MoeaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 200);
        assert_eq!(config.seed, 1);
        assert!(config.save_history);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.crossover_eta - 15.0).abs() < 1e-10);
        assert!((config.mutation_eta - 20.0).abs() < 1e-10);
        assert!(config.mutation_rate.is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn test_nsga3_preset() {
        let config = MoeaConfig::nsga3();
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert!((config.crossover_eta - 30.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MoeaConfig::default()
            .with_population_size(50)
            .with_max_generations(10)
            .with_seed(7)
            .with_save_history(false)
            .with_crossover_rate(0.8)
            .with_crossover_eta(20.0)
            .with_mutation_eta(25.0)
            .with_mutation_rate(0.2)
            .with_parallel(true);

        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 10);
        assert_eq!(config.seed, 7);
        assert!(!config.save_history);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.crossover_eta - 20.0).abs() < 1e-10);
        assert!((config.mutation_eta - 25.0).abs() < 1e-10);
        assert_eq!(config.mutation_rate, Some(0.2));
        assert!(config.parallel);
    }

    #[test]
    fn test_clamp_rates() {
        let config = MoeaConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.5);
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert_eq!(config.mutation_rate, Some(0.0));
    }

    #[test]
    fn test_effective_mutation_rate() {
        let config = MoeaConfig::default();
        assert!((config.effective_mutation_rate(4) - 0.25).abs() < 1e-12);
        let config = config.with_mutation_rate(0.5);
        assert!((config.effective_mutation_rate(4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_ok() {
        assert!(MoeaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = MoeaConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_generation_count() {
        assert!(MoeaConfig::default().with_max_generations(0).validate().is_err());
        // One generation is the initial population alone.
        assert!(MoeaConfig::default().with_max_generations(1).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_eta() {
        assert!(MoeaConfig::default().with_crossover_eta(-1.0).validate().is_err());
        assert!(MoeaConfig::default().with_mutation_eta(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_unclamped_rate() {
        let mut config = MoeaConfig::default();
        config.crossover_rate = 2.0;
        assert!(config.validate().is_err());
    }
}
