//! The two end-to-end benchmark runs.
//!
//! A [`Scenario`] bundles a problem, an algorithm and its configuration;
//! [`run_scenario`] drives the full pipeline: optimize, sanitize,
//! reduce (four objectives only) and plot.

use std::path::PathBuf;

use log::info;

use crate::error::Result;
use crate::matrix::ObjectiveMatrix;
use crate::moea::{self, MoeaConfig, Nsga2, Nsga3, OptimizationResult, ReferenceDirections};
use crate::pca::reduce_to_2d;
use crate::plot::{self, ColorBy, RenderConfig};
use crate::problem::SquaredDistanceProblem;
use crate::sanitize::clean_results;

/// A preset benchmark run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scenario {
    /// NSGA-II on three objectives (targets 0, 1, 0.5) over `[0, 1]^n_var`.
    ThreeObjectiveNsga2 {
        /// Number of decision variables.
        n_var: usize,
        /// Optimizer settings.
        config: MoeaConfig,
    },
    /// NSGA-III on four objectives (targets 0, 1, -1, 0.5) over
    /// `[-5, 5]^10`, guided by Das-Dennis directions.
    FourObjectiveNsga3 {
        /// Das-Dennis partitions per axis.
        n_partitions: usize,
        /// Optimizer settings.
        config: MoeaConfig,
    },
}

impl Scenario {
    /// 3 variables, population 50, 200 generations, seed 1.
    pub fn three_objective() -> Self {
        Scenario::ThreeObjectiveNsga2 {
            n_var: 3,
            config: MoeaConfig::nsga2()
                .with_population_size(50)
                .with_max_generations(200)
                .with_seed(1),
        }
    }

    /// 12 partitions (455 directions), population 100, 200 generations,
    /// seed 1.
    pub fn four_objective() -> Self {
        Scenario::FourObjectiveNsga3 {
            n_partitions: 12,
            config: MoeaConfig::nsga3()
                .with_population_size(100)
                .with_max_generations(200)
                .with_seed(1),
        }
    }

    /// Short identifier, used as the output subdirectory.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::ThreeObjectiveNsga2 { .. } => "nsga2_three_objectives",
            Scenario::FourObjectiveNsga3 { .. } => "nsga3_four_objectives",
        }
    }

    /// Optimizer settings of this scenario.
    pub fn config(&self) -> &MoeaConfig {
        match self {
            Scenario::ThreeObjectiveNsga2 { config, .. }
            | Scenario::FourObjectiveNsga3 { config, .. } => config,
        }
    }

    /// Replaces the optimizer settings.
    pub fn with_config(mut self, new: MoeaConfig) -> Self {
        match &mut self {
            Scenario::ThreeObjectiveNsga2 { config, .. }
            | Scenario::FourObjectiveNsga3 { config, .. } => *config = new,
        }
        self
    }

    /// Rendering preset matching the scenario's layout.
    pub fn render_config(&self) -> RenderConfig {
        match self {
            Scenario::ThreeObjectiveNsga2 { .. } => RenderConfig::wide(),
            Scenario::FourObjectiveNsga3 { .. } => RenderConfig::default(),
        }
    }
}

/// Everything a scenario run produced.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// Raw optimizer output.
    pub result: OptimizationResult,
    /// Final objective matrix without NaN/Inf rows.
    pub clean: ObjectiveMatrix,
    /// Best value of each objective per generation.
    pub best_per_generation: Vec<Vec<f64>>,
    /// Image files written, in drawing order.
    pub plots: Vec<PathBuf>,
}

/// Runs `scenario` end to end, writing its plots under
/// `render.output_dir/<scenario name>/`.
pub fn run_scenario(scenario: &Scenario, render: &RenderConfig) -> Result<ScenarioReport> {
    render.validate()?;
    let render = render
        .clone()
        .with_output_dir(render.output_dir.join(scenario.name()));
    info!("running scenario {}", scenario.name());

    match scenario {
        Scenario::ThreeObjectiveNsga2 { n_var, config } => {
            let problem = SquaredDistanceProblem::three_objective(*n_var)?;
            problem.probe_initial_conditions();
            let result = moea::minimize(&problem, &Nsga2, config)?;

            let clean = clean_results(&result.f);
            let best = result.best_per_generation();
            let summary = plot::plot_summary(&clean, ColorBy::Sum, &best, &render)?;

            Ok(ScenarioReport {
                result,
                clean,
                best_per_generation: best,
                plots: vec![summary],
            })
        }
        Scenario::FourObjectiveNsga3 {
            n_partitions,
            config,
        } => {
            let problem = SquaredDistanceProblem::four_objective()?;
            let ref_dirs = ReferenceDirections::das_dennis(4, *n_partitions)?;
            let result = moea::minimize(&problem, &Nsga3::new(ref_dirs), config)?;

            let clean = clean_results(&result.f);
            let reduced = reduce_to_2d(&clean)?;
            let best = result.best_per_generation();
            let projection = plot::plot_pca_projection(&reduced, &clean, &render)?;
            let convergence = plot::plot_convergence(&best, &render)?;

            Ok(ScenarioReport {
                result,
                clean,
                best_per_generation: best,
                plots: vec![projection, convergence],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let three = Scenario::three_objective();
        assert_eq!(three.config().population_size, 50);
        assert_eq!(three.config().max_generations, 200);
        assert_eq!(three.config().seed, 1);
        assert_eq!(three.render_config(), RenderConfig::wide());

        let four = Scenario::four_objective();
        assert_eq!(four.config().population_size, 100);
        assert!(matches!(four, Scenario::FourObjectiveNsga3 { n_partitions: 12, .. }));
    }

    #[test]
    fn test_with_config() {
        let scenario = Scenario::four_objective()
            .with_config(MoeaConfig::nsga3().with_population_size(12).with_max_generations(3));
        assert_eq!(scenario.config().max_generations, 3);
        assert_eq!(scenario.name(), "nsga3_four_objectives");
    }

    #[test]
    fn test_invalid_render_config_fails_fast() {
        let render = RenderConfig::default().with_figure_size(1, 1);
        assert!(run_scenario(&Scenario::three_objective(), &render).is_err());
    }
}
