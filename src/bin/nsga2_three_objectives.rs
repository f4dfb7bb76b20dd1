//! NSGA-II on the 3-objective squared-distance benchmark.
//!
//! Writes a side-by-side Pareto front / convergence figure to
//! `plots/nsga2_three_objectives/summary.svg`.

use std::error::Error;

use log::{info, LevelFilter};
use u_pareto::scenario::{run_scenario, Scenario};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let scenario = Scenario::three_objective();
    let report = run_scenario(&scenario, &scenario.render_config())?;

    info!(
        "{} valid solutions out of {} on the final front",
        report.clean.n_rows(),
        report.result.f.n_rows()
    );
    if let Some(best) = report.best_per_generation.last() {
        info!("best objectives in the last generation: {best:.4?}");
    }
    Ok(())
}
