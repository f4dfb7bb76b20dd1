//! NSGA-III on the 4-objective squared-distance benchmark.
//!
//! Writes the PCA projection of the final front and the convergence
//! lines to `plots/nsga3_four_objectives/`.

use std::error::Error;

use log::{info, LevelFilter};
use u_pareto::scenario::{run_scenario, Scenario};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let scenario = Scenario::four_objective();
    let report = run_scenario(&scenario, &scenario.render_config())?;

    info!(
        "{} valid solutions, {} evaluations",
        report.clean.n_rows(),
        report.result.n_eval
    );
    for path in &report.plots {
        info!("see {}", path.display());
    }
    Ok(())
}
