//! Per-generation convergence lines.

use std::path::PathBuf;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::colormap::ColorBy;
use super::config::RenderConfig;
use super::pareto::ScatterFigure;
use super::{padded_range, render, Figure};
use crate::error::{Error, Result};
use crate::matrix::ObjectiveMatrix;

struct ConvergenceFigure<'a> {
    best: &'a [Vec<f64>],
    n_obj: usize,
}

impl<'a> ConvergenceFigure<'a> {
    fn new(best: &'a [Vec<f64>]) -> Result<Self> {
        let n_obj = best.first().map_or(0, Vec::len);
        if n_obj == 0 {
            return Err(Error::EmptyMatrix);
        }
        if let Some(row) = best.iter().find(|r| r.len() != n_obj) {
            return Err(Error::DimensionMismatch {
                expected: n_obj,
                got: row.len(),
            });
        }
        Ok(Self { best, n_obj })
    }
}

impl Figure for ConvergenceFigure<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &RenderConfig,
    ) -> Result<()> {
        let last_gen = (self.best.len() - 1).max(1) as f64;
        let y_range = padded_range(self.best.iter().flatten().copied());

        let mut chart = ChartBuilder::on(area)
            .caption("Best Fitness Over Iterations", config.title_style())
            .margin(15)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d(0.0..last_gen, y_range)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc("Iterations")
            .y_desc("Fitness Value")
            .axis_desc_style(config.label_style())
            .label_style(config.tick_style());
        if config.grid {
            mesh.bold_line_style(config.bold_grid_color())
                .light_line_style(config.light_grid_color());
        } else {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        for k in 0..self.n_obj {
            let style = Palette99::pick(k).stroke_width(2);
            let points = self
                .best
                .iter()
                .enumerate()
                .filter(|(_, row)| row[k].is_finite())
                .map(|(g, row)| (g as f64, row[k]));
            chart
                .draw_series(LineSeries::new(points, style))?
                .label(format!("Objective {}", k + 1))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(config.tick_style())
            .draw()?;
        Ok(())
    }
}

struct SummaryFigure<'a> {
    front: ScatterFigure<'a>,
    convergence: ConvergenceFigure<'a>,
}

impl Figure for SummaryFigure<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &RenderConfig,
    ) -> Result<()> {
        let half = area.dim_in_pixel().0 / 2;
        let (left, right) = area.split_horizontally(half);
        self.front.draw(&left, config)?;
        self.convergence.draw(&right, config)
    }
}

/// Plots one line per objective of its best value per generation.
///
/// `best` is indexed by generation, then objective, as returned by
/// [`OptimizationResult::best_per_generation`](crate::moea::OptimizationResult::best_per_generation).
/// Non-finite entries are skipped. Writes `convergence.<ext>`.
pub fn plot_convergence(best: &[Vec<f64>], config: &RenderConfig) -> Result<PathBuf> {
    let figure = ConvergenceFigure::new(best)?;
    render(&figure, "convergence", config)
}

/// Draws the Pareto front (left) and the convergence lines (right) on one
/// canvas. Writes `summary.<ext>`.
pub fn plot_summary(
    f: &ObjectiveMatrix,
    color_by: ColorBy,
    best: &[Vec<f64>],
    config: &RenderConfig,
) -> Result<PathBuf> {
    let figure = SummaryFigure {
        front: ScatterFigure::pareto_front(f, color_by, "Pareto Front of Multi-Objective Optimization")?,
        convergence: ConvergenceFigure::new(best)?,
    };
    render(&figure, "summary", config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::ImageFormat;

    fn svg_config(dir: &std::path::Path) -> RenderConfig {
        RenderConfig::default()
            .with_output_dir(dir)
            .with_format(ImageFormat::Svg)
    }

    fn best() -> Vec<Vec<f64>> {
        vec![
            vec![3.0, 2.0, 1.0],
            vec![2.0, f64::NAN, 0.5],
            vec![1.0, 1.0, 0.25],
        ]
    }

    #[test]
    fn test_convergence_writes_legend() {
        let dir = tempfile::tempdir().unwrap();
        let path = plot_convergence(&best(), &svg_config(dir.path())).unwrap();
        assert_eq!(path, dir.path().join("convergence.svg"));
        let svg = std::fs::read_to_string(path).unwrap();
        for k in 1..=3 {
            assert!(svg.contains(&format!("Objective {k}")));
        }
        assert!(svg.contains("Iterations"));
    }

    #[test]
    fn test_convergence_single_generation() {
        let dir = tempfile::tempdir().unwrap();
        assert!(plot_convergence(&[vec![1.0, 2.0]], &svg_config(dir.path())).is_ok());
    }

    #[test]
    fn test_convergence_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = svg_config(dir.path());
        assert!(matches!(plot_convergence(&[], &config), Err(Error::EmptyMatrix)));
        assert!(matches!(
            plot_convergence(&[vec![1.0, 2.0], vec![1.0]], &config),
            Err(Error::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_summary() {
        let dir = tempfile::tempdir().unwrap();
        let f = ObjectiveMatrix::from_rows(vec![vec![0.0, 3.0, 0.75], vec![3.0, 0.0, 0.75]]).unwrap();
        let config = RenderConfig::wide()
            .with_output_dir(dir.path())
            .with_format(ImageFormat::Svg);
        let path = plot_summary(&f, ColorBy::Sum, &best(), &config).unwrap();
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("Pareto Front of Multi-Objective Optimization"));
        assert!(svg.contains("Best Fitness Over Iterations"));
    }

    #[test]
    fn test_no_grid() {
        let dir = tempfile::tempdir().unwrap();
        let config = svg_config(dir.path()).with_grid(false);
        assert!(plot_convergence(&best(), &config).is_ok());
    }
}
