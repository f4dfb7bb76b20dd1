//! Pareto-front and convergence plots.
//!
//! Every plot is written as an image file (PNG or SVG, see
//! [`ImageFormat`]) into [`RenderConfig::output_dir`] and the function
//! returns the written path.
//!
//! - [`plot_pareto_front`]: 3D scatter for three objectives, 2D for one
//!   or two, with a color bar.
//! - [`plot_pca_projection`]: 2D scatter of PCA-reduced points colored
//!   by the norm of the original objective vectors.
//! - [`plot_convergence`]: best value of each objective per generation.
//! - [`plot_summary`]: Pareto front and convergence side by side.
//!
//! SVG is the default and always available. PNG needs the `fonts`
//! feature, which rasterizes glyphs with system fonts; without it
//! [`RenderConfig::validate`] rejects PNG output.

mod colormap;
mod config;
mod convergence;
mod pareto;

pub use colormap::{color_values, ColorBy, Colormap, Normalize};
pub use config::{ImageFormat, RenderConfig};
pub use convergence::{plot_convergence, plot_summary};
pub use pareto::{plot_pareto_front, plot_pca_projection};

use std::ops::Range;
use std::path::PathBuf;

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::Result;

/// Something that can draw itself onto a drawing area of any backend.
pub(crate) trait Figure {
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &RenderConfig,
    ) -> Result<()>;
}

/// Draws `figure` onto a fresh canvas and writes it to
/// `<output_dir>/<stem>.<ext>`.
pub(crate) fn render<F: Figure>(figure: &F, stem: &str, config: &RenderConfig) -> Result<PathBuf> {
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir)?;
    let path = config
        .output_dir
        .join(format!("{stem}.{}", config.format.extension()));

    match config.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(&path, config.figure_size).into_drawing_area();
            draw_root(&root, figure, config)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(&path, config.figure_size).into_drawing_area();
            draw_root(&root, figure, config)?;
        }
    }

    info!("wrote {}", path.display());
    Ok(path)
}

fn draw_root<DB: DrawingBackend, F: Figure>(
    root: &DrawingArea<DB, Shift>,
    figure: &F,
    config: &RenderConfig,
) -> Result<()> {
    root.fill(&WHITE)?;
    figure.draw(root, config)?;
    root.present()?;
    Ok(())
}

/// Range covering the finite `values` with 5% padding on each side.
/// Degenerate and empty inputs get a unit-wide range.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = span * 0.05;
    (lo - pad)..(hi + pad)
}
