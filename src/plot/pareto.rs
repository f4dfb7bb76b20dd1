//! Objective-space scatter plots with a color bar.

use std::path::PathBuf;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::colormap::{color_values, ColorBy, Normalize};
use super::config::RenderConfig;
use super::{padded_range, render, Figure};
use crate::error::{Error, Result};
use crate::matrix::ObjectiveMatrix;

/// Width reserved for the color bar, in pixels.
const COLORBAR_WIDTH: u32 = 150;

/// Number of color steps drawn in the color bar.
const COLORBAR_STEPS: u32 = 64;

enum Points {
    Planar {
        points: Vec<(f64, f64)>,
        x_label: String,
        y_label: String,
    },
    Spatial(Vec<(f64, f64, f64)>),
}

/// A scatter of objective vectors colored by one scalar each.
pub(crate) struct ScatterFigure<'a> {
    points: Points,
    values: Vec<f64>,
    title: &'a str,
    color_label: &'a str,
}

impl<'a> ScatterFigure<'a> {
    /// Scatter of the finite rows of `f` (1 to 3 columns).
    pub(crate) fn pareto_front(f: &ObjectiveMatrix, color_by: ColorBy, title: &'a str) -> Result<Self> {
        if f.n_cols() > 3 {
            return Err(Error::DimensionMismatch {
                expected: 3,
                got: f.n_cols(),
            });
        }
        let kept = finite_rows(f);
        if kept.is_empty() || f.n_cols() == 0 {
            return Err(Error::EmptyMatrix);
        }
        let values = color_values(&kept, color_by);

        let points = match kept.n_cols() {
            3 => Points::Spatial(kept.iter().map(|r| (r[0], r[1], r[2])).collect()),
            2 => Points::Planar {
                points: kept.iter().map(|r| (r[0], r[1])).collect(),
                x_label: "f1(x)".into(),
                y_label: "f2(x)".into(),
            },
            _ => Points::Planar {
                points: kept.iter().enumerate().map(|(i, r)| (i as f64, r[0])).collect(),
                x_label: "Solution".into(),
                y_label: "f1(x)".into(),
            },
        };

        Ok(Self {
            points,
            values,
            title,
            color_label: color_by.label(),
        })
    }

    /// Scatter of reduced points, colored by the norm of the matching
    /// original rows.
    pub(crate) fn projection(
        reduced: &ObjectiveMatrix,
        original: &ObjectiveMatrix,
        title: &'a str,
    ) -> Result<Self> {
        if reduced.n_rows() != original.n_rows() {
            return Err(Error::DimensionMismatch {
                expected: original.n_rows(),
                got: reduced.n_rows(),
            });
        }
        if reduced.n_cols() > 2 {
            return Err(Error::DimensionMismatch {
                expected: 2,
                got: reduced.n_cols(),
            });
        }
        if reduced.is_empty() || reduced.n_cols() == 0 {
            return Err(Error::EmptyMatrix);
        }

        let values = color_values(original, ColorBy::Norm);
        let points = reduced
            .iter()
            .map(|r| (r[0], r.get(1).copied().unwrap_or(0.0)))
            .collect();

        Ok(Self {
            points: Points::Planar {
                points,
                x_label: "First Principal Component".into(),
                y_label: "Second Principal Component".into(),
            },
            values,
            title,
            color_label: ColorBy::Norm.label(),
        })
    }
}

impl Figure for ScatterFigure<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &RenderConfig,
    ) -> Result<()> {
        let width = area.dim_in_pixel().0;
        let (plot_area, bar_area) = area.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));
        let norm = Normalize::from_values(&self.values);

        match &self.points {
            Points::Planar {
                points,
                x_label,
                y_label,
            } => {
                let x_range = padded_range(points.iter().map(|p| p.0));
                let y_range = padded_range(points.iter().map(|p| p.1));
                let mut chart = ChartBuilder::on(&plot_area)
                    .caption(self.title, config.title_style())
                    .margin(15)
                    .x_label_area_size(70)
                    .y_label_area_size(90)
                    .build_cartesian_2d(x_range, y_range)?;

                let mut mesh = chart.configure_mesh();
                mesh.x_desc(x_label.as_str())
                    .y_desc(y_label.as_str())
                    .axis_desc_style(config.label_style())
                    .label_style(config.tick_style());
                if config.grid {
                    mesh.bold_line_style(config.bold_grid_color())
                        .light_line_style(config.light_grid_color());
                } else {
                    mesh.disable_mesh();
                }
                mesh.draw()?;

                chart.draw_series(points.iter().zip(&self.values).map(|(&p, &v)| {
                    Circle::new(p, config.point_size, config.colormap.color(norm.apply(v)).filled())
                }))?;
            }
            Points::Spatial(points) => {
                // plotters draws y upwards; f3 goes on the vertical axis.
                let x_range = padded_range(points.iter().map(|p| p.0));
                let y_range = padded_range(points.iter().map(|p| p.2));
                let z_range = padded_range(points.iter().map(|p| p.1));
                let mut chart = ChartBuilder::on(&plot_area)
                    .caption(self.title, config.title_style())
                    .margin(20)
                    .build_cartesian_3d(x_range.clone(), y_range.clone(), z_range.clone())?;
                chart.with_projection(|mut pb| {
                    pb.pitch = 0.35;
                    pb.yaw = 0.75;
                    pb.scale = 0.8;
                    pb.into_matrix()
                });

                let mut axes = chart.configure_axes();
                axes.label_style(config.tick_style()).max_light_lines(3);
                if config.grid {
                    axes.bold_grid_style(config.bold_grid_color())
                        .light_grid_style(config.light_grid_color());
                } else {
                    axes.bold_grid_style(WHITE.mix(0.0))
                        .light_grid_style(WHITE.mix(0.0));
                }
                axes.draw()?;

                chart.draw_series(points.iter().zip(&self.values).map(|(&(f1, f2, f3), &v)| {
                    Circle::new(
                        (f1, f3, f2),
                        config.point_size,
                        config.colormap.color(norm.apply(v)).filled(),
                    )
                }))?;
                chart.draw_series([
                    Text::new("f1(x)", (x_range.end, y_range.start, z_range.start), config.label_style()),
                    Text::new("f2(x)", (x_range.start, y_range.start, z_range.end), config.label_style()),
                    Text::new("f3(x)", (x_range.start, y_range.end, z_range.start), config.label_style()),
                ])?;
            }
        }

        draw_colorbar(&bar_area, &norm, self.color_label, config)
    }
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    norm: &Normalize,
    label: &str,
    config: &RenderConfig,
) -> Result<()> {
    let range = norm.display_range();
    let span = range.end - range.start;
    let mut chart = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_right(20)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..1.0, range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_desc(label)
        .axis_desc_style(config.label_style())
        .label_style(config.tick_style())
        .draw()?;

    let steps = f64::from(COLORBAR_STEPS);
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let i = f64::from(i);
        let lo = range.start + span * i / steps;
        let hi = range.start + span * (i + 1.0) / steps;
        let color = config.colormap.color((i + 0.5) / steps);
        Rectangle::new([(0.0, lo), (1.0, hi)], color.filled())
    }))?;
    Ok(())
}

fn finite_rows(f: &ObjectiveMatrix) -> ObjectiveMatrix {
    let keep: Vec<usize> = (0..f.n_rows())
        .filter(|&i| f.row(i).iter().all(|v| v.is_finite()))
        .collect();
    f.select_rows(&keep)
}

/// Plots the objective vectors of `f` colored by `color_by`.
///
/// Three columns give a 3D scatter, one or two a 2D scatter; reduce wider
/// matrices with [`reduce_to_2d`](crate::pca::reduce_to_2d) and use
/// [`plot_pca_projection`] instead. Rows with NaN or infinite values are
/// skipped. Writes `pareto_front.<ext>`.
pub fn plot_pareto_front(f: &ObjectiveMatrix, color_by: ColorBy, config: &RenderConfig) -> Result<PathBuf> {
    let figure = ScatterFigure::pareto_front(f, color_by, "Pareto Front of Multi-Objective Optimization")?;
    render(&figure, "pareto_front", config)
}

/// Plots PCA-reduced points colored by the Euclidean norm of the
/// corresponding `original` rows. Writes `pca_projection.<ext>`.
pub fn plot_pca_projection(
    reduced: &ObjectiveMatrix,
    original: &ObjectiveMatrix,
    config: &RenderConfig,
) -> Result<PathBuf> {
    let figure = ScatterFigure::projection(reduced, original, "PCA Projection of Optimization Results")?;
    render(&figure, "pca_projection", config)
}
