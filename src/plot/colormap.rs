//! Scalar-to-color mapping for scatter plots.

use std::ops::Range;

use plotters::style::RGBColor;

use crate::matrix::ObjectiveMatrix;

/// Viridis sampled at nine evenly spaced stops.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// A perceptually uniform color map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Colormap {
    /// Dark purple (low) through green to yellow (high).
    #[default]
    Viridis,
}

impl Colormap {
    /// Color at position `t` in `[0, 1]`. Out-of-range and NaN inputs are
    /// clamped to the nearest end (NaN maps to the low end).
    pub fn color(self, t: f64) -> RGBColor {
        let stops = match self {
            Colormap::Viridis => &VIRIDIS,
        };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let scaled = t * (stops.len() - 1) as f64;
        let lo = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - lo as f64;
        let (a, b) = (stops[lo], stops[lo + 1]);

        let lerp = |x: u8, y: u8| -> u8 {
            (f64::from(x) + (f64::from(y) - f64::from(x)) * frac).round() as u8
        };
        RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }
}

/// Linear mapping of `[vmin, vmax]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    /// Value mapped to 0.
    pub vmin: f64,
    /// Value mapped to 1.
    pub vmax: f64,
}

impl Normalize {
    /// Creates a mapping for `[vmin, vmax]`.
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Spans the finite values of `values`; `[0, 1]` when there are none.
    pub fn from_values(values: &[f64]) -> Self {
        let (lo, hi) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo.is_finite() {
            Self::new(lo, hi)
        } else {
            Self::new(0.0, 1.0)
        }
    }

    /// Maps `v` into `[0, 1]`, clamping. A degenerate range maps every
    /// value to the middle.
    pub fn apply(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span.abs() <= f64::EPSILON * self.vmin.abs().max(1.0) {
            return 0.5;
        }
        ((v - self.vmin) / span).clamp(0.0, 1.0)
    }

    /// Value range to draw on a color bar; widened by one unit when
    /// degenerate.
    pub fn display_range(&self) -> Range<f64> {
        if self.vmax - self.vmin <= f64::EPSILON * self.vmin.abs().max(1.0) {
            (self.vmin - 0.5)..(self.vmin + 0.5)
        } else {
            self.vmin..self.vmax
        }
    }
}

/// Scalar summary used to color each objective vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorBy {
    /// Sum of the objectives (total fitness).
    Sum,
    /// Euclidean norm of the objective vector.
    Norm,
}

impl ColorBy {
    /// Color bar label.
    pub fn label(self) -> &'static str {
        match self {
            ColorBy::Sum => "Total Fitness Value",
            ColorBy::Norm => "Fitness Value",
        }
    }

    fn summarize(self, row: &[f64]) -> f64 {
        match self {
            ColorBy::Sum => row.iter().sum(),
            ColorBy::Norm => row.iter().map(|v| v * v).sum::<f64>().sqrt(),
        }
    }
}

/// One scalar per row of `f`.
pub fn color_values(f: &ObjectiveMatrix, by: ColorBy) -> Vec<f64> {
    f.iter().map(|row| by.summarize(row)).collect()
}
