//! Rendering configuration.
//!
//! Every style choice a plot makes comes from a [`RenderConfig`] passed
//! in by the caller; nothing is read from process-wide state.

use std::path::PathBuf;

use plotters::style::{Color, FontDesc, FontFamily, FontStyle, RGBAColor, TextStyle, BLACK};

use super::colormap::Colormap;
use crate::error::{Error, Result};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageFormat {
    /// PNG bitmap. Needs the `fonts` feature to rasterize text.
    Png,
    /// SVG vector image.
    #[default]
    Svg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    /// Whether this build can render the format.
    pub fn is_available(self) -> bool {
        match self {
            ImageFormat::Png => cfg!(feature = "fonts"),
            ImageFormat::Svg => true,
        }
    }
}

/// Style and output settings shared by all plots.
///
/// # Example
///
/// ```
/// use u_pareto::plot::{ImageFormat, RenderConfig};
///
/// let config = RenderConfig::default()
///     .with_output_dir("out")
///     .with_format(ImageFormat::Svg)
///     .with_grid(false);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.figure_size, (1000, 500));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderConfig {
    /// Font family for all text.
    pub font_family: String,

    /// Title font size in pixels.
    pub title_size: f64,

    /// Axis label font size in pixels.
    pub label_size: f64,

    /// Tick label and legend font size in pixels.
    pub tick_size: f64,

    /// Canvas size `(width, height)` in pixels.
    pub figure_size: (u32, u32),

    /// Whether to draw grid lines.
    pub grid: bool,

    /// Grid line opacity (0.0–1.0).
    pub grid_alpha: f64,

    /// Color map for scatter plots and color bars.
    pub colormap: Colormap,

    /// Scatter marker radius in pixels.
    pub point_size: u32,

    /// Directory the image files are written to. Created on demand.
    pub output_dir: PathBuf,

    /// Output file format.
    pub format: ImageFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".into(),
            title_size: 24.0,
            label_size: 20.0,
            tick_size: 15.0,
            figure_size: (1000, 500),
            grid: true,
            grid_alpha: 0.7,
            colormap: Colormap::Viridis,
            point_size: 4,
            output_dir: PathBuf::from("plots"),
            format: ImageFormat::Svg,
        }
    }
}

impl RenderConfig {
    /// Side-by-side layout (2:1) with larger text.
    pub fn wide() -> Self {
        Self {
            title_size: 32.0,
            label_size: 26.0,
            tick_size: 18.0,
            figure_size: (2000, 1000),
            point_size: 5,
            ..Self::default()
        }
    }

    /// Sets the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Sets the canvas size in pixels.
    pub fn with_figure_size(mut self, width: u32, height: u32) -> Self {
        self.figure_size = (width, height);
        self
    }

    /// Enables or disables the grid.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the grid opacity.
    pub fn with_grid_alpha(mut self, alpha: f64) -> Self {
        self.grid_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Sets the color map.
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Validates the configuration.
    ///
    /// PNG output without the `fonts` feature is rejected with
    /// [`Error::Plot`]: the bitmap backend has no glyph rasterizer then.
    pub fn validate(&self) -> Result<()> {
        if !self.format.is_available() {
            return Err(Error::Plot(format!(
                "{} output needs the `fonts` feature",
                self.format.extension()
            )));
        }
        let (w, h) = self.figure_size;
        if w < 200 || h < 150 {
            return Err(Error::InvalidConfig(format!(
                "figure_size must be at least 200x150, got {w}x{h}"
            )));
        }
        for (name, size) in [
            ("title_size", self.title_size),
            ("label_size", self.label_size),
            ("tick_size", self.tick_size),
        ] {
            if !(size > 0.0 && size.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {size}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.grid_alpha) {
            return Err(Error::InvalidConfig(
                "grid_alpha must be within [0, 1]".into(),
            ));
        }
        if self.point_size == 0 {
            return Err(Error::InvalidConfig("point_size must be at least 1".into()));
        }
        Ok(())
    }

    pub(crate) fn title_style(&self) -> TextStyle<'_> {
        self.font(self.title_size, FontStyle::Bold)
    }

    pub(crate) fn label_style(&self) -> TextStyle<'_> {
        self.font(self.label_size, FontStyle::Bold)
    }

    pub(crate) fn tick_style(&self) -> TextStyle<'_> {
        self.font(self.tick_size, FontStyle::Normal)
    }

    pub(crate) fn bold_grid_color(&self) -> RGBAColor {
        BLACK.mix(0.25 * self.grid_alpha)
    }

    pub(crate) fn light_grid_color(&self) -> RGBAColor {
        BLACK.mix(0.08 * self.grid_alpha)
    }

    fn font(&self, size: f64, style: FontStyle) -> TextStyle<'_> {
        FontDesc::new(FontFamily::from(self.font_family.as_str()), size, style).color(&BLACK)
    }
}
