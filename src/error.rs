//! Error type shared by every stage of the pipeline.
//!
//! Invalid numeric results (NaN/Inf objectives) are never reported here:
//! evaluation substitutes NaN rows and [`clean_results`](crate::sanitize::clean_results)
//! filters them. Everything else (bad configuration, shape mismatches,
//! backend failures) surfaces as an [`Error`].

use plotters::drawing::DrawingAreaErrorKind;

/// Errors produced by problem construction, the optimizer driver,
/// dimensionality reduction and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when a lower bound exceeds its upper bound.
    #[error("invalid bounds at variable {index}: lower ({lower}) must not exceed upper ({upper})")]
    InvalidBounds {
        /// Index of the offending decision variable.
        index: usize,
        /// The lower bound value.
        lower: f64,
        /// The upper bound value.
        upper: f64,
    },

    /// Returned when a row or vector has the wrong length.
    #[error("dimension mismatch: expected {expected} values, got {got}")]
    DimensionMismatch {
        /// The expected length.
        expected: usize,
        /// The actual length.
        got: usize,
    },

    /// Returned when an operation needs at least one row.
    #[error("objective matrix is empty")]
    EmptyMatrix,

    /// Returned when the plotting backend fails.
    #[error("plotting failed: {0}")]
    Plot(String),

    /// Returned when the output directory cannot be prepared.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Error::Plot(err.to_string())
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = core::result::Result<T, Error>;
