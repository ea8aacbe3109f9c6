//! Error types for the chart engine.
//!
//! All engine operations are synchronous and local, so errors are guards: they
//! stop a scale from being built or a drag from being dispatched. The render
//! boundary logs them and degrades to a static view instead of propagating.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Which axis an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Errors that can occur while mapping, dragging, or loading configuration.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Domain span is zero, negative, or not finite.
    #[error("degenerate {axis} bounds: [{low}, {high}]")]
    DegenerateBounds { axis: Axis, low: f64, high: f64 },

    /// The drawable area left after margins is empty.
    #[error("viewport too small: drawable area {width} x {height}")]
    ViewportTooSmall { width: f64, height: f64 },

    /// Failed to read or write a configuration file.
    #[error("config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration JSON could not be parsed or produced.
    #[error("config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

impl ChartError {
    /// Create a DegenerateBounds error.
    pub fn degenerate(axis: Axis, low: f64, high: f64) -> Self {
        Self::DegenerateBounds { axis, low, high }
    }

    /// Create a ConfigIo error.
    pub fn config_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }
}
