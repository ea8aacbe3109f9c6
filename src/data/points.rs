//! Data-space value types: points, bounds, and the fit line.

use serde::{Deserialize, Serialize};

use crate::error::{Axis, ChartError, Result};

/// One observation. Identified by its index in the dataset, never by value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// As `[x, y]`, the shape the store dispatch carries.
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for DataPoint {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

/// Data-space extent of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Check that both spans are finite and strictly increasing.
    pub fn validate(&self) -> Result<()> {
        check_span(Axis::X, self.x_min, self.x_max)?;
        check_span(Axis::Y, self.y_min, self.y_max)
    }

    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 10.0, 0.0, 10.0)
    }
}

pub(crate) fn check_span(axis: Axis, low: f64, high: f64) -> Result<()> {
    if low.is_finite() && high.is_finite() && high > low {
        Ok(())
    } else {
        Err(ChartError::degenerate(axis, low, high))
    }
}

/// Regression line `y = intercept + slope * x`, computed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FitParameters {
    pub intercept: f64,
    pub slope: f64,
}

impl FitParameters {
    pub const fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Fitted y at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
