//! Per-render inputs supplied by the host.

use egui::Color32;
use serde::{Deserialize, Serialize};

use super::points::{Bounds, DataPoint, FitParameters};

/// Marker fill color as the store keeps it: 8-bit channels, alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS-style `rgba(r, g, b, a)` string.
    pub fn to_css_string(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Convert to an egui color. Alpha outside `0..=1` is clamped.
    pub fn to_color32(&self) -> Color32 {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(41, 128, 185, 0.5)
    }
}

/// Everything the chart needs for one render pass.
///
/// | Field             | Meaning |
/// |-------------------|---------|
/// | `width`           | Outer width in points; height follows the aspect ratio |
/// | `data`            | Observations, addressed by index |
/// | `bounds`          | Data-space extent of both axes |
/// | `x_label`/`y_label` | Axis captions |
/// | `fit`             | Current regression line |
/// | `residuals`       | Draw residual segments |
/// | `regression_line` | Draw the fit line |
/// | `immediate`       | Snap every animated value this render |
/// | `color`           | Marker fill |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartProps {
    pub width: f64,
    pub data: Vec<DataPoint>,
    pub bounds: Bounds,
    pub x_label: String,
    pub y_label: String,
    pub fit: FitParameters,
    pub residuals: bool,
    pub regression_line: bool,
    pub immediate: bool,
    pub color: Rgba,
}

impl Default for ChartProps {
    fn default() -> Self {
        Self {
            width: 500.0,
            data: Vec::new(),
            bounds: Bounds::default(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            fit: FitParameters::default(),
            residuals: true,
            regression_line: true,
            immediate: false,
            color: Rgba::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string_keeps_fractional_alpha() {
        let c = Rgba::new(41, 128, 185, 0.5);
        assert_eq!(c.to_css_string(), "rgba(41, 128, 185, 0.5)");
    }

    #[test]
    fn color32_clamps_alpha() {
        let c = Rgba::new(10, 20, 30, 3.0).to_color32();
        assert_eq!(c.a(), 255);
        let c = Rgba::new(10, 20, 30, -1.0).to_color32();
        assert_eq!(c.a(), 0);
    }
}
