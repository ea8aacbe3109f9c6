//! Data space ↔ pixel space mapping.
//!
//! Scales are rebuilt from scratch whenever the width or the bounds change;
//! building one is O(1) and has no side effects. Pixel coordinates are
//! relative to the top-left corner of the drawable area (inside the margins),
//! with y growing downwards.

use serde::{Deserialize, Serialize};

use crate::data::points::{check_span, Bounds, DataPoint};
use crate::error::{Axis, ChartError, Result};

/// A position in pixel space, relative to the drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Space reserved around the drawable area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 45.0,
            left: 60.0,
        }
    }
}

/// Outer and drawable size for a given width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    /// Outer width.
    pub width: f64,
    /// Outer height, `width * aspect`.
    pub height: f64,
    pub margin: Margin,
    /// Drawable width.
    pub w: f64,
    /// Drawable height.
    pub h: f64,
}

impl PlotLayout {
    /// Subtract the margins from a `width × width * aspect` box.
    ///
    /// Fails when nothing drawable is left.
    pub fn new(width: f64, margin: Margin, aspect: f64) -> Result<Self> {
        let height = width * aspect;
        let w = width - margin.left - margin.right;
        let h = height - margin.top - margin.bottom;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ChartError::ViewportTooSmall {
                width: w,
                height: h,
            });
        }
        Ok(Self {
            width,
            height,
            margin,
            w,
            h,
        })
    }
}

/// Linear map from a data interval onto a pixel interval, with its inverse.
///
/// The pixel interval may be reversed (`range.0 > range.1`), which is how the
/// y axis puts larger values at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Build a scale; the domain must be finite and increasing and the range
    /// must have non-zero length.
    pub fn new(axis: Axis, domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        check_span(axis, domain.0, domain.1)?;
        let span = range.1 - range.0;
        if !span.is_finite() || span == 0.0 {
            return Err(ChartError::ViewportTooSmall {
                width: span.abs(),
                height: span.abs(),
            });
        }
        Ok(Self { domain, range })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Data value to pixel.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Pixel to data value.
    #[inline]
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    ///
    /// Steps are 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = self.domain;
        let Some(step) = tick_step(start, stop, count) else {
            return Vec::new();
        };
        match step {
            TickStep::Multiply(step) => {
                let lo = (start / step).ceil() as i64;
                let hi = (stop / step).floor() as i64;
                (lo..=hi).map(|i| i as f64 * step).collect()
            }
            TickStep::Divide(inc) => {
                let lo = (start * inc).ceil() as i64;
                let hi = (stop * inc).floor() as i64;
                (lo..=hi).map(|i| i as f64 / inc).collect()
            }
        }
    }

    /// Spacing between the values returned by [`ticks`](Self::ticks).
    pub fn tick_size(&self, count: usize) -> Option<f64> {
        tick_step(self.domain.0, self.domain.1, count).map(|s| match s {
            TickStep::Multiply(step) => step,
            TickStep::Divide(inc) => 1.0 / inc,
        })
    }
}

/// Steps of 10^k with k < 0 are kept as an integer divisor so tick values
/// come out as `i / inc`, which avoids accumulating 0.1-style rounding error.
#[derive(Debug, Clone, Copy)]
enum TickStep {
    Multiply(f64),
    Divide(f64),
}

fn tick_step(start: f64, stop: f64, count: usize) -> Option<TickStep> {
    if count == 0 || !(stop > start) || !start.is_finite() || !stop.is_finite() {
        return None;
    }
    let raw = (stop - start) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        Some(TickStep::Multiply(factor * 10f64.powf(power)))
    } else {
        Some(TickStep::Divide(10f64.powf(-power) / factor))
    }
}

/// Format a tick value with as many decimals as its step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let s = format!("{:.*}", decimals, value);
    // "-0" and "-0.0" read badly on an axis
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

/// The x/y scale pair for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Scales {
    /// `x: [x_min, x_max] → [0, w]`, `y: [y_min, y_max] → [h, 0]`.
    pub fn new(bounds: &Bounds, w: f64, h: f64) -> Result<Self> {
        Ok(Self {
            x: LinearScale::new(Axis::X, (bounds.x_min, bounds.x_max), (0.0, w))?,
            y: LinearScale::new(Axis::Y, (bounds.y_min, bounds.y_max), (h, 0.0))?,
        })
    }

    /// Scales for the drawable area of `layout`.
    pub fn for_layout(bounds: &Bounds, layout: &PlotLayout) -> Result<Self> {
        Self::new(bounds, layout.w, layout.h)
    }

    #[inline]
    pub fn to_screen(&self, p: DataPoint) -> ScreenPoint {
        ScreenPoint::new(self.x.apply(p.x), self.y.apply(p.y))
    }

    #[inline]
    pub fn from_screen(&self, p: ScreenPoint) -> DataPoint {
        DataPoint::new(self.x.invert(p.x), self.y.invert(p.y))
    }
}
