//! Pixel-space geometry derived from the fit line.
//!
//! Pure functions of their inputs: nothing here remembers a previous frame.

use crate::data::{Bounds, DataPoint, FitParameters};
use crate::scale::{Scales, ScreenPoint};

/// A straight segment in pixel space. Zero-length segments are valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

impl Segment {
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }

    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }
}

/// Fit line drawn across the full x domain.
pub fn regression_line(bounds: &Bounds, fit: FitParameters, scales: &Scales) -> Segment {
    Segment {
        from: ScreenPoint::new(
            scales.x.apply(bounds.x_min),
            scales.y.apply(fit.predict(bounds.x_min)),
        ),
        to: ScreenPoint::new(
            scales.x.apply(bounds.x_max),
            scales.y.apply(fit.predict(bounds.x_max)),
        ),
    }
}

/// Vertical segment from the observed point down (or up) to the fit line.
pub fn residual_segment(point: DataPoint, fit: FitParameters, scales: &Scales) -> Segment {
    let x = scales.x.apply(point.x);
    Segment {
        from: ScreenPoint::new(x, scales.y.apply(point.y)),
        to: ScreenPoint::new(x, scales.y.apply(fit.predict(point.x))),
    }
}
