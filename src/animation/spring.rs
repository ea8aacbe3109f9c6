//! Damped spring integration shared by every animated value.
//!
//! The classic spring equation
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! integrated with semi-implicit Euler. Large frame deltas are split into
//! steps of at most [`MAX_STEP_SECS`] so stiff springs stay stable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Largest single integration step, in seconds.
pub const MAX_STEP_SECS: f64 = 0.004;

/// Frame deltas above this are clamped (e.g. after the window was hidden).
pub const MAX_FRAME_SECS: f64 = 0.1;

const MIN_STIFFNESS: f64 = 0.1;

/// Spring constants. One instance is shared by all values of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    /// Distance to target below which the value may settle.
    pub rest_threshold: f64,
    /// Speed below which the value may settle.
    pub velocity_threshold: f64,
}

impl SpringConfig {
    /// Critically damped spring of the given stiffness: fastest approach
    /// without overshoot.
    pub fn critically_damped(stiffness: f64) -> Self {
        let stiffness = stiffness.max(MIN_STIFFNESS);
        Self {
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
            rest_threshold: 1e-3,
            velocity_threshold: 1e-2,
        }
    }

    /// Acceleration for one channel.
    #[inline]
    pub(crate) fn acceleration(&self, displacement: f64, velocity: f64) -> f64 {
        -self.stiffness.max(MIN_STIFFNESS) * displacement - self.damping.max(0.0) * velocity
    }

    /// Split a frame delta into integration steps.
    pub(crate) fn steps(dt: Duration) -> impl Iterator<Item = f64> {
        let mut remaining = dt.as_secs_f64().min(MAX_FRAME_SECS);
        std::iter::from_fn(move || {
            if remaining <= 0.0 {
                return None;
            }
            let step = remaining.min(MAX_STEP_SECS);
            remaining -= step;
            Some(step)
        })
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::critically_damped(170.0)
    }
}
