//! A single interpolated quantity.

use std::time::Duration;

use crate::data::FitParameters;
use crate::scale::ScreenPoint;

use super::spring::SpringConfig;

/// A value the spring can drive channel by channel.
pub trait Animatable: Copy + PartialEq {
    /// All channels zero (used for velocities).
    fn zero() -> Self;
    /// Combine two values channel by channel.
    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self;
    /// Largest absolute channel.
    fn max_abs(self) -> f64;
}

impl Animatable for ScreenPoint {
    fn zero() -> Self {
        ScreenPoint::new(0.0, 0.0)
    }

    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        ScreenPoint::new(f(self.x, other.x), f(self.y, other.y))
    }

    fn max_abs(self) -> f64 {
        self.x.abs().max(self.y.abs())
    }
}

impl Animatable for FitParameters {
    fn zero() -> Self {
        FitParameters::new(0.0, 0.0)
    }

    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        FitParameters::new(f(self.intercept, other.intercept), f(self.slope, other.slope))
    }

    fn max_abs(self) -> f64 {
        self.intercept.abs().max(self.slope.abs())
    }
}

/// Current (possibly mid-flight) value chasing a target.
///
/// Retargeting never restarts from scratch: the in-flight value and velocity
/// become the start of the new transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue<T: Animatable> {
    current: T,
    target: T,
    velocity: T,
    settled: bool,
}

impl<T: Animatable> AnimatedValue<T> {
    /// A value already at rest on `value`.
    pub fn settled_at(value: T) -> Self {
        Self {
            current: value,
            target: value,
            velocity: T::zero(),
            settled: true,
        }
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn target(&self) -> T {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Point the value at `target`. With `immediate` it jumps there now.
    pub fn retarget(&mut self, target: T, immediate: bool) {
        if immediate {
            *self = Self::settled_at(target);
        } else if target != self.target {
            self.target = target;
            self.settled = false;
        }
    }

    /// Integrate over `dt`. Returns `true` while still moving.
    pub fn advance(&mut self, dt: Duration, spring: &SpringConfig) -> bool {
        if self.settled {
            return false;
        }
        for step in SpringConfig::steps(dt) {
            let displacement = self.current.zip_with(self.target, |c, t| c - t);
            let accel = displacement.zip_with(self.velocity, |d, v| spring.acceleration(d, v));
            self.velocity = self.velocity.zip_with(accel, |v, a| v + a * step);
            self.current = self.current.zip_with(self.velocity, |c, v| c + v * step);
        }
        let distance = self.current.zip_with(self.target, |c, t| c - t).max_abs();
        if !distance.is_finite() {
            // Runaway integration (non-finite target or constants): give up and snap.
            *self = Self::settled_at(self.target);
        } else if distance < spring.rest_threshold
            && self.velocity.max_abs() < spring.velocity_threshold
        {
            *self = Self::settled_at(self.target);
        }
        !self.settled
    }
}
