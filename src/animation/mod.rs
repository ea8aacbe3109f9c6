//! Spring-driven interpolation of point positions and the fit line.

pub mod scheduler;
pub mod spring;
pub mod value;

pub use scheduler::{RetargetSummary, Scheduler};
pub use spring::SpringConfig;
pub use value::{Animatable, AnimatedValue};
