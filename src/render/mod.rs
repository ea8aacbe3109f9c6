//! Composition of scales, geometry and animation state into a drawn chart.

mod chart;
pub mod frame;
pub mod paint;

pub use chart::ScatterChart;
pub use frame::{compose_frame, AxisTick, ComposeOptions, Marker, RenderFrame};
