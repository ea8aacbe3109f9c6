pub mod points;
pub mod props;

pub use points::{Bounds, DataPoint, FitParameters};
pub use props::{ChartProps, Rgba};
