//! Plain-data description of one frame, built from the scheduler's current
//! (possibly mid-transition) values.

use crate::animation::Scheduler;
use crate::data::{Bounds, ChartProps};
use crate::geometry::{self, Segment};
use crate::scale::{format_tick, LinearScale, PlotLayout, Scales, ScreenPoint};

/// One axis tick: its data value, pixel offset along the axis, and label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub pixel: f64,
    pub label: String,
}

/// A draggable point marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub center: ScreenPoint,
    pub radius: f32,
}

/// Everything the painter needs. Recomputed every frame, never stored.
///
/// Coordinates are relative to the drawable area; `layout` gives the margins
/// needed to place it inside the outer box. A frame without a layout is a
/// blank placeholder of `size`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Outer size, always `width × width * aspect`.
    pub size: (f64, f64),
    pub layout: Option<PlotLayout>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub regression: Option<Segment>,
    pub residuals: Vec<Segment>,
    pub markers: Vec<Marker>,
    pub x_label: String,
    pub y_label: String,
    /// Markers accept drags only when the current props map cleanly.
    pub interactive: bool,
}

impl RenderFrame {
    pub fn blank(size: (f64, f64)) -> Self {
        Self {
            size,
            layout: None,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            regression: None,
            residuals: Vec::new(),
            markers: Vec::new(),
            x_label: String::new(),
            y_label: String::new(),
            interactive: false,
        }
    }
}

/// Options for [`compose_frame`] that do not come from the props.
#[derive(Debug, Clone, Copy)]
pub struct ComposeOptions {
    pub tick_count: usize,
    pub marker_radius: f32,
    pub interactive: bool,
}

fn axis_ticks(scale: &LinearScale, count: usize) -> Vec<AxisTick> {
    let step = scale.tick_size(count).unwrap_or(0.0);
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            pixel: scale.apply(value),
            label: format_tick(value, step),
        })
        .collect()
}

/// Lay out axes, fit line, residuals and markers from the scheduler state.
///
/// Residuals hang off the animated marker positions and end on the animated
/// fit line, so within a frame they always agree with what is drawn. Only
/// indices present in `props.data` produce markers.
pub fn compose_frame(
    scheduler: &Scheduler,
    layout: PlotLayout,
    scales: &Scales,
    props: &ChartProps,
    opts: ComposeOptions,
) -> RenderFrame {
    let (x0, x1) = scales.x.domain();
    let (y0, y1) = scales.y.domain();
    let bounds = Bounds::new(x0, x1, y0, y1);
    let fit = scheduler.line();

    let markers: Vec<Marker> = scheduler
        .points()
        .take(props.data.len())
        .enumerate()
        .map(|(index, center)| Marker {
            index,
            center,
            radius: opts.marker_radius,
        })
        .collect();

    let residuals = match fit {
        Some(fit) if props.residuals => markers
            .iter()
            .map(|m| geometry::residual_segment(scales.from_screen(m.center), fit, scales))
            .collect(),
        _ => Vec::new(),
    };

    let regression = fit
        .filter(|_| props.regression_line)
        .map(|fit| geometry::regression_line(&bounds, fit, scales));

    RenderFrame {
        size: (layout.width, layout.height),
        layout: Some(layout),
        x_ticks: axis_ticks(&scales.x, opts.tick_count),
        y_ticks: axis_ticks(&scales.y, opts.tick_count),
        regression,
        residuals,
        markers,
        x_label: props.x_label.clone(),
        y_label: props.y_label.clone(),
        interactive: opts.interactive,
    }
}
