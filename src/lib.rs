//! regplot crate root: re-exports and module wiring.
//!
//! An interactive regression scatter plot for egui/eframe. Points can be
//! dragged with the pointer; the fit line, residuals and axes follow, with
//! spring-animated transitions for changes that did not come from a drag.
//!
//! Modules:
//! - `data`: points, bounds, fit parameters, per-render props
//! - `scale`: data ↔ pixel mapping, layout, ticks
//! - `geometry`: fit line and residual segments in pixel space
//! - `animation`: spring interpolation and the per-point scheduler
//! - `gesture`: drag-to-data translation
//! - `store`: dispatch channel and loading-indicator hook toward the host
//! - `render`: frame composition, painting, and the [`ScatterChart`] widget
//! - `events`: subscribable chart event stream
//! - `config`: [`ChartConfig`] and its JSON persistence
//! - `demo` / `run`: stand-alone window with an in-memory store

pub mod animation;
pub mod config;
pub mod data;
pub mod demo;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod render;
pub mod scale;
pub mod store;
pub mod style;
mod run;

pub use animation::{AnimatedValue, Scheduler, SpringConfig};
pub use config::ChartConfig;
pub use data::{Bounds, ChartProps, DataPoint, FitParameters, Rgba};
pub use error::{ChartError, Result};
pub use events::{ChartEvent, EventController, EventFilter, EventKind};
pub use gesture::{DragRequest, DragTranslator, GestureState};
pub use render::{RenderFrame, ScatterChart};
pub use run::{run_demo, RunOptions};
pub use scale::{LinearScale, Margin, PlotLayout, Scales, ScreenPoint};
pub use store::{channel_dispatch, DispatchSink, LoadingIndicator, StoreCommand, LOADER_ID};
pub use style::{ChartStyle, ChartTheme};
