//! The interactive scatter chart component.
//!
//! Every render runs the same pipeline, in this order:
//!
//! 1. layout and scales from `width` and `bounds`
//! 2. per-point screen targets and the fit line, retargeted together
//! 3. one animation tick
//! 4. frame composition, then painting and marker interaction
//!
//! Drags are turned into [`StoreCommand::Drag`](crate::store::StoreCommand)
//! requests; the chart only sees their effect when the host passes new props.

use std::time::{Duration, Instant};

use eframe::egui::{self, CursorIcon, Rect, Sense, Vec2};

use crate::animation::{RetargetSummary, Scheduler};
use crate::config::ChartConfig;
use crate::data::ChartProps;
use crate::error::{ChartError, Result};
use crate::events::{ChartEvent, DragMeta, EventController, EventKind, PointCountMeta, ResizeMeta};
use crate::gesture::{DragRequest, DragTranslator, GestureState};
use crate::scale::{PlotLayout, Scales, ScreenPoint};
use crate::store::{DispatchSink, LoadingIndicator, LOADER_ID};
use crate::style::ChartTheme;

use super::frame::{compose_frame, ComposeOptions, RenderFrame};
use super::paint::{paint_frame, to_pos, PaintState};

/// Draggable regression scatter plot.
///
/// Holds no copy of the dataset: only animation state, the active drags, and
/// the last layout that mapped cleanly (used to keep drawing axes while the
/// current props are unusable).
pub struct ScatterChart {
    config: ChartConfig,
    scheduler: Scheduler,
    drag: DragTranslator,
    sink: Option<DispatchSink>,
    events: Option<EventController>,
    loader: Option<Box<dyn LoadingIndicator>>,
    last_valid: Option<(PlotLayout, Scales)>,
    last_error: Option<String>,
    mounted_at: Option<Instant>,
    id: egui::Id,
}

impl ScatterChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            scheduler: Scheduler::new(config.spring),
            config,
            drag: DragTranslator::new(),
            sink: None,
            events: None,
            loader: None,
            last_valid: None,
            last_error: None,
            mounted_at: None,
            id: egui::Id::new("regplot_scatter"),
        }
    }

    /// Where drag requests go.
    pub fn with_dispatch(mut self, sink: DispatchSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_events(mut self, events: EventController) -> Self {
        self.events = Some(events);
        self
    }

    /// Indicator hidden once, on the first render.
    pub fn with_loading_indicator(mut self, loader: impl LoadingIndicator + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Distinguish several charts in one egui context.
    pub fn with_id_salt(mut self, salt: impl std::hash::Hash) -> Self {
        self.id = egui::Id::new(salt);
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn gesture_state(&self, index: usize) -> GestureState {
        self.drag.state(index)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// `true` while a spring transition still needs frames. Drags are driven
    /// by pointer input and do not count.
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_settled()
    }

    /// Build and send an event, stamped with seconds since mount. Skipped
    /// entirely when nobody is subscribed.
    fn emit(&self, kinds: EventKind, fill: impl FnOnce(&mut ChartEvent)) {
        let Some(events) = self.events.as_ref().filter(|e| e.has_subscribers()) else {
            return;
        };
        let mut event = ChartEvent::new(kinds);
        event.timestamp = self.mounted_at.map_or(0.0, |t| t.elapsed().as_secs_f64());
        fill(&mut event);
        events.emit(&event);
    }

    fn mount_once(&mut self) {
        if self.mounted_at.is_some() {
            return;
        }
        self.mounted_at = Some(Instant::now());
        if let Some(loader) = &mut self.loader {
            loader.hide(LOADER_ID);
        }
        log::info!("scatter chart mounted");
        self.emit(EventKind::MOUNTED, |_| {});
    }

    /// Tear down animation and gesture state, as when the view goes away.
    /// The next render starts fresh (values snap in) and counts as a new mount.
    pub fn unmount(&mut self) {
        self.scheduler.clear();
        self.drag.cancel_all();
        self.last_valid = None;
        self.last_error = None;
        self.mounted_at = None;
    }

    fn layout_for(&self, props: &ChartProps) -> Result<(PlotLayout, Scales)> {
        let layout = PlotLayout::new(props.width, self.config.margin, self.config.aspect_ratio)?;
        let scales = Scales::for_layout(&props.bounds, &layout)?;
        Ok((layout, scales))
    }

    fn note_invalid(&mut self, err: &ChartError) {
        let msg = err.to_string();
        if self.last_error.as_deref() == Some(msg.as_str()) {
            return;
        }
        log::warn!("chart input rejected, drawing static view: {msg}");
        self.emit(EventKind::INVALID_INPUT, |e| e.message = Some(msg.clone()));
        self.last_error = Some(msg);
    }

    fn note_resize(&self, layout: &PlotLayout) {
        let changed = self
            .last_valid
            .map_or(true, |(prev, _)| prev.width != layout.width || prev.height != layout.height);
        if !changed {
            return;
        }
        log::debug!("chart size {} x {}", layout.width, layout.height);
        self.emit(EventKind::RESIZE, |e| {
            e.resize = Some(ResizeMeta {
                width: layout.width,
                height: layout.height,
            })
        });
    }

    fn note_point_count(&self, summary: RetargetSummary, current: usize) {
        let (kind, previous) = if summary.added > 0 {
            (EventKind::POINTS_ADDED, current - summary.added)
        } else if summary.removed > 0 {
            (EventKind::POINTS_REMOVED, current + summary.removed)
        } else {
            return;
        };
        log::debug!("point count {previous} -> {current}");
        self.emit(kind, |e| e.point_count = Some(PointCountMeta { previous, current }));
    }

    /// Run one render pass without egui: map, retarget, tick by `dt`, compose.
    ///
    /// Invalid props leave the animated values untouched and fall back to the
    /// last layout that worked, drawn non-interactive; with no such layout the
    /// frame is blank.
    pub fn prepare(&mut self, props: &ChartProps, dt: Duration) -> RenderFrame {
        self.mount_once();
        let size = (props.width, props.width * self.config.aspect_ratio);

        let (layout, scales, interactive) = match self.layout_for(props) {
            Ok((layout, scales)) => {
                self.last_error = None;
                self.note_resize(&layout);
                let targets: Vec<ScreenPoint> =
                    props.data.iter().map(|p| scales.to_screen(*p)).collect();
                let summary = self.scheduler.retarget(&targets, props.fit, props.immediate);
                self.note_point_count(summary, targets.len());
                self.drag.retain_below(props.data.len());
                self.last_valid = Some((layout, scales));
                (layout, scales, true)
            }
            Err(err) => {
                self.note_invalid(&err);
                // Gestures cannot continue without an invertible scale.
                self.drag.cancel_all();
                let removed = self.scheduler.truncate(props.data.len());
                self.note_point_count(RetargetSummary { added: 0, removed }, props.data.len());
                match self.last_valid {
                    Some((layout, scales)) => (layout, scales, false),
                    None => return RenderFrame::blank(size),
                }
            }
        };

        self.scheduler.tick(dt);

        compose_frame(
            &self.scheduler,
            layout,
            &scales,
            props,
            ComposeOptions {
                tick_count: self.config.tick_count,
                marker_radius: self.config.marker_radius,
                interactive,
            },
        )
    }

    /// A gesture began on marker `index`: anchor on the store's current value.
    pub fn drag_start(&mut self, index: usize, props: &ChartProps) {
        let Some(anchor) = props.data.get(index).copied() else {
            return;
        };
        self.drag.begin(index, anchor);
        self.emit(EventKind::DRAG_START, |e| {
            e.drag = Some(DragMeta {
                index,
                anchor,
                xy: None,
            })
        });
    }

    /// The pointer moved `delta` pixels (cumulative) since gesture start.
    ///
    /// Sends exactly one drag request, or none when the index is idle or the
    /// props cannot be inverted.
    pub fn drag_move(&mut self, index: usize, delta: [f64; 2], props: &ChartProps) -> Option<DragRequest> {
        let GestureState::Dragging { anchor } = self.drag.state(index) else {
            return None;
        };
        let layout = match PlotLayout::new(props.width, self.config.margin, self.config.aspect_ratio) {
            Ok(layout) => layout,
            Err(err) => {
                self.note_invalid(&err);
                return None;
            }
        };
        let request = match self.drag.update(index, delta, &props.bounds, &layout) {
            Ok(Some(request)) => request,
            Ok(None) => return None,
            Err(err) => {
                self.note_invalid(&err);
                return None;
            }
        };
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.drag(request.index, request.xy.to_array()) {
                log::warn!("store dropped drag request for point {index}: {e}");
            }
        }
        self.emit(EventKind::DRAG, |e| {
            e.drag = Some(DragMeta {
                index,
                anchor,
                xy: Some(request.xy),
            })
        });
        Some(request)
    }

    pub fn drag_end(&mut self, index: usize) {
        let GestureState::Dragging { anchor } = self.drag.state(index) else {
            return;
        };
        self.drag.end(index);
        self.emit(EventKind::DRAG_END, |e| {
            e.drag = Some(DragMeta {
                index,
                anchor,
                xy: None,
            })
        });
    }

    /// Render into `ui` and handle marker drags.
    pub fn show(&mut self, ui: &mut egui::Ui, props: &ChartProps) -> egui::Response {
        let dt = Duration::from_secs_f32(ui.input(|i| i.stable_dt).max(0.0));
        let frame = self.prepare(props, dt);

        let size = Vec2::new(frame.size.0.max(0.0) as f32, frame.size.1.max(0.0) as f32);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

        let mut state = PaintState {
            style: ChartTheme::from_visuals(ui.visuals()).style(),
            fill: props.color.to_color32(),
            highlighted: None,
        };

        if let (Some(layout), true) = (frame.layout, frame.interactive) {
            let origin = rect.min + Vec2::new(layout.margin.left as f32, layout.margin.top as f32);
            let press_origin = ui.input(|i| i.pointer.press_origin());
            for marker in &frame.markers {
                let center = to_pos(origin, marker.center);
                let hit = Rect::from_center_size(center, Vec2::splat(marker.radius * 2.0 + 4.0));
                let resp = ui.interact(hit, self.id.with(("marker", marker.index)), Sense::drag());

                if resp.drag_started() {
                    self.drag_start(marker.index, props);
                }
                if resp.dragged() {
                    // One request per pointer move; a held pointer sends nothing.
                    let moved = resp.drag_delta() != Vec2::ZERO;
                    if let (true, Some(pos), Some(start)) =
                        (moved, resp.interact_pointer_pos(), press_origin)
                    {
                        let d = pos - start;
                        self.drag_move(marker.index, [d.x as f64, d.y as f64], props);
                    }
                    ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
                    state.highlighted = Some(marker.index);
                } else if resp.hovered() {
                    ui.ctx().set_cursor_icon(CursorIcon::Grab);
                    state.highlighted = Some(marker.index);
                }
                if resp.drag_stopped() {
                    self.drag_end(marker.index);
                }
            }
        }

        paint_frame(&ui.painter_at(rect), rect.min, &frame, &state);

        if self.is_animating() {
            ui.ctx().request_repaint();
        }
        response
    }
}

impl Default for ScatterChart {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}
