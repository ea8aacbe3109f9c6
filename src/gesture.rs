//! Turns pointer drags on a marker into store mutation requests.
//!
//! Each point index runs its own small state machine:
//!
//! ```text
//!   Idle ──begin(anchor)──▶ Dragging{anchor} ──end──▶ Idle
//!                              │
//!                        update(delta) → DragRequest
//! ```
//!
//! The anchor is the point's data coordinate at gesture start. Every move
//! recomputes the new coordinate from that anchor plus the cumulative pixel
//! delta; values the store wrote back mid-gesture are never re-read, so the
//! drag cannot drift.

use std::collections::HashMap;

use crate::data::{Bounds, DataPoint};
use crate::error::Result;
use crate::scale::{PlotLayout, Scales, ScreenPoint};

/// Per-index gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging { anchor: DataPoint },
}

/// A move request for the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRequest {
    pub index: usize,
    pub xy: DataPoint,
}

/// Tracks active drags by point index.
#[derive(Debug, Clone, Default)]
pub struct DragTranslator {
    active: HashMap<usize, DataPoint>,
}

impl DragTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, index: usize) -> GestureState {
        match self.active.get(&index) {
            Some(anchor) => GestureState::Dragging { anchor: *anchor },
            None => GestureState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !self.active.is_empty()
    }

    /// Start a gesture on `index`, remembering where the point was.
    ///
    /// Emits nothing: a click without movement must not touch the data.
    pub fn begin(&mut self, index: usize, anchor: DataPoint) {
        log::debug!("drag start on point {index} at ({}, {})", anchor.x, anchor.y);
        self.active.insert(index, anchor);
    }

    /// Translate the cumulative pixel delta since gesture start into a new
    /// data coordinate for `index`.
    ///
    /// Returns `Ok(None)` when `index` is not being dragged and an error,
    /// without a request, when the bounds cannot be inverted.
    pub fn update(
        &self,
        index: usize,
        delta: [f64; 2],
        bounds: &Bounds,
        layout: &PlotLayout,
    ) -> Result<Option<DragRequest>> {
        let Some(anchor) = self.active.get(&index).copied() else {
            return Ok(None);
        };
        let scales = Scales::for_layout(bounds, layout)?;
        Ok(Some(DragRequest {
            index,
            xy: drag_target(anchor, delta, &scales),
        }))
    }

    /// Finish the gesture on `index`. The last request already carried the
    /// final value, so there is nothing to flush.
    pub fn end(&mut self, index: usize) {
        if self.active.remove(&index).is_some() {
            log::debug!("drag end on point {index}");
        }
    }

    /// Abandon every gesture (the chart went away or the dataset shrank).
    pub fn cancel_all(&mut self) {
        self.active.clear();
    }

    /// Forget gestures on indices that no longer exist.
    pub fn retain_below(&mut self, len: usize) {
        self.active.retain(|index, _| *index < len);
    }
}

/// `anchor` moved by `delta` pixels, back in data space.
pub fn drag_target(anchor: DataPoint, delta: [f64; 2], scales: &Scales) -> DataPoint {
    let start = scales.to_screen(anchor);
    scales.from_screen(ScreenPoint::new(start.x + delta[0], start.y + delta[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::scale::Margin;

    fn layout_100() -> PlotLayout {
        let no_margin = Margin {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        };
        PlotLayout::new(100.0, no_margin, 1.0).unwrap()
    }

    #[test]
    fn ten_pixels_right_is_one_unit() {
        let mut t = DragTranslator::new();
        t.begin(0, DataPoint::new(2.0, 3.0));
        let req = t
            .update(0, [10.0, 0.0], &Bounds::default(), &layout_100())
            .unwrap()
            .unwrap();
        assert_eq!(req.index, 0);
        assert!((req.xy.x - 3.0).abs() < 1e-12);
        assert!((req.xy.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn screen_down_is_data_down() {
        let mut t = DragTranslator::new();
        t.begin(1, DataPoint::new(5.0, 5.0));
        let req = t
            .update(1, [0.0, 20.0], &Bounds::default(), &layout_100())
            .unwrap()
            .unwrap();
        assert!((req.xy.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_delta_returns_anchor() {
        let mut t = DragTranslator::new();
        let anchor = DataPoint::new(2.0, 3.0);
        t.begin(4, anchor);
        let req = t
            .update(4, [0.0, 0.0], &Bounds::default(), &layout_100())
            .unwrap()
            .unwrap();
        assert!((req.xy.x - anchor.x).abs() < 1e-12);
        assert!((req.xy.y - anchor.y).abs() < 1e-12);
    }

    #[test]
    fn deltas_are_cumulative_from_the_anchor() {
        let mut t = DragTranslator::new();
        t.begin(0, DataPoint::new(2.0, 3.0));
        let b = Bounds::default();
        let l = layout_100();
        let _ = t.update(0, [10.0, 0.0], &b, &l).unwrap();
        let second = t.update(0, [20.0, 0.0], &b, &l).unwrap().unwrap();
        assert!((second.xy.x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn idle_index_emits_nothing() {
        let t = DragTranslator::new();
        let out = t
            .update(7, [5.0, 5.0], &Bounds::default(), &layout_100())
            .unwrap();
        assert_eq!(out, None);
        assert_eq!(t.state(7), GestureState::Idle);
    }

    #[test]
    fn degenerate_bounds_refuse_to_dispatch() {
        let mut t = DragTranslator::new();
        t.begin(0, DataPoint::new(1.0, 1.0));
        let flat = Bounds::new(0.0, 10.0, 4.0, 4.0);
        let err = t.update(0, [1.0, 1.0], &flat, &layout_100()).unwrap_err();
        assert!(matches!(err, ChartError::DegenerateBounds { .. }));
    }

    #[test]
    fn end_returns_to_idle() {
        let mut t = DragTranslator::new();
        t.begin(2, DataPoint::new(0.0, 0.0));
        assert!(t.is_dragging());
        t.end(2);
        assert_eq!(t.state(2), GestureState::Idle);
        assert!(!t.is_dragging());
    }

    #[test]
    fn retain_below_drops_vanished_indices() {
        let mut t = DragTranslator::new();
        t.begin(5, DataPoint::new(0.0, 0.0));
        t.retain_below(3);
        assert_eq!(t.state(5), GestureState::Idle);
    }
}
