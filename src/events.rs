//! Chart event stream.
//!
//! Callers can observe what the chart does (mounts, drags, resizes, point-set
//! changes, rejected input) via [`EventController`]. Each event carries a set
//! of [`EventKind`] flags, so one occurrence can match several categories, and
//! subscribers pick what they receive with an [`EventFilter`] OR-mask.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::DataPoint;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// The chart rendered for the first time.
    pub const MOUNTED: Self = Self(1 << 0);
    /// A drag gesture started on a marker.
    pub const DRAG_START: Self = Self(1 << 1);
    /// A drag move was translated into a store request.
    pub const DRAG: Self = Self(1 << 2);
    /// A drag gesture ended.
    pub const DRAG_END: Self = Self(1 << 3);
    /// The outer size changed.
    pub const RESIZE: Self = Self(1 << 4);
    /// The dataset grew.
    pub const POINTS_ADDED: Self = Self(1 << 5);
    /// The dataset shrank.
    pub const POINTS_REMOVED: Self = Self(1 << 6);
    /// Props could not be mapped (degenerate bounds, zero-size viewport).
    pub const INVALID_INPUT: Self = Self(1 << 7);

    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }
        let pairs: &[(EventKind, &str)] = &[
            (EventKind::MOUNTED, "MOUNTED"),
            (EventKind::DRAG_START, "DRAG_START"),
            (EventKind::DRAG, "DRAG"),
            (EventKind::DRAG_END, "DRAG_END"),
            (EventKind::RESIZE, "RESIZE"),
            (EventKind::POINTS_ADDED, "POINTS_ADDED"),
            (EventKind::POINTS_REMOVED, "POINTS_REMOVED"),
            (EventKind::INVALID_INPUT, "INVALID_INPUT"),
        ];
        let mut names = Vec::new();
        let mut known = 0u32;
        for (kind, name) in pairs {
            known |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata for drag events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMeta {
    pub index: usize,
    /// Data coordinate at gesture start.
    pub anchor: DataPoint,
    /// Requested coordinate (moves only).
    pub xy: Option<DataPoint>,
}

/// Metadata for resize events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeMeta {
    pub width: f64,
    pub height: f64,
}

/// Metadata for point-set changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCountMeta {
    pub previous: usize,
    pub current: usize,
}

/// A chart event. `kinds` says which metadata fields are meaningful.
#[derive(Debug, Clone)]
pub struct ChartEvent {
    pub kinds: EventKind,
    /// Seconds since the emitting chart mounted.
    pub timestamp: f64,
    pub drag: Option<DragMeta>,
    pub resize: Option<ResizeMeta>,
    pub point_count: Option<PointCountMeta>,
    /// Human-readable reason for `INVALID_INPUT`.
    pub message: Option<String>,
}

impl ChartEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            drag: None,
            resize: None,
            point_count: None,
            message: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter / EventController
// ─────────────────────────────────────────────────────────────────────────────

/// OR-mask selecting which events a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &ChartEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

struct Subscriber {
    filter: EventFilter,
    sender: Sender<ChartEvent>,
}

/// Shared subscriber list for one or more charts.
///
/// Cloning is cheap and every clone feeds the same subscribers, so a host can
/// keep one handle for subscribing while the chart owns another for emitting.
#[derive(Clone, Default)]
pub struct EventController {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl EventController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event whose kinds intersect `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<ChartEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(Subscriber { filter, sender: tx });
        }
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<ChartEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Lets the chart skip building events nobody listens to.
    pub fn has_subscribers(&self) -> bool {
        self.subscribers.lock().map_or(false, |subs| !subs.is_empty())
    }

    /// Deliver `event` to matching subscribers. A subscriber whose receiver
    /// is gone is dropped the first time an event matches it.
    pub fn emit(&self, event: &ChartEvent) {
        let Ok(mut subs) = self.subscribers.lock() else {
            return;
        };
        subs.retain(|sub| !sub.filter.matches(event) || sub.sender.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_selects_by_kind() {
        let ctrl = EventController::new();
        let rx_all = ctrl.subscribe_all();
        let rx_drag = ctrl.subscribe(EventFilter::only(EventKind::DRAG | EventKind::DRAG_END));
        let rx_resize = ctrl.subscribe(EventFilter::only(EventKind::RESIZE));

        ctrl.emit(&ChartEvent::new(EventKind::DRAG));

        assert!(rx_all.try_recv().is_ok());
        assert!(rx_drag.try_recv().is_ok());
        assert!(rx_resize.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let ctrl = EventController::new();
        assert!(!ctrl.has_subscribers());
        let rx = ctrl.subscribe_all();
        assert!(ctrl.has_subscribers());
        drop(rx);
        ctrl.emit(&ChartEvent::new(EventKind::MOUNTED));
        assert!(!ctrl.has_subscribers());
    }

    #[test]
    fn clones_share_subscribers() {
        let host = EventController::new();
        let chart_side = host.clone();
        let rx = host.subscribe(EventFilter::only(EventKind::RESIZE));
        chart_side.emit(&ChartEvent::new(EventKind::RESIZE));
        chart_side.emit(&ChartEvent::new(EventKind::MOUNTED));
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn kinds_do_not_overlap() {
        let all = [
            EventKind::MOUNTED,
            EventKind::DRAG_START,
            EventKind::DRAG,
            EventKind::DRAG_END,
            EventKind::RESIZE,
            EventKind::POINTS_ADDED,
            EventKind::POINTS_REMOVED,
            EventKind::INVALID_INPUT,
        ];
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    assert!(!a.intersects(*b), "{a} overlaps {b}");
                }
            }
        }
    }

    #[test]
    fn display_joins_names() {
        assert_eq!(format!("{}", EventKind::DRAG), "DRAG");
        assert_eq!(
            format!("{}", EventKind::DRAG_START | EventKind::DRAG),
            "DRAG_START|DRAG"
        );
        assert_eq!(format!("{}", EventKind::ALL), "ALL");
        assert!(format!("{}", EventKind(1 << 31)).starts_with("0x"));
    }
}
