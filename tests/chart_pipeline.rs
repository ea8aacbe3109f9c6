use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use regplot::data::{Bounds, ChartProps, DataPoint, FitParameters};
use regplot::events::{EventFilter, EventKind};
use regplot::scale::Margin;
use regplot::store::{channel_dispatch, StoreCommand, LOADER_ID};
use regplot::{ChartConfig, EventController, GestureState, ScatterChart};

const FRAME: Duration = Duration::from_millis(16);

/// 100 × 100 drawable area over 0..10 on both axes: 10 px per unit.
fn config() -> ChartConfig {
    ChartConfig {
        margin: Margin {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        },
        ..ChartConfig::default()
    }
}

fn props(data: Vec<DataPoint>) -> ChartProps {
    ChartProps {
        width: 100.0,
        data,
        bounds: Bounds::default(),
        fit: FitParameters::new(0.0, 1.0),
        ..ChartProps::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn first_render_hides_loader_exactly_once() {
    let hidden = Rc::new(Cell::new(0));
    let seen = hidden.clone();
    let mut chart = ScatterChart::new(config()).with_loading_indicator(move |id: &str| {
        assert_eq!(id, LOADER_ID);
        seen.set(seen.get() + 1);
    });
    let p = props(vec![DataPoint::new(1.0, 1.0)]);
    for _ in 0..5 {
        chart.prepare(&p, FRAME);
    }
    assert_eq!(hidden.get(), 1);
}

#[test]
fn drag_round_trip_through_the_store() {
    let (sink, rx) = channel_dispatch();
    let mut chart = ScatterChart::new(config()).with_dispatch(sink);
    let mut p = props(vec![DataPoint::new(2.0, 3.0), DataPoint::new(7.0, 7.0)]);
    chart.prepare(&p, FRAME);

    chart.drag_start(0, &p);
    assert!(rx.try_recv().is_err(), "a press alone must not dispatch");

    chart.drag_move(0, [10.0, 0.0], &p);
    let StoreCommand::Drag { index, xy, immediate } = rx.try_recv().unwrap();
    assert_eq!(index, 0);
    assert!(close(xy[0], 3.0) && close(xy[1], 3.0));
    assert!(immediate);

    // The host applies the request and re-renders; the marker lands at once.
    p.data[0] = DataPoint::from(xy);
    p.immediate = immediate;
    let frame = chart.prepare(&p, FRAME);
    let m = frame.markers[0];
    assert!(close(m.center.x, 30.0) && close(m.center.y, 70.0));

    // Cumulative deltas are taken from the gesture anchor, not the echo.
    chart.drag_move(0, [20.0, 0.0], &p);
    let StoreCommand::Drag { xy, .. } = rx.try_recv().unwrap();
    assert!(close(xy[0], 4.0));

    chart.drag_end(0);
    assert_eq!(chart.gesture_state(0), GestureState::Idle);
    assert!(chart.drag_move(0, [30.0, 0.0], &p).is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn external_update_animates_then_settles() {
    let mut chart = ScatterChart::new(config());
    let mut p = props(vec![DataPoint::new(0.0, 0.0)]);
    chart.prepare(&p, FRAME);

    p.data[0] = DataPoint::new(10.0, 10.0);
    p.immediate = false;
    let frame = chart.prepare(&p, FRAME);
    let x = frame.markers[0].center.x;
    assert!(x > 0.0 && x < 100.0, "mid-transition x = {x}");
    assert!(chart.is_animating());

    let mut frames = 0;
    while chart.is_animating() && frames < 500 {
        chart.prepare(&p, FRAME);
        frames += 1;
    }
    assert!(!chart.is_animating());
    let frame = chart.prepare(&p, FRAME);
    assert!(close(frame.markers[0].center.x, 100.0));
    assert!(close(frame.markers[0].center.y, 0.0));
}

#[test]
fn residuals_track_the_drawn_marker_mid_transition() {
    let mut chart = ScatterChart::new(config());
    let mut p = props(vec![DataPoint::new(5.0, 1.0)]);
    p.residuals = true;
    chart.prepare(&p, FRAME);

    p.data[0] = DataPoint::new(5.0, 9.0);
    p.immediate = false;
    let frame = chart.prepare(&p, FRAME);
    let marker = frame.markers[0].center;
    let residual = frame.residuals[0];
    assert!(close(residual.from.x, marker.x) && close(residual.from.y, marker.y));
    assert!(close(residual.to.y, 50.0));
}

#[test]
fn added_points_snap_in_and_removed_points_vanish() {
    let events = EventController::new();
    let mut chart = ScatterChart::new(config()).with_events(events.clone());
    let mut p = props(vec![DataPoint::new(1.0, 1.0)]);
    chart.prepare(&p, FRAME);
    // Subscribe after the first render, which itself reports 0 -> 1.
    let rx = events.subscribe(EventFilter::only(EventKind::POINTS_ADDED | EventKind::POINTS_REMOVED));

    p.data.push(DataPoint::new(6.0, 4.0));
    p.immediate = false;
    let frame = chart.prepare(&p, FRAME);
    assert_eq!(frame.markers.len(), 2);
    assert!(close(frame.markers[1].center.x, 60.0));
    assert!(close(frame.markers[1].center.y, 60.0));
    let added = rx.try_recv().unwrap();
    assert!(added.kinds.contains(EventKind::POINTS_ADDED));
    assert_eq!(added.point_count.map(|c| (c.previous, c.current)), Some((1, 2)));

    p.data.truncate(1);
    let frame = chart.prepare(&p, FRAME);
    assert_eq!(frame.markers.len(), 1);
    assert_eq!(chart.scheduler().len(), 1);
    assert!(rx.try_recv().unwrap().kinds.contains(EventKind::POINTS_REMOVED));
}

#[test]
fn degenerate_bounds_keep_last_view_without_interaction() {
    let (sink, rx) = channel_dispatch();
    let events = EventController::new();
    let invalid = events.subscribe(EventFilter::only(EventKind::INVALID_INPUT));
    let mut chart = ScatterChart::new(config()).with_dispatch(sink).with_events(events);
    let mut p = props(vec![DataPoint::new(2.0, 2.0)]);
    assert!(chart.prepare(&p, FRAME).interactive);

    chart.drag_start(0, &p);
    p.bounds = Bounds::new(5.0, 5.0, 0.0, 10.0);
    let frame = chart.prepare(&p, FRAME);
    assert!(!frame.interactive);
    assert!(frame.layout.is_some());
    assert_eq!(chart.gesture_state(0), GestureState::Idle);
    assert!(chart.drag_move(0, [5.0, 5.0], &p).is_none());
    assert!(rx.try_recv().is_err());

    // Same problem on the next frame is reported once.
    chart.prepare(&p, FRAME);
    assert_eq!(invalid.try_iter().count(), 1);
}

#[test]
fn nothing_valid_yet_gives_a_blank_frame() {
    let mut chart = ScatterChart::new(config());
    let mut p = props(vec![DataPoint::new(2.0, 2.0)]);
    p.bounds = Bounds::new(0.0, 10.0, 3.0, 3.0);
    let frame = chart.prepare(&p, FRAME);
    assert!(frame.layout.is_none());
    assert!(frame.markers.is_empty());
    assert_eq!(frame.size, (100.0, 100.0));
}

#[test]
fn empty_dataset_still_draws_axes_and_line() {
    let mut chart = ScatterChart::new(config());
    let frame = chart.prepare(&props(Vec::new()), FRAME);
    assert!(frame.markers.is_empty());
    assert!(frame.residuals.is_empty());
    assert!(frame.regression.is_some());
    assert!(!frame.x_ticks.is_empty() && !frame.y_ticks.is_empty());
}

#[test]
fn drag_lifecycle_events_carry_the_anchor() {
    let events = EventController::new();
    let rx = events.subscribe_all();
    let mut chart = ScatterChart::new(config()).with_events(events);
    let p = props(vec![DataPoint::new(2.0, 3.0)]);
    chart.prepare(&p, FRAME);
    chart.drag_start(0, &p);
    chart.drag_move(0, [0.0, -10.0], &p);
    chart.drag_end(0);

    let drags: Vec<_> = rx.try_iter().filter(|e| e.drag.is_some()).collect();
    assert_eq!(drags.len(), 3);
    assert!(drags[0].kinds.contains(EventKind::DRAG_START));
    let moved = drags[1].drag.unwrap();
    assert_eq!(moved.anchor, DataPoint::new(2.0, 3.0));
    assert!(close(moved.xy.unwrap().y, 4.0));
    assert!(drags[2].kinds.contains(EventKind::DRAG_END));
}
