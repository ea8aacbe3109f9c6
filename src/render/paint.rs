//! egui painting of a [`RenderFrame`].
//!
//! Layer order, back to front: axes, fit line, residuals, markers, captions.

use std::f32::consts::FRAC_PI_2;

use eframe::egui::{self, epaint::TextShape, Align2, Color32, FontId, Painter, Pos2, Vec2};

use crate::scale::ScreenPoint;
use crate::style::ChartStyle;

use super::frame::RenderFrame;

const TICK_LEN: f32 = 6.0;
const TICK_FONT: f32 = 11.0;
const LABEL_FONT: f32 = 14.0;

/// Per-frame paint inputs that are not geometry.
#[derive(Debug, Clone, Copy)]
pub struct PaintState {
    pub style: ChartStyle,
    pub fill: Color32,
    /// Marker under the pointer or being dragged.
    pub highlighted: Option<usize>,
}

/// Drawable-area pixel to egui position.
#[inline]
pub fn to_pos(origin: Pos2, p: ScreenPoint) -> Pos2 {
    origin + Vec2::new(p.x as f32, p.y as f32)
}

/// Paint `frame` with its outer box at `top_left`.
pub fn paint_frame(painter: &Painter, top_left: Pos2, frame: &RenderFrame, state: &PaintState) {
    let Some(layout) = frame.layout else {
        return;
    };
    let style = &state.style;
    let origin = top_left + Vec2::new(layout.margin.left as f32, layout.margin.top as f32);
    let (w, h) = (layout.w as f32, layout.h as f32);
    let tick_font = FontId::proportional(TICK_FONT);

    // y axis
    painter.line_segment([origin, origin + Vec2::new(0.0, h)], style.axis);
    for tick in &frame.y_ticks {
        let at = origin + Vec2::new(0.0, tick.pixel as f32);
        painter.line_segment([at, at - Vec2::new(TICK_LEN, 0.0)], style.axis);
        painter.text(
            at - Vec2::new(TICK_LEN + 3.0, 0.0),
            Align2::RIGHT_CENTER,
            &tick.label,
            tick_font.clone(),
            style.text,
        );
    }

    // x axis
    let base = origin + Vec2::new(0.0, h);
    painter.line_segment([base, base + Vec2::new(w, 0.0)], style.axis);
    for tick in &frame.x_ticks {
        let at = base + Vec2::new(tick.pixel as f32, 0.0);
        painter.line_segment([at, at + Vec2::new(0.0, TICK_LEN)], style.axis);
        painter.text(
            at + Vec2::new(0.0, TICK_LEN + 2.0),
            Align2::CENTER_TOP,
            &tick.label,
            tick_font.clone(),
            style.text,
        );
    }

    if let Some(line) = frame.regression {
        painter.line_segment(
            [to_pos(origin, line.from), to_pos(origin, line.to)],
            style.regression,
        );
    }

    // zero-length residuals are still emitted
    for seg in &frame.residuals {
        painter.line_segment([to_pos(origin, seg.from), to_pos(origin, seg.to)], style.residual);
    }

    for marker in &frame.markers {
        let stroke = if state.highlighted == Some(marker.index) {
            style.marker_outline_hover
        } else {
            style.marker_outline
        };
        painter.circle(to_pos(origin, marker.center), marker.radius, state.fill, stroke);
    }

    let label_font = FontId::proportional(LABEL_FONT);
    painter.text(
        origin + Vec2::new(w / 2.0, h + layout.margin.bottom as f32 - 5.0),
        Align2::CENTER_BOTTOM,
        &frame.x_label,
        label_font.clone(),
        style.text,
    );

    let galley = painter.layout_no_wrap(frame.y_label.clone(), label_font, style.text);
    let size = galley.size();
    // rotated -90°: the galley's top-left becomes its bottom-left
    let anchor = origin
        + Vec2::new(
            -(layout.margin.left as f32) + 20.0 - size.y / 2.0,
            h / 2.0 + size.x / 2.0,
        );
    painter.add(egui::Shape::Text(
        TextShape::new(anchor, galley, style.text).with_angle(-FRAC_PI_2),
    ));
}
