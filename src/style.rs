//! Stroke and text colors for the chart, per light/dark theme.

use eframe::egui::{Color32, Stroke, Visuals};

/// Theme variant, following the host's egui visuals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChartTheme {
    #[default]
    Light,
    Dark,
}

impl ChartTheme {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        if visuals.dark_mode {
            ChartTheme::Dark
        } else {
            ChartTheme::Light
        }
    }

    pub fn style(self) -> ChartStyle {
        match self {
            ChartTheme::Light => ChartStyle {
                regression: Stroke::new(2.0, Color32::from_rgb(0x13, 0x32, 0x46)),
                residual: Stroke::new(1.5, Color32::from_rgb(0xf1, 0x86, 0x86)),
                marker_outline: Stroke::new(
                    2.0,
                    Color32::from_rgba_unmultiplied(0x29, 0x80, 0xb9, 191),
                ),
                marker_outline_hover: Stroke::new(5.0, Color32::from_rgb(0x29, 0x80, 0xb9)),
                axis: Stroke::new(1.0, Color32::from_gray(40)),
                text: Color32::from_gray(30),
            },
            ChartTheme::Dark => ChartStyle {
                regression: Stroke::new(2.0, Color32::WHITE),
                residual: Stroke::new(1.5, Color32::from_rgb(0xf1, 0x86, 0x86)),
                marker_outline: Stroke::new(
                    2.0,
                    Color32::from_rgba_unmultiplied(0x29, 0x80, 0xb9, 191),
                ),
                marker_outline_hover: Stroke::new(5.0, Color32::from_rgb(0x29, 0x80, 0xb9)),
                axis: Stroke::new(1.0, Color32::from_gray(200)),
                text: Color32::from_gray(220),
            },
        }
    }
}

/// Resolved strokes for one theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartStyle {
    pub regression: Stroke,
    pub residual: Stroke,
    pub marker_outline: Stroke,
    /// Outline while hovered or grabbed.
    pub marker_outline_hover: Stroke,
    pub axis: Stroke,
    pub text: Color32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartTheme::default().style()
    }
}
