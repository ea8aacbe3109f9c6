//! Native-window entry point for the demo.
//!
//! [`run_demo`] opens an eframe window hosting [`DemoApp`] and blocks until
//! the window is closed.

use eframe::egui;

use crate::config::ChartConfig;
use crate::demo::DemoApp;

/// Window options for [`run_demo`].
pub struct RunOptions {
    pub title: String,
    /// Start with the dark egui theme.
    pub dark: bool,
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            title: "Regression scatter".to_string(),
            dark: false,
            native_options: None,
        }
    }
}

/// Launch the demo in a native window.
pub fn run_demo(config: ChartConfig, mut opts: RunOptions) -> eframe::Result<()> {
    let mut native = opts
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if native.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon_svg() {
            native.viewport = native.viewport.clone().with_icon(icon);
        }
    }
    if native.viewport.inner_size.is_none() {
        native.viewport = native.viewport.clone().with_inner_size(egui::vec2(720.0, 800.0));
    }

    let dark = opts.dark;
    log::info!("opening demo window (dark theme: {dark})");
    eframe::run_native(
        &opts.title,
        native,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            cc.egui_ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(DemoApp::new(config)))
        }),
    )
}

/// Render the crate's `icon.svg` into an [`egui::IconData`].
///
/// Returns `None` if the file does not exist or cannot be parsed.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
