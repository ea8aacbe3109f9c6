//! Stand-alone demo host: an in-memory store plus an eframe window.
//!
//! The store owns the dataset and is the only thing that mutates it. It
//! applies the chart's drag requests and refits the line with ordinary least
//! squares after every change; the chart itself never computes statistics.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::ChartConfig;
use crate::data::{Bounds, ChartProps, DataPoint, FitParameters};
use crate::render::ScatterChart;
use crate::store::{channel_dispatch, StoreCommand};

/// Least-squares line through `data`. Flat at the mean of y when x has no
/// spread, and zero for an empty set.
pub fn least_squares(data: &[DataPoint]) -> FitParameters {
    if data.is_empty() {
        return FitParameters::default();
    }
    let n = data.len() as f64;
    let mean_x = data.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = data.iter().map(|p| p.y).sum::<f64>() / n;
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for p in data {
        sxy += (p.x - mean_x) * (p.y - mean_y);
        sxx += (p.x - mean_x) * (p.x - mean_x);
    }
    if sxx == 0.0 {
        return FitParameters::new(mean_y, 0.0);
    }
    let slope = sxy / sxx;
    FitParameters::new(mean_y - slope * mean_x, slope)
}

/// splitmix64; deterministic so the demo opens with the same cloud each time.
struct SplitMix(u64);

impl SplitMix {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// `n` points loosely following `y = 2 + 0.6x` inside `bounds`.
pub fn sample_points(seed: u64, n: usize, bounds: &Bounds) -> Vec<DataPoint> {
    let mut rng = SplitMix(seed);
    (0..n)
        .map(|_| {
            let x = bounds.x_min + rng.next_f64() * bounds.x_span();
            let noise = (rng.next_f64() - 0.5) * 0.4 * bounds.y_span();
            let y = (2.0 + 0.6 * x + noise).clamp(bounds.y_min, bounds.y_max);
            DataPoint::new(x, y)
        })
        .collect()
}

/// In-memory store behind the demo window.
pub struct DemoStore {
    props: ChartProps,
    rx: Receiver<StoreCommand>,
    seed: u64,
}

impl DemoStore {
    pub fn new(rx: Receiver<StoreCommand>) -> Self {
        let bounds = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let seed = 7;
        let data = sample_points(seed, 12, &bounds);
        let mut store = Self {
            props: ChartProps {
                data,
                bounds,
                x_label: "X".to_string(),
                y_label: "Y".to_string(),
                ..ChartProps::default()
            },
            rx,
            seed,
        };
        store.refit();
        store
    }

    pub fn props(&self) -> &ChartProps {
        &self.props
    }

    fn refit(&mut self) {
        self.props.fit = least_squares(&self.props.data);
    }

    /// Apply one command. Out-of-range indices are rejected here, at the
    /// store boundary.
    pub fn apply(&mut self, cmd: StoreCommand) {
        match cmd {
            StoreCommand::Drag {
                index,
                xy,
                immediate,
            } => {
                let Some(point) = self.props.data.get_mut(index) else {
                    log::warn!("drag for missing point {index} ignored");
                    return;
                };
                *point = DataPoint::from(xy);
                self.props.immediate = immediate;
                self.refit();
            }
        }
    }

    /// Drain everything the chart sent since the last frame.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(cmd) = self.rx.try_recv() {
            self.apply(cmd);
            applied += 1;
        }
        applied
    }

    pub fn set_width(&mut self, width: f64) {
        if self.props.width != width {
            self.props.width = width;
            self.props.immediate = false;
        }
    }

    pub fn set_residuals(&mut self, on: bool) {
        self.props.residuals = on;
    }

    pub fn set_regression_line(&mut self, on: bool) {
        self.props.regression_line = on;
    }

    pub fn add_point(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        let mut extra = sample_points(self.seed, 1, &self.props.bounds);
        self.props.data.append(&mut extra);
        self.props.immediate = false;
        self.refit();
    }

    pub fn remove_point(&mut self) {
        if self.props.data.pop().is_some() {
            self.props.immediate = false;
            self.refit();
        }
    }

    /// New cloud of the same size; existing markers glide to their new spots.
    pub fn reshuffle(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        let n = self.props.data.len();
        self.props.data = sample_points(self.seed, n, &self.props.bounds);
        self.props.immediate = false;
        self.refit();
    }
}

/// The demo window.
pub struct DemoApp {
    store: DemoStore,
    chart: ScatterChart,
    loading: Rc<Cell<bool>>,
}

impl DemoApp {
    pub fn new(config: ChartConfig) -> Self {
        let (sink, rx) = channel_dispatch();
        let loading = Rc::new(Cell::new(true));
        let flag = loading.clone();
        let chart = ScatterChart::new(config)
            .with_dispatch(sink)
            .with_loading_indicator(move |id: &str| {
                log::debug!("hiding loading indicator {id}");
                flag.set(false);
            });
        Self {
            store: DemoStore::new(rx),
            chart,
            loading,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut residuals = self.store.props().residuals;
            if ui.checkbox(&mut residuals, "Residuals").changed() {
                self.store.set_residuals(residuals);
            }
            let mut line = self.store.props().regression_line;
            if ui.checkbox(&mut line, "Regression line").changed() {
                self.store.set_regression_line(line);
            }
            ui.separator();
            if ui
                .button(format!("{} Add point", egui_phosphor::regular::PLUS))
                .clicked()
            {
                self.store.add_point();
            }
            if ui
                .button(format!("{} Remove point", egui_phosphor::regular::MINUS))
                .clicked()
            {
                self.store.remove_point();
            }
            if ui
                .button(format!("{} Reshuffle", egui_phosphor::regular::SHUFFLE))
                .clicked()
            {
                self.store.reshuffle();
            }
            ui.separator();
            let fit = self.store.props().fit;
            ui.label(format!("ŷ = {:.2} + {:.2}x", fit.intercept, fit.slope));
        });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.store.apply_pending();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.controls(ui);
            ui.separator();
            if self.loading.get() {
                ui.spinner();
            }
            let avail = ui.available_size();
            let aspect = self.chart.config().aspect_ratio.max(f64::EPSILON);
            let width = (avail.x as f64).min(avail.y as f64 / aspect).floor();
            self.store.set_width(width);
            self.chart.show(ui, self.store.props());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_recovers_exact_line() {
        let data: Vec<_> = (0..5)
            .map(|i| DataPoint::new(i as f64, 1.0 + 2.0 * i as f64))
            .collect();
        let fit = least_squares(&data);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.slope - 2.0).abs() < 1e-12);
    }

    #[test]
    fn least_squares_without_x_spread_is_flat() {
        let data = vec![DataPoint::new(3.0, 1.0), DataPoint::new(3.0, 5.0)];
        assert_eq!(least_squares(&data), FitParameters::new(3.0, 0.0));
    }

    #[test]
    fn samples_stay_in_bounds() {
        let b = Bounds::default();
        for p in sample_points(42, 200, &b) {
            assert!(p.x >= b.x_min && p.x <= b.x_max);
            assert!(p.y >= b.y_min && p.y <= b.y_max);
        }
    }

    #[test]
    fn store_applies_drag_and_refits() {
        let (sink, rx) = channel_dispatch();
        let mut store = DemoStore::new(rx);
        let before = store.props().fit;
        sink.drag(0, [0.0, 10.0]).unwrap();
        assert_eq!(store.apply_pending(), 1);
        assert_eq!(store.props().data[0], DataPoint::new(0.0, 10.0));
        assert!(store.props().immediate);
        assert_ne!(store.props().fit, before);
    }

    #[test]
    fn store_ignores_out_of_range_drag() {
        let (sink, rx) = channel_dispatch();
        let mut store = DemoStore::new(rx);
        let before = store.props().clone();
        sink.drag(999, [1.0, 1.0]).unwrap();
        store.apply_pending();
        assert_eq!(store.props(), &before);
    }

    #[test]
    fn external_edits_are_animated() {
        let (sink, rx) = channel_dispatch();
        let mut store = DemoStore::new(rx);
        sink.drag(0, [1.0, 1.0]).unwrap();
        store.apply_pending();
        store.add_point();
        assert!(!store.props().immediate);
        assert_eq!(store.props().data.len(), 13);
        store.remove_point();
        store.remove_point();
        assert_eq!(store.props().data.len(), 11);
    }
}
