use serde::Serialize;

use super::services::{ChartScaleService, WindowManager};
use super::value_objects::{TickPlan, VerticalDomain, Viewport, Window};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{PlotPoint, RawBar, SeriesNormalizer, currency_label};
use crate::log_debug;

/// Everything the view needs to draw the current window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartFrame {
    pub window: Option<Window>,
    pub visible: Vec<PlotPoint>,
    pub domain: VerticalDomain,
    pub ticks: TickPlan,
    pub currency: &'static str,
}

impl ChartFrame {
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn viewport(&self, width: f64, height: f64) -> Viewport {
        Viewport::new(width, height, self.domain, self.visible.len())
    }

    pub fn tick_labels(&self) -> Vec<(usize, String)> {
        self.ticks.labels(&self.visible)
    }
}

/// Chart state for one loaded symbol.
///
/// Every mutation that changes the series or the window reruns the
/// recompute pipeline (visible slice, vertical domain, tick plan) before
/// returning, so `frame()` is always current.
#[derive(Debug, Clone, Default)]
pub struct ChartSession {
    symbol: String,
    market: String,
    series: Vec<PlotPoint>,
    windows: WindowManager,
    normalizer: SeriesNormalizer,
    scale: ChartScaleService,
    frame: ChartFrame,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the series wholesale. Returns whether the window moved.
    pub fn load(&mut self, rows: &[RawBar], symbol: &str, market: &str) -> bool {
        self.symbol = symbol.to_string();
        self.market = market.to_string();
        self.series = self.normalizer.normalize(rows);
        let window_changed = self.windows.revalidate(self.series.len());
        log_debug!(
            LogComponent::Domain("ChartSession"),
            "{} {}: {} points, window {:?}",
            symbol,
            market,
            self.series.len(),
            self.windows.window()
        );
        self.recompute();
        window_changed
    }

    /// Brush selection; ignored (and nothing recomputed) unless it is a new valid window.
    pub fn select(&mut self, start: usize, end: usize) -> bool {
        let changed = self.windows.select(start, end);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn select_from_brush(&mut self, start: f64, end: f64) -> bool {
        let changed = self.windows.select_from_brush(start, end);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    pub fn series(&self) -> &[PlotPoint] {
        &self.series
    }

    pub fn window(&self) -> Option<Window> {
        self.windows.window()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn currency(&self) -> &'static str {
        currency_label(&self.market)
    }

    fn recompute(&mut self) {
        let visible = self.windows.visible(&self.series);
        self.frame = ChartFrame {
            window: self.windows.window(),
            visible: visible.to_vec(),
            domain: self.scale.vertical_domain(visible),
            ticks: self.scale.tick_plan(visible),
            currency: currency_label(&self.market),
        };
    }
}
