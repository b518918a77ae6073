use gloo::utils::format::JsValueSerdeExt;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::domain::{
    chart::ChartSession,
    logging::{LogComponent, get_logger},
    market_data::{PlotPoint, RawBar},
};

/// Chart pipeline for JavaScript hosts that render on their own.
///
/// Same contract as the Leptos chart: `(rows, symbol, market)` in, window
/// selections in, a precomputed frame out.
#[wasm_bindgen]
pub struct ChartApi {
    session: ChartSession,
}

/// JSON shape handed back by `frame()`.
#[derive(Serialize)]
struct FrameDto<'a> {
    symbol: &'a str,
    currency: &'static str,
    start: Option<usize>,
    end: Option<usize>,
    points: &'a [PlotPoint],
    min: f64,
    max: f64,
    stride: usize,
    ticks: Vec<(usize, String)>,
}

#[wasm_bindgen]
impl ChartApi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { session: ChartSession::new() }
    }

    /// Replace the series with backend rows; returns whether the window moved.
    #[wasm_bindgen(js_name = loadRows)]
    pub fn load_rows(&mut self, rows: JsValue, symbol: String, market: String) -> Result<bool, JsValue> {
        let rows: Vec<RawBar> = rows.into_serde().map_err(|e| {
            get_logger().error(
                LogComponent::Presentation("ChartApi"),
                &format!("❌ rows rejected: {}", e),
            );
            JsValue::from_str(&format!("invalid rows: {}", e))
        })?;
        Ok(self.session.load(&rows, &symbol, &market))
    }

    /// Brush selection as sent by a JS slider; malformed values are ignored.
    pub fn select(&mut self, start: f64, end: f64) -> bool {
        self.session.select_from_brush(start, end)
    }

    #[wasm_bindgen(js_name = seriesLength)]
    pub fn series_length(&self) -> usize {
        self.session.series().len()
    }

    pub fn currency(&self) -> String {
        self.session.currency().to_string()
    }

    /// Current frame as a plain JS object.
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        let frame = self.session.frame();
        let dto = FrameDto {
            symbol: self.session.symbol(),
            currency: frame.currency,
            start: frame.window.map(|w| w.start),
            end: frame.window.map(|w| w.end),
            points: &frame.visible,
            min: frame.domain.min,
            max: frame.domain.max,
            stride: frame.ticks.stride,
            ticks: frame.tick_labels(),
        };
        JsValue::from_serde(&dto).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// SVG path of the visible closes for a `width` x `height` box.
    #[wasm_bindgen(js_name = linePath)]
    pub fn line_path(&self, width: f64, height: f64) -> String {
        let frame = self.session.frame();
        frame.viewport(width, height).line_path(&frame.visible)
    }
}

impl Default for ChartApi {
    fn default() -> Self {
        Self::new()
    }
}
