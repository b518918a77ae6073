#![cfg(target_arch = "wasm32")]

use gloo::utils::format::JsValueSerdeExt;
use serde_json::{Value, json};
use stock_dashboard_wasm::presentation::ChartApi;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn rows(len: usize) -> JsValue {
    let rows: Vec<Value> = (0..len)
        .map(|i| json!({ "date": format!("2024-01-{:02}", i % 28 + 1), "close": 100 + i }))
        .collect();
    JsValue::from_serde(&rows).unwrap()
}

#[wasm_bindgen_test]
fn frame_after_load_and_select() {
    let mut api = ChartApi::new();
    assert!(api.load_rows(rows(200), "AAPL".to_string(), "US".to_string()).unwrap());
    assert_eq!(api.series_length(), 200);
    assert_eq!(api.currency(), "USD");

    assert!(api.select(10.0, 19.0));
    assert!(!api.select(19.0, 10.0));
    let frame: Value = api.frame().unwrap().into_serde().unwrap();
    assert_eq!(frame["start"], 10);
    assert_eq!(frame["end"], 19);
    assert_eq!(frame["points"].as_array().map(Vec::len), Some(10));
    assert_eq!(frame["symbol"], "AAPL");
    assert!(api.line_path(100.0, 50.0).starts_with('M'));
}

#[wasm_bindgen_test]
fn rejects_rows_that_are_not_a_list() {
    let mut api = ChartApi::new();
    assert!(api.load_rows(JsValue::from_str("nope"), "AAPL".to_string(), "US".to_string()).is_err());
    assert_eq!(api.series_length(), 0);
}
