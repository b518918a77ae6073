use insta::assert_json_snapshot;
use serde_json::json;
use stock_dashboard_wasm::domain::market_data::{
    AnalysisRequest, EarningsEvent, EarningsResponse, ModelMode, RawBar, SeriesNormalizer, SettingsState,
    StockDailyResponse,
};
use stock_dashboard_wasm::domain::state::SettingsForm;
use stock_dashboard_wasm::i18n::Lang;

#[test]
fn rows_are_decoded_leniently() {
    let rows: Vec<RawBar> = serde_json::from_value(json!([
        { "date": "2024-01-02", "open": "1.5", "high": 2, "low": null, "close": "abc", "volume": -5 },
        { "date": "2024-01-03", "close": 3.25, "volume": "1200" },
    ]))
    .unwrap();

    assert_eq!(rows[0].open, 1.5);
    assert_eq!(rows[0].high, 2.0);
    assert!(rows[0].low.is_nan());
    assert!(rows[0].close.is_nan());
    assert_eq!(rows[0].volume, 0);
    assert!(rows[1].open.is_nan());
    assert_eq!(rows[1].close, 3.25);
    assert_eq!(rows[1].volume, 1200);
}

#[test]
fn null_date_row_does_not_fail_the_response() {
    let data: StockDailyResponse = serde_json::from_value(json!({
        "symbol": "AAPL",
        "market": "US",
        "start": "2024-01-02",
        "end": "2024-01-03",
        "rows": [
            { "date": "2024-01-02", "open": 10, "high": 10, "low": 10, "close": 10, "volume": 100 },
            { "date": null, "open": 11, "high": 11, "low": 11, "close": 11, "volume": 100 },
            { "date": 20240104, "close": 12 }
        ]
    }))
    .unwrap();

    let points = SeriesNormalizer::new().normalize(&data.rows);
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].date, "2024-01-02");
    assert_eq!(points[1].date, "");
    assert_eq!(points[1].close, 11.0);
    assert_eq!(points[2].date, "20240104");
}

#[test]
fn huge_close_survives_normalization() {
    let point = SeriesNormalizer::new().normalize_bar(&RawBar::new("2024-01-01", 1e305));
    assert!(point.close.is_finite());
    assert_eq!(point.close, 1e305);
}

#[test]
fn daily_response_tolerates_missing_sections() {
    let data: StockDailyResponse = serde_json::from_value(json!({
        "symbol": "AAPL",
        "market": "US",
        "start": "2024-01-02",
        "end": "2024-12-31",
        "company_name_zh": "苹果"
    }))
    .unwrap();

    assert!(data.rows.is_empty());
    assert_eq!(data.summary.count, 0);
    assert_eq!(data.company_name(Lang::En), Some("苹果"));
    assert_eq!(data.company_name(Lang::Zh), Some("苹果"));
}

#[test]
fn settings_patch_omits_inactive_fields() {
    let settings = SettingsState {
        mode: ModelMode::Cloud,
        api_key: Some("sk-test".to_string()),
        local_model: Some("llama3".to_string()),
        language: Some(Lang::Zh),
    };
    assert_json_snapshot!(SettingsForm::from(&settings).to_update(), @r###"
    {
      "mode": "cloud",
      "api_key": "sk-test",
      "language": "zh"
    }
    "###);
}

#[test]
fn settings_decode_with_defaults() {
    let settings: SettingsState = serde_json::from_value(json!({ "mode": "local" })).unwrap();
    assert_eq!(settings.mode, ModelMode::Local);
    assert_eq!(settings.api_key, None);
    assert_eq!(settings.lang(), Lang::En);
}

#[test]
fn analysis_request_skips_empty_question() {
    let request = AnalysisRequest {
        symbol: "AAPL".to_string(),
        market: "US".to_string(),
        question: None,
        language: Some(Lang::En),
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "symbol": "AAPL", "market": "US", "language": "en" })
    );
}

#[test]
fn earnings_card_shows_latest_six_until_expanded() {
    let events = (1..=8)
        .map(|i| EarningsEvent {
            date: format!("202{}-01-30", i),
            eps_actual: None,
            eps_estimate: None,
            eps_surprise: None,
            surprise_percent: None,
        })
        .collect();
    let earnings = EarningsResponse {
        symbol: "AAPL".to_string(),
        market: "US".to_string(),
        next_earnings_date: None,
        events,
        analyst: None,
    };

    assert!(earnings.is_collapsible());
    let collapsed = earnings.visible_events(false);
    assert_eq!(collapsed.len(), 6);
    assert_eq!(collapsed[0].date, "2023-01-30");
    assert_eq!(earnings.visible_events(true).len(), 8);
}
