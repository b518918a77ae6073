use chrono::{Duration, NaiveDate};
use insta::assert_json_snapshot;
use serde::Serialize;
use stock_dashboard_wasm::domain::chart::{ChartSession, VerticalDomain, Window};
use stock_dashboard_wasm::domain::market_data::RawBar;

fn daily_rows(len: usize, base: f64) -> Vec<RawBar> {
    let first = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..len)
        .map(|i| {
            let date = first + Duration::days(i as i64);
            RawBar::new(format!("{}T00:00:00", date.format("%Y-%m-%d")), base + i as f64)
        })
        .collect()
}

#[derive(Serialize)]
struct FrameSummary {
    start: usize,
    end: usize,
    visible: usize,
    stride: usize,
    granularity: String,
    currency: &'static str,
    labels: Vec<String>,
}

fn summarize(session: &ChartSession) -> FrameSummary {
    let frame = session.frame();
    let window = frame.window.unwrap();
    FrameSummary {
        start: window.start,
        end: window.end,
        visible: frame.visible.len(),
        stride: frame.ticks.stride,
        granularity: frame.ticks.granularity.to_string(),
        currency: frame.currency,
        labels: frame.tick_labels().into_iter().take(3).map(|(_, label)| label).collect(),
    }
}

#[test]
fn first_load_frame() {
    let mut session = ChartSession::new();
    assert!(session.load(&daily_rows(200, 100.0), "AAPL", "US"));
    assert_json_snapshot!(summarize(&session), @r###"
    {
      "start": 80,
      "end": 199,
      "visible": 120,
      "stride": 8,
      "granularity": "month-day",
      "currency": "USD",
      "labels": [
        "03-22",
        "03-31",
        "04-09"
      ]
    }
    "###);
}

#[test]
fn domain_tracks_visible_slice_only() {
    let mut session = ChartSession::new();
    session.load(&daily_rows(200, 100.0), "AAPL", "US");
    let domain = session.frame().domain;
    assert!((domain.min - 174.05).abs() < 1e-9);
    assert!((domain.max - 304.95).abs() < 1e-9);

    assert!(session.select(0, 0));
    assert_eq!(session.frame().domain, VerticalDomain { min: 95.0, max: 105.0 });
    assert_eq!(session.frame().visible.len(), 1);
}

#[test]
fn reload_recomputes_even_when_window_stays() {
    let mut session = ChartSession::new();
    session.load(&daily_rows(50, 10.0), "0700", "HK");
    assert!(!session.load(&daily_rows(50, 20.0), "0700", "HK"));
    assert_eq!(session.frame().visible[0].close, 20.0);
    assert_eq!(session.frame().currency, "HKD");
}

#[test]
fn shorter_series_resets_stale_window() {
    let mut session = ChartSession::new();
    session.load(&daily_rows(200, 1.0), "AAPL", "US");
    assert!(session.select(150, 199));
    assert!(session.load(&daily_rows(50, 1.0), "MSFT", "US"));
    assert_eq!(session.window(), Some(Window { start: 0, end: 49 }));
    assert_eq!(session.frame().visible.len(), 50);
    assert_eq!(session.symbol(), "MSFT");
}

#[test]
fn rejected_selection_leaves_frame_alone() {
    let mut session = ChartSession::new();
    session.load(&daily_rows(30, 1.0), "AAPL", "US");
    let before = session.frame().clone();
    assert!(!session.select(20, 10));
    assert!(!session.select(0, 29));
    assert!(!session.select_from_brush(2.5, 9.0));
    assert_eq!(session.frame(), &before);
}

#[test]
fn brush_values_select_window() {
    let mut session = ChartSession::new();
    session.load(&daily_rows(30, 1.0), "AAPL", "US");
    assert!(session.select_from_brush(5.0, 9.0));
    assert_eq!(session.frame().window, Some(Window { start: 5, end: 9 }));
    assert_eq!(session.frame().visible.len(), 5);
    assert_eq!(session.frame().ticks.stride, 0);
}

#[test]
fn empty_rows_clear_the_frame() {
    let mut session = ChartSession::new();
    session.load(&daily_rows(30, 1.0), "AAPL", "US");
    assert!(session.load(&[], "AAPL", "US"));
    let frame = session.frame();
    assert!(frame.is_empty());
    assert_eq!(frame.window, None);
    assert_eq!(frame.domain, VerticalDomain::default());
    assert!(frame.tick_labels().is_empty());
}

#[test]
fn unknown_market_has_no_currency() {
    let mut session = ChartSession::new();
    session.load(&daily_rows(5, 1.0), "XYZ", "XX");
    assert_eq!(session.currency(), "");
    assert_eq!(session.frame().currency, "");
}
