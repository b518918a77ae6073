use quickcheck_macros::quickcheck;
use stock_dashboard_wasm::domain::chart::{ChartSession, Window};
use stock_dashboard_wasm::domain::market_data::RawBar;
use stock_dashboard_wasm::view_state::{BrushHandle, BrushState};

const WIDTH: f64 = 714.0;

fn handle(tag: u8) -> BrushHandle {
    match tag % 3 {
        0 => BrushHandle::Start,
        1 => BrushHandle::End,
        _ => BrushHandle::Selection,
    }
}

fn window(len: usize, a: u16, b: u16) -> Window {
    let (a, b) = (a as usize % len, b as usize % len);
    Window { start: a.min(b), end: a.max(b) }
}

#[quickcheck]
fn drag_never_leaves_series(len: u8, a: u16, b: u16, tag: u8, origin: i16, px: i16) -> bool {
    let len = len as usize + 1;
    let origin_window = window(len, a, b);
    let mut brush = BrushState::new(WIDTH, len);
    brush.begin_drag(handle(tag), origin as f64, origin_window);
    match brush.drag_to(px as f64) {
        Some((start, end)) => start <= end && end < len,
        None => false,
    }
}

#[quickcheck]
fn panning_keeps_width(len: u8, a: u16, b: u16, px: i16) -> bool {
    let len = len as usize + 1;
    let origin_window = window(len, a, b);
    let mut brush = BrushState::new(WIDTH, len);
    brush.begin_drag(BrushHandle::Selection, 0.0, origin_window);
    brush
        .drag_to(px as f64)
        .is_some_and(|(start, end)| end - start == origin_window.end - origin_window.start)
}

#[quickcheck]
fn pixels_map_onto_series(len: u8, px: f64) -> bool {
    let len = len as usize + 1;
    BrushState::new(WIDTH, len).px_to_index(px) < len
}

#[test]
fn dragged_window_is_accepted_by_session() {
    let rows: Vec<RawBar> = (0..300).map(|i| RawBar::new(format!("2024-01-{:02}", i % 28 + 1), i as f64)).collect();
    let mut session = ChartSession::new();
    session.load(&rows, "AAPL", "US");
    let current = session.window().unwrap();

    let mut brush = BrushState::new(WIDTH, session.series().len());
    let grab = brush.index_to_px(current.start) + 1.0;
    assert_eq!(brush.hit_test(grab, current), Some(BrushHandle::Start));
    brush.begin_drag(BrushHandle::Start, grab, current);
    let (start, end) = brush.drag_to(grab - 10.0 * brush.step_px()).unwrap();
    brush.end_drag();

    assert!(session.select(start, end));
    assert_eq!(session.window(), Some(Window { start: current.start - 10, end: current.end }));
    assert!(!brush.is_dragging());
}
