use leptos::*;
use wasm_bindgen::JsCast;

use crate::{
    app::use_dashboard,
    domain::{
        chart::{ChartScaleService, ChartSession, Viewport},
        market_data::RawBar,
    },
    i18n::t,
    time_utils::format_price,
    view_state::BrushState,
};

// SVG user units; the element scales to its container width.
const VIEW_W: f64 = 800.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 8.0;
const PLOT_W: f64 = VIEW_W - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_H: f64 = 200.0;
const AXIS_H: f64 = 22.0;
const BRUSH_H: f64 = 32.0;
const Y_TICKS: usize = 4;

/// Close-price line chart with a brush strip underneath.
///
/// The session outlives individual searches: a new series is loaded into the
/// same session so the current window is clamped onto it instead of reset.
#[component]
pub fn CloseLineChart(
    #[prop(into)] rows: Signal<Vec<RawBar>>,
    #[prop(into)] symbol: Signal<String>,
    #[prop(into)] market: Signal<String>,
) -> impl IntoView {
    let ctx = use_dashboard();
    let session = create_rw_signal(ChartSession::new());

    create_effect(move |_| {
        let rows = rows.get();
        let symbol = symbol.get();
        let market = market.get();
        session.update(|session| {
            session.load(&rows, &symbol, &market);
        });
    });

    let frame = create_memo(move |_| session.with(|session| session.frame().clone()));
    let viewport = move || frame.with(|frame| frame.viewport(PLOT_W, PLOT_H));
    let hover = create_rw_signal::<Option<usize>>(None);

    let title = move || {
        let currency = frame.with(|frame| frame.currency);
        let label = t(ctx.lang.get(), "chart.close");
        if currency.is_empty() {
            format!("{} - {}", label, symbol.get())
        } else {
            format!("{} - {} ({})", label, symbol.get(), currency)
        }
    };

    let y_axis = move || {
        frame.with(|frame| {
            let vp = frame.viewport(PLOT_W, PLOT_H);
            (0..=Y_TICKS)
                .map(|i| {
                    let price = frame.domain.min + frame.domain.height() * i as f64 / Y_TICKS as f64;
                    let y = vp.price_to_y(price);
                    view! {
                        <line x1=0.0 x2=PLOT_W y1=y y2=y stroke="#f3f4f6" />
                        <text x={-6.0} y={y + 3.0} text-anchor="end" font-size="10" fill="#6b7280">
                            {format_price(price)}
                        </text>
                    }
                })
                .collect_view()
        })
    };

    let x_axis = move || {
        frame.with(|frame| {
            let vp = frame.viewport(PLOT_W, PLOT_H);
            frame
                .tick_labels()
                .into_iter()
                .map(|(index, label)| {
                    view! {
                        <text x={vp.index_to_x(index)} y={PLOT_H + 14.0} text-anchor="middle" font-size="10" fill="#6b7280">
                            {label}
                        </text>
                    }
                })
                .collect_view()
        })
    };

    let on_move = move |ev: web_sys::MouseEvent| {
        let index = pointer_x(&ev).and_then(|px| viewport().x_to_index(px));
        hover.set(index);
    };

    let hover_marker = move || {
        let index = hover.get()?;
        frame.with(|frame| {
            let point = frame.visible.get(index)?;
            let x = frame.viewport(PLOT_W, PLOT_H).index_to_x(index);
            if !point.close.is_finite() {
                return None;
            }
            Some(view! { <line x1=x x2=x y1=0.0 y2=PLOT_H stroke="#9ca3af" stroke-dasharray="3 3" /> })
        })
    };

    let tooltip = move || {
        let index = hover.get()?;
        frame.with(|frame| {
            let point = frame.visible.get(index)?;
            Some(format!(
                "{}: {}  {}",
                t(ctx.lang.get(), "label.date"),
                point.date,
                format_price(point.close)
            ))
        })
    };

    view! {
        <div class="card">
            <h3 class="chart-title">{title}</h3>
            <Show
                when=move || !frame.with(|frame| frame.is_empty())
                fallback=move || view! { <div class="muted">{ctx.tr("chart.empty")}</div> }
            >
                <svg
                    class="chart-svg"
                    viewBox=format!("0 0 {} {}", VIEW_W, MARGIN_TOP + PLOT_H + AXIS_H)
                    on:mousemove=on_move
                    on:mouseleave=move |_| hover.set(None)
                >
                    <g transform=format!("translate({},{})", MARGIN_LEFT, MARGIN_TOP)>
                        {y_axis}
                        {x_axis}
                        <path
                            d=move || frame.with(|frame| frame.viewport(PLOT_W, PLOT_H).line_path(&frame.visible))
                            fill="none"
                            stroke="#2563eb"
                            stroke-width="1.5"
                        />
                        {hover_marker}
                    </g>
                </svg>
                <div class="tooltip">{tooltip}</div>
                <BrushStrip session=session />
            </Show>
        </div>
    }
}

/// Overview of the whole series with a draggable window selection.
#[component]
fn BrushStrip(session: RwSignal<ChartSession>) -> impl IntoView {
    let brush = create_rw_signal(BrushState::new(PLOT_W, 0));

    create_effect(move |_| {
        let len = session.with(|session| session.series().len());
        brush.update(|brush| brush.len = len);
    });

    let overview = move || {
        session.with(|session| {
            let series = session.series();
            let domain = ChartScaleService::new().vertical_domain(series);
            Viewport::new(PLOT_W, BRUSH_H, domain, series.len()).line_path(series)
        })
    };

    let selection = move || {
        let window = session.with(|session| session.window())?;
        brush.with(|brush| {
            let x0 = brush.index_to_px(window.start);
            let x1 = brush.index_to_px(window.end);
            Some((x0, (x1 - x0).max(2.0)))
        })
    };

    let on_down = move |ev: web_sys::MouseEvent| {
        let Some(px) = pointer_x(&ev) else {
            return;
        };
        let Some(window) = session.with_untracked(|session| session.window()) else {
            return;
        };
        if let Some(handle) = brush.with_untracked(|brush| brush.hit_test(px, window)) {
            ev.prevent_default();
            brush.update(|brush| brush.begin_drag(handle, px, window));
        }
    };

    let on_move = move |ev: web_sys::MouseEvent| {
        if !brush.with_untracked(|brush| brush.is_dragging()) {
            return;
        }
        let Some(px) = pointer_x(&ev) else {
            return;
        };
        if let Some((start, end)) = brush.with_untracked(|brush| brush.drag_to(px)) {
            if session.with_untracked(|session| session.window().map(|w| (w.start, w.end))) != Some((start, end)) {
                session.update(|session| {
                    session.select(start, end);
                });
            }
        }
    };

    let end_drag = move |_: web_sys::MouseEvent| brush.update(|brush| brush.end_drag());

    view! {
        <svg
            class="brush-svg"
            viewBox=format!("0 0 {} {}", VIEW_W, BRUSH_H)
            preserveAspectRatio="none"
            on:mousedown=on_down
            on:mousemove=on_move
            on:mouseup=end_drag
            on:mouseleave=end_drag
        >
            <g transform=format!("translate({},0)", MARGIN_LEFT)>
                <rect x=0.0 y=0.0 width=PLOT_W height=BRUSH_H fill="#f9fafb" stroke="#e5e7eb" />
                <path d=overview fill="none" stroke="#93c5fd" stroke-width="1" />
                {move || {
                    selection()
                        .map(|(x, width)| {
                            view! {
                                <rect x=x y=0.0 width=width height=BRUSH_H fill="#2563eb" fill-opacity="0.15" />
                                <rect x={x - 2.0} y=0.0 width=4.0 height=BRUSH_H fill="#2563eb" />
                                <rect x={x + width - 2.0} y=0.0 width=4.0 height=BRUSH_H fill="#2563eb" />
                            }
                        })
                }}
            </g>
        </svg>
    }
}

/// Pointer position in plot units, measured against the element the
/// handler is attached to.
fn pointer_x(ev: &web_sys::MouseEvent) -> Option<f64> {
    let target = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = target.get_bounding_client_rect();
    if rect.width() <= 0.0 {
        return None;
    }
    Some((ev.client_x() as f64 - rect.left()) / rect.width() * VIEW_W - MARGIN_LEFT)
}
