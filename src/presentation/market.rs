use leptos::*;
use strum::IntoEnumIterator;

use crate::{
    app::use_dashboard,
    domain::{
        market_data::{EarningsSession, Market, MoversKind},
        state::{MOVERS_COUNTS, MoversQuery, UPCOMING_DAYS, UpcomingQuery},
    },
    i18n::t,
    time_utils::{MetricTone, format_grouped, format_pct},
};

/// 🚀 Top gainers / losers
#[component]
pub fn MoversPage() -> impl IntoView {
    let ctx = use_dashboard();
    let query = create_rw_signal(MoversQuery::default());

    create_effect(move |_| ctx.load_movers(query.get()));

    let kind_button = move |kind: MoversKind, key: &'static str| {
        view! {
            <button
                class=move || if query.with(|q| q.kind == kind) { "nav-btn active" } else { "nav-btn" }
                on:click=move |_| query.update(|q| q.kind = kind)
            >
                {ctx.tr(key)}
            </button>
        }
    };

    let body = move || {
        let lang = ctx.lang.get();
        let market = query.with(|q| q.market);
        ctx.movers.with(|list| {
            if list.loading {
                return empty_row(7, t(lang, "loading"));
            }
            let items = list.data.as_ref().map(|d| d.items.as_slice()).unwrap_or_default();
            if items.is_empty() {
                return empty_row(7, t(lang, "empty.table"));
            }
            items
                .iter()
                .map(|item| {
                    let symbol = item.symbol.clone();
                    let tone = MetricTone::of_change(item.change).css_class();
                    let pct_tone = MetricTone::of_change(item.change_pct).css_class();
                    view! {
                        <tr class="clickable" on:click=move |_| ctx.open_symbol(&symbol, market)>
                            <td style="color: #2563eb">{item.symbol.clone()}</td>
                            <td>{item.name.clone().unwrap_or_else(|| "-".to_string())}</td>
                            <td>{format_amount(item.price)}</td>
                            <td class=tone>{format_amount(item.change)}</td>
                            <td class=pct_tone>{format_pct(item.change_pct)}</td>
                            <td>{format_amount(item.volume)}</td>
                            <td>{format_amount(item.market_cap)}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="stack">
            <div class="row">
                <MarketSelect
                    value=Signal::derive(move || query.with(|q| q.market))
                    on_change=move |market: Market| query.update(|q| q.market = market)
                />
                {kind_button(MoversKind::Gainers, "movers.gainers")}
                {kind_button(MoversKind::Losers, "movers.losers")}
                <select on:change=move |ev| {
                    if let Ok(count) = event_target_value(&ev).parse::<u32>() {
                        query.update(|q| q.count = count);
                    }
                }>
                    {MOVERS_COUNTS
                        .into_iter()
                        .map(|count| view! {
                            <option value=count.to_string() prop:selected=move || query.with(|q| q.count == count)>
                                {format!("Top {}", count)}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>
            {move || ctx.movers.with(|list| list.error.clone()).map(|err| view! { <div class="error">{err}</div> })}
            <div class="card">
                <table>
                    <thead>
                        <tr>
                            <th>{ctx.tr("table.symbol")}</th>
                            <th>{ctx.tr("table.name")}</th>
                            <th>{ctx.tr("table.price")}</th>
                            <th>{ctx.tr("table.change")}</th>
                            <th>{ctx.tr("table.change_pct")}</th>
                            <th>{ctx.tr("table.volume")}</th>
                            <th>{ctx.tr("table.market_cap")}</th>
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
        </div>
    }
}

/// 📅 Earnings calendar for the next few days
#[component]
pub fn UpcomingPage() -> impl IntoView {
    let ctx = use_dashboard();
    let query = create_rw_signal(UpcomingQuery::default());

    create_effect(move |_| ctx.load_upcoming(query.get()));

    let body = move || {
        let lang = ctx.lang.get();
        let market = query.with(|q| q.market);
        ctx.upcoming.with(|list| {
            if list.loading {
                return empty_row(4, t(lang, "loading"));
            }
            let items = list.data.as_ref().map(|d| d.items.as_slice()).unwrap_or_default();
            if items.is_empty() {
                return empty_row(4, t(lang, "empty.table"));
            }
            items
                .iter()
                .map(|item| {
                    let symbol = item.symbol.clone();
                    let session = match item.session {
                        Some(EarningsSession::Pre) => t(lang, "upcoming.pre"),
                        Some(EarningsSession::Post) => t(lang, "upcoming.post"),
                        None => "-",
                    };
                    view! {
                        <tr class="clickable" on:click=move |_| ctx.open_symbol(&symbol, market)>
                            <td style="color: #2563eb">{item.symbol.clone()}</td>
                            <td>{item.name.clone().unwrap_or_else(|| "-".to_string())}</td>
                            <td>{item.earnings_date.clone().unwrap_or_else(|| "-".to_string())}</td>
                            <td>{session}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="stack">
            <div class="row">
                <MarketSelect
                    value=Signal::derive(move || query.with(|q| q.market))
                    on_change=move |market: Market| query.update(|q| q.market = market)
                />
                <select on:change=move |ev| {
                    if let Ok(days) = event_target_value(&ev).parse::<u32>() {
                        query.update(|q| q.days = days);
                    }
                }>
                    {UPCOMING_DAYS
                        .into_iter()
                        .map(|days| view! {
                            <option value=days.to_string() prop:selected=move || query.with(|q| q.days == days)>
                                {format!("{}d", days)}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>
            {move || ctx.upcoming.with(|list| list.error.clone()).map(|err| view! { <div class="error">{err}</div> })}
            <div class="card">
                <table>
                    <thead>
                        <tr>
                            <th>{ctx.tr("table.symbol")}</th>
                            <th>{ctx.tr("table.name")}</th>
                            <th>{ctx.tr("upcoming.earnings_date")}</th>
                            <th>{ctx.tr("upcoming.session")}</th>
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
fn MarketSelect(value: Signal<Market>, #[prop(into)] on_change: Callback<Market>) -> impl IntoView {
    let ctx = use_dashboard();
    view! {
        <select on:change=move |ev| {
            if let Ok(market) = event_target_value(&ev).parse::<Market>() {
                on_change.call(market);
            }
        }>
            {Market::iter()
                .map(|market| view! {
                    <option value=market.as_ref().to_string() prop:selected=move || value.get() == market>
                        {ctx.tr(market.label_key())}
                    </option>
                })
                .collect_view()}
        </select>
    }
}

fn empty_row(columns: u32, message: &'static str) -> View {
    view! {
        <tr>
            <td colspan=columns.to_string() class="muted" style="text-align: center">{message}</td>
        </tr>
    }
    .into_view()
}

/// Table amounts: grouped, at most 2 decimals
fn format_amount(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_grouped(v, 2))
}
