use leptos::*;
use strum::IntoEnumIterator;

use crate::{
    app::use_dashboard,
    domain::market_data::{EarningsResponse, Market, NewsResponse, StockDailyResponse},
    i18n::{Lang, t},
    presentation::chart::CloseLineChart,
    time_utils::{MetricTone, format_news_time, format_number, format_pct, summary_tones},
};

/// 🏠 Search, chart, side cards, analysis
#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_dashboard();
    let home = ctx.home;

    let data = create_memo(move |_| home.with(|h| h.data.clone()));
    let rows = create_memo(move |_| data.with(|d| d.as_ref().map(|d| d.rows.clone()).unwrap_or_default()));
    let symbol = create_memo(move |_| data.with(|d| d.as_ref().map(|d| d.symbol.clone()).unwrap_or_default()));
    let market = create_memo(move |_| data.with(|d| d.as_ref().map(|d| d.market.clone()).unwrap_or_default()));
    let earnings = create_memo(move |_| home.with(|h| h.earnings.clone()));
    let news = create_memo(move |_| home.with(|h| h.news.clone()));

    view! {
        <div>
            <SearchBar />
            {move || home.with(|h| h.error.clone()).map(|err| view! { <div class="error">{err}</div> })}
            <Show when=move || data.with(|d| d.is_some())>
                <div class="grid">
                    <div class="stack">
                        <CloseLineChart
                            rows=Signal::from(rows)
                            symbol=Signal::from(symbol)
                            market=Signal::from(market)
                        />
                        <NewsList news=Signal::from(news) />
                    </div>
                    <EarningsCard earnings=Signal::from(earnings) />
                </div>
            </Show>
            <AnalysisBar />
            <StockResult />
        </div>
    }
}

#[component]
fn SearchBar() -> impl IntoView {
    let ctx = use_dashboard();
    let home = ctx.home;

    view! {
        <form
            class="row"
            on:submit=move |ev| {
                ev.prevent_default();
                ctx.search();
            }
        >
            <input
                type="text"
                style="width: 160px"
                placeholder=ctx.tr("search.placeholder")
                prop:value=move || home.with(|h| h.symbol.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    home.update(|h| *h = std::mem::take(h).set_symbol(value));
                }
            />
            <select
                on:change=move |ev| {
                    if let Ok(market) = event_target_value(&ev).parse::<Market>() {
                        home.update(|h| *h = std::mem::take(h).set_market(market));
                    }
                }
            >
                {Market::iter()
                    .map(|market| {
                        view! {
                            <option
                                value=market.as_ref().to_string()
                                prop:selected=move || home.with(|h| h.market == market)
                            >
                                {ctx.tr(market.label_key())}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <button type="submit" class="primary" disabled=move || home.with(|h| h.searching)>
                {ctx.tr("search.action")}
            </button>
        </form>
    }
}

#[component]
fn AnalysisBar() -> impl IntoView {
    let ctx = use_dashboard();
    let home = ctx.home;

    view! {
        <div class="row" style="margin-top: 16px">
            <input
                type="text"
                style="flex: 1"
                placeholder=ctx.tr("analysis.ask.placeholder")
                prop:value=move || home.with(|h| h.question.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    home.update(|h| *h = std::mem::take(h).set_question(value));
                }
            />
            <button
                class="primary"
                disabled=move || !home.with(|h| h.can_analyze())
                on:click=move |_| ctx.analyze()
            >
                {ctx.tr("analysis.action")}
            </button>
        </div>
    }
}

/// Statistics card plus the model's answer.
#[component]
fn StockResult() -> impl IntoView {
    let ctx = use_dashboard();
    let home = ctx.home;

    move || {
        let lang = ctx.lang.get();
        home.with(|h| {
            if h.is_loading() {
                return view! { <div class="muted">{t(lang, "loading")}</div> }.into_view();
            }
            let Some(data) = &h.data else {
                return view! { <div class="muted">{t(lang, "empty.prompt")}</div> }.into_view();
            };
            view! {
                <div class="stack" style="margin-top: 16px">
                    {summary_card(data, lang)}
                    {h.analysis.as_ref().map(|analysis| view! {
                        <div class="card">
                            <h2 style="font-size: 15px; margin: 0 0 8px">{t(lang, "analysis.title")}</h2>
                            <p class="analysis">{analysis.analysis.clone()}</p>
                        </div>
                    })}
                </div>
            }
            .into_view()
        })
    }
}

fn summary_card(data: &StockDailyResponse, lang: Lang) -> View {
    let summary = &data.summary;
    let (return_tone, drawdown_tone, volatility_tone) = summary_tones(summary);
    let metrics = [
        ("metric.count", summary.count.to_string(), MetricTone::Neutral),
        ("metric.mean_close", format_number(Some(summary.mean_close), 2), MetricTone::Neutral),
        ("metric.vol_mean", format_number(Some(summary.vol_mean), 0), MetricTone::Neutral),
        ("metric.return_pct", format_pct(Some(summary.return_pct)), return_tone),
        ("metric.max_drawdown_pct", format_pct(Some(summary.max_drawdown_pct)), drawdown_tone),
        ("metric.volatility_pct", format_pct(Some(summary.volatility_pct)), volatility_tone),
    ];
    let name = data.company_name(lang).map(str::to_string);

    view! {
        <div>
            <div class="row">
                <h2 style="font-size: 15px; margin: 0">{t(lang, "summary.title")}</h2>
                {name.map(|name| view! { <span>{name}</span> })}
                <span class="muted">
                    {format!("{}: {} ~ {}", t(lang, "summary.range"), data.start, data.end)}
                </span>
            </div>
            <div class="metrics" style="margin-top: 8px">
                {metrics
                    .into_iter()
                    .map(|(key, value, tone)| {
                        let hint = format!("{}.hint", key);
                        view! {
                            <div class="card">
                                <div class="metric-label">{t(lang, key)}</div>
                                <div class=format!("metric-value {}", tone.css_class())>{value}</div>
                                <div class="metric-hint">{t(lang, &hint).to_string()}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_view()
}

#[component]
fn EarningsCard(earnings: Signal<Option<EarningsResponse>>) -> impl IntoView {
    let ctx = use_dashboard();
    let expanded = create_rw_signal(false);

    let rows = move || {
        earnings.with(|earnings| {
            let Some(earnings) = earnings.as_ref().filter(|e| !e.events.is_empty()) else {
                return view! {
                    <tr><td colspan="5" class="muted">{ctx.tr("earnings.empty")}</td></tr>
                }
                .into_view();
            };
            earnings
                .visible_events(expanded.get())
                .iter()
                .map(|event| {
                    view! {
                        <tr>
                            <td>{event.date.clone()}</td>
                            <td>{format_number(event.eps_estimate, 2)}</td>
                            <td>{format_number(event.eps_actual, 2)}</td>
                            <td>{format_number(event.eps_surprise, 2)}</td>
                            <td>{format_number(event.surprise_percent, 2)}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    let next_date = move || {
        earnings.with(|e| e.as_ref().and_then(|e| e.next_earnings_date.clone())).map(|date| {
            view! { <span class="muted">{format!("{}: {}", t(ctx.lang.get(), "earnings.next"), date)}</span> }
        })
    };

    let toggle = move || {
        earnings.with(|e| e.as_ref().is_some_and(|e| e.is_collapsible())).then(|| {
            view! {
                <button class="link" on:click=move |_| expanded.update(|open| *open = !*open)>
                    {move || t(ctx.lang.get(), if expanded.get() { "collapse" } else { "expand" })}
                </button>
            }
        })
    };

    view! {
        <div class="card" style="max-height: 400px; overflow: auto">
            <div class="row" style="justify-content: space-between">
                <strong>{ctx.tr("earnings.title")}</strong>
                <div class="row">{next_date}{toggle}</div>
            </div>
            <table>
                <thead>
                    <tr>
                        <th>{ctx.tr("label.date")}</th>
                        <th>{ctx.tr("earnings.eps_estimate")}</th>
                        <th>{ctx.tr("earnings.eps_actual")}</th>
                        <th>{ctx.tr("earnings.surprise")}</th>
                        <th>{ctx.tr("earnings.surprise_pct")}</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}

#[component]
fn NewsList(news: Signal<Option<NewsResponse>>) -> impl IntoView {
    let ctx = use_dashboard();

    let count = move || {
        let len = news.with(|n| n.as_ref().map_or(0, |n| n.items.len()));
        (len > 0).then(|| view! { <span class="muted">{format!("{}: {}", t(ctx.lang.get(), "news.count"), len)}</span> })
    };

    let items = move || {
        news.with(|news| {
            let items = news.as_ref().map(|n| n.items.as_slice()).unwrap_or_default();
            if items.is_empty() {
                return view! { <div class="muted">{ctx.tr("news.empty")}</div> }.into_view();
            }
            view! {
                <ul style="list-style: none; padding: 0; margin: 0">
                    {items
                        .iter()
                        .map(|item| {
                            view! {
                                <li style="padding: 6px 0; border-bottom: 1px solid #f3f4f6">
                                    <div class="muted">{format_news_time(&item.published_at)}</div>
                                    <div style="font-size: 13px">{item.text.clone()}</div>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            }
            .into_view()
        })
    };

    view! {
        <div class="card" style="max-height: 240px; overflow: auto">
            <div class="row" style="justify-content: space-between">
                <strong>{ctx.tr("news.title")}</strong>
                {count}
            </div>
            {items}
        </div>
    }
}
