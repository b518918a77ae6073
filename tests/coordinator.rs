use std::cell::{Cell, RefCell};

use futures::executor::block_on;
use stock_dashboard_wasm::application::DashboardCoordinator;
use stock_dashboard_wasm::domain::errors::{AppError, NetworkResult};
use stock_dashboard_wasm::domain::market_data::{
    AnalysisResponse, EarningsResponse, Market, ModelMode, MoversItem, MoversKind, MoversResponse,
    NewsItem, NewsResponse, SettingsState, SettingsUpdate, StockApi, StockDailyResponse, StockSummary,
    Symbol, UpcomingEarningsResponse,
};
use stock_dashboard_wasm::domain::state::{
    HomeState, ListState, MoversQuery, SettingsForm, SettingsStore, UpcomingQuery,
};
use stock_dashboard_wasm::i18n::Lang;

/// In-memory backend that records what it was asked.
#[derive(Default)]
struct MockApi {
    fail_stock: bool,
    fail_side: bool,
    fail_settings: bool,
    stock_requests: RefCell<Vec<(String, Market, u32)>>,
    analysis_requests: RefCell<Vec<(String, Option<String>, Option<Lang>)>>,
    settings_loads: Cell<u32>,
    patches: RefCell<Vec<SettingsUpdate>>,
    movers_requests: RefCell<Vec<(Market, MoversKind, u32)>>,
}

fn offline() -> AppError {
    AppError::NetworkError("offline".to_string())
}

impl StockApi for MockApi {
    async fn fetch_stock(&self, symbol: &Symbol, market: Market, days: u32) -> NetworkResult<StockDailyResponse> {
        self.stock_requests.borrow_mut().push((symbol.value().to_string(), market, days));
        if self.fail_stock {
            return Err(AppError::HttpStatus { status: 404, detail: "Symbol not found".to_string() });
        }
        Ok(StockDailyResponse {
            symbol: symbol.value().to_string(),
            market: market.to_string(),
            start: "2024-01-02".to_string(),
            end: "2024-12-31".to_string(),
            rows: Vec::new(),
            summary: StockSummary::default(),
            company_name_en: None,
            company_name_zh: None,
        })
    }

    async fn analyze(
        &self,
        symbol: &str,
        market: &str,
        question: Option<String>,
        language: Option<Lang>,
    ) -> NetworkResult<AnalysisResponse> {
        self.analysis_requests.borrow_mut().push((symbol.to_string(), question, language));
        Ok(AnalysisResponse {
            symbol: symbol.to_string(),
            market: market.to_string(),
            summary: StockSummary::default(),
            analysis: format!("{} looks fine", symbol),
        })
    }

    async fn get_settings(&self) -> NetworkResult<SettingsState> {
        self.settings_loads.set(self.settings_loads.get() + 1);
        if self.fail_settings {
            return Err(offline());
        }
        Ok(SettingsState { language: Some(Lang::Zh), ..SettingsState::default() })
    }

    async fn update_settings(&self, patch: &SettingsUpdate) -> NetworkResult<SettingsState> {
        self.patches.borrow_mut().push(patch.clone());
        if self.fail_settings {
            return Err(AppError::HttpStatus { status: 500, detail: "settings locked".to_string() });
        }
        Ok(SettingsState {
            mode: patch.mode.unwrap_or_default(),
            api_key: patch.api_key.clone(),
            local_model: patch.local_model.clone(),
            language: patch.language,
        })
    }

    async fn fetch_earnings(&self, symbol: &Symbol, market: Market) -> NetworkResult<EarningsResponse> {
        if self.fail_side {
            return Err(AppError::Timeout(10_000));
        }
        Ok(EarningsResponse {
            symbol: symbol.value().to_string(),
            market: market.to_string(),
            next_earnings_date: Some("2025-01-30".to_string()),
            events: Vec::new(),
            analyst: None,
        })
    }

    async fn fetch_news(&self, symbol: &Symbol, market: Market) -> NetworkResult<NewsResponse> {
        if self.fail_side {
            return Err(offline());
        }
        Ok(NewsResponse {
            symbol: symbol.value().to_string(),
            market: market.to_string(),
            items: vec![NewsItem { published_at: "2024-12-30T08:00:00Z".to_string(), text: "headline".to_string() }],
        })
    }

    async fn fetch_movers(&self, market: Market, kind: MoversKind, count: u32) -> NetworkResult<MoversResponse> {
        self.movers_requests.borrow_mut().push((market, kind, count));
        if self.fail_side {
            return Err(offline());
        }
        Ok(MoversResponse {
            market: market.to_string(),
            items: vec![MoversItem {
                symbol: "0700.HK".to_string(),
                name: Some("Tencent".to_string()),
                price: Some(400.0),
                change: Some(4.0),
                change_pct: Some(1.0),
                volume: None,
                market_cap: None,
            }],
        })
    }

    async fn fetch_upcoming_earnings(&self, market: Market, days: u32) -> NetworkResult<UpcomingEarningsResponse> {
        if self.fail_side {
            return Err(offline());
        }
        Ok(UpcomingEarningsResponse { market: format!("{}:{}", market, days), items: Vec::new() })
    }
}

fn coordinator(api: MockApi) -> DashboardCoordinator<MockApi> {
    DashboardCoordinator::new(api, 365)
}

#[test]
fn search_loads_series_earnings_and_news() {
    let coordinator = coordinator(MockApi::default());
    let state = block_on(coordinator.search(HomeState::default().set_symbol(" aapl ")));

    assert!(!state.searching);
    assert!(state.error.is_none());
    assert_eq!(state.data.as_ref().map(|d| d.symbol.as_str()), Some("AAPL"));
    assert!(state.earnings.is_some());
    assert_eq!(state.news.as_ref().map(|n| n.items.len()), Some(1));
    assert_eq!(
        coordinator.api().stock_requests.borrow().as_slice(),
        &[("AAPL".to_string(), Market::Us, 365)]
    );
}

#[test]
fn side_panels_failing_does_not_fail_search() {
    let coordinator = coordinator(MockApi { fail_side: true, ..MockApi::default() });
    let state = block_on(coordinator.search(HomeState::default()));

    assert!(state.data.is_some());
    assert!(state.earnings.is_none());
    assert!(state.news.is_none());
    assert!(state.error.is_none());
}

#[test]
fn series_failure_surfaces_backend_detail() {
    let coordinator = coordinator(MockApi { fail_stock: true, ..MockApi::default() });
    let state = block_on(coordinator.search(HomeState::default()));

    assert!(!state.searching);
    assert!(state.data.is_none());
    assert_eq!(state.error.as_deref(), Some("Symbol not found"));
}

#[test]
fn blank_symbol_never_reaches_backend() {
    let coordinator = coordinator(MockApi::default());
    let state = block_on(coordinator.search(HomeState::default().set_symbol("")));
    assert!(!state.searching);
    assert!(coordinator.api().stock_requests.borrow().is_empty());
}

#[test]
fn out_of_order_responses_keep_latest_search() {
    let coordinator = coordinator(MockApi::default());
    let (state, first) = HomeState::default().set_symbol("AAPL").begin_search();
    let (state, second) = state.set_symbol("MSFT").set_market(Market::Us).begin_search();
    let (first, second) = (first.unwrap(), second.unwrap());

    let first_result = block_on(coordinator.fetch_search(&first));
    let second_result = block_on(coordinator.fetch_search(&second));

    type Coordinator = DashboardCoordinator<MockApi>;
    let state = Coordinator::finish_search(state, second.seq, second_result);
    let state = Coordinator::finish_search(state, first.seq, first_result);
    assert_eq!(state.data.as_ref().map(|d| d.symbol.as_str()), Some("MSFT"));
}

#[test]
fn analysis_passes_language_and_question() {
    let coordinator = coordinator(MockApi::default());
    let state = block_on(coordinator.search(HomeState::default()));
    let state = block_on(coordinator.analyze(state.set_question(" trend? "), Lang::Zh));

    assert_eq!(state.analysis.as_ref().map(|a| a.analysis.as_str()), Some("AAPL looks fine"));
    assert!(!state.analyzing);
    assert_eq!(
        coordinator.api().analysis_requests.borrow().as_slice(),
        &[("AAPL".to_string(), Some("trend?".to_string()), Some(Lang::Zh))]
    );
}

#[test]
fn analysis_without_data_is_skipped() {
    let coordinator = coordinator(MockApi::default());
    let state = block_on(coordinator.analyze(HomeState::default(), Lang::En));
    assert!(state.analysis.is_none());
    assert!(coordinator.api().analysis_requests.borrow().is_empty());
}

#[test]
fn settings_load_once() {
    let coordinator = coordinator(MockApi::default());
    let store = block_on(coordinator.init_settings(SettingsStore::default()));
    assert!(!store.needs_init());
    assert_eq!(store.lang(), Lang::Zh);

    let store = block_on(coordinator.init_settings(store));
    assert_eq!(store.lang(), Lang::Zh);
    assert_eq!(coordinator.api().settings_loads.get(), 1);
}

#[test]
fn failed_settings_load_is_retried() {
    let coordinator = coordinator(MockApi { fail_settings: true, ..MockApi::default() });
    let store = block_on(coordinator.init_settings(SettingsStore::default()));
    assert!(store.needs_init());
    assert!(store.error.is_none());
    assert_eq!(store.lang(), Lang::En);

    block_on(coordinator.init_settings(store));
    assert_eq!(coordinator.api().settings_loads.get(), 2);
}

#[test]
fn saving_settings_sends_patch() {
    let coordinator = coordinator(MockApi::default());
    let form = SettingsForm {
        mode: ModelMode::Cloud,
        api_key: "sk-test".to_string(),
        local_model: "llama3".to_string(),
        language: Lang::Zh,
    };
    let store = block_on(coordinator.save_settings(SettingsStore::default(), &form));

    assert!(!store.saving);
    assert!(store.error.is_none());
    assert_eq!(store.lang(), Lang::Zh);
    let patches = coordinator.api().patches.borrow();
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].api_key.as_deref(), Some("sk-test"));
    assert_eq!(patches[0].local_model, None);
}

#[test]
fn late_settings_load_does_not_undo_a_save() {
    let coordinator = coordinator(MockApi::default());
    let form = SettingsForm {
        mode: ModelMode::Local,
        api_key: String::new(),
        local_model: "llama3".to_string(),
        language: Lang::En,
    };

    // The initial load is still in flight while the user saves.
    let pending_load = block_on(coordinator.fetch_settings());
    let store = SettingsStore::default().begin_save();
    let saved = block_on(coordinator.fetch_save_settings(&form));
    let store = DashboardCoordinator::<MockApi>::finish_save_settings(store, saved);
    let store = DashboardCoordinator::<MockApi>::finish_init_settings(store, pending_load);

    assert!(!store.needs_init());
    assert_eq!(store.settings.mode, ModelMode::Local);
    assert_eq!(store.lang(), Lang::En);
    assert_eq!(store.settings.local_model.as_deref(), Some("llama3"));
}

#[test]
fn settings_load_during_save_is_overwritten_by_the_save() {
    let coordinator = coordinator(MockApi::default());
    let form = SettingsForm { language: Lang::En, ..SettingsForm::default() };

    let store = SettingsStore::default().begin_save();
    let loaded = block_on(coordinator.fetch_settings());
    let store = DashboardCoordinator::<MockApi>::finish_init_settings(store, loaded);
    assert!(store.saving);
    assert_eq!(store.lang(), Lang::Zh);

    let saved = block_on(coordinator.fetch_save_settings(&form));
    let store = DashboardCoordinator::<MockApi>::finish_save_settings(store, saved);
    assert!(!store.saving);
    assert_eq!(store.lang(), Lang::En);
}

#[test]
fn failed_save_keeps_settings_and_reports() {
    let coordinator = coordinator(MockApi { fail_settings: true, ..MockApi::default() });
    let before = SettingsStore::default();
    let store = block_on(coordinator.save_settings(before.clone(), &SettingsForm::from(&before.settings)));

    assert!(!store.saving);
    assert_eq!(store.error.as_deref(), Some("settings locked"));
    assert_eq!(store.settings, before.settings);
}

#[test]
fn movers_query_is_forwarded() {
    let coordinator = coordinator(MockApi::default());
    let query = MoversQuery { market: Market::Hk, kind: MoversKind::Losers, count: 20 };
    let list = block_on(coordinator.load_movers(ListState::default(), query));

    assert!(!list.loading);
    assert_eq!(list.data.as_ref().map(|d| d.items[0].symbol.as_str()), Some("0700.HK"));
    assert_eq!(
        coordinator.api().movers_requests.borrow().as_slice(),
        &[(Market::Hk, MoversKind::Losers, 20)]
    );
}

#[test]
fn list_failures_are_reported() {
    let coordinator = coordinator(MockApi { fail_side: true, ..MockApi::default() });
    let movers = block_on(coordinator.load_movers(ListState::default(), MoversQuery::default()));
    assert_eq!(movers.error.as_deref(), Some("offline"));

    let upcoming = block_on(coordinator.load_upcoming(ListState::default(), UpcomingQuery::default()));
    assert!(!upcoming.loading);
    assert_eq!(upcoming.error.as_deref(), Some("offline"));
}

#[test]
fn upcoming_uses_default_horizon() {
    let coordinator = coordinator(MockApi::default());
    let upcoming = block_on(coordinator.load_upcoming(ListState::default(), UpcomingQuery::default()));
    assert_eq!(upcoming.data.map(|d| d.market), Some("US:14".to_string()));
}
