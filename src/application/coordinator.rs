use crate::domain::{
    errors::NetworkResult,
    logging::{LogComponent, LogEntry, LogLevel, get_logger},
    market_data::{AnalysisResponse, MoversResponse, SettingsState, StockApi, UpcomingEarningsResponse},
    state::{
        AnalysisTicket, HomeState, ListState, MoversQuery, SearchResult, SearchTicket, SettingsForm,
        SettingsStore, UpcomingQuery,
    },
};
use crate::i18n::Lang;

/// Runs the dashboard's async flows against a backend and folds the outcomes
/// back into the state containers.
///
/// Each flow is split in two halves so reactive callers can publish the
/// in-flight state before awaiting: `fetch_*` performs the requests for a
/// ticket, `finish_*` applies the result. The combined `search`/`analyze`
/// helpers run both halves in one go.
#[derive(Debug, Clone)]
pub struct DashboardCoordinator<A> {
    api: A,
    history_days: u32,
}

impl<A: StockApi> DashboardCoordinator<A> {
    pub fn new(api: A, history_days: u32) -> Self {
        Self { api, history_days }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Daily series, earnings and news for one ticker, fetched concurrently.
    /// Only the series is required; the other two degrade to `None`.
    pub async fn fetch_search(&self, ticket: &SearchTicket) -> NetworkResult<SearchResult> {
        get_logger().info(
            LogComponent::Application("Coordinator"),
            &format!("🔍 search #{} {} {}", ticket.seq, ticket.symbol, ticket.market),
        );

        let (data, earnings, news) = futures::join!(
            self.api.fetch_stock(&ticket.symbol, ticket.market, self.history_days),
            self.api.fetch_earnings(&ticket.symbol, ticket.market),
            self.api.fetch_news(&ticket.symbol, ticket.market),
        );

        Ok(SearchResult {
            data: data?,
            earnings: best_effort("earnings", earnings),
            news: best_effort("news", news),
        })
    }

    pub fn finish_search(state: HomeState, seq: u64, result: NetworkResult<SearchResult>) -> HomeState {
        match result {
            Ok(result) => state.search_succeeded(seq, result),
            Err(err) => {
                get_logger().error(
                    LogComponent::Application("Coordinator"),
                    &format!("❌ search #{} failed: {}", seq, err),
                );
                state.search_failed(seq, err.user_message())
            }
        }
    }

    pub async fn search(&self, state: HomeState) -> HomeState {
        let (state, ticket) = state.begin_search();
        let Some(ticket) = ticket else {
            return state;
        };
        let result = self.fetch_search(&ticket).await;
        Self::finish_search(state, ticket.seq, result)
    }

    pub async fn fetch_analysis(&self, ticket: &AnalysisTicket, lang: Lang) -> NetworkResult<AnalysisResponse> {
        get_logger().info(
            LogComponent::Application("Coordinator"),
            &format!("🧠 analysis #{} {} {} ({})", ticket.seq, ticket.symbol, ticket.market, lang),
        );
        self.api
            .analyze(&ticket.symbol, &ticket.market, ticket.question.clone(), Some(lang))
            .await
    }

    pub fn finish_analysis(state: HomeState, seq: u64, result: NetworkResult<AnalysisResponse>) -> HomeState {
        match result {
            Ok(analysis) => state.analysis_succeeded(seq, analysis),
            Err(err) => {
                get_logger().error(
                    LogComponent::Application("Coordinator"),
                    &format!("❌ analysis #{} failed: {}", seq, err),
                );
                state.analysis_failed(seq, err.user_message())
            }
        }
    }

    pub async fn analyze(&self, state: HomeState, lang: Lang) -> HomeState {
        let (state, ticket) = state.begin_analysis();
        let Some(ticket) = ticket else {
            return state;
        };
        let result = self.fetch_analysis(&ticket, lang).await;
        Self::finish_analysis(state, ticket.seq, result)
    }

    /// Loads settings once. A failed load leaves the store untouched so the
    /// next call retries.
    pub async fn init_settings(&self, store: SettingsStore) -> SettingsStore {
        if !store.needs_init() {
            return store;
        }
        let result = self.fetch_settings().await;
        Self::finish_init_settings(store, result)
    }

    pub async fn fetch_settings(&self) -> NetworkResult<SettingsState> {
        self.api.get_settings().await
    }

    /// Applied to the live store, which may have been saved meanwhile.
    pub fn finish_init_settings(store: SettingsStore, result: NetworkResult<SettingsState>) -> SettingsStore {
        match result {
            Ok(settings) => store.initialized(settings),
            Err(err) => {
                get_logger().warn(
                    LogComponent::Application("Coordinator"),
                    &format!("⚠️ settings unavailable: {}", err),
                );
                store
            }
        }
    }

    pub async fn save_settings(&self, store: SettingsStore, form: &SettingsForm) -> SettingsStore {
        let store = store.begin_save();
        let result = self.fetch_save_settings(form).await;
        Self::finish_save_settings(store, result)
    }

    pub async fn fetch_save_settings(&self, form: &SettingsForm) -> NetworkResult<SettingsState> {
        self.api.update_settings(&form.to_update()).await
    }

    pub fn finish_save_settings(store: SettingsStore, result: NetworkResult<SettingsState>) -> SettingsStore {
        match result {
            Ok(settings) => {
                get_logger().info(
                    LogComponent::Application("Coordinator"),
                    &format!("💾 settings saved ({}, {})", settings.mode, settings.lang()),
                );
                store.saved(settings)
            }
            Err(err) => {
                get_logger().error(
                    LogComponent::Application("Coordinator"),
                    &format!("❌ settings save failed: {}", err),
                );
                store.save_failed(err.user_message())
            }
        }
    }

    pub async fn fetch_movers(&self, query: MoversQuery) -> NetworkResult<MoversResponse> {
        self.api.fetch_movers(query.market, query.kind, query.count).await
    }

    pub async fn fetch_upcoming(&self, query: UpcomingQuery) -> NetworkResult<UpcomingEarningsResponse> {
        self.api.fetch_upcoming_earnings(query.market, query.days).await
    }

    pub async fn load_movers(
        &self,
        state: ListState<MoversResponse>,
        query: MoversQuery,
    ) -> ListState<MoversResponse> {
        let (state, seq) = state.begin();
        let result = self.fetch_movers(query).await;
        finish_list(state, seq, result)
    }

    pub async fn load_upcoming(
        &self,
        state: ListState<UpcomingEarningsResponse>,
        query: UpcomingQuery,
    ) -> ListState<UpcomingEarningsResponse> {
        let (state, seq) = state.begin();
        let result = self.fetch_upcoming(query).await;
        finish_list(state, seq, result)
    }
}

pub fn finish_list<T>(state: ListState<T>, seq: u64, result: NetworkResult<T>) -> ListState<T> {
    match result {
        Ok(data) => state.loaded(seq, data),
        Err(err) => {
            get_logger().log(
                LogEntry::new(
                    LogLevel::Error,
                    LogComponent::Application("Coordinator"),
                    &format!("❌ list load failed: {}", err),
                )
                .with_metadata(&format!("seq={}", seq)),
            );
            state.failed(seq, err.user_message())
        }
    }
}

fn best_effort<T>(what: &str, result: NetworkResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            get_logger().warn(
                LogComponent::Application("Coordinator"),
                &format!("⚠️ {} unavailable: {}", what, err),
            );
            None
        }
    }
}
