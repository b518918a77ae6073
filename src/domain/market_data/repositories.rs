use crate::domain::errors::NetworkResult;
use crate::i18n::Lang;

use super::{
    AnalysisResponse, EarningsResponse, Market, MoversKind, MoversResponse, NewsResponse,
    SettingsState, SettingsUpdate, StockDailyResponse, Symbol, UpcomingEarningsResponse,
};

/// Backend operations the dashboard depends on.
///
/// Implemented over HTTP by `infrastructure::http::ApiClient`; tests plug in
/// an in-memory double.
#[allow(async_fn_in_trait)]
pub trait StockApi {
    async fn fetch_stock(&self, symbol: &Symbol, market: Market, days: u32) -> NetworkResult<StockDailyResponse>;

    async fn analyze(
        &self,
        symbol: &str,
        market: &str,
        question: Option<String>,
        language: Option<Lang>,
    ) -> NetworkResult<AnalysisResponse>;

    async fn get_settings(&self) -> NetworkResult<SettingsState>;

    async fn update_settings(&self, patch: &SettingsUpdate) -> NetworkResult<SettingsState>;

    async fn fetch_earnings(&self, symbol: &Symbol, market: Market) -> NetworkResult<EarningsResponse>;

    async fn fetch_news(&self, symbol: &Symbol, market: Market) -> NetworkResult<NewsResponse>;

    async fn fetch_movers(&self, market: Market, kind: MoversKind, count: u32) -> NetworkResult<MoversResponse>;

    async fn fetch_upcoming_earnings(&self, market: Market, days: u32) -> NetworkResult<UpcomingEarningsResponse>;
}
