use futures::future::{Either, select};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{
    errors::{AppError, NetworkResult},
    logging::{LogComponent, get_logger},
    market_data::{
        AnalysisRequest, AnalysisResponse, EarningsResponse, Market, MoversKind, MoversResponse,
        NewsResponse, SettingsState, SettingsUpdate, StockApi, StockDailyResponse, Symbol,
        UpcomingEarningsResponse,
    },
};
use crate::i18n::Lang;

use super::config::ApiConfig;

/// JSON-over-HTTP client built on gloo, with a per-request timeout.
#[derive(Debug, Clone)]
pub struct GlooHttpClient {
    config: ApiConfig,
    default_headers: Vec<(&'static str, &'static str)>,
}

impl GlooHttpClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            default_headers: vec![("Accept", "application/json")],
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn with_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }
        request
    }

    /// GET request for `endpoint`; gloo encodes the query pairs in order.
    pub fn get_request(&self, endpoint: &str, query: &[(&str, String)]) -> RequestBuilder {
        let url = self.config.endpoint(endpoint);
        let request = self.with_headers(Request::get(&url));
        if query.is_empty() {
            return request;
        }
        request.query(query.iter().map(|(key, value)| (*key, value.as_str())))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> NetworkResult<T> {
        let url = self.config.endpoint(endpoint);
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 GET {} {:?}", url, query));

        let request = self.get_request(endpoint, query);
        let response = self.with_timeout(request.send()).await?;
        self.read_json(&url, response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, endpoint: &str, body: &B) -> NetworkResult<T> {
        let url = self.config.endpoint(endpoint);
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 POST {}", url));

        let request = self
            .with_headers(Request::post(&url))
            .json(body)
            .map_err(|e| AppError::DecodeError(format!("Failed to encode body: {}", e)))?;
        let response = self.with_timeout(request.send()).await?;
        self.read_json(&url, response).await
    }

    async fn with_timeout<F>(&self, request: F) -> NetworkResult<Response>
    where
        F: Future<Output = Result<Response, gloo_net::Error>>,
    {
        let timeout = TimeoutFuture::new(self.config.timeout_ms);
        match select(Box::pin(request), Box::pin(timeout)).await {
            Either::Left((result, _)) => result.map_err(|e| AppError::NetworkError(e.to_string())),
            Either::Right(_) => Err(AppError::Timeout(self.config.timeout_ms)),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, url: &str, response: Response) -> NetworkResult<T> {
        let status = response.status();
        if !HttpUtils::is_success_status(status) {
            let status_text = response.status_text();
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body).unwrap_or(status_text);
            get_logger().error(
                LogComponent::Infrastructure("HTTP"),
                &format!("❌ {} -> {} {}", url, status, detail),
            );
            return Err(AppError::HttpStatus { status, detail });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to read response: {}", e)))?;
        get_logger().debug(
            LogComponent::Infrastructure("HTTP"),
            &format!("✅ {} ({} bytes)", url, text.len()),
        );
        Ok(serde_json::from_str(&text)?)
    }
}

/// Backend error message from a FastAPI-style `{"detail": ...}` body.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Typed access to the dashboard backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: GlooHttpClient,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { http: GlooHttpClient::new(config) }
    }

    pub fn config(&self) -> &ApiConfig {
        self.http.config()
    }
}

impl StockApi for ApiClient {
    async fn fetch_stock(&self, symbol: &Symbol, market: Market, days: u32) -> NetworkResult<StockDailyResponse> {
        let path = format!("stocks/{}", HttpUtils::url_encode(symbol.value()));
        let query = [("market", market.as_ref().to_string()), ("days", days.to_string())];
        let data: StockDailyResponse = self.http.get_json(&path, &query).await?;
        get_logger().info(
            LogComponent::Infrastructure("ApiClient"),
            &format!("📊 {} {}: {} rows {}..{}", data.symbol, data.market, data.rows.len(), data.start, data.end),
        );
        Ok(data)
    }

    async fn analyze(
        &self,
        symbol: &str,
        market: &str,
        question: Option<String>,
        language: Option<Lang>,
    ) -> NetworkResult<AnalysisResponse> {
        let body = AnalysisRequest {
            symbol: symbol.to_string(),
            market: market.to_string(),
            question,
            language,
        };
        self.http.post_json("analysis", &body).await
    }

    async fn get_settings(&self) -> NetworkResult<SettingsState> {
        self.http.get_json("settings", &[]).await
    }

    async fn update_settings(&self, patch: &SettingsUpdate) -> NetworkResult<SettingsState> {
        self.http.post_json("settings", patch).await
    }

    async fn fetch_earnings(&self, symbol: &Symbol, market: Market) -> NetworkResult<EarningsResponse> {
        let path = format!("stocks/{}/earnings", HttpUtils::url_encode(symbol.value()));
        self.http.get_json(&path, &[("market", market.as_ref().to_string())]).await
    }

    async fn fetch_news(&self, symbol: &Symbol, market: Market) -> NetworkResult<NewsResponse> {
        let path = format!("stocks/{}/news", HttpUtils::url_encode(symbol.value()));
        self.http.get_json(&path, &[("market", market.as_ref().to_string())]).await
    }

    async fn fetch_movers(&self, market: Market, kind: MoversKind, count: u32) -> NetworkResult<MoversResponse> {
        let query = [
            ("market", market.as_ref().to_string()),
            ("type", kind.as_ref().to_string()),
            ("count", count.to_string()),
        ];
        self.http.get_json("market/movers", &query).await
    }

    async fn fetch_upcoming_earnings(&self, market: Market, days: u32) -> NetworkResult<UpcomingEarningsResponse> {
        let query = [("market", market.as_ref().to_string()), ("days", days.to_string())];
        self.http.get_json("market/upcoming-earnings", &query).await
    }
}

/// URL helpers
pub struct HttpUtils;

impl HttpUtils {
    pub fn is_success_status(status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Percent-encodes a path segment: everything outside the RFC 3986 unreserved set.
    pub fn url_encode(input: &str) -> String {
        let mut encoded = String::with_capacity(input.len());
        for byte in input.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => encoded.push(byte as char),
                _ => encoded.push_str(&format!("%{:02X}", byte)),
            }
        }
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encoding() {
        assert_eq!(HttpUtils::url_encode("hello world"), "hello%20world");
        assert_eq!(HttpUtils::url_encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(HttpUtils::url_encode("0700.HK"), "0700.HK");
        assert_eq!(HttpUtils::url_encode("腾"), "%E8%85%BE");
    }

    #[test]
    fn detail_is_extracted_from_error_bodies() {
        assert_eq!(error_detail(r#"{"detail":"No data"}"#), Some("No data".to_string()));
        assert_eq!(error_detail(r#"{"detail":[{"msg":"bad"}]}"#), Some(r#"[{"msg":"bad"}]"#.to_string()));
        assert_eq!(error_detail("<html>502</html>"), None);
        assert_eq!(error_detail(r#"{"error":"x"}"#), None);
    }

    #[test]
    fn success_statuses() {
        assert!(HttpUtils::is_success_status(204));
        assert!(!HttpUtils::is_success_status(404));
    }
}
