use crate::domain::logging::LogLevel;

/// Backend used when `STOCK_API_BASE` is not set at build time
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_MS: u32 = 15_000;
/// Trading days requested per search
pub const DEFAULT_HISTORY_DAYS: u32 = 60;

/// Client-side settings, fixed at build time with builder overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u32,
    pub history_days: u32,
    pub log_level: LogLevel,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let base_url = option_env!("STOCK_API_BASE")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE);
        Self {
            base_url: base_url.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            history_days: DEFAULT_HISTORY_DAYS,
            log_level: if cfg!(debug_assertions) { LogLevel::Debug } else { LogLevel::Info },
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Absolute URL for `path`; absolute inputs pass through.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
