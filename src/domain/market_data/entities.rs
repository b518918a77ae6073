//! Records exchanged with the statistics/analysis backend.
//!
//! Field names follow the backend's JSON (snake_case). Optional numeric
//! fields stay `Option<f64>` so a missing value renders as `-`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::value_objects::{EarningsSession, ModelMode};
use crate::i18n::Lang;

/// One trading day as sent by the backend.
///
/// Prices are coerced leniently: numbers and numeric strings are accepted,
/// anything else becomes `NaN` instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: String,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub open: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub high: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub low: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub close: f64,
    #[serde(default, deserialize_with = "lenient_volume")]
    pub volume: u64,
}

impl RawBar {
    pub fn new(date: impl Into<String>, close: f64) -> Self {
        Self { date: date.into(), open: close, high: close, low: close, close, volume: 0 }
    }
}

fn nan() -> f64 {
    f64::NAN
}

/// Numbers pass through, numeric strings are parsed, everything else is `NaN`.
pub fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// Non-string dates keep their JSON text (`null` becomes empty) and later
/// fall through the unparseable-date paths.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_volume<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let volume = coerce_f64(&value);
    // Negative and non-numeric volumes collapse to zero.
    Ok(if volume.is_finite() && volume > 0.0 { volume as u64 } else { 0 })
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockSummary {
    pub count: u32,
    pub mean_close: f64,
    pub vol_mean: f64,
    pub return_pct: f64,
    pub max_drawdown_pct: f64,
    pub volatility_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDailyResponse {
    pub symbol: String,
    pub market: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub rows: Vec<RawBar>,
    #[serde(default)]
    pub summary: StockSummary,
    #[serde(default)]
    pub company_name_en: Option<String>,
    #[serde(default)]
    pub company_name_zh: Option<String>,
}

impl StockDailyResponse {
    /// Company name in the interface language, falling back to the other one.
    pub fn company_name(&self, lang: Lang) -> Option<&str> {
        let (preferred, other) = match lang {
            Lang::En => (&self.company_name_en, &self.company_name_zh),
            Lang::Zh => (&self.company_name_zh, &self.company_name_en),
        };
        preferred.as_deref().or(other.as_deref()).filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub market: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Lang>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub symbol: String,
    pub market: String,
    #[serde(default)]
    pub summary: StockSummary,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsState {
    pub mode: ModelMode,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub local_model: Option<String>,
    #[serde(default)]
    pub language: Option<Lang>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            mode: ModelMode::Local,
            api_key: None,
            local_model: Some("llama3".to_string()),
            language: Some(Lang::En),
        }
    }
}

impl SettingsState {
    pub fn lang(&self) -> Lang {
        self.language.unwrap_or_default()
    }
}

/// Partial settings patch; absent fields are left untouched by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModelMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Lang>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsEvent {
    pub date: String,
    #[serde(default)]
    pub eps_actual: Option<f64>,
    #[serde(default)]
    pub eps_estimate: Option<f64>,
    #[serde(default)]
    pub eps_surprise: Option<f64>,
    #[serde(default)]
    pub surprise_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalystEstimates {
    #[serde(default)]
    pub next_quarter_eps_avg: Option<f64>,
    #[serde(default)]
    pub next_quarter_analysts: Option<u32>,
    #[serde(default)]
    pub next_year_eps_avg: Option<f64>,
    #[serde(default)]
    pub revenue_next_quarter_avg: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsResponse {
    pub symbol: String,
    pub market: String,
    #[serde(default)]
    pub next_earnings_date: Option<String>,
    #[serde(default)]
    pub events: Vec<EarningsEvent>,
    #[serde(default)]
    pub analyst: Option<AnalystEstimates>,
}

/// Rows shown by the earnings card before it is expanded.
pub const EARNINGS_COLLAPSED_ROWS: usize = 6;

impl EarningsResponse {
    /// Most recent events only, unless expanded.
    pub fn visible_events(&self, expanded: bool) -> &[EarningsEvent] {
        if expanded || self.events.len() <= EARNINGS_COLLAPSED_ROWS {
            &self.events
        } else {
            &self.events[self.events.len() - EARNINGS_COLLAPSED_ROWS..]
        }
    }

    pub fn is_collapsible(&self) -> bool {
        self.events.len() > EARNINGS_COLLAPSED_ROWS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub published_at: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub symbol: String,
    pub market: String,
    #[serde(default)]
    pub items: Vec<NewsItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoversItem {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub change_pct: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoversResponse {
    pub market: String,
    #[serde(default)]
    pub items: Vec<MoversItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEarningsItem {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub earnings_date: Option<String>,
    #[serde(default)]
    pub session: Option<EarningsSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEarningsResponse {
    pub market: String,
    #[serde(default)]
    pub items: Vec<UpcomingEarningsItem>,
}
