//! UI state containers.
//!
//! Each container is a plain struct; transitions consume the current state and
//! return the next one, so the view layer only ever swaps whole values.
//! Async responses carry the sequence number handed out when their request
//! started; a response whose number is no longer current is dropped.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::domain::market_data::{
    AnalysisResponse, EarningsResponse, Market, ModelMode, MoversKind, NewsResponse, SettingsState,
    SettingsUpdate, StockDailyResponse, Symbol, strip_exchange_suffix,
};
use crate::i18n::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Page {
    #[default]
    #[display(fmt = "home")]
    Home,
    #[display(fmt = "movers")]
    Movers,
    #[display(fmt = "upcoming")]
    Upcoming,
    #[display(fmt = "settings")]
    Settings,
}

impl Page {
    pub fn label_key(&self) -> &'static str {
        match self {
            Page::Home => "nav.home",
            Page::Movers => "nav.movers",
            Page::Upcoming => "nav.upcoming",
            Page::Settings => "nav.settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppState {
    pub page: Page,
}

impl AppState {
    pub fn navigate(self, page: Page) -> Self {
        Self { page }
    }
}

/// Parameters of one search, captured when it started.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub symbol: Symbol,
    pub market: Market,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    pub seq: u64,
    pub symbol: String,
    pub market: String,
    pub question: Option<String>,
}

/// What one search brings back. Earnings and news are best effort.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub data: StockDailyResponse,
    pub earnings: Option<EarningsResponse>,
    pub news: Option<NewsResponse>,
}

/// Home page: search form, loaded series and analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub symbol: String,
    pub market: Market,
    pub question: String,
    pub data: Option<StockDailyResponse>,
    pub earnings: Option<EarningsResponse>,
    pub news: Option<NewsResponse>,
    pub analysis: Option<AnalysisResponse>,
    pub searching: bool,
    pub analyzing: bool,
    pub error: Option<String>,
    search_seq: u64,
    analysis_seq: u64,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            market: Market::Us,
            question: String::new(),
            data: None,
            earnings: None,
            news: None,
            analysis: None,
            searching: false,
            analyzing: false,
            error: None,
            search_seq: 0,
            analysis_seq: 0,
        }
    }
}

impl HomeState {
    pub fn set_symbol(self, symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), ..self }
    }

    pub fn set_market(self, market: Market) -> Self {
        Self { market, ..self }
    }

    pub fn set_question(self, question: impl Into<String>) -> Self {
        Self { question: question.into(), ..self }
    }

    pub fn clear_analysis(self) -> Self {
        Self { analysis: None, ..self }
    }

    /// Pre-fill the form from a movers/calendar row (`0700.HK` -> `0700`).
    pub fn open_symbol(self, listed_symbol: &str, market: Market) -> Self {
        Self {
            symbol: strip_exchange_suffix(listed_symbol).to_string(),
            market,
            ..self
        }
    }

    pub fn is_loading(&self) -> bool {
        self.searching || self.analyzing
    }

    pub fn can_analyze(&self) -> bool {
        self.data.is_some() && !self.analyzing
    }

    /// No-op for a blank symbol. Otherwise clears the analysis, marks the
    /// search in flight and invalidates any older search or analysis.
    pub fn begin_search(self) -> (Self, Option<SearchTicket>) {
        let Some(symbol) = Symbol::parse(&self.symbol) else {
            return (self, None);
        };
        let next = Self {
            analysis: None,
            searching: true,
            analyzing: false,
            error: None,
            search_seq: self.search_seq + 1,
            analysis_seq: self.analysis_seq + 1,
            ..self
        };
        let ticket = SearchTicket { seq: next.search_seq, symbol, market: next.market };
        (next, Some(ticket))
    }

    pub fn search_succeeded(self, seq: u64, result: SearchResult) -> Self {
        if seq != self.search_seq {
            return self;
        }
        Self {
            data: Some(result.data),
            earnings: result.earnings,
            news: result.news,
            searching: false,
            error: None,
            ..self
        }
    }

    /// Previous data stays on screen.
    pub fn search_failed(self, seq: u64, error: impl Into<String>) -> Self {
        if seq != self.search_seq {
            return self;
        }
        Self { searching: false, error: Some(error.into()), ..self }
    }

    /// No-op until a series is loaded.
    pub fn begin_analysis(self) -> (Self, Option<AnalysisTicket>) {
        let Some(data) = &self.data else {
            return (self, None);
        };
        let question = Some(self.question.trim().to_string()).filter(|q| !q.is_empty());
        let ticket = AnalysisTicket {
            seq: self.analysis_seq + 1,
            symbol: data.symbol.clone(),
            market: data.market.clone(),
            question,
        };
        let next = Self { analyzing: true, error: None, analysis_seq: ticket.seq, ..self };
        (next, Some(ticket))
    }

    pub fn analysis_succeeded(self, seq: u64, analysis: AnalysisResponse) -> Self {
        if seq != self.analysis_seq {
            return self;
        }
        Self { analysis: Some(analysis), analyzing: false, ..self }
    }

    pub fn analysis_failed(self, seq: u64, error: impl Into<String>) -> Self {
        if seq != self.analysis_seq {
            return self;
        }
        Self { analyzing: false, error: Some(error.into()), ..self }
    }
}

/// Settings mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsStore {
    pub settings: SettingsState,
    pub initialized: bool,
    pub saving: bool,
    pub error: Option<String>,
}

impl SettingsStore {
    pub fn needs_init(&self) -> bool {
        !self.initialized
    }

    pub fn lang(&self) -> Lang {
        self.settings.lang()
    }

    /// A load that lands after a completed save keeps the saved values.
    pub fn initialized(self, settings: SettingsState) -> Self {
        if self.initialized {
            return self;
        }
        Self { settings, initialized: true, ..self }
    }

    pub fn begin_save(self) -> Self {
        Self { saving: true, error: None, ..self }
    }

    pub fn saved(self, settings: SettingsState) -> Self {
        Self { settings, initialized: true, saving: false, error: None }
    }

    pub fn save_failed(self, error: impl Into<String>) -> Self {
        Self { saving: false, error: Some(error.into()), ..self }
    }
}

/// Editable copy of the settings shown on the settings page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsForm {
    pub mode: ModelMode,
    pub api_key: String,
    pub local_model: String,
    pub language: Lang,
}

impl From<&SettingsState> for SettingsForm {
    fn from(settings: &SettingsState) -> Self {
        Self {
            mode: settings.mode,
            api_key: settings.api_key.clone().unwrap_or_default(),
            local_model: settings.local_model.clone().unwrap_or_default(),
            language: settings.lang(),
        }
    }
}

impl SettingsForm {
    /// Only the field relevant to the selected mode is sent.
    pub fn to_update(&self) -> SettingsUpdate {
        let non_empty = |value: &str| Some(value.trim().to_string()).filter(|v| !v.is_empty());
        SettingsUpdate {
            mode: Some(self.mode),
            api_key: match self.mode {
                ModelMode::Cloud => non_empty(&self.api_key),
                ModelMode::Local => None,
            },
            local_model: match self.mode {
                ModelMode::Local => non_empty(&self.local_model),
                ModelMode::Cloud => None,
            },
            language: Some(self.language),
        }
    }
}

/// Async-loaded table (movers, upcoming earnings).
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    seq: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self { data: None, loading: false, error: None, seq: 0 }
    }
}

impl<T> ListState<T> {
    pub fn begin(self) -> (Self, u64) {
        let seq = self.seq + 1;
        (Self { loading: true, error: None, seq, ..self }, seq)
    }

    pub fn loaded(self, seq: u64, data: T) -> Self {
        if seq != self.seq {
            return self;
        }
        Self { data: Some(data), loading: false, error: None, ..self }
    }

    pub fn failed(self, seq: u64, error: impl Into<String>) -> Self {
        if seq != self.seq {
            return self;
        }
        Self { loading: false, error: Some(error.into()), ..self }
    }
}

/// Selectable movers row counts
pub const MOVERS_COUNTS: [u32; 2] = [10, 20];
/// Selectable upcoming-earnings horizons, in days
pub const UPCOMING_DAYS: [u32; 3] = [7, 14, 30];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoversQuery {
    pub market: Market,
    pub kind: MoversKind,
    pub count: u32,
}

impl Default for MoversQuery {
    fn default() -> Self {
        Self { market: Market::Us, kind: MoversKind::Gainers, count: MOVERS_COUNTS[0] }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingQuery {
    pub market: Market,
    pub days: u32,
}

impl Default for UpcomingQuery {
    fn default() -> Self {
        Self { market: Market::Us, days: UPCOMING_DAYS[1] }
    }
}
