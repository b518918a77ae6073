use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - Exchange the backend should query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum Market {
    #[default]
    #[strum(serialize = "US")]
    #[serde(rename = "US")]
    Us,

    #[strum(serialize = "HK")]
    #[serde(rename = "HK")]
    Hk,

    #[strum(serialize = "CN")]
    #[serde(rename = "CN")]
    Cn,
}

impl Market {
    pub fn currency(&self) -> &'static str {
        match self {
            Self::Us => "USD",
            Self::Hk => "HKD",
            Self::Cn => "CNY",
        }
    }

    /// i18n key of the selector label
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Us => "search.market.us",
            Self::Hk => "search.market.hk",
            Self::Cn => "search.market.cn",
        }
    }
}

/// Currency label for a raw market code; unknown codes yield `""`.
pub fn currency_label(market: &str) -> &'static str {
    market.parse::<Market>().map(|m| m.currency()).unwrap_or("")
}

/// Value Object - Ticker, trimmed and upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    /// `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

const EXCHANGE_SUFFIXES: [&str; 3] = [".HK", ".SS", ".SZ"];

/// Movers and calendars list exchange-qualified tickers (`0700.HK`, `600519.SS`);
/// the search bar wants the bare code.
pub fn strip_exchange_suffix(symbol: &str) -> &str {
    EXCHANGE_SUFFIXES
        .iter()
        .find_map(|suffix| symbol.strip_suffix(suffix))
        .unwrap_or(symbol)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MoversKind {
    #[default]
    Gainers,
    Losers,
}

/// Where the analysis model runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelMode {
    #[default]
    Local,
    Cloud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EarningsSession {
    Pre,
    Post,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_codes_round_trip_through_strum() {
        assert_eq!("HK".parse::<Market>().unwrap(), Market::Hk);
        assert_eq!(Market::Cn.as_ref(), "CN");
        assert!("hk".parse::<Market>().is_err());
    }

    #[test]
    fn symbol_is_normalized() {
        assert_eq!(Symbol::parse("  aapl ").unwrap().value(), "AAPL");
        assert!(Symbol::parse("   ").is_none());
    }

    #[test]
    fn suffixes_are_stripped() {
        assert_eq!(strip_exchange_suffix("0700.HK"), "0700");
        assert_eq!(strip_exchange_suffix("600519.SS"), "600519");
        assert_eq!(strip_exchange_suffix("000001.SZ"), "000001");
        assert_eq!(strip_exchange_suffix("AAPL"), "AAPL");
    }
}
