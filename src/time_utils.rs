//! Label formatting for axes, tooltips and statistic cards.

use chrono::{DateTime, NaiveDateTime};

use crate::domain::market_data::StockSummary;

/// Price label whose precision adapts to magnitude.
///
/// - `|v| >= 1000` -> grouped thousands, at most 2 decimals (`12,345.6`)
/// - `|v| >= 1` -> 2 decimals
/// - otherwise -> 4 decimals
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let abs = value.abs();
    if abs >= 1000.0 {
        format_grouped(value, 2)
    } else if abs >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.4}", value)
    }
}

/// Thousands separators with up to `max_fraction` decimals, trailing zeros trimmed.
pub fn format_grouped(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Statistic value; `-` when missing.
pub fn format_number(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if v.abs() >= 1000.0 {
                format_grouped(v, digits)
            } else {
                format!("{:.*}", digits, v)
            }
        }
        _ => "-".to_string(),
    }
}

pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => "-".to_string(),
    }
}

/// News timestamps: RFC 3339 or naive ISO to `YYYY-MM-DD HH:MM`; anything else unchanged.
pub fn format_news_time(published_at: &str) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M";
    if let Ok(ts) = DateTime::parse_from_rfc3339(published_at) {
        return ts.format(OUT).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(published_at, "%Y-%m-%dT%H:%M:%S") {
        return ts.format(OUT).to_string();
    }
    published_at.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricTone {
    Positive,
    Negative,
    Neutral,
}

impl MetricTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            MetricTone::Positive => "tone-pos",
            MetricTone::Negative => "tone-neg",
            MetricTone::Neutral => "tone-neutral",
        }
    }

    /// Price change colouring for tables.
    pub fn of_change(change: Option<f64>) -> Self {
        if change.unwrap_or(0.0) >= 0.0 { MetricTone::Positive } else { MetricTone::Negative }
    }
}

/// (return, drawdown, volatility) tones for the statistics card
pub fn summary_tones(summary: &StockSummary) -> (MetricTone, MetricTone, MetricTone) {
    let ret = if summary.return_pct >= 0.0 { MetricTone::Positive } else { MetricTone::Negative };
    let drawdown = if summary.max_drawdown_pct <= -10.0 { MetricTone::Negative } else { MetricTone::Neutral };
    let volatility = if summary.volatility_pct > 5.0 { MetricTone::Negative } else { MetricTone::Neutral };
    (ret, drawdown, volatility)
}
