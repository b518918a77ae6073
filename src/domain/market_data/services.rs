use serde::{Deserialize, Serialize};

use super::entities::RawBar;

/// Fractional digits kept on plotted closes
pub const CLOSE_PRECISION: i32 = 4;

/// Close price at calendar-day precision, ready to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub date: String,
    pub close: f64,
}

/// Magnitude from which a double has no fractional digits left to round.
const ROUNDING_LIMIT: f64 = 1e15;

/// Rounds half away from zero (`f64::round`). `NaN` stays `NaN`; huge
/// magnitudes are returned as is so the scaling cannot overflow.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    if value.abs() >= ROUNDING_LIMIT || !(value.abs() * factor).is_finite() {
        return value;
    }
    (value * factor).round() / factor
}

/// First ten characters of an ISO timestamp (`YYYY-MM-DD`).
pub fn truncate_to_day(date: &str) -> &str {
    match date.char_indices().nth(10) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

/// Maps raw daily bars onto plot points; one point per bar, order preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesNormalizer;

impl SeriesNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, rows: &[RawBar]) -> Vec<PlotPoint> {
        rows.iter().map(|row| self.normalize_bar(row)).collect()
    }

    pub fn normalize_bar(&self, row: &RawBar) -> PlotPoint {
        PlotPoint {
            date: truncate_to_day(&row.date).to_string(),
            close: round_to(row.close, CLOSE_PRECISION),
        }
    }
}
