use chrono::NaiveDate;

use super::value_objects::{DateGranularity, TickPlan, VerticalDomain, Window};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::PlotPoint;
use crate::log_trace;

/// Owns the visible window and keeps it valid for the current series length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowManager {
    window: Option<Window>,
    len: usize,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }

    pub fn series_len(&self) -> usize {
        self.len
    }

    /// Adopt a new series length; returns whether the window changed.
    pub fn revalidate(&mut self, len: usize) -> bool {
        self.len = len;
        let next = match (len, self.window) {
            (0, _) => None,
            (_, None) => Some(Window::initial(len)),
            (_, Some(previous)) => Some(previous.clamped(len)),
        };
        if next == self.window {
            return false;
        }
        log_trace!(
            LogComponent::Domain("WindowManager"),
            "window {:?} -> {:?} for {} points",
            self.window,
            next,
            len
        );
        self.window = next;
        true
    }

    /// Adopt a user selection verbatim; invalid ranges are ignored.
    pub fn select(&mut self, start: usize, end: usize) -> bool {
        match Window::new(start, end, self.len) {
            Some(window) if Some(window) != self.window => {
                self.window = Some(window);
                true
            }
            _ => false,
        }
    }

    /// Brush controls report raw numbers; anything that is not a
    /// non-negative whole index is dropped.
    pub fn select_from_brush(&mut self, start: f64, end: f64) -> bool {
        match (as_index(start), as_index(end)) {
            (Some(start), Some(end)) => self.select(start, end),
            _ => false,
        }
    }

    pub fn visible<'a>(&self, series: &'a [PlotPoint]) -> &'a [PlotPoint] {
        match self.window {
            Some(window) if window.end < series.len() => window.slice(series),
            _ => &[],
        }
    }
}

fn as_index(value: f64) -> Option<usize> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64)
        .then_some(value as usize)
}

/// Relative padding applied above and below the visible closes
pub const DOMAIN_PADDING_RATIO: f64 = 0.05;
/// Absolute padding for a flat series sitting at zero
pub const FLAT_ZERO_PADDING: f64 = 0.5;

/// Axis scale computations for the visible slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartScaleService;

impl ChartScaleService {
    pub fn new() -> Self {
        Self
    }

    /// Non-finite closes are skipped; nothing finite yields `(0, 1)`.
    pub fn vertical_domain(&self, visible: &[PlotPoint]) -> VerticalDomain {
        let bounds = visible
            .iter()
            .map(|p| p.close)
            .filter(|close| close.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, close| match acc {
                None => Some((close, close)),
                Some((min, max)) => Some((min.min(close), max.max(close))),
            });

        let Some((min, max)) = bounds else {
            return VerticalDomain::default();
        };

        let pad = if min == max {
            if min == 0.0 { FLAT_ZERO_PADDING } else { min.abs() * DOMAIN_PADDING_RATIO }
        } else {
            (max - min) * DOMAIN_PADDING_RATIO
        };
        VerticalDomain { min: min - pad, max: max + pad }
    }

    pub fn tick_plan(&self, visible: &[PlotPoint]) -> TickPlan {
        let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
            return TickPlan::default();
        };
        TickPlan {
            stride: tick_stride(visible.len()),
            granularity: granularity_for_span(span_days(&first.date, &last.date)),
        }
    }
}

/// First matching threshold wins.
pub fn tick_stride(len: usize) -> usize {
    match len {
        0..=15 => 0,
        16..=60 => len.div_ceil(12),
        61..=120 => len.div_ceil(16),
        121..=250 => len.div_ceil(20),
        _ => len.div_ceil(25),
    }
}

pub fn granularity_for_span(days: i64) -> DateGranularity {
    if days > 800 {
        DateGranularity::Year
    } else if days > 180 {
        DateGranularity::YearMonth
    } else {
        DateGranularity::MonthDay
    }
}

/// Whole days between two `YYYY-MM-DD` dates; 0 if either does not parse.
pub fn span_days(first: &str, last: &str) -> i64 {
    let parse = |date: &str| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
    match (parse(first), parse(last)) {
        (Some(first), Some(last)) => (last - first).num_days(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(closes: &[f64]) -> Vec<PlotPoint> {
        closes
            .iter()
            .map(|&close| PlotPoint { date: "2024-01-02".to_string(), close })
            .collect()
    }

    #[test]
    fn brush_values_must_be_whole_indices() {
        let mut manager = WindowManager::new();
        manager.revalidate(10);
        assert!(!manager.select_from_brush(1.5, 4.0));
        assert!(!manager.select_from_brush(f64::NAN, 4.0));
        assert!(!manager.select_from_brush(-1.0, 4.0));
        assert!(manager.select_from_brush(2.0, 4.0));
        assert_eq!(manager.window(), Some(Window { start: 2, end: 4 }));
    }

    #[test]
    fn domain_ignores_nan_closes() {
        let domain = ChartScaleService::new().vertical_domain(&points(&[f64::NAN, 10.0, 20.0]));
        assert_eq!(domain, VerticalDomain { min: 9.5, max: 20.5 });
    }

    #[test]
    fn domain_of_all_nan_is_fallback() {
        let domain = ChartScaleService::new().vertical_domain(&points(&[f64::NAN]));
        assert_eq!(domain, VerticalDomain { min: 0.0, max: 1.0 });
    }

    #[test]
    fn flat_negative_series_pads_by_magnitude() {
        let domain = ChartScaleService::new().vertical_domain(&points(&[-20.0, -20.0]));
        assert_eq!(domain, VerticalDomain { min: -21.0, max: -19.0 });
    }

    #[test]
    fn unparseable_dates_have_zero_span() {
        assert_eq!(span_days("garbage", "2024-01-01"), 0);
        assert_eq!(span_days("2024-01-01", "2024-12-31"), 365);
    }
}
