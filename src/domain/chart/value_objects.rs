use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::domain::market_data::PlotPoint;

/// Trailing window width used when a series is first shown or a stale window resets
pub const DEFAULT_WINDOW_WIDTH: usize = 120;

/// Value Object - inclusive index range of the series currently visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(fmt = "[{}..={}]", start, end)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    /// `None` unless `start <= end < len`.
    pub fn new(start: usize, end: usize, len: usize) -> Option<Self> {
        (start <= end && end < len).then_some(Self { start, end })
    }

    /// Last `min(120, len)` points. `len` must be non-zero.
    pub fn trailing(len: usize) -> Self {
        let width = DEFAULT_WINDOW_WIDTH.min(len);
        Self { start: len - width, end: len - 1 }
    }

    /// Whole series when short, trailing window otherwise.
    pub fn initial(len: usize) -> Self {
        if len <= DEFAULT_WINDOW_WIDTH {
            Self { start: 0, end: len - 1 }
        } else {
            Self::trailing(len)
        }
    }

    /// Fit a previous window onto a series of `len` points.
    ///
    /// A window that collapses (start >= end) after clamping resets to the
    /// trailing window.
    pub fn clamped(self, len: usize) -> Self {
        let end = self.end.min(len - 1);
        let start = self.start;
        if start >= end {
            Self::trailing(len)
        } else {
            Self { start, end }
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn slice<'a, T>(&self, series: &'a [T]) -> &'a [T] {
        &series[self.start..=self.end]
    }
}

/// Value Object - y-axis range, always of positive height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalDomain {
    pub min: f64,
    pub max: f64,
}

impl Default for VerticalDomain {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl VerticalDomain {
    pub fn height(&self) -> f64 {
        self.max - self.min
    }
}

/// Date label granularity of the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DateGranularity {
    /// Labels pass through untouched
    #[default]
    #[display(fmt = "identity")]
    Identity,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "year-month")]
    YearMonth,
    #[display(fmt = "month-day")]
    MonthDay,
}

impl DateGranularity {
    /// Formats a `YYYY-MM-DD` date; unparseable input is returned as is.
    pub fn format(&self, date: &str) -> String {
        let pattern = match self {
            Self::Identity => return date.to_string(),
            Self::Year => "%Y",
            Self::YearMonth => "%Y-%m",
            Self::MonthDay => "%m-%d",
        };
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(day) => day.format(pattern).to_string(),
            Err(_) => date.to_string(),
        }
    }
}

/// Value Object - x-axis label cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickPlan {
    /// Points skipped between two labelled ticks
    pub stride: usize,
    pub granularity: DateGranularity,
}

impl TickPlan {
    pub fn is_labeled(&self, index: usize) -> bool {
        index % (self.stride + 1) == 0
    }

    pub fn format(&self, date: &str) -> String {
        self.granularity.format(date)
    }

    /// `(index, label)` for every labelled point of the visible slice.
    pub fn labels(&self, visible: &[PlotPoint]) -> Vec<(usize, String)> {
        visible
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_labeled(*index))
            .map(|(index, point)| (index, self.format(&point.date)))
            .collect()
    }
}

/// Value Object - drawing surface mapped onto the visible slice
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub domain: VerticalDomain,
    pub point_count: usize,
}

impl Viewport {
    pub fn new(width: f64, height: f64, domain: VerticalDomain, point_count: usize) -> Self {
        Self { width, height, domain, point_count }
    }

    /// Points are spread edge to edge; a single point sits in the middle.
    pub fn index_to_x(&self, index: usize) -> f64 {
        if self.point_count <= 1 {
            return self.width / 2.0;
        }
        index as f64 / (self.point_count - 1) as f64 * self.width
    }

    /// Inverted: the domain maximum maps to y = 0.
    pub fn price_to_y(&self, price: f64) -> f64 {
        let range = self.domain.height();
        if range == 0.0 {
            return self.height / 2.0;
        }
        let normalized = (price - self.domain.min) / range;
        self.height * (1.0 - normalized)
    }

    /// Index of the point closest to pixel `x`, for tooltips.
    pub fn x_to_index(&self, x: f64) -> Option<usize> {
        if self.point_count == 0 {
            return None;
        }
        if self.point_count == 1 {
            return Some(0);
        }
        let step = self.width / (self.point_count - 1) as f64;
        let index = (x / step).round().clamp(0.0, (self.point_count - 1) as f64);
        Some(index as usize)
    }

    /// SVG path through the closes; non-finite closes break the line.
    pub fn line_path(&self, visible: &[PlotPoint]) -> String {
        let mut path = String::new();
        let mut pen_down = false;
        for (index, point) in visible.iter().enumerate() {
            if !point.close.is_finite() {
                pen_down = false;
                continue;
            }
            let command = if pen_down { 'L' } else { 'M' };
            if !path.is_empty() {
                path.push(' ');
            }
            path.push_str(&format!(
                "{}{:.2},{:.2}",
                command,
                self.index_to_x(index),
                self.price_to_y(point.close)
            ));
            pen_down = true;
        }
        path
    }
}
