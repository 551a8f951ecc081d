//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while deriving analytic series
//! - exported to JSON/CSV
//! - handed to whichever renderer (terminal tables, ASCII plots, the TUI)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single untyped spreadsheet cell.
///
/// Workbook readers produce these; they are ephemeral and discarded once the
/// row has been validated into a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// String form of the cell, the way a spreadsheet would display it.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => format!("{v}"),
        }
    }

    /// Numeric form of the cell, if it holds (or parses to) a finite number.
    pub fn as_number(&self) -> Option<f64> {
        let v = match self {
            Cell::Empty => return None,
            Cell::Number(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        if v.is_finite() { Some(v) } else { None }
    }

    /// True when the cell is absent or blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

/// One validated weekly observation of the index.
///
/// Created by the ingestion pipeline, immutable thereafter. `end_date` is the
/// later boundary of the source reporting range and serializes as
/// `YYYY-MM-DD`; `NaiveDate` ordering is equivalent to comparing those
/// strings lexically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Verbatim date-range text from the source cell.
    pub original_range: String,
    /// Canonical timestamp of the record (end of the reporting range).
    pub end_date: NaiveDate,
    /// The index value (always finite).
    pub value: f64,
}

impl Record {
    /// Calendar-month key (`YYYY-MM`) used by the monthly aggregation.
    pub fn month_key(&self) -> String {
        self.end_date.format("%Y-%m").to_string()
    }
}

/// A weekly record annotated with its trailing 52-week moving-average band.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyPoint {
    #[serde(flatten)]
    pub record: Record,
    /// Trailing mean of `value` over up to the last 52 points (self included).
    pub ma52: f64,
    /// `ma52 * 1.06`.
    pub upper_band: f64,
    /// `ma52 * 0.96`.
    pub lower_band: f64,
}

/// OHLC-style aggregation of one calendar month of weekly records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPeriod {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Value of the chronologically first record in the month.
    pub open: f64,
    /// Maximum value across the month.
    pub high: f64,
    /// Minimum value across the month.
    pub low: f64,
    /// Value of the chronologically last record in the month.
    pub close: f64,
    /// Trailing mean of `close` over up to the last 10 months (self included).
    pub ma10: f64,
}

impl MonthPeriod {
    /// `[low, high]` range for wick rendering.
    pub fn wick(&self) -> [f64; 2] {
        [self.low, self.high]
    }

    /// `[open, close]` range for candle-body rendering.
    pub fn body(&self) -> [f64; 2] {
        [self.open, self.close]
    }

    /// Month-over-month change, `(close - open) / open`, as a percentage.
    pub fn change_pct(&self) -> f64 {
        (self.close - self.open) / self.open * 100.0
    }

    /// True when the month closed at or above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}
