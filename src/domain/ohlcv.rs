//! OHLCV price table for a single symbol.

use chrono::{NaiveDate, NaiveDateTime};

/// Name of the ordering column.
pub const DATE_COLUMN: &str = "Date";

/// Value columns every input table must carry.
pub const PRICE_COLUMNS: [&str; 5] = ["Open", "High", "Low", "Close", "Volume"];

/// One dated row of a price table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    /// Ordering key. Offset timestamps are normalized to UTC.
    pub timestamp: NaiveDateTime,
    /// The `Date` cell exactly as read, written back on export.
    pub raw_date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Raw text of every non-date column, aligned with [`PriceSeries::columns`].
    pub fields: Vec<String>,
}

impl PriceRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// A symbol's full history, sorted by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    /// Non-date column names in file order.
    pub columns: Vec<String>,
    pub records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(PriceRecord::date).collect()
    }

    /// Close-to-close simple returns. Pairs whose earlier close is zero are
    /// skipped, so the result holds at most `len() - 1` values.
    pub fn daily_returns(&self) -> Vec<f64> {
        self.records
            .windows(2)
            .filter(|w| w[0].close != 0.0)
            .map(|w| (w[1].close - w[0].close) / w[0].close)
            .collect()
    }
}
