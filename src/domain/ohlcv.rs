//! Price bar representation.

use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Bar {
    /// Calendar date of the bar, time-of-day dropped.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Last close of a series, used to mark open trades.
pub fn last_close(bars: &[Bar]) -> Option<f64> {
    bars.last().map(|b| b.close)
}
