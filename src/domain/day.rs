//! Calendar-day comparison, trade orderings and day partitioning.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use super::trade::Trade;

/// Compare two timestamps by calendar date only.
pub fn compare_day(a: NaiveDateTime, b: NaiveDateTime) -> Ordering {
    a.date().cmp(&b.date())
}

pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    compare_day(a, b) == Ordering::Equal
}

/// Order by entry timestamp (full precision).
pub fn by_entry_date(a: &Trade, b: &Trade) -> Ordering {
    a.entry_date.cmp(&b.entry_date)
}

/// Order by score, lowest first. NaN scores sort last.
pub fn by_score(a: &Trade, b: &Trade) -> Ordering {
    a.score.total_cmp(&b.score)
}

/// Stable sort by entry date; equal dates keep insertion order.
pub fn sort_by_entry_date(trades: &mut [Trade]) {
    trades.sort_by(by_entry_date);
}

/// Stable sort by score ascending.
pub fn sort_by_score(trades: &mut [Trade]) {
    trades.sort_by(by_score);
}

/// Split an entry-date-sorted ledger into contiguous same-day runs.
pub fn group_by_day(trades: &[Trade]) -> Vec<&[Trade]> {
    trades
        .chunk_by(|a, b| same_day(a.entry_date, b.entry_date))
        .collect()
}
