//! Capital-constrained daily allocation.
//!
//! Each day's candidates are ranked by score (lowest first) and accepted
//! greedily while their entry cost is strictly below the capital still
//! available that day. Capital is carried between days as an explicit
//! accumulator: the next day starts with the previous day's starting capital
//! plus the realized profit of the trades accepted on it. Entry cost committed
//! during a day is not deducted from the carry.

use chrono::NaiveDate;
use tracing::debug;

use super::accounting::{entry_cost, net_profit, CostModel};
use super::day::{group_by_day, sort_by_score};
use super::error::LedgerError;
use super::trade::Trade;

/// Trades accepted on one day and their realized profit.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub trades: Vec<Trade>,
    pub profit: f64,
}

/// Audit entry for one processed day-group.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub starting_capital: f64,
    pub candidates: usize,
    pub accepted: usize,
    pub profit: f64,
}

/// Result of running the allocator over a whole ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub accepted: Vec<Trade>,
    pub carried_capital: f64,
    pub days: Vec<DayRecord>,
}

/// Select the affordable subset of one day's candidates.
///
/// `capital` is the day's starting capital; it is read, never written.
pub fn allocate_day(
    candidates: &[Trade],
    capital: f64,
    costs: &CostModel,
) -> Result<DaySummary, LedgerError> {
    let mut ranked = candidates.to_vec();
    sort_by_score(&mut ranked);

    let mut running = capital;
    let mut profit = 0.0;
    let mut trades = Vec::new();

    for trade in ranked {
        let cost = entry_cost(&trade);
        if cost < running {
            running -= cost;
            profit += net_profit(&trade, costs)?;
            trades.push(trade);
        }
    }

    Ok(DaySummary { trades, profit })
}

/// Fold the allocator over an entry-date-sorted ledger, day by day.
pub fn allocate_ledger(
    sorted: &[Trade],
    starting_capital: f64,
    costs: &CostModel,
) -> Result<Allocation, LedgerError> {
    if sorted.is_empty() {
        return Ok(Allocation {
            accepted: Vec::new(),
            carried_capital: starting_capital,
            days: Vec::new(),
        });
    }

    let mut accepted = Vec::new();
    let mut days = Vec::new();
    let mut capital = starting_capital;

    for group in group_by_day(sorted) {
        let summary = allocate_day(group, capital, costs)?;
        let record = DayRecord {
            date: group[0].entry_date.date(),
            starting_capital: capital,
            candidates: group.len(),
            accepted: summary.trades.len(),
            profit: summary.profit,
        };
        debug!(
            date = %record.date,
            capital = record.starting_capital,
            candidates = record.candidates,
            accepted = record.accepted,
            profit = record.profit,
            "allocated day"
        );

        capital += summary.profit;
        accepted.extend(summary.trades);
        days.push(record);
    }

    Ok(Allocation {
        accepted,
        carried_capital: capital,
        days,
    })
}
