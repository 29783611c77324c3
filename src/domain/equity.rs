//! Ending capital and equity curve for a filtered ledger.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::accounting::{net_profit, CostModel};
use super::allocation::DayRecord;
use super::error::LedgerError;
use super::trade::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Accumulates realized and unrealized results on top of starting capital.
#[derive(Debug, Clone)]
pub struct EquityCalculator {
    capital: f64,
    unrealized: f64,
    costs: CostModel,
}

impl EquityCalculator {
    pub fn new(capital: f64, costs: CostModel) -> Self {
        Self {
            capital,
            unrealized: 0.0,
            costs,
        }
    }

    pub fn process_closed(&mut self, trade: &Trade) -> Result<(), LedgerError> {
        self.capital += net_profit(trade, &self.costs)?;
        Ok(())
    }

    /// Mark an open trade at `mark`. The entry commission is already paid.
    pub fn process_open(&mut self, trade: &Trade, mark: Option<f64>) {
        if let Some(price) = mark {
            self.unrealized +=
                (price - trade.entry_price) * trade.quantity as f64 - self.costs.commission;
        }
    }

    pub fn finish(self) -> f64 {
        self.capital + self.unrealized
    }
}

/// Capital plus equity for closed and marked open trades.
pub fn total_capital_and_equity(
    capital: f64,
    costs: CostModel,
    closed: &[Trade],
    open: &[Trade],
    marks: &HashMap<String, f64>,
) -> Result<f64, LedgerError> {
    let mut calculator = EquityCalculator::new(capital, costs);
    for trade in closed {
        calculator.process_closed(trade)?;
    }
    for trade in open {
        calculator.process_open(trade, marks.get(&trade.symbol).copied());
    }
    Ok(calculator.finish())
}

/// One point per allocated day: capital at the end of that day.
pub fn equity_curve(days: &[DayRecord]) -> Vec<EquityPoint> {
    days.iter()
        .map(|d| EquityPoint {
            date: d.date,
            equity: d.starting_capital + d.profit,
        })
        .collect()
}
