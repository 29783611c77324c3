//! Trade statistics for a filtered ledger.

use std::collections::BTreeMap;

use super::accounting::{net_profit, CostModel};
use super::equity::EquityPoint;
use super::error::LedgerError;
use super::trade::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_return: f64,
    pub max_drawdown: f64,
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub net_profit: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub avg_trade_duration: f64,
}

impl Metrics {
    pub fn compute(
        trades: &[Trade],
        costs: &CostModel,
        starting_capital: f64,
        ending_capital: f64,
        equity_curve: &[EquityPoint],
    ) -> Result<Self, LedgerError> {
        let total_return = if starting_capital > 0.0 {
            (ending_capital - starting_capital) / starting_capital
        } else {
            0.0
        };

        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;
        let mut total_duration_days = 0i64;

        for trade in trades {
            let pnl = net_profit(trade, costs)?;
            if pnl > 0.0 {
                trades_won += 1;
                total_wins += pnl;
                largest_win = largest_win.max(pnl);
            } else if pnl < 0.0 {
                trades_lost += 1;
                total_losses += pnl.abs();
                largest_loss = largest_loss.max(pnl.abs());
            } else {
                trades_breakeven += 1;
            }
            total_duration_days += trade.holding_days().unwrap_or(0);
        }

        let total_trades = trades.len();
        let win_rate = ratio(trades_won as f64, total_trades as f64);

        let profit_factor = if total_losses > 0.0 {
            total_wins / total_losses
        } else if total_wins > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        Ok(Metrics {
            total_return,
            max_drawdown: compute_drawdown(starting_capital, equity_curve),
            total_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            profit_factor,
            net_profit: total_wins - total_losses,
            avg_win: ratio(total_wins, trades_won as f64),
            avg_loss: ratio(total_losses, trades_lost as f64),
            largest_win,
            largest_loss,
            avg_trade_duration: ratio(total_duration_days as f64, total_trades as f64),
        })
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

/// Largest peak-to-trough decline as a fraction of the peak.
fn compute_drawdown(starting_capital: f64, equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = starting_capital;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            max_dd = max_dd.max((peak - point.equity) / peak);
        }
    }

    max_dd
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolResult {
    pub symbol: String,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub net_profit: f64,
    pub win_rate: f64,
}

impl SymbolResult {
    /// Per-symbol breakdown, sorted by symbol.
    pub fn compute_per_symbol(
        trades: &[Trade],
        costs: &CostModel,
    ) -> Result<Vec<SymbolResult>, LedgerError> {
        let mut by_symbol: BTreeMap<&str, (usize, usize, f64)> = BTreeMap::new();
        for trade in trades {
            let pnl = net_profit(trade, costs)?;
            let entry = by_symbol.entry(trade.symbol.as_str()).or_default();
            entry.0 += 1;
            if pnl > 0.0 {
                entry.1 += 1;
            }
            entry.2 += pnl;
        }

        Ok(by_symbol
            .into_iter()
            .map(|(symbol, (total, won, pnl))| SymbolResult {
                symbol: symbol.to_string(),
                total_trades: total,
                winning_trades: won,
                net_profit: pnl,
                win_rate: ratio(won as f64, total as f64),
            })
            .collect())
    }
}
