//! Per-trade P&L after transaction costs.
//!
//! Slippage is charged as a fraction of gross profit; commission is a flat fee
//! per trade.

use super::error::LedgerError;
use super::trade::Trade;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub commission: f64,
    pub slippage_rate: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            commission: 9.99,
            slippage_rate: 0.001,
        }
    }
}

/// Capital consumed to open the trade.
pub fn entry_cost(trade: &Trade) -> f64 {
    trade.entry_price * trade.quantity as f64
}

pub fn gross_profit(trade: &Trade) -> Result<f64, LedgerError> {
    let exit_price = trade.exit_price.ok_or_else(|| open_trade(trade))?;
    Ok((exit_price - trade.entry_price) * trade.quantity as f64)
}

/// gross - gross * slippage_rate - commission
pub fn net_profit(trade: &Trade, costs: &CostModel) -> Result<f64, LedgerError> {
    let gross = gross_profit(trade)?;
    Ok(gross - gross * costs.slippage_rate - costs.commission)
}

fn open_trade(trade: &Trade) -> LedgerError {
    LedgerError::OpenTrade {
        symbol: trade.symbol.clone(),
        entry: trade.entry_date.to_string(),
    }
}
