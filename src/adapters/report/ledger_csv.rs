//! Trade-ledger CSV output.

use std::io::Write;

use crate::domain::accounting::{entry_cost, net_profit, CostModel};
use crate::domain::error::LedgerError;
use crate::domain::trade::Trade;

const HEADER: [&str; 10] = [
    "symbol",
    "status",
    "entry_date",
    "exit_date",
    "entry_price",
    "exit_price",
    "quantity",
    "score",
    "entry_cost",
    "net_profit",
];

fn csv_error(e: csv::Error) -> LedgerError {
    LedgerError::Report {
        reason: format!("CSV write error: {}", e),
    }
}

/// Write accepted closed trades followed by open trades. Open rows leave the
/// exit and profit columns empty.
pub fn write_ledger<W: Write>(
    writer: W,
    filtered: &[Trade],
    open: &[Trade],
    costs: &CostModel,
) -> Result<(), LedgerError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).map_err(csv_error)?;

    for trade in filtered {
        let pnl = net_profit(trade, costs)?;
        wtr.write_record(row(trade, "closed", Some(pnl)))
            .map_err(csv_error)?;
    }
    for trade in open {
        wtr.write_record(row(trade, "open", None)).map_err(csv_error)?;
    }

    wtr.flush()?;
    Ok(())
}

fn row(trade: &Trade, status: &str, pnl: Option<f64>) -> Vec<String> {
    vec![
        trade.symbol.clone(),
        status.to_string(),
        trade.entry_date.to_string(),
        trade.exit_date.map(|d| d.to_string()).unwrap_or_default(),
        format!("{:.4}", trade.entry_price),
        trade
            .exit_price
            .map(|p| format!("{:.4}", p))
            .unwrap_or_default(),
        trade.quantity.to_string(),
        format!("{:.6}", trade.score),
        format!("{:.2}", entry_cost(trade)),
        pnl.map(|p| format!("{:.2}", p)).unwrap_or_default(),
    ]
}
