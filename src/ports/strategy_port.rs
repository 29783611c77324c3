//! Strategy engine port trait.
//!
//! The engine is stateful: the orchestrator resets it, hands it one
//! instrument's series, runs it, then reads the trades it produced.

use crate::domain::error::LedgerError;
use crate::domain::ohlcv::Bar;
use crate::domain::trade::Trade;

pub trait StrategyPort {
    fn reset(&mut self);

    fn set_series(&mut self, series: Vec<Bar>);

    fn run(&mut self) -> Result<(), LedgerError>;

    fn closed_trades(&self) -> &[Trade];

    fn open_trades(&self) -> &[Trade];
}
