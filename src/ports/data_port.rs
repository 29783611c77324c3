//! Price-series source port trait.

use crate::domain::error::LedgerError;
use crate::domain::ohlcv::Bar;

pub trait PricePort {
    /// Full history for `symbol`, ordered by timestamp.
    fn fetch_series(&self, symbol: &str) -> Result<Vec<Bar>, LedgerError>;

    fn list_symbols(&self) -> Result<Vec<String>, LedgerError>;
}
