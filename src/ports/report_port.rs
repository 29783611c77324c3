//! Report sink port trait.

use crate::domain::backtest::LedgerReport;
use crate::domain::equity::total_capital_and_equity;
use crate::domain::error::LedgerError;

/// Port for summarising and writing backtest reports.
pub trait ReportPort {
    /// Default implementation: starting capital plus realized net profit of the
    /// filtered ledger plus open trades marked at their last close.
    fn ending_capital_and_equity(&self, report: &LedgerReport) -> Result<f64, LedgerError> {
        total_capital_and_equity(
            report.starting_capital,
            report.costs,
            &report.filtered,
            &report.open,
            &report.marks,
        )
    }

    fn render(&self, report: &LedgerReport, name: &str) -> Result<(), LedgerError>;
}
