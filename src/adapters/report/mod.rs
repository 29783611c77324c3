//! File report adapter implementing ReportPort.
//!
//! `render` writes three artifacts next to each other in the output directory:
//! `<name>.csv` (ledger), `<name>.svg` (equity curve) and `<name>.txt`
//! (summary statistics).

pub mod chart_svg;
pub mod ledger_csv;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use tracing::info;

use crate::domain::backtest::LedgerReport;
use crate::domain::equity::equity_curve;
use crate::domain::error::LedgerError;
use crate::domain::metrics::{Metrics, SymbolResult};
use crate::ports::report_port::ReportPort;

pub struct FileReportAdapter {
    output_dir: PathBuf,
}

impl FileReportAdapter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn artifact_path(&self, name: &str, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", name, extension))
    }
}

impl ReportPort for FileReportAdapter {
    fn render(&self, report: &LedgerReport, name: &str) -> Result<(), LedgerError> {
        fs::create_dir_all(&self.output_dir)?;

        let ending_capital = self.ending_capital_and_equity(report)?;
        let curve = equity_curve(&report.days);

        let csv_path = self.artifact_path(name, "csv");
        let file = BufWriter::new(File::create(&csv_path)?);
        ledger_csv::write_ledger(file, &report.filtered, &report.open, &report.costs)?;

        let svg_path = self.artifact_path(name, "svg");
        fs::write(&svg_path, chart_svg::equity_svg(report.starting_capital, &curve))?;

        let metrics = Metrics::compute(
            &report.filtered,
            &report.costs,
            report.starting_capital,
            ending_capital,
            &curve,
        )?;
        let symbols = SymbolResult::compute_per_symbol(&report.filtered, &report.costs)?;
        let txt_path = self.artifact_path(name, "txt");
        fs::write(
            &txt_path,
            format_summary(report, &metrics, &symbols, ending_capital),
        )?;

        info!(
            ledger = %csv_path.display(),
            chart = %svg_path.display(),
            summary = %txt_path.display(),
            "report written"
        );
        Ok(())
    }
}

pub fn format_summary(
    report: &LedgerReport,
    metrics: &Metrics,
    symbols: &[SymbolResult],
    ending_capital: f64,
) -> String {
    let mut output = String::from("=== Backtest Summary ===\n");
    output.push_str(&format!("Starting Capital: {:>14.2}\n", report.starting_capital));
    output.push_str(&format!("Ending Capital:   {:>14.2}\n", ending_capital));
    output.push_str(&format!("Commission:       {:>14.2}\n", report.costs.commission));
    output.push_str(&format!("Slippage Rate:    {:>14.4}\n", report.costs.slippage_rate));
    output.push_str(&format!("Total Return:     {:>13.2}%\n", metrics.total_return * 100.0));
    output.push_str(&format!("Max Drawdown:     {:>13.2}%\n", metrics.max_drawdown * 100.0));
    output.push_str(&format!("Trading Days:     {:>14}\n", report.days.len()));
    output.push_str(&format!("Accepted Trades:  {:>14}\n", metrics.total_trades));
    output.push_str(&format!("Open Trades:      {:>14}\n", report.open.len()));
    output.push_str(&format!("Win Rate:         {:>13.1}%\n", metrics.win_rate * 100.0));
    output.push_str(&format!("Profit Factor:    {:>14.2}\n", metrics.profit_factor));
    output.push_str(&format!("Net Profit:       {:>14.2}\n", metrics.net_profit));
    output.push_str(&format!("Largest Win:      {:>14.2}\n", metrics.largest_win));
    output.push_str(&format!("Largest Loss:     {:>14.2}\n", metrics.largest_loss));
    output.push_str(&format!("Avg Hold (days):  {:>14.1}\n", metrics.avg_trade_duration));

    if !symbols.is_empty() {
        output.push_str(&render_symbol_section(symbols));
    }
    output
}

fn render_symbol_section(symbols: &[SymbolResult]) -> String {
    let mut output = String::from("\n=== Per-Symbol Summary ===\n");
    for s in symbols {
        output.push_str(&format!(
            "  {}: {} trades, {:.1}% win rate, {:+.2}\n",
            s.symbol,
            s.total_trades,
            s.win_rate * 100.0,
            s.net_profit
        ));
    }
    output
}
