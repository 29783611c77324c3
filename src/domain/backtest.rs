//! Backtest orchestration.
//!
//! Runs the strategy over every instrument in the universe, merges the closed
//! trades into one ledger sorted by entry date, filters it day by day under a
//! single shared capital figure and hands the result to the report sink.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, error, info};

use super::accounting::CostModel;
use super::allocation::{allocate_ledger, DayRecord};
use super::day::sort_by_entry_date;
use super::error::LedgerError;
use super::ohlcv::last_close;
use super::trade::Trade;
use crate::ports::data_port::PricePort;
use crate::ports::report_port::ReportPort;
use crate::ports::strategy_port::StrategyPort;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub starting_capital: f64,
    pub costs: CostModel,
    pub symbols: Vec<String>,
    pub report_name: String,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            starting_capital: 100_000.0,
            costs: CostModel::default(),
            symbols: Vec::new(),
            report_name: "report".to_string(),
        }
    }
}

/// Everything the report sink needs to value and render a run.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerReport {
    pub starting_capital: f64,
    pub costs: CostModel,
    pub filtered: Vec<Trade>,
    pub open: Vec<Trade>,
    /// Last close per symbol, for valuing open trades.
    pub marks: HashMap<String, f64>,
    pub days: Vec<DayRecord>,
}

/// An instrument dropped from the run.
#[derive(Debug)]
pub struct InstrumentFailure {
    pub symbol: String,
    pub error: LedgerError,
}

#[derive(Debug)]
pub struct BacktestOutcome {
    pub ending_capital: f64,
    /// Starting capital plus realized profit of the accepted trades.
    pub carried_capital: f64,
    pub candidates: usize,
    pub filtered: Vec<Trade>,
    pub open: Vec<Trade>,
    pub days: Vec<DayRecord>,
    pub failures: Vec<InstrumentFailure>,
}

struct InstrumentRun {
    closed: Vec<Trade>,
    open: Vec<Trade>,
    mark: Option<f64>,
}

pub struct Backtest<'a> {
    prices: &'a dyn PricePort,
    strategy: &'a mut dyn StrategyPort,
    report: &'a dyn ReportPort,
    config: BacktestConfig,
}

impl<'a> Backtest<'a> {
    pub fn new(
        prices: &'a dyn PricePort,
        strategy: &'a mut dyn StrategyPort,
        report: &'a dyn ReportPort,
        config: BacktestConfig,
    ) -> Self {
        Self {
            prices,
            strategy,
            report,
            config,
        }
    }

    pub fn run(&mut self) -> Result<BacktestOutcome, LedgerError> {
        let started = Instant::now();

        let mut ledger: Vec<Trade> = Vec::new();
        let mut open: Vec<Trade> = Vec::new();
        let mut marks = HashMap::new();
        let mut failures = Vec::new();

        for symbol in &self.config.symbols {
            match run_instrument(self.prices, &mut *self.strategy, symbol) {
                Ok(run) => {
                    info!(
                        symbol = %symbol,
                        closed = run.closed.len(),
                        open = run.open.len(),
                        "strategy run complete"
                    );
                    if let Some(mark) = run.mark {
                        marks.insert(symbol.clone(), mark);
                    }
                    ledger.extend(run.closed);
                    open = run.open;
                }
                Err(err) => {
                    error!(symbol = %symbol, error = %err, "skipping instrument");
                    failures.push(InstrumentFailure {
                        symbol: symbol.clone(),
                        error: err,
                    });
                }
            }
        }

        let candidates = ledger.len();
        sort_by_entry_date(&mut ledger);
        let allocation = allocate_ledger(&ledger, self.config.starting_capital, &self.config.costs)?;

        info!(
            candidates,
            accepted = allocation.accepted.len(),
            days = allocation.days.len(),
            "ledger filtered"
        );

        let report = LedgerReport {
            starting_capital: self.config.starting_capital,
            costs: self.config.costs,
            filtered: allocation.accepted,
            open,
            marks,
            days: allocation.days,
        };

        let ending_capital = self.report.ending_capital_and_equity(&report)?;
        debug!("Ending capital is {:12.2}", ending_capital);
        self.report.render(&report, &self.config.report_name)?;

        debug!(
            elapsed_secs = started.elapsed().as_secs_f64(),
            "backtest finished"
        );

        Ok(BacktestOutcome {
            ending_capital,
            carried_capital: allocation.carried_capital,
            candidates,
            filtered: report.filtered,
            open: report.open,
            days: report.days,
            failures,
        })
    }
}

fn run_instrument(
    prices: &dyn PricePort,
    strategy: &mut dyn StrategyPort,
    symbol: &str,
) -> Result<InstrumentRun, LedgerError> {
    let series = prices.fetch_series(symbol)?;
    if series.is_empty() {
        return Err(LedgerError::NoData {
            symbol: symbol.to_string(),
        });
    }
    let mark = last_close(&series);

    strategy.reset();
    strategy.set_series(series);
    strategy.run()?;

    let closed = strategy
        .closed_trades()
        .iter()
        .filter(|t| t.is_closed())
        .cloned()
        .collect();
    let open = strategy.open_trades().to_vec();

    Ok(InstrumentRun { closed, open, mark })
}
