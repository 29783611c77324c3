#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ledgertrader::domain::accounting::CostModel;
use ledgertrader::domain::backtest::{BacktestConfig, LedgerReport};
use ledgertrader::domain::error::LedgerError;
pub use ledgertrader::domain::ohlcv::Bar;
pub use ledgertrader::domain::trade::Trade;
use ledgertrader::ports::data_port::PricePort;
use ledgertrader::ports::report_port::ReportPort;
use ledgertrader::ports::strategy_port::StrategyPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<Bar>, LedgerError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(LedgerError::DataSource {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, LedgerError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

/// Strategy that replays preset trades for whichever symbol it is given.
#[derive(Default)]
pub struct ScriptedStrategy {
    pub closed_by_symbol: HashMap<String, Vec<Trade>>,
    pub open_by_symbol: HashMap<String, Vec<Trade>>,
    pub failing: Vec<String>,
    current: Option<String>,
    closed: Vec<Trade>,
    open: Vec<Trade>,
    pub resets: usize,
}

impl ScriptedStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closed(mut self, symbol: &str, trades: Vec<Trade>) -> Self {
        self.closed_by_symbol.insert(symbol.to_string(), trades);
        self
    }

    pub fn with_open(mut self, symbol: &str, trades: Vec<Trade>) -> Self {
        self.open_by_symbol.insert(symbol.to_string(), trades);
        self
    }

    pub fn failing_on(mut self, symbol: &str) -> Self {
        self.failing.push(symbol.to_string());
        self
    }
}

impl StrategyPort for ScriptedStrategy {
    fn reset(&mut self) {
        self.resets += 1;
        self.current = None;
        self.closed.clear();
        self.open.clear();
    }

    fn set_series(&mut self, series: Vec<Bar>) {
        self.current = series.first().map(|b| b.symbol.clone());
    }

    fn run(&mut self) -> Result<(), LedgerError> {
        let symbol = self.current.clone().unwrap_or_default();
        if self.failing.contains(&symbol) {
            return Err(LedgerError::Strategy {
                symbol,
                reason: "scripted failure".into(),
            });
        }
        self.closed = self.closed_by_symbol.get(&symbol).cloned().unwrap_or_default();
        self.open = self.open_by_symbol.get(&symbol).cloned().unwrap_or_default();
        Ok(())
    }

    fn closed_trades(&self) -> &[Trade] {
        &self.closed
    }

    fn open_trades(&self) -> &[Trade] {
        &self.open
    }
}

/// Report sink that keeps what it was given instead of writing files.
#[derive(Default)]
pub struct RecordingReport {
    pub rendered: RefCell<Vec<(String, LedgerReport)>>,
}

impl ReportPort for RecordingReport {
    fn render(&self, report: &LedgerReport, name: &str) -> Result<(), LedgerError> {
        self.rendered
            .borrow_mut()
            .push((name.to_string(), report.clone()));
        Ok(())
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// A single bar so the orchestrator has a non-empty series and a mark price.
pub fn one_bar(symbol: &str, close: f64) -> Vec<Bar> {
    vec![Bar {
        symbol: symbol.to_string(),
        timestamp: at(2024, 1, 1, 0),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1000,
    }]
}

/// Closed trade costing `price * quantity` that exits at `exit`.
pub fn closed_trade(
    symbol: &str,
    entry: NaiveDateTime,
    price: f64,
    quantity: u64,
    exit: f64,
    score: f64,
) -> Trade {
    Trade::open(symbol, entry, price, quantity, score).closed_at(entry + chrono::Duration::days(1), exit)
}

pub fn free_costs() -> CostModel {
    CostModel {
        commission: 0.0,
        slippage_rate: 0.0,
    }
}

pub fn config(symbols: &[&str], capital: f64, costs: CostModel) -> BacktestConfig {
    BacktestConfig {
        starting_capital: capital,
        costs,
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        report_name: "test".to_string(),
    }
}

pub fn generate_bars(symbol: &str, start: NaiveDate, closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            symbol: symbol.to_string(),
            timestamp: (start + chrono::Duration::days(i as i64))
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        })
        .collect()
}

pub fn symbols(trades: &[Trade]) -> Vec<&str> {
    trades.iter().map(|t| t.symbol.as_str()).collect()
}
