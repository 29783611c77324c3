//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::report::FileReportAdapter;
use crate::domain::accounting::CostModel;
use crate::domain::backtest::{Backtest, BacktestConfig, BacktestOutcome};
use crate::domain::config_validation::{
    validate_backtest_config, validate_backtest_values, validate_strategy_config,
};
use crate::domain::error::LedgerError;
use crate::domain::strategy::{SmaCrossover, SmaCrossoverParams};
use crate::domain::universe::parse_symbols;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PricePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "ledgertrader", about = "Capital-constrained multi-instrument backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated symbols, overriding [backtest] symbols
        #[arg(long)]
        symbols: Option<String>,
        /// Report name, overriding [backtest] report_name
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate a configuration file without running
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest {
            config,
            symbols,
            output,
        } => run_backtest(&config, symbols.as_deref(), output.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, LedgerError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// Resolve a configured directory relative to the config file's location.
pub fn resolve_dir(config: &dyn ConfigPort, config_path: &Path, section: &str, default: &str) -> PathBuf {
    let dir = config
        .get_nonempty(section, "directory")
        .unwrap_or_else(|| default.to_string());
    let dir = PathBuf::from(dir);
    if dir.is_absolute() {
        return dir;
    }
    config_path
        .parent()
        .map(|base| base.join(&dir))
        .unwrap_or(dir)
}

pub fn resolve_symbols(
    symbols_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, LedgerError> {
    let raw = match symbols_override {
        Some(s) => s.to_string(),
        None => config
            .get_nonempty("backtest", "symbols")
            .ok_or_else(|| LedgerError::ConfigMissing {
                section: "backtest".into(),
                key: "symbols".into(),
            })?,
    };
    parse_symbols(&raw).map_err(|e| LedgerError::ConfigInvalid {
        section: "backtest".into(),
        key: "symbols".into(),
        reason: e.to_string(),
    })
}

pub fn build_backtest_config(
    config: &dyn ConfigPort,
    symbols_override: Option<&str>,
    name_override: Option<&str>,
) -> Result<BacktestConfig, LedgerError> {
    let defaults = BacktestConfig::default();
    let report_name = name_override
        .map(str::to_string)
        .or_else(|| config.get_nonempty("backtest", "report_name"))
        .unwrap_or(defaults.report_name);

    Ok(BacktestConfig {
        starting_capital: config.get_double(
            "backtest",
            "starting_capital",
            defaults.starting_capital,
        ),
        costs: CostModel {
            commission: config.get_double("backtest", "commission", defaults.costs.commission),
            slippage_rate: config.get_double(
                "backtest",
                "slippage",
                defaults.costs.slippage_rate,
            ),
        },
        symbols: resolve_symbols(symbols_override, config)?,
        report_name,
    })
}

pub fn build_strategy_params(config: &dyn ConfigPort) -> SmaCrossoverParams {
    let defaults = SmaCrossoverParams::default();
    SmaCrossoverParams {
        fast_period: config.get_int("strategy", "fast_period", defaults.fast_period as i64).max(0)
            as usize,
        slow_period: config.get_int("strategy", "slow_period", defaults.slow_period as i64).max(0)
            as usize,
        position_value: config.get_double("strategy", "position_value", defaults.position_value),
    }
}

pub fn run_backtest_pipeline(
    prices: &dyn PricePort,
    params: SmaCrossoverParams,
    report: &dyn ReportPort,
    bt_config: BacktestConfig,
) -> Result<BacktestOutcome, LedgerError> {
    info!(
        symbols = bt_config.symbols.len(),
        capital = bt_config.starting_capital,
        "Running backtest"
    );
    let mut strategy = SmaCrossover::new(params);
    Backtest::new(prices, &mut strategy, report, bt_config).run()
}

fn run_backtest(
    config_path: &Path,
    symbols_override: Option<&str>,
    name_override: Option<&str>,
) -> Result<(), LedgerError> {
    let config = load_config(config_path)?;
    if symbols_override.is_some() {
        validate_backtest_values(&config)?;
    } else {
        validate_backtest_config(&config)?;
    }
    validate_strategy_config(&config)?;

    let bt_config = build_backtest_config(&config, symbols_override, name_override)?;
    let params = build_strategy_params(&config);
    let prices = CsvAdapter::new(resolve_dir(&config, config_path, "data", "data"));
    let report = FileReportAdapter::new(resolve_dir(&config, config_path, "report", "."));
    let report_name = bt_config.report_name.clone();

    let outcome = run_backtest_pipeline(&prices, params, &report, bt_config)?;

    for failure in &outcome.failures {
        warn!("skipped {} ({})", failure.symbol, failure.error);
    }
    print_outcome(&outcome);
    eprintln!(
        "\nReport written to: {}",
        report.artifact_path(&report_name, "txt").display()
    );
    Ok(())
}

fn print_outcome(outcome: &BacktestOutcome) {
    eprintln!("\n=== Backtest Results ===");
    eprintln!("Candidate Trades: {}", outcome.candidates);
    eprintln!("Accepted Trades:  {}", outcome.filtered.len());
    eprintln!("Open Trades:      {}", outcome.open.len());
    eprintln!("Trading Days:     {}", outcome.days.len());
    eprintln!("Skipped Symbols:  {}", outcome.failures.len());
    eprintln!("Carried Capital:  {:.2}", outcome.carried_capital);
    eprintln!("Ending Capital:   {:.2}", outcome.ending_capital);
}

fn run_validate(config_path: &Path) -> Result<(), LedgerError> {
    let config = load_config(config_path)?;
    validate_backtest_config(&config)?;
    validate_strategy_config(&config)?;

    let bt_config = build_backtest_config(&config, None, None)?;
    let params = build_strategy_params(&config);

    eprintln!("Universe:         {}", bt_config.symbols.join(", "));
    eprintln!("Starting Capital: {:.2}", bt_config.starting_capital);
    eprintln!("Commission:       {:.2}", bt_config.costs.commission);
    eprintln!("Slippage Rate:    {}", bt_config.costs.slippage_rate);
    eprintln!("Report Name:      {}", bt_config.report_name);
    eprintln!(
        "Strategy:         SMA({}) x SMA({}), {:.2} per entry",
        params.fast_period, params.slow_period, params.position_value
    );
    eprintln!(
        "Data Directory:   {}",
        resolve_dir(&config, config_path, "data", "data").display()
    );
    eprintln!("\nConfiguration is valid.");
    Ok(())
}

fn run_list_symbols(config_path: &Path) -> Result<(), LedgerError> {
    let config = load_config(config_path)?;
    let prices = CsvAdapter::new(resolve_dir(&config, config_path, "data", "data"));
    let symbols = prices.list_symbols()?;

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    Ok(())
}
