//! Configuration validation.
//!
//! Checks every field before a backtest runs so a bad value fails up front
//! instead of part way through the universe.

use crate::domain::error::LedgerError;
use crate::domain::universe::parse_symbols;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), LedgerError> {
    validate_backtest_values(config)?;
    validate_symbols(config)?;
    Ok(())
}

/// Capital and cost checks only; used when the universe comes from elsewhere.
pub fn validate_backtest_values(config: &dyn ConfigPort) -> Result<(), LedgerError> {
    validate_starting_capital(config)?;
    validate_commission(config)?;
    validate_slippage(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), LedgerError> {
    let fast = config.get_int("strategy", "fast_period", 10);
    let slow = config.get_int("strategy", "slow_period", 30);
    if fast <= 0 {
        return Err(invalid("strategy", "fast_period", "fast_period must be positive"));
    }
    if slow <= fast {
        return Err(invalid(
            "strategy",
            "slow_period",
            "slow_period must be greater than fast_period",
        ));
    }
    let position_value = config.get_double("strategy", "position_value", 10_000.0);
    if position_value.is_nan() || position_value <= 0.0 {
        return Err(invalid(
            "strategy",
            "position_value",
            "position_value must be positive",
        ));
    }
    Ok(())
}

fn validate_starting_capital(config: &dyn ConfigPort) -> Result<(), LedgerError> {
    let value = config.get_double("backtest", "starting_capital", 100_000.0);
    if value.is_nan() || value <= 0.0 {
        return Err(invalid(
            "backtest",
            "starting_capital",
            "starting_capital must be positive",
        ));
    }
    Ok(())
}

fn validate_commission(config: &dyn ConfigPort) -> Result<(), LedgerError> {
    let value = config.get_double("backtest", "commission", 9.99);
    if value.is_nan() || value < 0.0 {
        return Err(invalid(
            "backtest",
            "commission",
            "commission must be non-negative",
        ));
    }
    Ok(())
}

fn validate_slippage(config: &dyn ConfigPort) -> Result<(), LedgerError> {
    let value = config.get_double("backtest", "slippage", 0.001);
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(
            "backtest",
            "slippage",
            "slippage must be a fraction between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), LedgerError> {
    let raw = config
        .get_nonempty("backtest", "symbols")
        .ok_or_else(|| LedgerError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbols".to_string(),
        })?;
    parse_symbols(&raw).map_err(|e| invalid("backtest", "symbols", &e.to_string()))?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> LedgerError {
    LedgerError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
