//! Core domain types and logic.

pub mod accounting;
pub mod allocation;
pub mod backtest;
pub mod config_validation;
pub mod day;
pub mod equity;
pub mod error;
pub mod metrics;
pub mod ohlcv;
pub mod strategy;
pub mod trade;
pub mod universe;
