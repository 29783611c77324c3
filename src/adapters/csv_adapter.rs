//! CSV file price-series adapter.
//!
//! One file per symbol, `<base>/<SYMBOL>.csv`, with a header row and columns
//! `date,open,high,low,close,volume`. Dates are `YYYY-MM-DD` or
//! `YYYY-MM-DD HH:MM:SS`.

use crate::domain::error::LedgerError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::PricePort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn data_error(symbol: &str, reason: String) -> LedgerError {
    LedgerError::DataSource {
        symbol: symbol.to_string(),
        reason,
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    symbol: &str,
) -> Result<T, LedgerError>
where
    T::Err: std::fmt::Display,
{
    let raw = record
        .get(index)
        .ok_or_else(|| data_error(symbol, format!("missing {} column", name)))?;
    raw.trim()
        .parse()
        .map_err(|e| data_error(symbol, format!("invalid {} value {:?}: {}", name, raw, e)))
}

impl PricePort for CsvAdapter {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<Bar>, LedgerError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path)
            .map_err(|e| data_error(symbol, format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| data_error(symbol, format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(0)
                .ok_or_else(|| data_error(symbol, "missing date column".into()))?;
            let timestamp = parse_timestamp(date_str)
                .ok_or_else(|| data_error(symbol, format!("invalid date {:?}", date_str)))?;

            bars.push(Bar {
                symbol: symbol.to_string(),
                timestamp,
                open: parse_field(&record, 1, "open", symbol)?,
                high: parse_field(&record, 2, "high", symbol)?,
                low: parse_field(&record, 3, "low", symbol)?,
                close: parse_field(&record, 4, "close", symbol)?,
                volume: parse_field(&record, 5, "volume", symbol)?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, LedgerError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| LedgerError::DataSource {
            symbol: "*".to_string(),
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                name.strip_suffix(".csv").map(str::to_string)
            })
            .collect();

        symbols.sort();
        Ok(symbols)
    }
}
