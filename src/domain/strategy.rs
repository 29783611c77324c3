//! Moving-average crossover strategy engine.
//!
//! Long-only: enters at the close of the bar where the fast SMA crosses above
//! the slow SMA, exits at the close of the bar where it crosses back below.
//! The entry score is the relative spread `(fast - slow) / slow` at entry.

use super::error::LedgerError;
use super::ohlcv::Bar;
use super::trade::Trade;
use crate::ports::strategy_port::StrategyPort;

/// Simple moving average of closes. Warmup: first (period-1) values are `None`.
pub fn calculate_sma(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; bars.len()];
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= period {
            sum -= bars[i - period].close;
        }
        if i + 1 >= period {
            values.push(Some(sum / period as f64));
        } else {
            values.push(None);
        }
    }

    values
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmaCrossoverParams {
    pub fast_period: usize,
    pub slow_period: usize,
    /// Currency amount committed per entry.
    pub position_value: f64,
}

impl Default for SmaCrossoverParams {
    fn default() -> Self {
        SmaCrossoverParams {
            fast_period: 10,
            slow_period: 30,
            position_value: 10_000.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmaCrossover {
    params: SmaCrossoverParams,
    series: Vec<Bar>,
    closed: Vec<Trade>,
    open: Vec<Trade>,
}

impl SmaCrossover {
    pub fn new(params: SmaCrossoverParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    fn symbol(&self) -> String {
        self.series
            .first()
            .map(|b| b.symbol.clone())
            .unwrap_or_default()
    }

    fn quantity_for(&self, price: f64) -> u64 {
        if price <= 0.0 {
            return 1;
        }
        ((self.params.position_value / price).floor() as u64).max(1)
    }
}

impl StrategyPort for SmaCrossover {
    fn reset(&mut self) {
        self.series.clear();
        self.closed.clear();
        self.open.clear();
    }

    fn set_series(&mut self, series: Vec<Bar>) {
        self.series = series;
    }

    fn run(&mut self) -> Result<(), LedgerError> {
        let SmaCrossoverParams {
            fast_period,
            slow_period,
            ..
        } = self.params;

        if fast_period == 0 || fast_period >= slow_period {
            return Err(LedgerError::Strategy {
                symbol: self.symbol(),
                reason: format!("fast period {fast_period} must be below slow period {slow_period}"),
            });
        }
        if self.series.len() < slow_period {
            return Err(LedgerError::Strategy {
                symbol: self.symbol(),
                reason: format!(
                    "only {} bars, need at least {}",
                    self.series.len(),
                    slow_period
                ),
            });
        }

        let fast = calculate_sma(&self.series, fast_period);
        let slow = calculate_sma(&self.series, slow_period);
        let mut holding: Option<Trade> = None;

        for i in 1..self.series.len() {
            let (Some(f0), Some(s0), Some(f1), Some(s1)) = (fast[i - 1], slow[i - 1], fast[i], slow[i])
            else {
                continue;
            };
            let bar = &self.series[i];

            match holding.take() {
                None if f0 <= s0 && f1 > s1 => {
                    holding = Some(Trade::open(
                        bar.symbol.clone(),
                        bar.timestamp,
                        bar.close,
                        self.quantity_for(bar.close),
                        (f1 - s1) / s1,
                    ));
                }
                Some(trade) if f0 >= s0 && f1 < s1 => {
                    self.closed.push(trade.closed_at(bar.timestamp, bar.close));
                }
                other => holding = other,
            }
        }

        self.open.extend(holding);
        Ok(())
    }

    fn closed_trades(&self) -> &[Trade] {
        &self.closed
    }

    fn open_trades(&self) -> &[Trade] {
        &self.open
    }
}
