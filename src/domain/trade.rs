//! Trade entity produced by a single-instrument strategy run.

use chrono::NaiveDateTime;

/// One strategy decision. Closed once both exit fields are set.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub symbol: String,
    pub entry_date: NaiveDateTime,
    pub exit_date: Option<NaiveDateTime>,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub quantity: u64,
    pub score: f64,
}

impl Trade {
    pub fn open(
        symbol: impl Into<String>,
        entry_date: NaiveDateTime,
        entry_price: f64,
        quantity: u64,
        score: f64,
    ) -> Self {
        Trade {
            symbol: symbol.into(),
            entry_date,
            exit_date: None,
            entry_price,
            exit_price: None,
            quantity,
            score,
        }
    }

    /// Returns a closed copy of this trade.
    pub fn closed_at(&self, exit_date: NaiveDateTime, exit_price: f64) -> Self {
        Trade {
            exit_date: Some(exit_date),
            exit_price: Some(exit_price),
            ..self.clone()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.exit_date.is_some() && self.exit_price.is_some()
    }

    /// Calendar days between entry and exit, if closed.
    pub fn holding_days(&self) -> Option<i64> {
        self.exit_date
            .map(|exit| (exit.date() - self.entry_date.date()).num_days())
    }
}
