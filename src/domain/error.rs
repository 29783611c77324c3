//! Domain error types.

/// Top-level error type for ledgertrader.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error for {symbol}: {reason}")]
    DataSource { symbol: String, reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("strategy failed on {symbol}: {reason}")]
    Strategy { symbol: String, reason: String },

    #[error("trade on {symbol} entered {entry} is still open")]
    OpenTrade { symbol: String, entry: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&LedgerError> for std::process::ExitCode {
    fn from(err: &LedgerError) -> Self {
        let code: u8 = match err {
            LedgerError::Io(_) => 1,
            LedgerError::ConfigParse { .. }
            | LedgerError::ConfigMissing { .. }
            | LedgerError::ConfigInvalid { .. } => 2,
            LedgerError::DataSource { .. } | LedgerError::NoData { .. } => 3,
            LedgerError::Strategy { .. } => 4,
            LedgerError::OpenTrade { .. } => 5,
            LedgerError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
