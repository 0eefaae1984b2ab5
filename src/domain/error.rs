//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for dfatrader.
#[derive(Debug, thiserror::Error)]
pub enum DfatraderError {
    #[error("data store error: {reason}")]
    DataStore { reason: String },

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

    #[error("invalid observation on {date}: {reason}")]
    InvalidObservation { date: NaiveDate, reason: String },

    #[error("insufficient position: requested {requested} shares, held {held}")]
    InsufficientPosition { requested: f64, held: f64 },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DfatraderError> for std::process::ExitCode {
    fn from(err: &DfatraderError) -> Self {
        let code: u8 = match err {
            DfatraderError::Io(_) => 1,
            DfatraderError::ConfigParse { .. }
            | DfatraderError::ConfigMissing { .. }
            | DfatraderError::ConfigInvalid { .. } => 2,
            DfatraderError::DataStore { .. } => 3,
            DfatraderError::InvalidObservation { .. }
            | DfatraderError::InsufficientPosition { .. } => 4,
            DfatraderError::NoData { .. } | DfatraderError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
