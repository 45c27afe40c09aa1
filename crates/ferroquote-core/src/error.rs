use thiserror::Error;

/// Validation and parsing errors exposed by `ferroquote-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid time frame '{value}', expected one of daily, intraday")]
    InvalidTimeFrame { value: String },
    #[error("invalid provider '{value}', expected one of yahoo, alphavantage, google")]
    InvalidProvider { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("unsupported indicator '{value}'")]
    UnsupportedIndicator { value: String },
    #[error("indicator '{name}' expects {expected} window value(s), got '{value}'")]
    InvalidIndicatorWindow {
        name: String,
        expected: usize,
        value: String,
    },
}
