//! Remote provider contract and its error type.
//!
//! A [`DataSource`] turns a provider-notation symbol and a date window into a
//! [`RawSeries`]. Adjustment, cleanup and retries live in
//! [`crate::fetcher::PriceFetcher`], so adapters stay a thin decoding layer.

use std::fmt::{Display, Formatter};

use time::Date;

use crate::{ProviderId, RawSeries, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

impl SourceErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "Unavailable",
            Self::RateLimited => "RateLimited",
            Self::InvalidRequest => "InvalidRequest",
            Self::Internal => "Internal",
        }
    }
}

impl Display for SourceErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Remote market data provider.
///
/// Implementations perform exactly one upstream call per invocation; the
/// caller owns the retry policy.
pub trait DataSource {
    /// Provider this source talks to.
    fn id(&self) -> ProviderId;

    /// Daily rows for `symbol` between `start` and `end`, both inclusive.
    ///
    /// `symbol` is already in the provider's notation.
    fn daily_history(&self, symbol: &Symbol, start: Date, end: Date)
        -> Result<RawSeries, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code() {
        let error = SourceError::unavailable("yahoo returned status 503");
        assert_eq!(
            error.to_string(),
            "yahoo returned status 503 (source.unavailable)"
        );
        assert!(error.retryable());
    }

    #[test]
    fn internal_errors_are_not_retryable() {
        let error = SourceError::internal("failed to parse yahoo chart");
        assert_eq!(error.kind(), SourceErrorKind::Internal);
        assert!(!error.retryable());
        assert_eq!(error.code(), "source.internal");
    }
}
