//! Retrying download plus dividend/split adjustment of raw provider rows.

use std::sync::Arc;

use time::macros::date;
use time::Date;

use crate::clock::{Clock, SystemClock};
use crate::data_source::DataSource;
use crate::retry::{retry_blocking, RetryPolicy, Sleeper, ThreadSleeper};
use crate::{PriceBar, PriceSeries, ProviderId, RawSeries, Symbol};

/// Earliest date requested from a provider. Older data is unreliable upstream.
pub const FLOOR_DATE: Date = date!(2000 - 01 - 01);

/// Downloads price history from one provider and cleans it up.
///
/// Failures never escape: an exhausted retry budget is logged at error level
/// and reported as an empty series.
pub struct PriceFetcher {
    source: Arc<dyn DataSource>,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    clock: Arc<dyn Clock>,
}

impl PriceFetcher {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            retry: RetryPolicy::default(),
            sleeper: Arc::new(ThreadSleeper),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn provider(&self) -> ProviderId {
        self.source.id()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Calendar date this fetcher treats as today.
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Adjusted daily bars for `symbol`, which must already be in the
    /// provider's notation.
    ///
    /// `start` is clamped to [`FLOOR_DATE`]; `end` defaults to today.
    pub fn fetch_daily(&self, symbol: &Symbol, start: Date, end: Option<Date>) -> PriceSeries {
        let provider = self.provider();
        let end = end.unwrap_or_else(|| self.today());
        let start = clamp_start(start);

        if start > end {
            tracing::warn!(
                provider = provider.display_name(),
                symbol = %symbol,
                %start,
                %end,
                "daily price window is empty"
            );
            return PriceSeries::empty();
        }

        let outcome = retry_blocking(&self.retry, self.sleeper.as_ref(), |_| {
            self.source.daily_history(symbol, start, end)
        });

        match outcome {
            Ok(raw) => {
                let series = adjust(raw);
                tracing::debug!(
                    provider = provider.display_name(),
                    symbol = %symbol,
                    bars = series.len(),
                    "daily prices downloaded"
                );
                series
            }
            Err(exhausted) => {
                tracing::error!(
                    provider = provider.display_name(),
                    symbol = %symbol,
                    attempts = exhausted.attempts,
                    error_kind = %exhausted.last_error.kind(),
                    error = exhausted.last_error.message(),
                    "daily price request failed"
                );
                PriceSeries::empty()
            }
        }
    }

    /// Intraday download is not implemented for any provider.
    ///
    /// Logs a warning naming `provider`, the source the request was routed
    /// to, and returns an empty series without touching the network.
    pub fn fetch_intraday(&self, provider: ProviderId, symbol: &Symbol, days: u32) -> PriceSeries {
        tracing::warn!(
            provider = provider.display_name(),
            symbol = %symbol,
            days,
            "intraday prices are not supported"
        );
        PriceSeries::empty()
    }
}

pub fn clamp_start(start: Date) -> Date {
    start.max(FLOOR_DATE)
}

/// Apply the adjusted-close factor to every OHLC field.
///
/// Rows without a close are dropped. Volume is left untouched. Prices are
/// rounded to 4 decimals.
pub fn adjust(raw: RawSeries) -> PriceSeries {
    let bars = raw
        .rows
        .into_iter()
        .filter_map(|row| {
            let close = row.close.filter(|close| !close.is_nan())?;
            let factor = adjustment_factor(close, row.adj_close);
            let scaled = |value: Option<f64>| round4(value.unwrap_or(f64::NAN) * factor);

            Some(PriceBar::new(
                row.ts,
                scaled(row.open),
                scaled(row.high),
                scaled(row.low),
                round4(close * factor),
                row.volume,
            ))
        })
        .collect();

    PriceSeries::from_bars(bars)
}

// Missing adjusted close or a zero close leaves the row unadjusted.
fn adjustment_factor(close: f64, adj_close: Option<f64>) -> f64 {
    match adj_close {
        Some(adj_close) if adj_close.is_finite() && close != 0.0 => adj_close / close,
        _ => 1.0,
    }
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
