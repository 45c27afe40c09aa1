//! Quote domain service: picks the provider for a time frame, translates the
//! ticker once, and hands the request to [`PriceFetcher`].

use std::sync::Arc;

use time::Duration;

use crate::adapters::YahooAdapter;
use crate::fetcher::{PriceFetcher, FLOOR_DATE};
use crate::http_client::{HttpError, ReqwestHttpClient};
use crate::retry::RetryPolicy;
use crate::symbol_map::normalize;
use crate::{PriceSeries, ProviderId, Symbol, TimeFrame};

/// Look-back used for daily requests when the caller gives none.
pub const DEFAULT_DAILY_DAYS: u32 = 365;

/// Fixed look-back for intraday requests.
pub const INTRADAY_DAYS: u32 = 30;

/// Provider serving each time frame.
pub const fn provider_for(time_frame: TimeFrame) -> ProviderId {
    match time_frame {
        TimeFrame::Daily => ProviderId::Yahoo,
        TimeFrame::Intraday => ProviderId::Alphavantage,
    }
}

/// Time-frame bound entry point for price requests.
pub struct QuoteService {
    time_frame: Option<TimeFrame>,
    requested: String,
    fetcher: PriceFetcher,
}

impl QuoteService {
    /// Build a service from a time-frame name such as `"daily"`.
    ///
    /// An unknown name is accepted here; every later request for it logs a
    /// warning and yields an empty series.
    ///
    /// "Today" comes from the fetcher's clock.
    pub fn new(time_frame: &str, fetcher: PriceFetcher) -> Self {
        Self {
            time_frame: time_frame.parse().ok(),
            requested: time_frame.trim().to_ascii_lowercase(),
            fetcher,
        }
    }

    /// Production wiring: Yahoo over a blocking reqwest client, real sleeps,
    /// system clock.
    pub fn with_defaults(
        time_frame: &str,
        retry: RetryPolicy,
        timeout_ms: u64,
    ) -> Result<Self, HttpError> {
        let http_client = Arc::new(ReqwestHttpClient::new()?);
        let adapter = YahooAdapter::with_http_client(http_client).with_timeout_ms(timeout_ms);
        let fetcher = PriceFetcher::new(Arc::new(adapter)).with_retry_policy(retry);
        Ok(Self::new(time_frame, fetcher))
    }

    pub fn time_frame(&self) -> Option<TimeFrame> {
        self.time_frame
    }

    /// Provider selected by the time frame, `None` when it is unsupported.
    pub fn provider(&self) -> Option<ProviderId> {
        self.time_frame.map(provider_for)
    }

    /// Historical prices for `symbol` over the last `days` days.
    ///
    /// `days` only applies to daily requests and defaults to
    /// [`DEFAULT_DAILY_DAYS`]; intraday always covers [`INTRADAY_DAYS`].
    pub fn get_prices(&self, symbol: &Symbol, days: Option<u32>) -> PriceSeries {
        let Some(time_frame) = self.time_frame else {
            tracing::warn!(
                time_frame = %self.requested,
                symbol = %symbol,
                "time frame is not supported"
            );
            return PriceSeries::empty();
        };

        let provider = provider_for(time_frame);
        let provider_symbol = normalize(symbol, provider);

        match time_frame {
            TimeFrame::Daily => {
                if self.fetcher.provider() != provider {
                    tracing::warn!(
                        provider = self.fetcher.provider().display_name(),
                        symbol = %provider_symbol,
                        "only yahoo serves daily data"
                    );
                    return PriceSeries::empty();
                }

                let end = self.fetcher.today();
                let days = days.unwrap_or(DEFAULT_DAILY_DAYS);
                let start = end
                    .checked_sub(Duration::days(i64::from(days)))
                    .unwrap_or(FLOOR_DATE);
                self.fetcher.fetch_daily(&provider_symbol, start, Some(end))
            }
            TimeFrame::Intraday => {
                self.fetcher
                    .fetch_intraday(provider, &provider_symbol, INTRADAY_DAYS)
            }
        }
    }
}
