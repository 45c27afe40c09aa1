//! # Ferroquote Core
//!
//! Historical price retrieval with provider-aware ticker translation.
//!
//! ## Overview
//!
//! - **Symbol normalization** between Yahoo, Alpha Vantage and Google notation
//! - **Daily price download** from Yahoo with bounded retries
//! - **Dividend/split adjustment** of OHLC prices from the adjusted close
//! - **Technical indicators** (SMA, EMA, WMA, RSI, MACD, Ultimate Oscillator)
//! - **CSV export** and console table rendering
//!
//! Request-level failures never surface as errors: they are logged through
//! `tracing` and reported as an empty [`PriceSeries`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo) |
//! | [`clock`] | Source of "today" |
//! | [`data_source`] | Data source trait and error types |
//! | [`domain`] | Domain models (Symbol, PriceBar, PriceSeries) |
//! | [`error`] | Core error types |
//! | [`export`] | CSV export and table rendering |
//! | [`fetcher`] | Retrying download and price adjustment |
//! | [`http_client`] | HTTP client abstraction |
//! | [`indicators`] | Moving averages and momentum indicators |
//! | [`retry`] | Fixed-delay retry policy |
//! | [`service`] | Time-frame bound quote service |
//! | [`source`] | Provider identifiers |
//! | [`symbol_map`] | Ticker translation between providers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ferroquote_core::{QuoteService, RetryPolicy, Symbol};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = QuoteService::with_defaults("daily", RetryPolicy::default(), 10_000)?;
//!     let prices = service.get_prices(&Symbol::parse("SPX")?, Some(30));
//!
//!     if let Some(bar) = prices.last() {
//!         println!("S&P 500 close: {:.2}", bar.close);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  QuoteService   │────▶│ Symbol Map       │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  PriceFetcher   │────▶│ Retry / Sleeper  │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Source     │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Adapters classify failures with [`SourceErrorKind`]; the fetcher retries
//! them and logs the last one once the budget is spent:
//!
//! ```rust
//! use ferroquote_core::{SourceError, SourceErrorKind};
//!
//! fn describe(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::RateLimited => "slow down",
//!         SourceErrorKind::Unavailable => "try again later",
//!         SourceErrorKind::InvalidRequest => "check the symbol",
//!         SourceErrorKind::Internal => "unexpected provider payload",
//!     }
//! }
//! ```

pub mod adapters;
pub mod clock;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod http_client;
pub mod indicators;
pub mod retry;
pub mod service;
pub mod source;
pub mod symbol_map;

// Adapter implementations
pub use adapters::YahooAdapter;

// Clock
pub use clock::{Clock, FixedClock, SystemClock};

// Data source trait and types
pub use data_source::{DataSource, SourceError, SourceErrorKind};

// Domain models
pub use domain::{PriceBar, PriceSeries, RawBar, RawSeries, Symbol, TimeFrame, UtcDateTime};

// Error types
pub use error::ValidationError;

// Export
pub use export::{CsvExportConfig, DisplayConfig, ExportError};

// Fetching
pub use fetcher::{PriceFetcher, FLOOR_DATE};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Indicators
pub use indicators::{IndicatorColumn, MovingAverage, MovingAverageKind, TechIndicator};

// Retry logic
pub use retry::{retry_blocking, RetryExhausted, RetryPolicy, Sleeper, ThreadSleeper};

// Quote service
pub use service::{QuoteService, DEFAULT_DAILY_DAYS, INTRADAY_DAYS};

// Source identifiers
pub use source::ProviderId;

// Symbol normalization
pub use symbol_map::normalize;
