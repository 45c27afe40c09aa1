//! # Domain Models
//!
//! Canonical domain types for ferroquote price data.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PriceBar`] | Adjusted OHLCV row |
//! | [`PriceSeries`] | Ordered, de-duplicated bars; empty means "no data" |
//! | [`RawBar`] | Unadjusted provider row including adjusted close |
//! | [`RawSeries`] | Provider response before post-processing |
//! | [`Symbol`] | Ticker in any provider notation |
//! | [`TimeFrame`] | Daily or intraday granularity |
//! | [`UtcDateTime`] | UTC timestamp |

mod models;
mod symbol;
mod timeframe;
mod timestamp;

pub use models::{PriceBar, PriceSeries, RawBar, RawSeries};
pub use symbol::Symbol;
pub use timeframe::TimeFrame;
pub use timestamp::UtcDateTime;
