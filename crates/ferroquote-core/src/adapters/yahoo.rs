use std::sync::Arc;

use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::data_source::{DataSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{ProviderId, RawBar, RawSeries, Symbol, UtcDateTime};

const CHART_ENDPOINT: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SECONDS_PER_DAY: i64 = 86_400;

/// Yahoo Finance daily chart adapter.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn chart_url(&self, symbol: &Symbol, start: Date, end: Date) -> String {
        // period2 is exclusive upstream; push it to the midnight after `end`.
        let period1 = day_start_unix(start);
        let period2 = day_start_unix(end) + SECONDS_PER_DAY;

        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=div%7Csplit&includeAdjustedClose=true",
            CHART_ENDPOINT,
            urlencoding::encode(symbol.as_str()),
            period1,
            period2
        )
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn daily_history(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<RawSeries, SourceError> {
        if start > end {
            return Err(SourceError::invalid_request(format!(
                "yahoo daily window starts after it ends: {start} > {end}"
            )));
        }

        let request = HttpRequest::get(self.chart_url(symbol, start, end))
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).map_err(|e| {
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        match response.status {
            200..=299 => {}
            429 => {
                return Err(SourceError::rate_limited("yahoo returned status 429"));
            }
            404 => {
                return Err(SourceError::invalid_request(format!(
                    "yahoo has no chart for symbol '{symbol}'"
                )));
            }
            status => {
                return Err(SourceError::unavailable(format!(
                    "yahoo returned status {status}"
                )));
            }
        }

        parse_chart(&response.body)
    }
}

fn parse_chart(body: &str) -> Result<RawSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error {
        return Err(SourceError::unavailable(format!(
            "yahoo chart API error: {}: {}",
            error.code, error.description
        )));
    }

    let result = chart_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| SourceError::internal("no chart data in response"))?;

    // A window without trading days comes back without timestamps.
    let Some(timestamps) = result.timestamp else {
        return Ok(RawSeries::default());
    };

    let gmt_offset = result.meta.map(|meta| meta.gmtoffset).unwrap_or(0);
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adj_close = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|series| series.adjclose)
        .unwrap_or_default();

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, &ts_value) in timestamps.iter().enumerate() {
        let local_seconds = ts_value.checked_add(gmt_offset).ok_or_else(|| {
            SourceError::internal(format!(
                "timestamp {ts_value} overflows with gmt offset {gmt_offset}"
            ))
        })?;
        let local = OffsetDateTime::from_unix_timestamp(local_seconds)
            .map_err(|e| SourceError::internal(format!("invalid timestamp {ts_value}: {e}")))?;

        rows.push(RawBar {
            ts: UtcDateTime::from_date(local.date()),
            open: value_at(&quote.open, i),
            high: value_at(&quote.high, i),
            low: value_at(&quote.low, i),
            close: value_at(&quote.close, i),
            adj_close: value_at(&adj_close, i),
            volume: value_at(&quote.volume, i)
                .filter(|volume| *volume >= 0.0)
                .map(|volume| volume as u64),
        });
    }

    Ok(RawSeries::new(rows))
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn day_start_unix(date: Date) -> i64 {
    UtcDateTime::from_date(date).into_inner().unix_timestamp()
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Vec<YahooAdjClose>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}
