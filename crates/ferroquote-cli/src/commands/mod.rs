mod export;
mod normalize;
mod prices;

use std::path::PathBuf;

use ferroquote_core::indicators::{
    moving_average_columns, parse_specs, tech_indicator_columns, IndicatorColumn,
};
use ferroquote_core::{MovingAverage, PriceSeries, QuoteService, Symbol, TechIndicator};
use serde::Serialize;

use crate::cli::{Cli, Command, IndicatorArgs, QuoteArgs};
use crate::config::ClientConfig;
use crate::error::CliError;

/// Downloaded prices plus requested indicator columns.
#[derive(Debug, Serialize)]
pub struct PriceReport {
    pub symbol: Symbol,
    pub time_frame: String,
    pub bars: PriceSeries,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<IndicatorColumn>,
}

#[derive(Debug, Serialize)]
pub struct ExportReport {
    pub symbol: Symbol,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct NormalizeReport {
    pub input: Symbol,
    pub provider: ferroquote_core::ProviderId,
    pub symbol: Symbol,
}

pub enum CommandOutput {
    Prices(PriceReport),
    Exported(ExportReport),
    Normalized(NormalizeReport),
}

pub fn run(cli: &Cli, config: &ClientConfig) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::Prices(args) => {
            let service = config.quote_service(&args.quote.time_frame)?;
            prices::run(args, &service).map(CommandOutput::Prices)
        }
        Command::Export(args) => {
            let service = config.quote_service(&args.quote.time_frame)?;
            export::run(args, &service, &config.csv).map(CommandOutput::Exported)
        }
        Command::Normalize(args) => normalize::run(args).map(CommandOutput::Normalized),
    }
}

/// Fetch prices for `args`, treating an empty series as an error.
fn fetch(args: &QuoteArgs, service: &QuoteService) -> Result<(Symbol, PriceSeries), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let series = service.get_prices(&symbol, args.days);
    if series.is_empty() {
        return Err(CliError::NoData {
            symbol: symbol.to_string(),
        });
    }
    Ok((symbol, series))
}

fn indicator_columns(series: &PriceSeries, args: &IndicatorArgs) -> Vec<IndicatorColumn> {
    let averages: Vec<MovingAverage> = parse_specs(&args.moving_averages);
    let indicators: Vec<TechIndicator> = parse_specs(&args.tech_indicators);

    let mut columns = moving_average_columns(series, &averages);
    columns.extend(tech_indicator_columns(series, &indicators));
    columns
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use ferroquote_core::{
        DataSource, FixedClock, PriceFetcher, ProviderId, QuoteService, RawBar, RawSeries,
        SourceError, Symbol, UtcDateTime,
    };
    use time::macros::date;
    use time::{Date, Duration};

    /// Data source answering with a fixed set of rows.
    pub struct StaticSource {
        rows: RawSeries,
        pub requested: Mutex<Vec<String>>,
    }

    impl StaticSource {
        pub fn with_closes(closes: &[f64]) -> Self {
            let first: Date = date!(2024 - 01 - 01);
            let rows = closes
                .iter()
                .enumerate()
                .map(|(i, close)| RawBar {
                    ts: UtcDateTime::from_date(first + Duration::days(i as i64)),
                    open: Some(*close),
                    high: Some(close + 1.0),
                    low: Some(close - 1.0),
                    close: Some(*close),
                    adj_close: Some(*close),
                    volume: Some(100),
                })
                .collect();
            Self {
                rows: RawSeries::new(rows),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl DataSource for StaticSource {
        fn id(&self) -> ProviderId {
            ProviderId::Yahoo
        }

        fn daily_history(
            &self,
            symbol: &Symbol,
            _start: Date,
            _end: Date,
        ) -> Result<RawSeries, SourceError> {
            self.requested
                .lock()
                .expect("request log should not be poisoned")
                .push(symbol.to_string());
            Ok(self.rows.clone())
        }
    }

    pub fn service(source: Arc<StaticSource>, time_frame: &str) -> QuoteService {
        let fetcher =
            PriceFetcher::new(source).with_clock(Arc::new(FixedClock(date!(2024 - 06 - 28))));
        QuoteService::new(time_frame, fetcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_columns_keep_request_order_and_skip_unknown() {
        let series = PriceSeries::empty();
        let args = IndicatorArgs {
            moving_averages: vec![String::from("EMA:13"), String::from("HMA:9")],
            tech_indicators: vec![String::from("MACD:12,26,9"), String::from("RSI:14")],
        };

        let names: Vec<String> = indicator_columns(&series, &args)
            .into_iter()
            .map(|column| column.name)
            .collect();

        assert_eq!(names, ["Ema13", "Macd", "MacdSignal", "MacdHistogram", "Rsi"]);
    }
}
