use ferroquote_core::QuoteService;

use crate::cli::PricesArgs;
use crate::error::CliError;

use super::{fetch, indicator_columns, PriceReport};

pub fn run(args: &PricesArgs, service: &QuoteService) -> Result<PriceReport, CliError> {
    let (symbol, bars) = fetch(&args.quote, service)?;
    let indicators = indicator_columns(&bars, &args.indicators);

    Ok(PriceReport {
        symbol,
        time_frame: args.quote.time_frame.clone(),
        bars,
        indicators,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cli::{IndicatorArgs, QuoteArgs};
    use crate::commands::test_support::{service, StaticSource};

    fn args(symbol: &str, time_frame: &str) -> PricesArgs {
        PricesArgs {
            quote: QuoteArgs {
                symbol: symbol.to_owned(),
                time_frame: time_frame.to_owned(),
                days: Some(30),
            },
            indicators: IndicatorArgs {
                moving_averages: vec![String::from("SMA:2")],
                tech_indicators: Vec::new(),
            },
        }
    }

    #[test]
    fn daily_prices_come_with_indicator_columns() {
        let source = Arc::new(StaticSource::with_closes(&[1.0, 2.0, 3.0]));
        let report = run(&args("SPX", "daily"), &service(source.clone(), "daily"))
            .expect("prices available");

        assert_eq!(report.bars.len(), 3);
        assert_eq!(report.indicators[0].name, "Sma02");
        assert_eq!(report.indicators[0].values, vec![None, Some(1.5), Some(2.5)]);
        assert_eq!(
            *source.requested.lock().expect("request log"),
            vec![String::from("^GSPC")]
        );
    }

    #[test]
    fn empty_result_is_reported_as_no_data() {
        let source = Arc::new(StaticSource::with_closes(&[1.0]));
        let error = run(&args("AAPL", "intraday"), &service(source, "intraday"))
            .expect_err("intraday is empty");

        assert!(matches!(error, CliError::NoData { .. }));
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn invalid_symbol_is_a_validation_error() {
        let source = Arc::new(StaticSource::with_closes(&[1.0]));
        let error = run(&args("AA PL", "daily"), &service(source, "daily"))
            .expect_err("space is not allowed");

        assert_eq!(error.exit_code(), 2);
    }
}
