//! CLI argument definitions for Ferroquote.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `prices` | Fetch adjusted historical prices, optionally with indicators |
//! | `export` | Fetch prices and write them to a CSV file |
//! | `normalize` | Translate a ticker into a provider's notation |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--attempts` | `5` | Provider calls before giving up |
//! | `--retry-delay-ms` | `3000` | Pause between failed calls |
//! | `--timeout-ms` | `10000` | Per-request HTTP timeout |
//!
//! # Examples
//!
//! ```bash
//! # Last year of S&P 500 prices
//! ferroquote prices SPX
//!
//! # Thirty days of prices with a 13-day EMA and RSI, as JSON
//! ferroquote prices AAPL --days 30 --ma EMA:13 --ti RSI:14 --format json --pretty
//!
//! # Write ten years of prices to CSV
//! ferroquote export ^GSPC --days 3650 --output gspc.csv
//!
//! # How Google spells an index
//! ferroquote normalize ^DJI --provider google
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Ferroquote - historical prices with provider-aware ticker translation.
#[derive(Debug, Parser)]
#[command(
    name = "ferroquote",
    author,
    version,
    about = "Historical price downloads with provider-aware ticker translation"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Provider calls made before a download is given up.
    #[arg(long, global = true, env = "FERROQUOTE_ATTEMPTS", default_value_t = 5)]
    pub attempts: u32,

    /// Pause between two failed provider calls, in milliseconds.
    #[arg(long, global = true, env = "FERROQUOTE_RETRY_DELAY_MS", default_value_t = 3_000)]
    pub retry_delay_ms: u64,

    /// Request timeout in milliseconds.
    #[arg(long, global = true, env = "FERROQUOTE_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table, head and tail only.
    Table,
    /// Single JSON object.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch adjusted historical prices.
    ///
    /// # Examples
    ///
    ///   ferroquote prices SPX
    ///   ferroquote prices AAPL --days 90 --ma SMA:20 --ma EMA:50
    ///   ferroquote prices MSFT --ti MACD:12,26,9 --ti UO:7,14,28
    Prices(PricesArgs),

    /// Fetch prices and export them as CSV.
    ///
    /// # Examples
    ///
    ///   ferroquote export SPX --output spx.csv
    ///   ferroquote export AAPL --days 30 --ma EMA:13 --output aapl.csv
    Export(ExportArgs),

    /// Translate a ticker into a provider's notation.
    ///
    /// # Examples
    ///
    ///   ferroquote normalize SPX --provider yahoo
    ///   ferroquote normalize .INX --provider alphavantage
    Normalize(NormalizeArgs),
}

/// Symbol and date window shared by download commands.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Ticker in any supported notation (e.g. SPX, ^GSPC, .INX, AAPL).
    pub symbol: String,

    /// Time frame: daily or intraday.
    #[arg(long, default_value = "daily")]
    pub time_frame: String,

    /// Look-back in calendar days (daily only, default 365).
    #[arg(long)]
    pub days: Option<u32>,
}

/// Indicator specs added as extra columns.
#[derive(Debug, Default, Args)]
pub struct IndicatorArgs {
    /// Moving average over closes, e.g. SMA:20, EMA:13, WMA:10. Repeatable.
    #[arg(long = "ma", value_name = "KIND:WINDOW")]
    pub moving_averages: Vec<String>,

    /// Technical indicator, e.g. RSI:14, MACD:12,26,9, UO:7,14,28. Repeatable.
    #[arg(long = "ti", value_name = "KIND:PERIODS")]
    pub tech_indicators: Vec<String>,
}

/// Arguments for the `prices` command.
#[derive(Debug, Args)]
pub struct PricesArgs {
    #[command(flatten)]
    pub quote: QuoteArgs,

    #[command(flatten)]
    pub indicators: IndicatorArgs,
}

/// Arguments for the `export` command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub quote: QuoteArgs,

    #[command(flatten)]
    pub indicators: IndicatorArgs,

    /// Target CSV file.
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Arguments for the `normalize` command.
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Ticker to translate.
    pub symbol: String,

    /// Target provider: yahoo, alphavantage or google.
    #[arg(long)]
    pub provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_defaults_to_daily_table_output() {
        let cli = Cli::try_parse_from(["ferroquote", "prices", "SPX"]).expect("valid args");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.attempts, 5);
        assert_eq!(cli.retry_delay_ms, 3_000);
        let Command::Prices(args) = cli.command else {
            panic!("expected prices command");
        };
        assert_eq!(args.quote.symbol, "SPX");
        assert_eq!(args.quote.time_frame, "daily");
        assert_eq!(args.quote.days, None);
        assert!(args.indicators.moving_averages.is_empty());
    }

    #[test]
    fn indicator_flags_are_repeatable() {
        let cli = Cli::try_parse_from([
            "ferroquote", "prices", "AAPL", "--ma", "SMA:5", "--ma", "EMA:13", "--ti", "RSI:14",
            "--days", "30",
        ])
        .expect("valid args");

        let Command::Prices(args) = cli.command else {
            panic!("expected prices command");
        };
        assert_eq!(args.indicators.moving_averages, ["SMA:5", "EMA:13"]);
        assert_eq!(args.indicators.tech_indicators, ["RSI:14"]);
        assert_eq!(args.quote.days, Some(30));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "ferroquote",
            "export",
            "SPX",
            "--output",
            "spx.csv",
            "--format",
            "json",
            "--attempts",
            "2",
            "--retry-delay-ms",
            "10",
        ])
        .expect("valid args");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.attempts, 2);
        assert_eq!(cli.retry_delay_ms, 10);
        let Command::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.output, PathBuf::from("spx.csv"));
    }

    #[test]
    fn export_requires_output_path() {
        assert!(Cli::try_parse_from(["ferroquote", "export", "SPX"]).is_err());
    }

    #[test]
    fn normalize_requires_provider() {
        assert!(Cli::try_parse_from(["ferroquote", "normalize", "SPX"]).is_err());
    }
}
