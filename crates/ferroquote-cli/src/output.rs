use ferroquote_core::export::render_table;
use ferroquote_core::DisplayConfig;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::{CommandOutput, ExportReport, NormalizeReport, PriceReport};
use crate::error::CliError;

pub fn render(
    outcome: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
    display: &DisplayConfig,
) -> Result<(), CliError> {
    let text = match format {
        OutputFormat::Json => match outcome {
            CommandOutput::Prices(report) => to_json(report, pretty)?,
            CommandOutput::Exported(report) => to_json(report, pretty)?,
            CommandOutput::Normalized(report) => to_json(report, pretty)?,
        },
        OutputFormat::Table => match outcome {
            CommandOutput::Prices(report) => prices_table(report, display),
            CommandOutput::Exported(report) => export_summary(report),
            CommandOutput::Normalized(report) => normalize_summary(report),
        },
    };

    println!("{}", text.trim_end());
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(payload)
}

fn prices_table(report: &PriceReport, display: &DisplayConfig) -> String {
    let mut text = format!(
        "symbol    : {}\ntime_frame: {}\nbars      : {}\n\n",
        report.symbol,
        report.time_frame,
        report.bars.len()
    );
    text.push_str(&render_table(&report.bars, &report.indicators, display));
    text
}

fn export_summary(report: &ExportReport) -> String {
    format!(
        "exported {} rows for {} to {}",
        report.rows,
        report.symbol,
        report.path.display()
    )
}

fn normalize_summary(report: &NormalizeReport) -> String {
    format!(
        "{} -> {} ({})",
        report.input,
        report.symbol,
        report.provider.display_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferroquote_core::{ProviderId, Symbol};

    #[test]
    fn normalize_summary_names_provider() {
        let report = NormalizeReport {
            input: Symbol::parse("SPX").expect("valid"),
            provider: ProviderId::Alphavantage,
            symbol: Symbol::parse("SPX").expect("valid"),
        };
        assert_eq!(normalize_summary(&report), "SPX -> SPX (Alpha Vantage)");
    }

    #[test]
    fn normalize_json_uses_lowercase_provider() {
        let report = NormalizeReport {
            input: Symbol::parse("SPX").expect("valid"),
            provider: ProviderId::Yahoo,
            symbol: Symbol::parse("^GSPC").expect("valid"),
        };
        let json = to_json(&report, false).expect("serializable");
        assert_eq!(json, r#"{"input":"SPX","provider":"yahoo","symbol":"^GSPC"}"#);
    }
}
