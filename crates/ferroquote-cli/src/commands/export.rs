//! Download prices and write them to CSV.

use ferroquote_core::export::export_csv;
use ferroquote_core::{CsvExportConfig, QuoteService};

use crate::cli::ExportArgs;
use crate::error::CliError;

use super::{fetch, indicator_columns, ExportReport};

pub fn run(
    args: &ExportArgs,
    service: &QuoteService,
    config: &CsvExportConfig,
) -> Result<ExportReport, CliError> {
    let (symbol, series) = fetch(&args.quote, service)?;
    let columns = indicator_columns(&series, &args.indicators);

    export_csv(&args.output, &series, &columns, config)?;
    tracing::info!(symbol = %symbol, path = %args.output.display(), rows = series.len(), "prices exported");

    Ok(ExportReport {
        symbol,
        path: args.output.clone(),
        rows: series.len(),
    })
}
