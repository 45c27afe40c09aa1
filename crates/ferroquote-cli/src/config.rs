//! Client configuration assembled from CLI flags and their environment
//! fallbacks.

use std::time::Duration;

use ferroquote_core::{CsvExportConfig, DisplayConfig, QuoteService, RetryPolicy};

use crate::cli::Cli;
use crate::error::CliError;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub retry: RetryPolicy,
    pub timeout_ms: u64,
    pub display: DisplayConfig,
    pub csv: CsvExportConfig,
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            retry: RetryPolicy::new(cli.attempts, Duration::from_millis(cli.retry_delay_ms)),
            timeout_ms: cli.timeout_ms,
            display: DisplayConfig::default(),
            csv: CsvExportConfig::default(),
        }
    }

    /// Quote service over Yahoo with this configuration's retry and timeout.
    pub fn quote_service(&self, time_frame: &str) -> Result<QuoteService, CliError> {
        Ok(QuoteService::with_defaults(
            time_frame,
            self.retry,
            self.timeout_ms,
        )?)
    }
}
