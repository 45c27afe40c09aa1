use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ferroquote_core::ValidationError),

    #[error("no price data for '{symbol}'")]
    NoData { symbol: String },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Export(#[from] ferroquote_core::ExportError),

    #[error("http client setup failed: {0}")]
    Http(#[from] ferroquote_core::HttpError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::NoData { .. } => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) | Self::Export(_) | Self::Http(_) => 10,
        }
    }
}
