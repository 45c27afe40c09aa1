use ferroquote_core::{normalize, ProviderId, Symbol};

use crate::cli::NormalizeArgs;
use crate::error::CliError;

use super::NormalizeReport;

pub fn run(args: &NormalizeArgs) -> Result<NormalizeReport, CliError> {
    let input = Symbol::parse(&args.symbol)?;
    let provider: ProviderId = args.provider.parse()?;
    let symbol = normalize(&input, provider);

    Ok(NormalizeReport {
        input,
        provider,
        symbol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(symbol: &str, provider: &str) -> NormalizeArgs {
        NormalizeArgs {
            symbol: symbol.to_owned(),
            provider: provider.to_owned(),
        }
    }

    #[test]
    fn maps_into_requested_notation() {
        let report = run(&args("^DJI", "google")).expect("valid request");
        assert_eq!(report.symbol.as_str(), ".DJI");
        assert_eq!(report.provider, ProviderId::Google);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let error = run(&args("SPX", "bloomberg")).expect_err("unknown provider");
        assert_eq!(error.exit_code(), 2);
    }
}
