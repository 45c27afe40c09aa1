use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Market data providers known to the symbol table.
///
/// `Google` only exists for ticker translation; no fetch path serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Yahoo,
    Alphavantage,
    Google,
}

impl ProviderId {
    pub const ALL: [Self; 3] = [Self::Yahoo, Self::Alphavantage, Self::Google];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Alphavantage => "alphavantage",
            Self::Google => "google",
        }
    }

    /// Human readable name used in log lines.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Yahoo => "Yahoo",
            Self::Alphavantage => "Alpha Vantage",
            Self::Google => "Google",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "alphavantage" | "alpha_vantage" => Ok(Self::Alphavantage),
            "google" => Ok(Self::Google),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_names_case_insensitively() {
        assert_eq!("Yahoo".parse::<ProviderId>(), Ok(ProviderId::Yahoo));
        assert_eq!(
            " alpha_vantage ".parse::<ProviderId>(),
            Ok(ProviderId::Alphavantage)
        );
        assert_eq!("GOOGLE".parse::<ProviderId>(), Ok(ProviderId::Google));
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "polygon".parse::<ProviderId>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidProvider { .. }));
    }

    #[test]
    fn serializes_as_lowercase() {
        let json = serde_json::to_string(&ProviderId::Alphavantage).expect("serialize");
        assert_eq!(json, "\"alphavantage\"");
    }
}
