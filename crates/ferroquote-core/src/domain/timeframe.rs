use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Granularity of a requested price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Daily,
    Intraday,
}

impl TimeFrame {
    pub const ALL: [Self; 2] = [Self::Daily, Self::Intraday];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Intraday => "intraday",
        }
    }
}

impl Display for TimeFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "intraday" => Ok(Self::Intraday),
            other => Err(ValidationError::InvalidTimeFrame {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display() {
        for frame in TimeFrame::ALL {
            assert_eq!(frame.to_string().parse::<TimeFrame>(), Ok(frame));
        }
    }

    #[test]
    fn parses_mixed_case() {
        assert_eq!("DAILY".parse::<TimeFrame>(), Ok(TimeFrame::Daily));
        assert_eq!(" Intraday ".parse::<TimeFrame>(), Ok(TimeFrame::Intraday));
    }

    #[test]
    fn rejects_unknown_time_frame() {
        let err = "weekly".parse::<TimeFrame>().expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::InvalidTimeFrame {
                value: String::from("weekly")
            }
        );
    }
}
