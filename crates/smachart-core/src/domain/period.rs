use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::ValidationError;

/// Look-back range of a price history request, counted back from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub const ALL: [Self; 7] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::TwoYears,
        Self::FiveYears,
        Self::Max,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::Max => "max",
        }
    }

    /// Approximate calendar span; `Max` is capped at twenty years.
    pub fn span(self) -> Duration {
        match self {
            Self::OneMonth => Duration::days(30),
            Self::ThreeMonths => Duration::days(91),
            Self::SixMonths => Duration::days(182),
            Self::OneYear => Duration::days(365),
            Self::TwoYears => Duration::days(730),
            Self::FiveYears => Duration::days(1_826),
            Self::Max => Duration::days(7_305),
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "5y" => Ok(Self::FiveYears),
            "max" => Ok(Self::Max),
            other => Err(ValidationError::InvalidPeriod {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_canonical_spellings() {
        for period in Period::ALL {
            assert_eq!(Period::from_str(period.as_str()).expect("must parse"), period);
        }
    }

    #[test]
    fn rejects_unknown_period() {
        let err = Period::from_str("10y").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPeriod { .. }));
    }
}
