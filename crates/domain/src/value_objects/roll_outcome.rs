//! Roll outcome value object - the classified result of a skill-use roll.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the three outcome kinds produced by the roll classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollOutcome {
    Success,
    Crit,
    Fail,
}

impl RollOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Crit => "crit",
            Self::Fail => "fail",
        }
    }

    /// Classifies an outcome kind string, treating anything unrecognized as
    /// a failure.
    pub fn from_kind_lenient(kind: &str) -> Self {
        kind.parse().unwrap_or(Self::Fail)
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::Crit)
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RollOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "crit" | "critical" => Ok(Self::Crit),
            "fail" | "failure" => Ok(Self::Fail),
            _ => Err(DomainError::parse(format!("Unknown roll outcome: {}", s))),
        }
    }
}
