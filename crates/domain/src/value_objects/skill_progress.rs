//! Skill progression record.
//!
//! The whole state of one skill on one character: a rank and the fractional
//! practice credit accumulated toward the next rank. Every award the engine
//! hands out is a multiple of 0.1 uses, so progress is kept as an exact count
//! of tenths and only converted to a decimal at the edges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{non_negative_or_zero, whole_or_zero};

/// Accumulated practice credit, in tenths of a use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(u32);

impl Progress {
    pub const ZERO: Progress = Progress(0);

    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    /// Whole uses, e.g. a rank-up requirement.
    pub const fn from_whole_uses(uses: u32) -> Self {
        Self(uses.saturating_mul(10))
    }

    /// Converts a host-supplied decimal, rounding to the nearest tenth.
    /// Non-finite or negative input becomes zero.
    pub fn from_uses(uses: f64) -> Self {
        let tenths = (non_negative_or_zero(uses) * 10.0).round();
        if tenths >= f64::from(u32::MAX) {
            Self(u32::MAX)
        } else {
            Self(tenths as u32)
        }
    }

    pub fn tenths(self) -> u32 {
        self.0
    }

    pub fn as_uses(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    pub fn saturating_add(self, other: Progress) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn checked_sub(self, other: Progress) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<f64> for Progress {
    fn from(uses: f64) -> Self {
        Self::from_uses(uses)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.as_uses()
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Per-character, per-skill `(rank, progress)` record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProgress {
    pub rank: u32,
    #[serde(default)]
    pub progress: Progress,
}

impl SkillProgress {
    /// A freshly associated skill: rank 0, no progress.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(rank: u32, progress: Progress) -> Self {
        Self { rank, progress }
    }

    /// Builds a record from raw stored numbers, coercing malformed values
    /// (NaN, infinities, negatives) to zero. Fractional ranks are floored.
    pub fn from_raw(rank: f64, progress: f64) -> Self {
        Self {
            rank: whole_or_zero(rank),
            progress: Progress::from_uses(progress),
        }
    }
}
