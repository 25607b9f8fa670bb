//! Tier value object - the ten ordered proficiency bands.
//!
//! Characters, skills, abilities and recipe mastery tracks all share the same
//! tier ladder. Gating comparisons are always "at least" comparisons on the
//! ladder index, which the derived `Ord` implementation encodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the ten canonical tiers, ordered from `Normal` (index 0) to
/// `Ascendant` (index 9).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Normal,
    Initiate,
    Novice,
    Apprentice,
    Journeyman,
    Adept,
    Master,
    Grandmaster,
    Avatar,
    Ascendant,
}

impl Tier {
    /// Canonical tier order.
    pub const ALL: [Tier; 10] = [
        Tier::Normal,
        Tier::Initiate,
        Tier::Novice,
        Tier::Apprentice,
        Tier::Journeyman,
        Tier::Adept,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Avatar,
        Tier::Ascendant,
    ];

    /// Position on the ladder (normal = 0 ... ascendant = 9).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Tier::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable lowercase key used in saved data and configuration.
    pub fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Initiate => "initiate",
            Self::Novice => "novice",
            Self::Apprentice => "apprentice",
            Self::Journeyman => "journeyman",
            Self::Adept => "adept",
            Self::Master => "master",
            Self::Grandmaster => "grandmaster",
            Self::Avatar => "avatar",
            Self::Ascendant => "ascendant",
        }
    }

    /// Player-facing label.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Initiate => "Initiate",
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Journeyman => "Journeyman",
            Self::Adept => "Adept",
            Self::Master => "Master",
            Self::Grandmaster => "Grandmaster",
            Self::Avatar => "Avatar",
            Self::Ascendant => "Ascendant",
        }
    }

    /// The next tier up, or `None` at the top of the ladder.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// True when this tier is at or above `required`.
    pub fn meets(self, required: Tier) -> bool {
        self >= required
    }

    /// Highest skill rank a character of this tier may hold.
    pub fn skill_rank_cap(self) -> u32 {
        match self {
            Self::Normal => 3,
            Self::Initiate => 5,
            Self::Novice => 7,
            Self::Apprentice => 10,
            Self::Journeyman => 13,
            Self::Adept => 16,
            Self::Master => 20,
            Self::Grandmaster => 25,
            Self::Avatar => 30,
            Self::Ascendant => 40,
        }
    }

    /// Tier modifier: percentage points added to the governing sub-attribute
    /// on a skill rank-up at this tier.
    pub fn tier_modifier_percent(self) -> f64 {
        match self {
            Self::Normal => 2.0,
            Self::Initiate => 1.75,
            Self::Novice => 1.5,
            Self::Apprentice => 1.25,
            Self::Journeyman => 1.0,
            Self::Adept => 0.9,
            Self::Master => 0.8,
            Self::Grandmaster => 0.7,
            Self::Avatar => 0.6,
            Self::Ascendant => 0.5,
        }
    }

    /// Parses a tier key, falling back to `Normal` for anything unknown.
    ///
    /// Tier lookups coming from saved character data are treated leniently:
    /// a missing or misspelled key behaves like the lowest tier.
    pub fn from_key_lenient(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Tier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tier| tier.key() == key)
            .ok_or_else(|| DomainError::parse(format!("Unknown tier: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_ladder() {
        for (i, tier) in Tier::ALL.iter().enumerate() {
            assert_eq!(tier.index(), i);
            assert_eq!(Tier::from_index(i), Some(*tier));
        }
        assert_eq!(Tier::from_index(10), None);
    }

    #[test]
    fn ordering_follows_ladder() {
        assert!(Tier::Ascendant > Tier::Avatar);
        assert!(Tier::Apprentice.meets(Tier::Apprentice));
        assert!(Tier::Master.meets(Tier::Apprentice));
        assert!(!Tier::Novice.meets(Tier::Apprentice));
    }

    #[test]
    fn rank_caps_are_locked() {
        let caps: Vec<u32> = Tier::ALL.iter().map(|t| t.skill_rank_cap()).collect();
        assert_eq!(caps, vec![3, 5, 7, 10, 13, 16, 20, 25, 30, 40]);
    }

    #[test]
    fn rank_caps_never_decrease_up_the_ladder() {
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0].skill_rank_cap() < pair[1].skill_rank_cap());
        }
    }

    #[test]
    fn tier_modifiers_are_locked() {
        assert_eq!(Tier::Normal.tier_modifier_percent(), 2.0);
        assert_eq!(Tier::Apprentice.tier_modifier_percent(), 1.25);
        assert_eq!(Tier::Ascendant.tier_modifier_percent(), 0.5);
    }

    #[test]
    fn next_stops_at_ascendant() {
        assert_eq!(Tier::Normal.next(), Some(Tier::Initiate));
        assert_eq!(Tier::Ascendant.next(), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Journeyman".parse::<Tier>(), Ok(Tier::Journeyman));
        assert_eq!(" ADEPT ".parse::<Tier>(), Ok(Tier::Adept));
        assert!("legend".parse::<Tier>().is_err());
    }

    #[test]
    fn lenient_parse_falls_back_to_normal() {
        assert_eq!(Tier::from_key_lenient("master"), Tier::Master);
        assert_eq!(Tier::from_key_lenient(""), Tier::Normal);
        assert_eq!(Tier::from_key_lenient("legend"), Tier::Normal);
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Tier::Grandmaster).expect("valid json");
        assert_eq!(json, "\"grandmaster\"");
        let tier: Tier = serde_json::from_str("\"avatar\"").expect("valid json");
        assert_eq!(tier, Tier::Avatar);
    }
}
