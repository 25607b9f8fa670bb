//! Sub-attribute gains from skill rank-ups and ability tier-ups.
//!
//! All gains are in percentage points added to the governing sub-attribute.

use serde::{Deserialize, Serialize};

use crate::value_objects::Tier;

/// Ability tier-ups add attributes at this fraction of the tier modifier.
pub const ABILITY_ATTR_MOD: f64 = 0.5;

/// Crafting skills and Recipe Research add attributes at this fraction of the normal rate.
pub const CRAFTING_SKILL_ATTR_RATE_MOD: f64 = 0.5;

/// How a skill feeds its governing sub-attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillKind {
    #[default]
    Standard,
    Crafting,
    RecipeResearch,
}

impl SkillKind {
    /// Multiplier on the tier modifier for each rank-up.
    pub fn attribute_rate(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Crafting | Self::RecipeResearch => CRAFTING_SKILL_ATTR_RATE_MOD,
        }
    }
}

/// Gain for one skill rank-up at `tier`.
pub fn sub_attribute_gain_on_skill_rank_up(tier: Tier) -> f64 {
    tier.tier_modifier_percent()
}

/// Gain for one ability tier-up at `tier`.
pub fn sub_attribute_gain_on_ability_tier_up(tier: Tier) -> f64 {
    tier.tier_modifier_percent() * ABILITY_ATTR_MOD
}

/// Total gain for `rank_ups` rank-ups of a skill of `kind` at `tier`.
pub fn sub_attribute_gain_for_rank_ups(tier: Tier, rank_ups: u32, kind: SkillKind) -> f64 {
    sub_attribute_gain_on_skill_rank_up(tier) * kind.attribute_rate() * f64::from(rank_ups)
}
