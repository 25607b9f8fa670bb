//! Rules engines for mana derivation, skill progression and crafting.
//!
//! Everything here is pure and synchronous: callers pass in the character
//! tier, roll outcomes and stored records, and get new values back.
//!
//! # Modules
//!
//! - `mana`: combination tables (base + base, hybrid + base) and pool formulas
//! - `progression`: the skill advancement state machine
//! - `attribute_gain`: sub-attribute gains from rank-ups and tier-ups
//! - `crafting`: downtime points, recipe gates, batch and mastery rules

mod attribute_gain;
mod crafting;
mod mana;
mod progression;

pub use attribute_gain::{
    sub_attribute_gain_for_rank_ups, sub_attribute_gain_on_ability_tier_up,
    sub_attribute_gain_on_skill_rank_up, SkillKind, ABILITY_ATTR_MOD,
    CRAFTING_SKILL_ATTR_RATE_MOD,
};

pub use crafting::{
    can_batch_craft, daily_mana_cost, daily_points_with_cap, effective_research_cost,
    explosion_dice, mastery_crafts_required, meets_recipe_tier_gates, plan_batch,
    points_per_downtime_day, BatchFormula, BatchPlan, BatchRequest, CraftingDiscipline,
    CraftingRules, DowntimeActivity, ManaRounding, RecipeKind, RecipeMastery,
    UnresolvedBatchFormula, BATCH_MIN_TIER_DELTA, CRAFTS_PER_MASTERY_STEP,
    DAILY_POINT_CAP_MULTIPLIER, MANA_PER_EXPLOSION_DIE, RECIPE_RESEARCH_GOVERNS,
};

pub use mana::{
    aggregate_primitive, apply_tiered_bonus, base_mana_pool, calc_eldritch_mana,
    calc_hybrid_mana, combine_two_values, effectiveness_bonus, eldritch_components,
    eldritch_options, hybrid_components, pair_key, pool_from_percent, resolve,
    resolve_composite, resolve_eldritch, resolve_hybrid, BonusRate, BASE_EMPOWER_EFFECT_BONUS,
    BASE_EMPOWER_MANA_BONUS, HYBRID_SPEC_EFFECT_BONUS, HYBRID_SPEC_MANA_BONUS,
    PAIR_KEY_SEPARATOR, PERCENT_PER_BAND, POOL_PER_BAND,
};

pub use progression::{
    ability_track_gain, apply_outcome, rank_cap, required_to_advance, uses_to_advance,
    AdvancementResult, OutcomeAwards, ProgressionRules, BASE_USES_TO_ADVANCE, USES_PER_RANK,
};
