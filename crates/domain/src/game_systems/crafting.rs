//! Crafting and recipe research rules.
//!
//! Downtime is spent one activity per day: crafting points (CP) or research
//! points (RP). Both come from the same per-tier table. Recipes are gated on
//! the character tier, the crafting skill tier and, when learning, the
//! Recipe Research tier. Mana for a recipe is paid per downtime day.
//!
//! Batch size and cost are not settled yet; [`BatchFormula`] is the seam a
//! concrete formula plugs into.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::common::finite_or_zero;
use crate::error::DomainError;
use crate::value_objects::{RollOutcome, SubAttribute, Tier};

/// Max daily points are this multiple of the tier's base points.
pub const DAILY_POINT_CAP_MULTIPLIER: u32 = 2;

/// Batch crafting needs the skill this many tiers above the recipe.
pub const BATCH_MIN_TIER_DELTA: usize = 2;

/// Successful crafts per mastery tier step.
pub const CRAFTS_PER_MASTERY_STEP: u32 = 5;

/// Mana of one type per explosion die (1d6) on a critical failure.
pub const MANA_PER_EXPLOSION_DIE: f64 = 25.0;

/// Sub-attribute governing Recipe Research.
pub const RECIPE_RESEARCH_GOVERNS: SubAttribute = SubAttribute::Focus;

/// Crafting disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CraftingDiscipline {
    Smithing,
    Alchemy,
    Textiles,
    Cooking,
    Jeweler,
    Engineering,
}

impl CraftingDiscipline {
    pub const ALL: [CraftingDiscipline; 6] = [
        Self::Smithing,
        Self::Alchemy,
        Self::Textiles,
        Self::Cooking,
        Self::Jeweler,
        Self::Engineering,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Smithing => "smithing",
            Self::Alchemy => "alchemy",
            Self::Textiles => "textiles",
            Self::Cooking => "cooking",
            Self::Jeweler => "jeweler",
            Self::Engineering => "engineering",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Smithing => "Smithing",
            Self::Alchemy => "Alchemy",
            Self::Textiles => "Textiles",
            Self::Cooking => "Cooking",
            Self::Jeweler => "Jeweler",
            Self::Engineering => "Engineering",
        }
    }

    pub fn governs(self) -> SubAttribute {
        match self {
            Self::Smithing => SubAttribute::Might,
            Self::Alchemy | Self::Textiles | Self::Engineering => SubAttribute::Insight,
            Self::Cooking => SubAttribute::Fortitude,
            Self::Jeweler => SubAttribute::Focus,
        }
    }
}

impl fmt::Display for CraftingDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CraftingDiscipline {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|discipline| discipline.key() == key)
            .ok_or_else(|| DomainError::parse(format!("Unknown crafting skill: {}", s)))
    }
}

/// What a downtime day is spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DowntimeActivity {
    Craft,
    Research,
}

impl DowntimeActivity {
    /// Crafting runs on consecutive days; stopping abandons the craft.
    pub fn requires_consecutive_days(self) -> bool {
        matches!(self, Self::Craft)
    }

    pub fn can_pause(self) -> bool {
        matches!(self, Self::Research)
    }
}

/// Basic recipes are top level; advanced recipes hang under a basic parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    Basic,
    Advanced,
}

/// How per-day mana is rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManaRounding {
    /// Keep fractional mana.
    #[default]
    None,
    Floor,
    Ceil,
    Nearest,
}

impl ManaRounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::None => value,
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
            Self::Nearest => value.round(),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Nearest => "nearest",
        }
    }
}

impl FromStr for ManaRounding {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "floor" => Ok(Self::Floor),
            "ceil" => Ok(Self::Ceil),
            "nearest" => Ok(Self::Nearest),
            _ => Err(DomainError::parse(format!("Unknown mana rounding: {}", s))),
        }
    }
}

/// Tunable crafting rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CraftingRules {
    pub mana_rounding: ManaRounding,
}

/// Base CP or RP earned per downtime day at `tier`.
pub fn points_per_downtime_day(tier: Tier) -> u32 {
    match tier {
        Tier::Normal | Tier::Initiate => 1,
        Tier::Novice | Tier::Apprentice => 2,
        Tier::Journeyman | Tier::Adept => 3,
        Tier::Master => 4,
        Tier::Grandmaster => 5,
        Tier::Avatar => 6,
        Tier::Ascendant => 7,
    }
}

/// Daily points after workstation and assistant bonuses, capped at twice the base.
///
/// # Examples
///
/// ```
/// use manaweave_domain::game_systems::daily_points_with_cap;
/// use manaweave_domain::value_objects::Tier;
///
/// assert_eq!(daily_points_with_cap(Tier::Master, 1), 5);
/// assert_eq!(daily_points_with_cap(Tier::Master, 9), 8);
/// assert_eq!(daily_points_with_cap(Tier::Normal, -3), 0);
/// ```
pub fn daily_points_with_cap(tier: Tier, bonus: i32) -> u32 {
    let base = points_per_downtime_day(tier);
    let cap = i64::from(base * DAILY_POINT_CAP_MULTIPLIER);
    let total = i64::from(base) + i64::from(bonus);
    // Clamped into 0..=cap, which always fits in u32.
    u32::try_from(total.clamp(0, cap)).unwrap_or(0)
}

/// Whether every tier involved reaches the recipe's tier.
///
/// `research_tier` only applies when learning the recipe.
pub fn meets_recipe_tier_gates(
    recipe_tier: Tier,
    actor_tier: Tier,
    crafting_skill_tier: Tier,
    research_tier: Option<Tier>,
) -> bool {
    actor_tier.meets(recipe_tier)
        && crafting_skill_tier.meets(recipe_tier)
        && research_tier.into_iter().all(|tier| tier.meets(recipe_tier))
}

/// Batch crafting is open once the skill is two tiers above the recipe.
pub fn can_batch_craft(recipe_tier: Tier, crafting_skill_tier: Tier) -> bool {
    crafting_skill_tier
        .index()
        .checked_sub(recipe_tier.index())
        .is_some_and(|delta| delta >= BATCH_MIN_TIER_DELTA)
}

/// Successful crafts needed to reach `mastery_tier` on a recipe.
pub fn mastery_crafts_required(mastery_tier: Tier) -> u32 {
    (mastery_tier.index() as u32 + 1) * CRAFTS_PER_MASTERY_STEP
}

/// Research cost after a found scroll or book halves it.
pub fn effective_research_cost(rp_cost: f64, has_found_source: bool) -> f64 {
    let cost = finite_or_zero(rp_cost);
    if cost <= 0.0 {
        return 0.0;
    }
    if has_found_source {
        cost / 2.0
    } else {
        cost
    }
}

/// Mana paid per downtime day: each type's total spread evenly over `days`.
///
/// Non-positive and non-finite totals are skipped. Returns `None` when `days`
/// is zero or no type is left.
pub fn daily_mana_cost<K>(
    mana: &BTreeMap<K, f64>,
    days: u32,
    rounding: ManaRounding,
) -> Option<BTreeMap<K, f64>>
where
    K: Ord + Clone,
{
    if days == 0 {
        return None;
    }

    let per_day: BTreeMap<K, f64> = mana
        .iter()
        .filter(|(_, total)| total.is_finite() && **total > 0.0)
        .map(|(kind, total)| (kind.clone(), rounding.apply(total / f64::from(days))))
        .collect();

    if per_day.is_empty() {
        None
    } else {
        Some(per_day)
    }
}

/// Explosion dice (d6) per mana type on a critical failure: one per full 25 invested.
///
/// Types with no full die are omitted; dice of different types stack.
pub fn explosion_dice<K>(mana_invested: &BTreeMap<K, f64>) -> BTreeMap<K, u32>
where
    K: Ord + Clone,
{
    mana_invested
        .iter()
        .filter(|(_, amount)| amount.is_finite() && **amount > 0.0)
        .filter_map(|(kind, amount)| {
            let dice = (amount / MANA_PER_EXPLOSION_DIE).floor();
            (dice >= 1.0).then(|| (kind.clone(), dice.min(f64::from(u32::MAX)) as u32))
        })
        .collect()
}

/// Per-recipe mastery: tier reached (if any) and successful crafts toward the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMastery {
    pub tier: Option<Tier>,
    pub crafts: u32,
}

impl RecipeMastery {
    /// Mastery tier the next successful crafts count toward.
    pub fn next_tier(&self) -> Option<Tier> {
        match self.tier {
            None => Some(Tier::Normal),
            Some(tier) => tier.next(),
        }
    }

    /// Records one craft. Successes count toward mastery; failures do not.
    /// Returns true when the craft reached a new mastery tier.
    pub fn record_craft(&mut self, outcome: RollOutcome) -> bool {
        if !outcome.is_success() {
            return false;
        }
        let Some(next) = self.next_tier() else {
            return false;
        };

        self.crafts += 1;
        if self.crafts >= mastery_crafts_required(next) {
            self.tier = Some(next);
            self.crafts = 0;
            return true;
        }
        false
    }
}

/// A batch craft request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub recipe_tier: Tier,
    pub crafting_skill_tier: Tier,
    pub quantity: u32,
    pub cp_cost: u32,
    pub days: u32,
}

/// Resolved size and cost of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPlan {
    pub quantity: u32,
    pub cp_cost: u32,
    pub days: u32,
}

/// Turns an eligible batch request into a plan.
pub trait BatchFormula {
    fn plan(&self, request: &BatchRequest) -> Option<BatchPlan>;
}

/// Formula used until batch size and cost are decided: never produces a plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnresolvedBatchFormula;

impl BatchFormula for UnresolvedBatchFormula {
    fn plan(&self, _request: &BatchRequest) -> Option<BatchPlan> {
        None
    }
}

/// Checks batch eligibility, then asks `formula` for the plan.
pub fn plan_batch(
    formula: &dyn BatchFormula,
    request: &BatchRequest,
) -> Result<Option<BatchPlan>, DomainError> {
    if !can_batch_craft(request.recipe_tier, request.crafting_skill_tier) {
        return Err(DomainError::constraint(format!(
            "Batch crafting a {} recipe needs crafting skill tier {} tiers higher (have {})",
            request.recipe_tier, BATCH_MIN_TIER_DELTA, request.crafting_skill_tier
        )));
    }
    Ok(formula.plan(request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_per_day_table() {
        let points: Vec<u32> = Tier::ALL.iter().map(|t| points_per_downtime_day(*t)).collect();
        assert_eq!(points, vec![1, 1, 2, 2, 3, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn daily_points_are_capped_at_double() {
        assert_eq!(daily_points_with_cap(Tier::Apprentice, 0), 2);
        assert_eq!(daily_points_with_cap(Tier::Apprentice, 1), 3);
        assert_eq!(daily_points_with_cap(Tier::Apprentice, 5), 4);
        assert_eq!(daily_points_with_cap(Tier::Ascendant, i32::MAX), 14);
        assert_eq!(daily_points_with_cap(Tier::Ascendant, i32::MIN), 0);
    }

    #[test]
    fn recipe_gates() {
        assert!(meets_recipe_tier_gates(Tier::Apprentice, Tier::Apprentice, Tier::Adept, None));
        assert!(!meets_recipe_tier_gates(Tier::Apprentice, Tier::Novice, Tier::Adept, None));
        assert!(!meets_recipe_tier_gates(Tier::Apprentice, Tier::Master, Tier::Novice, None));
        assert!(!meets_recipe_tier_gates(
            Tier::Apprentice,
            Tier::Master,
            Tier::Master,
            Some(Tier::Initiate)
        ));
        assert!(meets_recipe_tier_gates(
            Tier::Normal,
            Tier::Normal,
            Tier::Normal,
            Some(Tier::Normal)
        ));
    }

    #[test]
    fn batch_needs_two_tier_gap() {
        assert!(can_batch_craft(Tier::Normal, Tier::Novice));
        assert!(!can_batch_craft(Tier::Normal, Tier::Initiate));
        assert!(!can_batch_craft(Tier::Master, Tier::Normal));
    }

    #[test]
    fn mastery_requirements() {
        assert_eq!(mastery_crafts_required(Tier::Normal), 5);
        assert_eq!(mastery_crafts_required(Tier::Initiate), 10);
        assert_eq!(mastery_crafts_required(Tier::Ascendant), 50);
    }

    #[test]
    fn mastery_counts_only_successes() {
        let mut mastery = RecipeMastery::default();
        for _ in 0..4 {
            assert!(!mastery.record_craft(RollOutcome::Success));
        }
        assert!(!mastery.record_craft(RollOutcome::Fail));
        assert_eq!(mastery.crafts, 4);

        assert!(mastery.record_craft(RollOutcome::Crit));
        assert_eq!(mastery.tier, Some(Tier::Normal));
        assert_eq!(mastery.crafts, 0);
        assert_eq!(mastery.next_tier(), Some(Tier::Initiate));
    }

    #[test]
    fn mastery_stops_at_ascendant() {
        let mut mastery = RecipeMastery {
            tier: Some(Tier::Ascendant),
            crafts: 0,
        };
        assert!(!mastery.record_craft(RollOutcome::Success));
        assert_eq!(mastery.crafts, 0);
    }

    #[test]
    fn found_source_halves_research_cost() {
        assert_eq!(effective_research_cost(3.0, true), 1.5);
        assert_eq!(effective_research_cost(3.0, false), 3.0);
        assert_eq!(effective_research_cost(0.0, true), 0.0);
        assert_eq!(effective_research_cost(-2.0, false), 0.0);
        assert_eq!(effective_research_cost(f64::NAN, false), 0.0);
    }

    #[test]
    fn daily_mana_spreads_over_days() {
        let mana: BTreeMap<&str, f64> = [("fire", 50.0), ("water", 25.0), ("earth", 0.0)]
            .into_iter()
            .collect();

        let raw = daily_mana_cost(&mana, 2, ManaRounding::None).expect("some mana");
        assert_eq!(raw.get("fire"), Some(&25.0));
        assert_eq!(raw.get("water"), Some(&12.5));
        assert!(!raw.contains_key("earth"));

        let ceil = daily_mana_cost(&mana, 2, ManaRounding::Ceil).expect("some mana");
        assert_eq!(ceil.get("water"), Some(&13.0));
        let floor = daily_mana_cost(&mana, 2, ManaRounding::Floor).expect("some mana");
        assert_eq!(floor.get("water"), Some(&12.0));
        let nearest = daily_mana_cost(&mana, 2, ManaRounding::Nearest).expect("some mana");
        assert_eq!(nearest.get("water"), Some(&13.0));
    }

    #[test]
    fn daily_mana_is_none_without_days_or_mana() {
        let mana: BTreeMap<&str, f64> = [("fire", 50.0)].into_iter().collect();
        assert_eq!(daily_mana_cost(&mana, 0, ManaRounding::None), None);

        let empty: BTreeMap<&str, f64> = [("fire", -5.0), ("wind", f64::NAN)].into_iter().collect();
        assert_eq!(daily_mana_cost(&empty, 3, ManaRounding::None), None);
    }

    #[test]
    fn explosion_dice_per_type() {
        let invested: BTreeMap<&str, f64> =
            [("fire", 50.0), ("water", 24.9), ("shadow", 75.0)].into_iter().collect();
        let dice = explosion_dice(&invested);

        assert_eq!(dice.get("fire"), Some(&2));
        assert_eq!(dice.get("shadow"), Some(&3));
        assert!(!dice.contains_key("water"));
    }

    #[test]
    fn rounding_parses() {
        assert_eq!("Ceil".parse::<ManaRounding>(), Ok(ManaRounding::Ceil));
        assert!("sideways".parse::<ManaRounding>().is_err());
        assert_eq!(ManaRounding::default(), ManaRounding::None);
    }

    #[test]
    fn disciplines_govern_sub_attributes() {
        assert_eq!(CraftingDiscipline::Smithing.governs(), SubAttribute::Might);
        assert_eq!(CraftingDiscipline::Cooking.governs(), SubAttribute::Fortitude);
        assert_eq!(CraftingDiscipline::Jeweler.governs(), SubAttribute::Focus);
        assert_eq!("alchemy".parse::<CraftingDiscipline>(), Ok(CraftingDiscipline::Alchemy));
        assert_eq!(RECIPE_RESEARCH_GOVERNS, SubAttribute::Focus);
    }

    #[test]
    fn downtime_activities() {
        assert!(DowntimeActivity::Craft.requires_consecutive_days());
        assert!(!DowntimeActivity::Craft.can_pause());
        assert!(DowntimeActivity::Research.can_pause());
    }

    struct DoubleOutput;

    impl BatchFormula for DoubleOutput {
        fn plan(&self, request: &BatchRequest) -> Option<BatchPlan> {
            Some(BatchPlan {
                quantity: request.quantity * 2,
                cp_cost: request.cp_cost,
                days: request.days,
            })
        }
    }

    fn request(recipe_tier: Tier, crafting_skill_tier: Tier) -> BatchRequest {
        BatchRequest {
            recipe_tier,
            crafting_skill_tier,
            quantity: 3,
            cp_cost: 2,
            days: 1,
        }
    }

    #[test]
    fn plan_batch_rejects_ineligible_requests() {
        let result = plan_batch(&DoubleOutput, &request(Tier::Novice, Tier::Apprentice));
        assert!(matches!(result, Err(DomainError::Constraint(_))));
    }

    #[test]
    fn plan_batch_defers_to_the_formula() {
        let eligible = request(Tier::Normal, Tier::Apprentice);

        assert_eq!(plan_batch(&UnresolvedBatchFormula, &eligible), Ok(None));
        let plan = plan_batch(&DoubleOutput, &eligible).expect("eligible");
        assert_eq!(plan.map(|p| p.quantity), Some(6));
    }
}
