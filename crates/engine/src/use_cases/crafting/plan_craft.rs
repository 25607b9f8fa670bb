//! Plan craft - checks a recipe against a character and costs it out.

use std::collections::BTreeMap;
use std::sync::Arc;

use manaweave_domain::game_systems::{
    can_batch_craft, daily_mana_cost, daily_points_with_cap, effective_research_cost,
    explosion_dice, meets_recipe_tier_gates, plan_batch, BatchFormula, BatchPlan, BatchRequest,
    CraftingDiscipline, RecipeKind,
};
use manaweave_domain::{CraftingRules, SubAttribute, Tier};
use serde::{Deserialize, Serialize};

use super::CraftingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftRequest {
    pub recipe: String,
    #[serde(default = "basic_recipe")]
    pub kind: RecipeKind,
    pub discipline: CraftingDiscipline,
    pub recipe_tier: Tier,
    pub actor_tier: Tier,
    pub crafting_skill_tier: Tier,
    /// Recipe Research tier, when the recipe still has to be learned.
    #[serde(default)]
    pub research_tier: Option<Tier>,
    #[serde(default)]
    pub rp_cost: f64,
    #[serde(default)]
    pub has_found_source: bool,
    #[serde(default)]
    pub cp_cost: u32,
    pub days: u32,
    /// Workstation and assistant bonus to daily points.
    #[serde(default)]
    pub point_bonus: i32,
    #[serde(default)]
    pub mana: BTreeMap<String, f64>,
    /// Requested batch size, if batch crafting.
    #[serde(default)]
    pub batch_quantity: Option<u32>,
}

fn basic_recipe() -> RecipeKind {
    RecipeKind::Basic
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftPlan {
    pub recipe: String,
    pub kind: RecipeKind,
    /// Sub-attribute the crafting skill advances.
    pub governs: SubAttribute,
    pub can_learn: bool,
    pub can_craft: bool,
    pub research_cost: f64,
    /// Downtime days of research needed at the capped daily rate.
    pub research_days: Option<u32>,
    pub daily_points: u32,
    pub daily_mana: Option<BTreeMap<String, f64>>,
    pub batch_eligible: bool,
    pub batch: Option<BatchPlan>,
    /// Explosion dice per mana type if the craft critically fails on its last day.
    pub max_explosion_dice: BTreeMap<String, u32>,
}

pub struct PlanCraft {
    rules: CraftingRules,
    batch_formula: Arc<dyn BatchFormula + Send + Sync>,
}

impl PlanCraft {
    pub fn new(rules: CraftingRules, batch_formula: Arc<dyn BatchFormula + Send + Sync>) -> Self {
        Self {
            rules,
            batch_formula,
        }
    }

    pub fn execute(&self, request: &CraftRequest) -> Result<CraftPlan, CraftingError> {
        let can_craft = meets_recipe_tier_gates(
            request.recipe_tier,
            request.actor_tier,
            request.crafting_skill_tier,
            None,
        );
        let can_learn = meets_recipe_tier_gates(
            request.recipe_tier,
            request.actor_tier,
            request.crafting_skill_tier,
            request.research_tier,
        );

        let daily_points = daily_points_with_cap(request.actor_tier, request.point_bonus);
        let research_cost = effective_research_cost(request.rp_cost, request.has_found_source);
        let research_days = research_days(research_cost, daily_points);

        let daily_mana = daily_mana_cost(&request.mana, request.days, self.rules.mana_rounding);
        let batch_eligible = can_batch_craft(request.recipe_tier, request.crafting_skill_tier);

        let batch = match request.batch_quantity {
            Some(quantity) => plan_batch(
                self.batch_formula.as_ref(),
                &BatchRequest {
                    recipe_tier: request.recipe_tier,
                    crafting_skill_tier: request.crafting_skill_tier,
                    quantity,
                    cp_cost: request.cp_cost,
                    days: request.days,
                },
            )?,
            None => None,
        };

        if !can_craft {
            tracing::info!(
                recipe = %request.recipe,
                recipe_tier = %request.recipe_tier,
                actor_tier = %request.actor_tier,
                crafting_skill_tier = %request.crafting_skill_tier,
                "Recipe is above the character's tier gates"
            );
        }

        Ok(CraftPlan {
            recipe: request.recipe.clone(),
            kind: request.kind,
            governs: request.discipline.governs(),
            can_learn,
            can_craft,
            research_cost,
            research_days,
            daily_points,
            daily_mana,
            batch_eligible,
            batch,
            max_explosion_dice: explosion_dice(&request.mana),
        })
    }
}

fn research_days(cost: f64, daily_points: u32) -> Option<u32> {
    if cost <= 0.0 {
        return Some(0);
    }
    if daily_points == 0 {
        return None;
    }
    let days = (cost / f64::from(daily_points)).ceil();
    Some(days.min(f64::from(u32::MAX)) as u32)
}
