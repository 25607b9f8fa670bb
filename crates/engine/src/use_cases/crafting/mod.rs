//! Crafting use cases.

use std::sync::Arc;

use manaweave_domain::game_systems::{BatchFormula, UnresolvedBatchFormula};
use manaweave_domain::{CraftingRules, DomainError};

mod plan_craft;

pub use plan_craft::{CraftPlan, CraftRequest, PlanCraft};

/// Container for crafting use cases.
pub struct CraftingUseCases {
    pub plan_craft: Arc<PlanCraft>,
}

impl CraftingUseCases {
    pub fn new(rules: CraftingRules) -> Self {
        Self::with_batch_formula(rules, Arc::new(UnresolvedBatchFormula))
    }

    pub fn with_batch_formula(
        rules: CraftingRules,
        batch_formula: Arc<dyn BatchFormula + Send + Sync>,
    ) -> Self {
        Self {
            plan_craft: Arc::new(PlanCraft::new(rules, batch_formula)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CraftingError {
    #[error("Crafting rule violated: {0}")]
    Domain(#[from] DomainError),
}
