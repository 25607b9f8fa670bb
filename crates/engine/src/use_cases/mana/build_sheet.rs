//! Build mana sheet - derives a character's mana pools from sub-attributes.

use std::collections::{BTreeMap, BTreeSet};

use manaweave_domain::game_systems::{
    aggregate_primitive, base_mana_pool, calc_eldritch_mana, calc_hybrid_mana,
    eldritch_components, hybrid_components, resolve_composite, BASE_EMPOWER_EFFECT_BONUS,
    HYBRID_SPEC_EFFECT_BONUS,
};
use manaweave_domain::{BaseMana, EldritchMana, HybridMana, ManaType, SubAttribute, Tier};
use serde::{Deserialize, Serialize};

/// Inputs for a mana sheet. Missing sub-attributes count as 0%.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManaSheetRequest {
    pub sub_attributes: BTreeMap<SubAttribute, f64>,
    /// Empower levels per base type.
    pub empower: BTreeMap<BaseMana, i32>,
    /// Specialization levels per hybrid type.
    pub specializations: BTreeMap<HybridMana, i32>,
    /// Base types left out of force mana.
    pub blocked: BTreeSet<BaseMana>,
}

impl ManaSheetRequest {
    fn empower_levels(&self, base: BaseMana) -> i32 {
        self.empower.get(&base).copied().unwrap_or(0)
    }

    fn spec_levels(&self, hybrid: HybridMana) -> i32 {
        self.specializations.get(&hybrid).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManaSheet {
    pub base: BTreeMap<BaseMana, u32>,
    pub force: u32,
    /// Ability effectiveness bonus (percentage points) per empowered base type.
    pub effectiveness: BTreeMap<BaseMana, u64>,
    #[serde(skip)]
    specializations: BTreeMap<HybridMana, i32>,
}

impl ManaSheet {
    pub fn base_pool(&self, base: BaseMana) -> u32 {
        self.base.get(&base).copied().unwrap_or(0)
    }

    /// `None` when the hybrid has no recipe.
    pub fn hybrid_pool(&self, hybrid: HybridMana) -> Option<u32> {
        let (a, b) = hybrid_components(hybrid)?;
        let spec = self.specializations.get(&hybrid).copied().unwrap_or(0);
        Some(calc_hybrid_mana(self.base_pool(a), self.base_pool(b), spec))
    }

    pub fn eldritch_pool(&self, eldritch: EldritchMana) -> Option<u32> {
        let (hybrid, added) = eldritch_components(eldritch)?;
        Some(calc_eldritch_mana(self.hybrid_pool(hybrid)?, self.base_pool(added)))
    }

    pub fn pool(&self, mana: ManaType) -> Option<u32> {
        match mana {
            ManaType::Base(base) => Some(self.base_pool(base)),
            ManaType::Hybrid(hybrid) => self.hybrid_pool(hybrid),
            ManaType::Eldritch(eldritch) => self.eldritch_pool(eldritch),
        }
    }
}

/// Result of combining two mana identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    pub first: String,
    pub second: String,
    pub result: Option<ManaType>,
    pub pool: Option<u32>,
    /// Tier a newly learned ability of the resulting type starts at.
    pub ability_start_tier: Option<Tier>,
}

/// Pure derivation of pools; holds no state.
#[derive(Debug, Default)]
pub struct BuildManaSheet;

impl BuildManaSheet {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, request: &ManaSheetRequest) -> ManaSheet {
        let base: BTreeMap<BaseMana, u32> = BaseMana::ALL
            .iter()
            .map(|b| {
                let percent = request
                    .sub_attributes
                    .get(&SubAttribute::governing(*b))
                    .copied()
                    .unwrap_or(0.0);
                (*b, base_mana_pool(percent, request.empower_levels(*b)))
            })
            .collect();

        let force = aggregate_primitive(&base, &request.blocked);

        let effectiveness = BaseMana::ALL
            .iter()
            .filter(|b| request.empower_levels(**b) > 0)
            .map(|b| (*b, BASE_EMPOWER_EFFECT_BONUS.total_points(request.empower_levels(*b))))
            .collect();

        tracing::debug!(force, blocked = request.blocked.len(), "Built mana sheet");

        ManaSheet {
            base,
            force,
            effectiveness,
            specializations: request.specializations.clone(),
        }
    }

    /// Resolves two identifiers against the combination tables and sizes the result.
    pub fn combine(&self, sheet: &ManaSheet, first: &str, second: &str) -> Combination {
        let result = resolve_composite(first, second);
        if result.is_none() {
            tracing::debug!(first, second, "No composite mana for pair");
        }

        Combination {
            first: first.to_string(),
            second: second.to_string(),
            result,
            pool: result.and_then(|mana| sheet.pool(mana)),
            ability_start_tier: result.and_then(|mana| mana.tier().ability_start_tier()),
        }
    }

    /// Effectiveness bonus (percentage points) for a hybrid's specialization.
    pub fn specialization_effectiveness(
        &self,
        request: &ManaSheetRequest,
        hybrid: HybridMana,
    ) -> u64 {
        HYBRID_SPEC_EFFECT_BONUS.total_points(request.spec_levels(hybrid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ManaSheetRequest {
        ManaSheetRequest {
            sub_attributes: [
                (SubAttribute::Might, 37.0),
                (SubAttribute::Fortitude, 22.0),
                (SubAttribute::Presence, 41.0),
            ]
            .into_iter()
            .collect(),
            empower: [(BaseMana::Enhancement, 1)].into_iter().collect(),
            specializations: [(HybridMana::Metal, 1)].into_iter().collect(),
            blocked: BTreeSet::new(),
        }
    }

    #[test]
    fn base_pools_follow_governing_sub_attributes() {
        let sheet = BuildManaSheet::new().execute(&request());

        assert_eq!(sheet.base_pool(BaseMana::Enhancement), 84);
        assert_eq!(sheet.base_pool(BaseMana::Earth), 40);
        assert_eq!(sheet.base_pool(BaseMana::Fire), 80);
        assert_eq!(sheet.base_pool(BaseMana::Water), 0);
        // (84 + 40 + 80) / 9
        assert_eq!(sheet.force, 22);
        assert_eq!(sheet.effectiveness.get(&BaseMana::Enhancement), Some(&25));
        assert!(!sheet.effectiveness.contains_key(&BaseMana::Earth));
    }

    #[test]
    fn blocked_bases_leave_force_mana() {
        let mut request = request();
        request.blocked = BaseMana::ALL
            .iter()
            .copied()
            .filter(|b| *b != BaseMana::Enhancement && *b != BaseMana::Fire)
            .collect();

        let sheet = BuildManaSheet::new().execute(&request);

        assert_eq!(sheet.force, 82);
    }

    #[test]
    fn combining_bases_sizes_the_hybrid() {
        let use_case = BuildManaSheet::new();
        let sheet = use_case.execute(&request());

        let metal = use_case.combine(&sheet, "earth", "enhancement");

        assert_eq!(metal.result, Some(ManaType::Hybrid(HybridMana::Metal)));
        // floor((84 + 40) / 2) = 62, then +20% specialization
        assert_eq!(metal.pool, Some(74));
        assert_eq!(metal.ability_start_tier, Some(Tier::Apprentice));
    }

    #[test]
    fn combining_a_hybrid_and_base_sizes_the_eldritch() {
        let use_case = BuildManaSheet::new();
        let sheet = use_case.execute(&request());

        let combo = use_case.combine(&sheet, "fire", "crystal");

        assert_eq!(combo.result, Some(ManaType::Eldritch(EldritchMana::Overcharge)));
        // crystal = floor((40 + 0) / 2) = 20; overcharge = floor((20 + 80) / 2)
        assert_eq!(combo.pool, Some(50));
        assert_eq!(combo.ability_start_tier, Some(Tier::Master));
    }

    #[test]
    fn unmapped_pairs_have_no_result() {
        let use_case = BuildManaSheet::new();
        let sheet = use_case.execute(&request());

        let combo = use_case.combine(&sheet, "fire", "fire");

        assert_eq!(combo.result, None);
        assert_eq!(combo.pool, None);
        assert_eq!(combo.ability_start_tier, None);
    }

    #[test]
    fn specialization_effectiveness() {
        let use_case = BuildManaSheet::new();
        assert_eq!(use_case.specialization_effectiveness(&request(), HybridMana::Metal), 50);
        assert_eq!(use_case.specialization_effectiveness(&request(), HybridMana::Ice), 0);
    }
}
