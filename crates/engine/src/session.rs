//! JSON session input and report.
//!
//! A session describes one character: its tier, sub-attributes and mana
//! investments, a list of skills with the roll outcomes to apply, an optional
//! tier promotion, mana combinations to resolve, and recipes to plan.
//!
//! ```json
//! {
//!   "character": {
//!     "tier": "normal",
//!     "promoteTo": "initiate",
//!     "subAttributes": { "might": 37, "fortitude": 22 },
//!     "empower": { "enhancement": 1 },
//!     "specializations": { "metal": 1 },
//!     "blocked": ["shadow"]
//!   },
//!   "skills": [
//!     { "name": "Athletics", "governs": "might", "outcomes": ["success", "crit"] }
//!   ],
//!   "combinations": [["enhancement", "earth"]],
//!   "crafts": []
//! }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use manaweave_domain::game_systems::sub_attribute_gain_for_rank_ups;
use manaweave_domain::{
    AdvancementResult, CharacterId, DomainError, RollOutcome, SkillId, SkillKind, SkillProgress,
    SubAttribute, Tier,
};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::use_cases::crafting::{CraftPlan, CraftRequest};
use crate::use_cases::mana::{Combination, ManaSheet, ManaSheetRequest};
use crate::use_cases::progression::{ProgressionError, SkillUse, SkillUseOutcome};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub character: CharacterInput,
    #[serde(default)]
    pub skills: Vec<SkillInput>,
    #[serde(default)]
    pub combinations: Vec<(String, String)>,
    #[serde(default)]
    pub crafts: Vec<CraftRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInput {
    /// Tier key; unknown keys are treated as `normal`.
    #[serde(default)]
    pub tier: String,
    /// Tier to promote to after all skill uses.
    #[serde(default)]
    pub promote_to: Option<String>,
    #[serde(flatten)]
    pub mana: ManaSheetRequest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInput {
    pub name: String,
    #[serde(default)]
    pub governs: Option<SubAttribute>,
    #[serde(default)]
    pub kind: SkillKind,
    #[serde(default)]
    pub advanced: bool,
    /// Stored rank; malformed values are coerced to 0.
    #[serde(default)]
    pub rank: f64,
    #[serde(default)]
    pub progress: f64,
    /// Outcome kinds; anything unrecognized counts as a failure.
    #[serde(default)]
    pub outcomes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub character_id: CharacterId,
    pub tier: Tier,
    pub skills: Vec<SkillReport>,
    pub promotion: Option<PromotionReport>,
    /// Sub-attributes after every gain in this session.
    pub sub_attributes: BTreeMap<SubAttribute, f64>,
    pub mana: ManaSheet,
    pub combinations: Vec<Combination>,
    pub crafts: Vec<CraftReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillReport {
    pub name: String,
    pub skill_id: SkillId,
    pub uses: Vec<SkillUseOutcome>,
    pub record: SkillProgress,
    pub rank_ups: u32,
    pub attribute_gain: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionReport {
    pub tier: Tier,
    pub settled: Vec<SettledSkillReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettledSkillReport {
    pub name: String,
    pub result: AdvancementResult,
    pub attribute_gain: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftReport {
    pub recipe: String,
    pub plan: Option<CraftPlan>,
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid session: {0}")]
    Domain(#[from] DomainError),
    #[error("Progression failed: {0}")]
    Progression(#[from] ProgressionError),
}

struct TrackedSkill {
    name: String,
    governs: Option<SubAttribute>,
    kind: SkillKind,
}

/// Runs a whole session against the app and builds the report.
pub async fn run_session(app: &App, session: Session) -> Result<SessionReport, SessionError> {
    let Session {
        character,
        skills,
        combinations,
        crafts,
    } = session;

    let character_id = CharacterId::new();
    let tier = Tier::from_key_lenient(&character.tier);
    let mut sub_attributes = character.mana.sub_attributes.clone();
    let mut tracked: HashMap<SkillId, TrackedSkill> = HashMap::new();
    let mut advanced_skills = HashSet::new();
    let mut skill_reports = Vec::with_capacity(skills.len());

    tracing::info!(
        character_id = %character_id,
        tier = %tier,
        skills = skills.len(),
        "Running session"
    );

    for skill in skills {
        if skill.name.trim().is_empty() {
            return Err(DomainError::validation("skill name must not be empty").into());
        }

        let skill_id = SkillId::new();
        // Stored progress may already pay for rank-ups; resolve it before any roll.
        let seeded = app.config.progression.settle(
            SkillProgress::from_raw(skill.rank, skill.progress),
            tier,
            skill.advanced,
        );
        let seed = seeded.record;
        app.repositories
            .progression
            .save_progress(character_id, skill_id, &seed)
            .await
            .map_err(ProgressionError::from)?;

        let mut uses = Vec::with_capacity(skill.outcomes.len());
        for kind in &skill.outcomes {
            let outcome = app
                .use_cases
                .progression
                .record_skill_use
                .execute(SkillUse {
                    character_id,
                    skill_id,
                    tier,
                    is_advanced: skill.advanced,
                    kind: skill.kind,
                    outcome: RollOutcome::from_kind_lenient(kind),
                })
                .await?;
            uses.push(outcome);
        }

        let rank_ups: u32 = seeded.rank_ups + uses.iter().map(|u| u.result.rank_ups).sum::<u32>();
        let attribute_gain: f64 =
            sub_attribute_gain_for_rank_ups(tier, seeded.rank_ups, skill.kind)
                + uses.iter().map(|u| u.attribute_gain).sum::<f64>();
        let record = uses.last().map_or(seed, |u| u.result.record);
        apply_gain(&mut sub_attributes, &skill.name, skill.governs, attribute_gain);

        skill_reports.push(SkillReport {
            name: skill.name.clone(),
            skill_id,
            uses,
            record,
            rank_ups,
            attribute_gain,
        });
        if skill.advanced {
            advanced_skills.insert(skill_id);
        }
        tracked.insert(
            skill_id,
            TrackedSkill {
                name: skill.name,
                governs: skill.governs,
                kind: skill.kind,
            },
        );
    }

    let promotion = match character.promote_to.as_deref().map(Tier::from_key_lenient) {
        Some(new_tier) if new_tier > tier => {
            let settled = app
                .use_cases
                .progression
                .settle_skills
                .execute(character_id, new_tier, &advanced_skills)
                .await?;

            let settled: Vec<SettledSkillReport> = settled
                .into_iter()
                .filter_map(|s| {
                    let skill = tracked.get(&s.skill_id)?;
                    let gain =
                        sub_attribute_gain_for_rank_ups(new_tier, s.result.rank_ups, skill.kind);
                    apply_gain(&mut sub_attributes, &skill.name, skill.governs, gain);
                    Some(SettledSkillReport {
                        name: skill.name.clone(),
                        result: s.result,
                        attribute_gain: gain,
                    })
                })
                .collect();

            Some(PromotionReport {
                tier: new_tier,
                settled,
            })
        }
        Some(new_tier) => {
            tracing::warn!(
                tier = %tier,
                promote_to = %new_tier,
                "Promotion target is not above the current tier, skipping"
            );
            None
        }
        None => None,
    };

    let sheet_request = ManaSheetRequest {
        sub_attributes: sub_attributes.clone(),
        ..character.mana
    };
    let build_sheet = &app.use_cases.mana.build_sheet;
    let mana = build_sheet.execute(&sheet_request);
    let combinations: Vec<Combination> = combinations
        .iter()
        .map(|(first, second)| build_sheet.combine(&mana, first, second))
        .collect();

    let crafts: Vec<CraftReport> = crafts
        .iter()
        .map(|request| match app.use_cases.crafting.plan_craft.execute(request) {
            Ok(plan) => CraftReport {
                recipe: request.recipe.clone(),
                plan: Some(plan),
                error: None,
            },
            Err(e) => {
                tracing::warn!(recipe = %request.recipe, error = %e, "Craft plan rejected");
                CraftReport {
                    recipe: request.recipe.clone(),
                    plan: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    Ok(SessionReport {
        character_id,
        tier,
        skills: skill_reports,
        promotion,
        sub_attributes,
        mana,
        combinations,
        crafts,
    })
}

fn apply_gain(
    sub_attributes: &mut BTreeMap<SubAttribute, f64>,
    skill: &str,
    governs: Option<SubAttribute>,
    gain: f64,
) {
    if gain <= 0.0 {
        return;
    }
    match governs {
        Some(sub) => *sub_attributes.entry(sub).or_insert(0.0) += gain,
        None => tracing::warn!(
            skill,
            gain,
            "Skill ranked up but has no governing sub-attribute"
        ),
    }
}
