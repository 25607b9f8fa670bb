//! Record skill use - applies one roll outcome to a character's skill.

use std::sync::Arc;

use manaweave_domain::game_systems::sub_attribute_gain_for_rank_ups;
use manaweave_domain::{
    AdvancementResult, CharacterId, ProgressionRules, RollOutcome, SkillId, SkillKind,
    SkillProgress, Tier,
};
use serde::Serialize;

use super::{ProgressionError, RecordLocks};
use crate::infrastructure::ports::ProgressionRepo;

/// A single roll against a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillUse {
    pub character_id: CharacterId,
    pub skill_id: SkillId,
    /// Character tier at the time of the roll.
    pub tier: Tier,
    pub is_advanced: bool,
    pub kind: SkillKind,
    pub outcome: RollOutcome,
}

/// What one skill use changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillUseOutcome {
    pub previous: SkillProgress,
    pub result: AdvancementResult,
    /// Percentage points to add to the skill's governing sub-attribute.
    pub attribute_gain: f64,
}

/// Applies roll outcomes to stored skill records.
///
/// Loads the record (a skill never used before starts at rank 0), runs the
/// advancement rules, saves the record when it changed and reports the
/// sub-attribute gain earned by any rank-ups.
pub struct RecordSkillUse {
    repo: Arc<dyn ProgressionRepo>,
    rules: ProgressionRules,
    locks: Arc<RecordLocks>,
}

impl RecordSkillUse {
    pub fn new(
        repo: Arc<dyn ProgressionRepo>,
        rules: ProgressionRules,
        locks: Arc<RecordLocks>,
    ) -> Self {
        Self { repo, rules, locks }
    }

    pub async fn execute(&self, skill_use: SkillUse) -> Result<SkillUseOutcome, ProgressionError> {
        let SkillUse {
            character_id,
            skill_id,
            tier,
            is_advanced,
            kind,
            outcome,
        } = skill_use;

        let _guard = self.locks.acquire(character_id, skill_id).await;

        let previous = self
            .repo
            .get_progress(character_id, skill_id)
            .await?
            .unwrap_or_default();

        let result = self.rules.apply_outcome(previous, outcome, tier, is_advanced);

        if result.record != previous {
            self.repo
                .save_progress(character_id, skill_id, &result.record)
                .await?;
        }

        let attribute_gain = sub_attribute_gain_for_rank_ups(tier, result.rank_ups, kind);

        if result.advanced_blocked {
            tracing::debug!(
                character_id = %character_id,
                skill_id = %skill_id,
                tier = %tier,
                unlock_tier = %self.rules.advanced_unlock_tier,
                "Advanced skill is locked at this tier"
            );
        } else if result.rank_ups > 0 {
            tracing::info!(
                character_id = %character_id,
                skill_id = %skill_id,
                outcome = %outcome,
                from_rank = previous.rank,
                to_rank = result.record.rank,
                attribute_gain,
                "Skill ranked up"
            );
        } else if result.capped && result.record == previous {
            tracing::debug!(
                character_id = %character_id,
                skill_id = %skill_id,
                rank = previous.rank,
                tier = %tier,
                "Skill at rank cap, no progress awarded"
            );
        } else {
            tracing::debug!(
                character_id = %character_id,
                skill_id = %skill_id,
                outcome = %outcome,
                progress = %result.record.progress,
                "Skill progress recorded"
            );
        }

        Ok(SkillUseOutcome {
            previous,
            result,
            attribute_gain,
        })
    }
}
