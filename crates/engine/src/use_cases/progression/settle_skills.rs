//! Settle skills - resolves banked progress after a character's tier rises.

use std::collections::HashSet;
use std::sync::Arc;

use manaweave_domain::{AdvancementResult, CharacterId, ProgressionRules, SkillId, Tier};
use serde::Serialize;

use super::{ProgressionError, RecordLocks};
use crate::infrastructure::ports::ProgressionRepo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettledSkill {
    pub skill_id: SkillId,
    pub result: AdvancementResult,
}

/// Re-runs the rank-up loop on every stored skill of a character.
///
/// A capped skill keeps earning nothing, but progress it banked before the
/// cap was reached stays stored. Once the tier (and so the cap) rises, that
/// progress may already pay for one or more rank-ups. Records do not carry
/// the advanced flag, so callers name the advanced skills; those stay locked
/// below the unlock tier.
pub struct SettleSkills {
    repo: Arc<dyn ProgressionRepo>,
    rules: ProgressionRules,
    locks: Arc<RecordLocks>,
}

impl SettleSkills {
    pub fn new(
        repo: Arc<dyn ProgressionRepo>,
        rules: ProgressionRules,
        locks: Arc<RecordLocks>,
    ) -> Self {
        Self { repo, rules, locks }
    }

    /// Returns only the skills that ranked up.
    pub async fn execute(
        &self,
        character_id: CharacterId,
        tier: Tier,
        advanced: &HashSet<SkillId>,
    ) -> Result<Vec<SettledSkill>, ProgressionError> {
        let skills = self.repo.list_for_character(character_id).await?;
        let mut settled = Vec::new();

        for (skill_id, _) in skills {
            let _guard = self.locks.acquire(character_id, skill_id).await;

            // Re-read under the lock; the listed copy may be stale.
            let Some(record) = self.repo.get_progress(character_id, skill_id).await? else {
                continue;
            };

            let result = self
                .rules
                .settle(record, tier, advanced.contains(&skill_id));
            if result.advanced_blocked {
                tracing::debug!(
                    character_id = %character_id,
                    skill_id = %skill_id,
                    tier = %tier,
                    "Advanced skill still locked, banked progress kept"
                );
                continue;
            }
            if result.rank_ups == 0 {
                continue;
            }

            self.repo
                .save_progress(character_id, skill_id, &result.record)
                .await?;
            tracing::info!(
                character_id = %character_id,
                skill_id = %skill_id,
                tier = %tier,
                from_rank = record.rank,
                to_rank = result.record.rank,
                "Banked progress settled after tier change"
            );
            settled.push(SettledSkill { skill_id, result });
        }

        Ok(settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryProgressionRepo;
    use crate::infrastructure::ports::MockProgressionRepo;
    use manaweave_domain::{Progress, SkillProgress};

    #[tokio::test]
    async fn settles_only_skills_with_enough_banked_progress() {
        let repo = Arc::new(InMemoryProgressionRepo::new());
        let character_id = CharacterId::new();
        let banked = SkillId::new();
        let idle = SkillId::new();

        repo.save_progress(
            character_id,
            banked,
            &SkillProgress::with(3, Progress::from_tenths(260)),
        )
        .await
        .expect("in-memory save");
        repo.save_progress(
            character_id,
            idle,
            &SkillProgress::with(1, Progress::from_tenths(30)),
        )
        .await
        .expect("in-memory save");

        let use_case = SettleSkills::new(
            repo.clone(),
            ProgressionRules::default(),
            Arc::new(RecordLocks::new()),
        );
        let settled = use_case
            .execute(character_id, Tier::Initiate, &HashSet::new())
            .await
            .expect("settled");

        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].skill_id, banked);
        assert_eq!(settled[0].result.rank_ups, 1);

        let stored = repo
            .get_progress(character_id, banked)
            .await
            .expect("in-memory get");
        assert_eq!(stored, Some(SkillProgress::with(4, Progress::from_tenths(60))));
    }

    #[tokio::test]
    async fn nothing_to_settle_saves_nothing() {
        let mut repo = MockProgressionRepo::new();
        repo.expect_list_for_character().returning(|_| Ok(Vec::new()));
        repo.expect_save_progress().never();

        let use_case = SettleSkills::new(
            Arc::new(repo),
            ProgressionRules::default(),
            Arc::new(RecordLocks::new()),
        );
        let settled = use_case
            .execute(CharacterId::new(), Tier::Master, &HashSet::new())
            .await
            .expect("settled");

        assert!(settled.is_empty());
    }

    #[tokio::test]
    async fn locked_advanced_skills_keep_their_banked_progress() {
        let repo = Arc::new(InMemoryProgressionRepo::new());
        let character_id = CharacterId::new();
        let warding = SkillId::new();
        let banked = SkillProgress::with(3, Progress::from_tenths(240));

        repo.save_progress(character_id, warding, &banked)
            .await
            .expect("in-memory save");

        let use_case = SettleSkills::new(
            repo.clone(),
            ProgressionRules::default(),
            Arc::new(RecordLocks::new()),
        );
        let settled = use_case
            .execute(character_id, Tier::Initiate, &HashSet::from([warding]))
            .await
            .expect("settled");

        assert!(settled.is_empty());
        let stored = repo
            .get_progress(character_id, warding)
            .await
            .expect("in-memory get");
        assert_eq!(stored, Some(banked));

        let settled = use_case
            .execute(character_id, Tier::Apprentice, &HashSet::from([warding]))
            .await
            .expect("settled");
        assert_eq!(settled.len(), 1);
        assert_eq!(
            settled[0].result.record,
            SkillProgress::with(4, Progress::from_tenths(40))
        );
    }
}
