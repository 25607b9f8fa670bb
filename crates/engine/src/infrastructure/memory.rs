//! In-memory progression store.

use async_trait::async_trait;
use dashmap::DashMap;
use manaweave_domain::{CharacterId, SkillId, SkillProgress};

use super::ports::{ProgressionRepo, RepoError};

/// Progression records kept in a concurrent map for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryProgressionRepo {
    records: DashMap<(CharacterId, SkillId), SkillProgress>,
}

impl InMemoryProgressionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ProgressionRepo for InMemoryProgressionRepo {
    async fn get_progress(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> Result<Option<SkillProgress>, RepoError> {
        Ok(self
            .records
            .get(&(character_id, skill_id))
            .map(|entry| *entry.value()))
    }

    async fn save_progress(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
        record: &SkillProgress,
    ) -> Result<(), RepoError> {
        self.records.insert((character_id, skill_id), *record);
        tracing::debug!(
            character_id = %character_id,
            skill_id = %skill_id,
            rank = record.rank,
            progress = %record.progress,
            "Saved skill progress"
        );
        Ok(())
    }

    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<(SkillId, SkillProgress)>, RepoError> {
        let mut records: Vec<(SkillId, SkillProgress)> = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == character_id)
            .map(|entry| (entry.key().1, *entry.value()))
            .collect();
        records.sort_by_key(|(skill_id, _)| *skill_id);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manaweave_domain::Progress;

    #[tokio::test]
    async fn missing_record_is_none() {
        let repo = InMemoryProgressionRepo::new();
        let found = repo
            .get_progress(CharacterId::new(), SkillId::new())
            .await
            .expect("in-memory get");
        assert_eq!(found, None);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn save_then_get_and_list() {
        let repo = InMemoryProgressionRepo::new();
        let character = CharacterId::new();
        let other = CharacterId::new();
        let skill = SkillId::new();
        let record = SkillProgress::with(2, Progress::from_tenths(34));

        repo.save_progress(character, skill, &record)
            .await
            .expect("in-memory save");
        repo.save_progress(other, skill, &SkillProgress::new())
            .await
            .expect("in-memory save");

        let found = repo.get_progress(character, skill).await.expect("in-memory get");
        assert_eq!(found, Some(record));

        let listed = repo.list_for_character(character).await.expect("in-memory list");
        assert_eq!(listed, vec![(skill, record)]);
        assert_eq!(repo.len(), 2);
    }
}
