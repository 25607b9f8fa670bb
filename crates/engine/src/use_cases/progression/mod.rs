//! Skill progression use cases.
//!
//! Every read-modify-write of a skill record happens under that record's
//! lock, so outcome events for one (character, skill) pair apply strictly one
//! after another while different pairs proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use manaweave_domain::{CharacterId, ProgressionRules, SkillId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::infrastructure::ports::{ProgressionRepo, RepoError};

mod record_skill_use;
mod settle_skills;

pub use record_skill_use::{RecordSkillUse, SkillUse, SkillUseOutcome};
pub use settle_skills::{SettleSkills, SettledSkill};

/// Container for progression use cases.
pub struct ProgressionUseCases {
    pub record_skill_use: Arc<RecordSkillUse>,
    pub settle_skills: Arc<SettleSkills>,
}

impl ProgressionUseCases {
    pub fn new(repo: Arc<dyn ProgressionRepo>, rules: ProgressionRules) -> Self {
        let locks = Arc::new(RecordLocks::new());
        Self {
            record_skill_use: Arc::new(RecordSkillUse::new(repo.clone(), rules, locks.clone())),
            settle_skills: Arc::new(SettleSkills::new(repo, rules, locks)),
        }
    }
}

/// One async mutex per (character, skill) record.
///
/// Entries live only while a task holds or waits on the lock; the last guard
/// out removes its entry, so the map is bounded by in-flight records.
#[derive(Debug, Default)]
pub struct RecordLocks {
    locks: DashMap<(CharacterId, SkillId), Arc<Mutex<()>>>,
}

impl RecordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to one record.
    pub async fn acquire(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> RecordGuard<'_> {
        let key = (character_id, skill_id);
        // Clone the Arc out so the map shard is not held across the await.
        let lock = self.locks.entry(key).or_default().clone();
        RecordGuard {
            locks: self,
            key,
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Records with a live holder or waiter.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one record until dropped.
pub struct RecordGuard<'a> {
    locks: &'a RecordLocks,
    key: (CharacterId, SkillId),
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for RecordGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map still points at the mutex: nobody holds or waits on it.
        self.locks
            .locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn released_locks_are_dropped_from_the_map() {
        let locks = RecordLocks::new();
        let character_id = CharacterId::new();
        let skill_id = SkillId::new();

        let guard = locks.acquire(character_id, skill_id).await;
        assert_eq!(locks.len(), 1);
        drop(guard);

        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn waiting_task_keeps_the_entry_alive() {
        let locks = Arc::new(RecordLocks::new());
        let character_id = CharacterId::new();
        let skill_id = SkillId::new();

        let first = locks.acquire(character_id, skill_id).await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _second = locks.acquire(character_id, skill_id).await;
            })
        };
        tokio::task::yield_now().await;

        drop(first);
        assert_eq!(locks.len(), 1);

        waiter.await.expect("waiter joined");
        assert!(locks.is_empty());
    }
}
