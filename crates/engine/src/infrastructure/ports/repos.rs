//! Repository port traits for storage access.

use async_trait::async_trait;
use manaweave_domain::{CharacterId, SkillId, SkillProgress};

use super::error::RepoError;

// =============================================================================
// Skill Progression Storage
// =============================================================================

/// Stores one `(rank, progress)` record per character and skill.
///
/// A missing record means the skill has never been used; callers treat it as
/// rank 0 with no progress.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressionRepo: Send + Sync {
    async fn get_progress(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> Result<Option<SkillProgress>, RepoError>;

    async fn save_progress(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
        record: &SkillProgress,
    ) -> Result<(), RepoError>;

    /// Every stored record for a character.
    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<(SkillId, SkillProgress)>, RepoError>;
}
