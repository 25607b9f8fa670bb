//! Skill advancement state machine.
//!
//! Converts one roll outcome plus a skill's `(rank, progress)` into the next
//! record. Ranks are bounded by the character tier's cap; advanced skills are
//! locked until the character reaches the unlock tier. Progress awarded past a
//! threshold carries into the next rank, and a single award can resolve more
//! than one rank-up when banked progress is large enough.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Progress, RollOutcome, SkillProgress, Tier};

/// Uses required to leave rank 0.
pub const BASE_USES_TO_ADVANCE: u32 = 5;

/// Extra uses required per rank already held.
pub const USES_PER_RANK: u32 = 5;

/// Practice credit awarded per roll outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutcomeAwards {
    pub success: Progress,
    pub crit: Progress,
    pub fail: Progress,
}

impl Default for OutcomeAwards {
    fn default() -> Self {
        Self {
            success: Progress::from_tenths(10),
            crit: Progress::from_tenths(20),
            fail: Progress::from_tenths(2),
        }
    }
}

impl OutcomeAwards {
    pub fn award_for(&self, outcome: RollOutcome) -> Progress {
        match outcome {
            RollOutcome::Success => self.success,
            RollOutcome::Crit => self.crit,
            RollOutcome::Fail => self.fail,
        }
    }
}

/// Tunable advancement rules. `Default` carries the locked table values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressionRules {
    /// Lowest character tier at which advanced skills accrue progress.
    pub advanced_unlock_tier: Tier,
    pub awards: OutcomeAwards,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            advanced_unlock_tier: Tier::Apprentice,
            awards: OutcomeAwards::default(),
        }
    }
}

/// Outcome of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancementResult {
    pub record: SkillProgress,
    pub rank_ups: u32,
    /// The skill ended at or above its tier cap.
    pub capped: bool,
    /// The skill is advanced and the character tier is below the unlock tier.
    pub advanced_blocked: bool,
}

/// Uses needed to advance out of `rank`: `5 + 5 * rank`.
///
/// # Examples
///
/// ```
/// use manaweave_domain::game_systems::uses_to_advance;
///
/// assert_eq!(uses_to_advance(0), 5);
/// assert_eq!(uses_to_advance(3), 20);
/// ```
pub fn uses_to_advance(rank: u32) -> u32 {
    BASE_USES_TO_ADVANCE.saturating_add(USES_PER_RANK.saturating_mul(rank))
}

/// [`uses_to_advance`] as a progress amount.
pub fn required_to_advance(rank: u32) -> Progress {
    Progress::from_whole_uses(uses_to_advance(rank))
}

/// Highest rank a skill may reach at `tier`.
pub fn rank_cap(tier: Tier) -> u32 {
    tier.skill_rank_cap()
}

/// Ability track points for a roll outcome. Failures earn nothing.
pub fn ability_track_gain(outcome: RollOutcome) -> u32 {
    match outcome {
        RollOutcome::Success => 1,
        RollOutcome::Crit => 2,
        RollOutcome::Fail => 0,
    }
}

/// [`ProgressionRules::apply_outcome`] under the default rules.
pub fn apply_outcome(
    record: SkillProgress,
    outcome: RollOutcome,
    tier: Tier,
    is_advanced: bool,
) -> AdvancementResult {
    ProgressionRules::default().apply_outcome(record, outcome, tier, is_advanced)
}

impl ProgressionRules {
    /// Whether a skill may accrue progress at `tier`.
    pub fn is_unlocked(&self, tier: Tier, is_advanced: bool) -> bool {
        !is_advanced || tier.meets(self.advanced_unlock_tier)
    }

    /// Applies one roll outcome to a skill record.
    ///
    /// The gate check runs before the cap check, so a blocked advanced skill
    /// reports `advanced_blocked` even if it also sits at the cap.
    pub fn apply_outcome(
        &self,
        record: SkillProgress,
        outcome: RollOutcome,
        tier: Tier,
        is_advanced: bool,
    ) -> AdvancementResult {
        let cap = rank_cap(tier);

        if !self.is_unlocked(tier, is_advanced) {
            return blocked(record, cap);
        }

        if record.rank >= cap {
            return AdvancementResult {
                record,
                rank_ups: 0,
                capped: true,
                advanced_blocked: false,
            };
        }

        let awarded = SkillProgress::with(
            record.rank,
            record.progress.saturating_add(self.awards.award_for(outcome)),
        );
        resolve_rank_ups(awarded, cap)
    }

    /// Applies a run of outcomes in order, summing the rank-ups.
    pub fn apply_outcomes<I>(
        &self,
        record: SkillProgress,
        outcomes: I,
        tier: Tier,
        is_advanced: bool,
    ) -> AdvancementResult
    where
        I: IntoIterator<Item = RollOutcome>,
    {
        let mut result = AdvancementResult {
            record,
            rank_ups: 0,
            capped: record.rank >= rank_cap(tier),
            advanced_blocked: !self.is_unlocked(tier, is_advanced),
        };

        for outcome in outcomes {
            let step = self.apply_outcome(result.record, outcome, tier, is_advanced);
            result = AdvancementResult {
                rank_ups: result.rank_ups + step.rank_ups,
                ..step
            };
        }
        result
    }

    /// Resolves progress banked while capped, without awarding anything.
    ///
    /// Call after a character's tier rises: the higher cap may admit rank-ups
    /// the stored progress already pays for. Advanced skills stay locked
    /// until the tier reaches the unlock tier.
    pub fn settle(
        &self,
        record: SkillProgress,
        tier: Tier,
        is_advanced: bool,
    ) -> AdvancementResult {
        let cap = rank_cap(tier);
        if !self.is_unlocked(tier, is_advanced) {
            return blocked(record, cap);
        }
        resolve_rank_ups(record, cap)
    }
}

fn blocked(record: SkillProgress, cap: u32) -> AdvancementResult {
    AdvancementResult {
        record,
        rank_ups: 0,
        capped: record.rank >= cap,
        advanced_blocked: true,
    }
}

fn resolve_rank_ups(record: SkillProgress, cap: u32) -> AdvancementResult {
    let mut rank = record.rank;
    let mut progress = record.progress;
    let mut rank_ups = 0;

    while rank < cap {
        match progress.checked_sub(required_to_advance(rank)) {
            Some(rest) => {
                progress = rest;
                rank += 1;
                rank_ups += 1;
            }
            None => break,
        }
    }

    AdvancementResult {
        record: SkillProgress::with(rank, progress),
        rank_ups,
        capped: rank >= cap,
        advanced_blocked: false,
    }
}
