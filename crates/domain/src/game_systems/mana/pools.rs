//! Mana pool formulas.
//!
//! Every pool value is a non-negative integer and every formula floors.
//! Bonus rates are whole percentage points per level so that flooring never
//! depends on binary float representation (`70 * 1.2` is not exactly `84.0`
//! in `f64`; `70 * 120 / 100` is exactly `84`).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::common::non_negative_or_zero;
use crate::value_objects::BaseMana;

/// Sub-attribute percentage points per pool band.
pub const PERCENT_PER_BAND: u64 = 5;

/// Pool points granted per band.
pub const POOL_PER_BAND: u64 = 10;

/// A per-level bonus, in whole percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BonusRate(u32);

impl BonusRate {
    pub const fn percent(points: u32) -> Self {
        Self(points)
    }

    pub fn points(self) -> u32 {
        self.0
    }

    /// Total bonus in percentage points for `levels` levels. Negative levels count as zero.
    pub fn total_points(self, levels: i32) -> u64 {
        u64::from(self.0) * u64::from(levels.max(0).unsigned_abs())
    }
}

/// Pool bonus per empower level on a base mana type.
pub const BASE_EMPOWER_MANA_BONUS: BonusRate = BonusRate::percent(20);

/// Pool bonus per specialization level on a hybrid mana type.
pub const HYBRID_SPEC_MANA_BONUS: BonusRate = BonusRate::percent(20);

/// Ability effectiveness bonus per empower level.
pub const BASE_EMPOWER_EFFECT_BONUS: BonusRate = BonusRate::percent(25);

/// Ability effectiveness bonus per specialization level.
pub const HYBRID_SPEC_EFFECT_BONUS: BonusRate = BonusRate::percent(50);

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Converts a sub-attribute percentage into a base pool: 10 points per full 5%.
///
/// Negative or non-finite input yields 0.
///
/// # Examples
///
/// ```
/// use manaweave_domain::game_systems::pool_from_percent;
///
/// assert_eq!(pool_from_percent(37.0), 70);
/// assert_eq!(pool_from_percent(4.9), 0);
/// assert_eq!(pool_from_percent(f64::NAN), 0);
/// ```
pub fn pool_from_percent(percent: f64) -> u32 {
    let percent = non_negative_or_zero(percent).floor();
    // `as` saturates for floats beyond u64::MAX.
    let whole = percent as u64;
    saturate((whole / PERCENT_PER_BAND).saturating_mul(POOL_PER_BAND))
}

/// Applies a per-level bonus and floors: `floor(value * (1 + rate * levels))`.
pub fn apply_tiered_bonus(value: u32, levels: i32, rate: BonusRate) -> u32 {
    let factor = 100 + rate.total_points(levels);
    saturate(u64::from(value).saturating_mul(factor) / 100)
}

/// Base pool for a sub-attribute percentage with empower levels applied.
pub fn base_mana_pool(percent: f64, empower_levels: i32) -> u32 {
    apply_tiered_bonus(pool_from_percent(percent), empower_levels, BASE_EMPOWER_MANA_BONUS)
}

/// Force mana: the floored average of every base pool not excluded.
///
/// Base types missing from `pools` count as 0. With every type excluded the
/// result is 0.
pub fn aggregate_primitive(pools: &BTreeMap<BaseMana, u32>, excluded: &BTreeSet<BaseMana>) -> u32 {
    let (total, count) = BaseMana::ALL
        .iter()
        .filter(|base| !excluded.contains(base))
        .fold((0u64, 0u64), |(total, count), base| {
            let value = pools.get(base).copied().unwrap_or(0);
            (total + u64::from(value), count + 1)
        });

    if count == 0 {
        return 0;
    }
    saturate(total / count)
}

/// Floored average of two pool values.
pub fn combine_two_values(a: u32, b: u32) -> u32 {
    saturate((u64::from(a) + u64::from(b)) / 2)
}

/// Hybrid pool from its two base pools, with specialization applied.
pub fn calc_hybrid_mana(base_a: u32, base_b: u32, spec_levels: i32) -> u32 {
    apply_tiered_bonus(
        combine_two_values(base_a, base_b),
        spec_levels,
        HYBRID_SPEC_MANA_BONUS,
    )
}

/// Eldritch pool from a hybrid pool and the added base pool.
pub fn calc_eldritch_mana(hybrid: u32, added_base: u32) -> u32 {
    combine_two_values(hybrid, added_base)
}

/// Ability effectiveness bonus in percentage points.
pub fn effectiveness_bonus(empower_levels: i32, spec_levels: i32) -> u64 {
    BASE_EMPOWER_EFFECT_BONUS.total_points(empower_levels)
        + HYBRID_SPEC_EFFECT_BONUS.total_points(spec_levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pool_from_percent_bands() {
        assert_eq!(pool_from_percent(0.0), 0);
        assert_eq!(pool_from_percent(5.0), 10);
        assert_eq!(pool_from_percent(9.99), 10);
        assert_eq!(pool_from_percent(37.0), 70);
        assert_eq!(pool_from_percent(100.0), 200);
    }

    #[test]
    fn pool_from_percent_rejects_bad_input() {
        assert_eq!(pool_from_percent(-15.0), 0);
        assert_eq!(pool_from_percent(f64::NAN), 0);
        assert_eq!(pool_from_percent(f64::INFINITY), 0);
        assert_eq!(pool_from_percent(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn tiered_bonus_floors() {
        assert_eq!(apply_tiered_bonus(70, 1, BASE_EMPOWER_MANA_BONUS), 84);
        assert_eq!(apply_tiered_bonus(70, 2, BASE_EMPOWER_MANA_BONUS), 98);
        assert_eq!(apply_tiered_bonus(15, 1, BASE_EMPOWER_MANA_BONUS), 18);
        assert_eq!(apply_tiered_bonus(13, 1, BASE_EMPOWER_MANA_BONUS), 15);
    }

    #[test]
    fn negative_levels_count_as_zero() {
        assert_eq!(apply_tiered_bonus(70, -3, HYBRID_SPEC_MANA_BONUS), 70);
        assert_eq!(effectiveness_bonus(-1, -1), 0);
    }

    #[test]
    fn base_pool_with_empower() {
        assert_eq!(base_mana_pool(37.0, 0), 70);
        assert_eq!(base_mana_pool(37.0, 1), 84);
    }

    #[test]
    fn force_mana_averages_unblocked_bases() {
        let pools: BTreeMap<BaseMana, u32> = [
            (BaseMana::Enhancement, 70),
            (BaseMana::Wind, 40),
            (BaseMana::Earth, 30),
        ]
        .into_iter()
        .collect();

        // 140 over nine types; six are missing and count as zero.
        assert_eq!(aggregate_primitive(&pools, &BTreeSet::new()), 15);

        let excluded: BTreeSet<BaseMana> = BaseMana::ALL
            .iter()
            .copied()
            .filter(|b| !matches!(b, BaseMana::Enhancement | BaseMana::Wind))
            .collect();
        assert_eq!(aggregate_primitive(&pools, &excluded), 55);
    }

    #[test]
    fn force_mana_with_everything_excluded_is_zero() {
        let pools: BTreeMap<BaseMana, u32> = [(BaseMana::Fire, 90)].into_iter().collect();
        let excluded: BTreeSet<BaseMana> = BaseMana::ALL.iter().copied().collect();
        assert_eq!(aggregate_primitive(&pools, &excluded), 0);
    }

    #[test]
    fn combined_pools_floor() {
        assert_eq!(combine_two_values(70, 45), 57);
        assert_eq!(combine_two_values(u32::MAX, u32::MAX), u32::MAX);
        assert_eq!(calc_hybrid_mana(70, 40, 0), 55);
        assert_eq!(calc_hybrid_mana(70, 40, 1), 66);
        assert_eq!(calc_eldritch_mana(66, 31), 48);
    }

    #[test]
    fn effectiveness_bonus_points() {
        assert_eq!(effectiveness_bonus(2, 0), 50);
        assert_eq!(effectiveness_bonus(1, 1), 75);
    }

    proptest! {
        #[test]
        fn pool_is_monotonic(a in 0.0f64..10_000.0, b in 0.0f64..10_000.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(pool_from_percent(low) <= pool_from_percent(high));
        }

        #[test]
        fn pool_is_constant_within_a_band(p in 0.0f64..10_000.0) {
            prop_assert_eq!(pool_from_percent(p), pool_from_percent(p - (p % 5.0)));
        }

        #[test]
        fn zero_levels_is_identity(v in any::<u32>(), rate in 0u32..500) {
            prop_assert_eq!(apply_tiered_bonus(v, 0, BonusRate::percent(rate)), v);
        }

        #[test]
        fn combine_never_exceeds_the_larger_input(a in any::<u32>(), b in any::<u32>()) {
            let combined = combine_two_values(a, b);
            prop_assert!(combined <= a.max(b));
            prop_assert!(combined >= a.min(b));
        }
    }
}
