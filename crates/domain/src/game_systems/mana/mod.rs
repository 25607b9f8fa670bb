//! Mana derivation: combination tables and pool formulas.

mod combos;
mod pools;

pub use combos::{
    eldritch_components, eldritch_options, hybrid_components, pair_key, resolve,
    resolve_composite, resolve_eldritch, resolve_hybrid, PAIR_KEY_SEPARATOR,
};
pub use pools::{
    aggregate_primitive, apply_tiered_bonus, base_mana_pool, calc_eldritch_mana,
    calc_hybrid_mana, combine_two_values, effectiveness_bonus, pool_from_percent, BonusRate,
    BASE_EMPOWER_EFFECT_BONUS, BASE_EMPOWER_MANA_BONUS, HYBRID_SPEC_EFFECT_BONUS,
    HYBRID_SPEC_MANA_BONUS, PERCENT_PER_BAND, POOL_PER_BAND,
};
