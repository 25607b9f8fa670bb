//! Mana combination tables.
//!
//! Two read-only lookup tables, built once on first use:
//! - base + base -> hybrid
//! - hybrid + base -> eldritch
//!
//! Keys are unordered pairs. Both identifiers are sorted lexicographically
//! and joined with `|`, so the argument order at the call site never matters
//! and cannot drift from the order used when the table was built.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::value_objects::{BaseMana, EldritchMana, HybridMana, ManaType};

/// Separator between the two identifiers of a pair key.
pub const PAIR_KEY_SEPARATOR: char = '|';

/// Builds the order-independent key for a pair of identifiers.
///
/// # Examples
///
/// ```
/// use manaweave_domain::game_systems::pair_key;
///
/// assert_eq!(pair_key("earth", "enhancement"), "earth|enhancement");
/// assert_eq!(pair_key("enhancement", "earth"), "earth|enhancement");
/// ```
pub fn pair_key(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{first}{PAIR_KEY_SEPARATOR}{second}")
}

const HYBRID_RECIPES: [(BaseMana, BaseMana, HybridMana); 32] = {
    use BaseMana::*;
    [
        // Enhancement + X
        (Enhancement, Earth, HybridMana::Metal),
        (Enhancement, Wind, HybridMana::Gale),
        (Enhancement, Light, HybridMana::Radiance),
        (Enhancement, Shadow, HybridMana::Void),
        (Enhancement, Fire, HybridMana::Inferno),
        (Enhancement, Astral, HybridMana::Arcane),
        (Enhancement, Water, HybridMana::Deluge),
        (Enhancement, Nature, HybridMana::Wild),
        // Wind + X
        (Wind, Earth, HybridMana::Sand),
        (Wind, Astral, HybridMana::Glass),
        (Wind, Water, HybridMana::Ice),
        (Wind, Fire, HybridMana::Lightning),
        (Wind, Nature, HybridMana::Tempest),
        // Earth + X
        (Earth, Astral, HybridMana::Crystal),
        (Earth, Water, HybridMana::Mud),
        (Earth, Shadow, HybridMana::Obsidian),
        (Earth, Nature, HybridMana::Growth),
        // Astral + X
        (Astral, Light, HybridMana::Life),
        (Astral, Shadow, HybridMana::Death),
        (Astral, Water, HybridMana::Dream),
        (Astral, Fire, HybridMana::Ignition),
        (Astral, Nature, HybridMana::Pulse),
        // Light + X
        (Light, Water, HybridMana::Renewal),
        (Light, Fire, HybridMana::Retribution),
        (Light, Shadow, HybridMana::Judgement),
        (Light, Nature, HybridMana::Harmony),
        // Water + X
        (Water, Fire, HybridMana::Steam),
        (Water, Shadow, HybridMana::Poison),
        (Water, Nature, HybridMana::Regrowth),
        // Fire + X
        (Fire, Shadow, HybridMana::Ruin),
        (Fire, Nature, HybridMana::Surge),
        // Shadow + Nature
        (Shadow, Nature, HybridMana::Blight),
    ]
};

const ELDRITCH_RECIPES: [(HybridMana, BaseMana, EldritchMana); 27] = {
    use EldritchMana::*;
    [
        (HybridMana::Crystal, BaseMana::Water, Resonance),
        (HybridMana::Crystal, BaseMana::Fire, Overcharge),
        (HybridMana::Crystal, BaseMana::Shadow, Null),
        (HybridMana::Mud, BaseMana::Astral, Inertia),
        (HybridMana::Mud, BaseMana::Nature, Quagmire),
        (HybridMana::Obsidian, BaseMana::Astral, Disjunction),
        (HybridMana::Obsidian, BaseMana::Nature, Severance),
        (HybridMana::Growth, BaseMana::Water, Overgrowth),
        (HybridMana::Steam, BaseMana::Astral, Suspension),
        (HybridMana::Poison, BaseMana::Astral, Entropy),
        (HybridMana::Poison, BaseMana::Light, Exposure),
        (HybridMana::Poison, BaseMana::Fire, Catalyst),
        (HybridMana::Poison, BaseMana::Earth, Corrosion),
        (HybridMana::Poison, BaseMana::Nature, Necrosis),
        (HybridMana::Ignition, BaseMana::Light, Mandate),
        (HybridMana::Ignition, BaseMana::Water, Recursion),
        (HybridMana::Ignition, BaseMana::Wind, Cascade),
        (HybridMana::Retribution, BaseMana::Astral, Reprisal),
        (HybridMana::Judgement, BaseMana::Astral, Decree),
        (HybridMana::Judgement, BaseMana::Fire, Sentence),
        (HybridMana::Judgement, BaseMana::Water, Injunction),
        (HybridMana::Judgement, BaseMana::Wind, Precedent),
        (HybridMana::Judgement, BaseMana::Earth, Sanction),
        (HybridMana::Ruin, BaseMana::Astral, Catastrophe),
        (HybridMana::Ruin, BaseMana::Light, Devastation),
        (HybridMana::Ruin, BaseMana::Water, Scour),
        (HybridMana::Blight, BaseMana::Astral, Sterility),
    ]
};

static HYBRID_COMBOS: Lazy<HashMap<String, HybridMana>> = Lazy::new(|| {
    HYBRID_RECIPES
        .iter()
        .map(|(a, b, hybrid)| (pair_key(a.id(), b.id()), *hybrid))
        .collect()
});

static ELDRITCH_COMBOS: Lazy<HashMap<String, EldritchMana>> = Lazy::new(|| {
    ELDRITCH_RECIPES
        .iter()
        .map(|(hybrid, base, eldritch)| (pair_key(hybrid.id(), base.id()), *eldritch))
        .collect()
});

static HYBRID_SOURCES: Lazy<HashMap<HybridMana, (BaseMana, BaseMana)>> = Lazy::new(|| {
    HYBRID_RECIPES
        .iter()
        .map(|(a, b, hybrid)| (*hybrid, (*a, *b)))
        .collect()
});

static ELDRITCH_SOURCES: Lazy<HashMap<EldritchMana, (HybridMana, BaseMana)>> = Lazy::new(|| {
    ELDRITCH_RECIPES
        .iter()
        .map(|(hybrid, base, eldritch)| (*eldritch, (*hybrid, *base)))
        .collect()
});

/// Resolves the hybrid formed by two base types, in either order.
pub fn resolve_hybrid(a: BaseMana, b: BaseMana) -> Option<HybridMana> {
    HYBRID_COMBOS.get(&pair_key(a.id(), b.id())).copied()
}

/// Resolves the eldritch type formed by a hybrid plus an added base type.
pub fn resolve_eldritch(hybrid: HybridMana, added: BaseMana) -> Option<EldritchMana> {
    ELDRITCH_COMBOS.get(&pair_key(hybrid.id(), added.id())).copied()
}

/// Resolves the combination of any two typed mana identifiers.
///
/// Two bases give a hybrid; a hybrid and a base (either order) give an
/// eldritch type. Every other pairing has no result.
pub fn resolve(a: ManaType, b: ManaType) -> Option<ManaType> {
    match (a, b) {
        (ManaType::Base(x), ManaType::Base(y)) => resolve_hybrid(x, y).map(ManaType::Hybrid),
        (ManaType::Hybrid(h), ManaType::Base(base))
        | (ManaType::Base(base), ManaType::Hybrid(h)) => {
            resolve_eldritch(h, base).map(ManaType::Eldritch)
        }
        _ => None,
    }
}

/// Resolves the combination of two raw identifiers.
///
/// Identifiers are trimmed and lowercased like the `FromStr` parsers. An
/// unknown identifier, a mismatched tier pairing or an unmapped pair all
/// yield `None`.
pub fn resolve_composite(a: &str, b: &str) -> Option<ManaType> {
    let key = pair_key(&a.trim().to_lowercase(), &b.trim().to_lowercase());
    if let Some(hybrid) = HYBRID_COMBOS.get(&key) {
        return Some(ManaType::Hybrid(*hybrid));
    }
    ELDRITCH_COMBOS.get(&key).map(|eldritch| ManaType::Eldritch(*eldritch))
}

/// The two base types a hybrid is made from, if the recipe table has it.
pub fn hybrid_components(hybrid: HybridMana) -> Option<(BaseMana, BaseMana)> {
    HYBRID_SOURCES.get(&hybrid).copied()
}

/// The hybrid and added base an eldritch type is made from, if the recipe
/// table has it.
pub fn eldritch_components(eldritch: EldritchMana) -> Option<(HybridMana, BaseMana)> {
    ELDRITCH_SOURCES.get(&eldritch).copied()
}

/// Every eldritch type reachable from a hybrid, with the base it needs.
pub fn eldritch_options(hybrid: HybridMana) -> Vec<(BaseMana, EldritchMana)> {
    ELDRITCH_RECIPES
        .iter()
        .filter(|(h, _, _)| *h == hybrid)
        .map(|(_, base, eldritch)| (*base, *eldritch))
        .collect()
}
