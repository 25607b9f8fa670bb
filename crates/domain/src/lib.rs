//! Manaweave domain: rules for mana derivation, skill progression and crafting.
//!
//! This crate is pure computation. It performs no I/O and holds no state;
//! hosts supply the character tier, roll outcomes and stored skill records,
//! and persist whatever comes back.

pub mod common;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use error::DomainError;
pub use ids::{CharacterId, SkillId};

pub use value_objects::{
    AttributeGroup, BaseMana, EldritchMana, HybridMana, ManaTier, ManaType, Progress, RollOutcome,
    SkillProgress, SubAttribute, Tier,
};

pub use game_systems::{
    apply_outcome, AdvancementResult, CraftingRules, ManaRounding, ProgressionRules, SkillKind,
};
