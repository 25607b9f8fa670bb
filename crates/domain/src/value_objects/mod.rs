//! Value objects - Immutable objects defined by their attributes

mod mana_type;
mod roll_outcome;
mod skill_progress;
mod sub_attribute;
mod tier;

pub use mana_type::{BaseMana, EldritchMana, HybridMana, ManaTier, ManaType};
pub use roll_outcome::RollOutcome;
pub use skill_progress::{Progress, SkillProgress};
pub use sub_attribute::{AttributeGroup, SubAttribute};
pub use tier::Tier;
