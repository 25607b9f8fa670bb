//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific rules area. Use cases take
//! their dependencies as `Arc<dyn Port>` and expose an `execute` method.

pub mod crafting;
pub mod mana;
pub mod progression;

pub use crafting::CraftingUseCases;
pub use mana::ManaUseCases;
pub use progression::ProgressionUseCases;
