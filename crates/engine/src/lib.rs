//! Manaweave Engine library.
//!
//! Hosts the pure rules from `manaweave-domain`: stores skill progression
//! between calls, serializes outcome events per skill, and runs JSON sessions.
//!
//! ## Structure
//!
//! - `use_cases/` - Rules orchestration (progression, mana sheets, crafting)
//! - `infrastructure/` - Ports, the in-memory store, environment configuration
//! - `session` - JSON session input and report
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod session;
pub mod use_cases;

pub use app::App;
