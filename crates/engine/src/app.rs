//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::memory::InMemoryProgressionRepo;
use crate::infrastructure::ports::ProgressionRepo;
use crate::use_cases::{CraftingUseCases, ManaUseCases, ProgressionUseCases};

/// Main application state.
///
/// Holds the configuration, repository ports and use cases.
pub struct App {
    pub config: EngineConfig,
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for repository ports.
pub struct Repositories {
    pub progression: Arc<dyn ProgressionRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub progression: ProgressionUseCases,
    pub mana: ManaUseCases,
    pub crafting: CraftingUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(config: EngineConfig, progression_repo: Arc<dyn ProgressionRepo>) -> Self {
        let use_cases = UseCases {
            progression: ProgressionUseCases::new(progression_repo.clone(), config.progression),
            mana: ManaUseCases::new(),
            crafting: CraftingUseCases::new(config.crafting),
        };

        Self {
            config,
            repositories: Repositories {
                progression: progression_repo,
            },
            use_cases,
        }
    }

    /// App backed by the in-memory progression store.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(config, Arc::new(InMemoryProgressionRepo::new()))
    }
}
