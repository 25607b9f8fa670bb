//! Mana sheet use cases.

use std::sync::Arc;

mod build_sheet;

pub use build_sheet::{BuildManaSheet, Combination, ManaSheet, ManaSheetRequest};

/// Container for mana use cases.
pub struct ManaUseCases {
    pub build_sheet: Arc<BuildManaSheet>,
}

impl ManaUseCases {
    pub fn new() -> Self {
        Self {
            build_sheet: Arc::new(BuildManaSheet::new()),
        }
    }
}

impl Default for ManaUseCases {
    fn default() -> Self {
        Self::new()
    }
}
