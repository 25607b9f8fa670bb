//! Port traits for infrastructure boundaries.
//!
//! The rules themselves live in `manaweave-domain` and need no ports. Ports
//! exist only for what the engine has to store between calls.

mod error;
mod repos;

pub use error::RepoError;
pub use repos::ProgressionRepo;

#[cfg(test)]
pub use repos::MockProgressionRepo;
