//! Common utility functions shared across the crate.
//!
//! Pure helpers only: no side effects, no I/O.

pub mod numeric;

pub use numeric::{finite_or_zero, non_negative_or_zero, parse_or_zero, whole_or_zero};
