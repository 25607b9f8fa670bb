//! Unified error types for the domain layer
//!
//! The rules calculations themselves never fail: malformed numbers are
//! clamped and unmapped combinations return `None`. Errors only arise at the
//! text boundary, when a host hands over an identifier that has to be parsed
//! into one of the closed domain enums.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    /// Creates a validation error for values outside the allowed range.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant:
    /// - Unknown tier keys
    /// - Unknown mana type identifiers
    /// - Unknown sub-attribute names
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for Tier {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "normal" => Ok(Self::Normal),
    ///             _ => Err(DomainError::parse(format!("Unknown tier: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }
}
