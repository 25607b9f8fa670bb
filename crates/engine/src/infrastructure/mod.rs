//! Infrastructure implementations.
//!
//! Contains port traits, their adapters, and environment configuration.

pub mod config;
pub mod memory;
pub mod ports;
