//! Configuration module for the audit logger.
//!
//! Handles loading and validating logger configuration from TOML files.

mod settings;

pub use settings::*;
