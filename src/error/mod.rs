//! Error types for the audit logger.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
