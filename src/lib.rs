//! Audit Scribe Library
//!
//! Structured audit logging for a single process: entries are rendered as
//! JSON and appended to a size-rotated file, with optional zlib compression
//! of text payloads and best-effort systemd journal mirroring.

pub mod config;
pub mod entry;
pub mod error;
pub mod journal;
pub mod logger;

// Re-export commonly used types
pub use config::Settings;
pub use error::{AuditError, AuditResult};
pub use logger::AuditLogger;
