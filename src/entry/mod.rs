//! Audit entry types.
//!
//! Defines the structure of audit log entries and the compression codec
//! applied to text payloads when requested.

mod compress;
mod record;

pub use compress::{deflate_text, inflate_text};
pub use record::{LogEntry, Payload};
