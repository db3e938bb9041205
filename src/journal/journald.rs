//! systemd journal sink.

use std::path::Path;

use libsystemd::logging::{journal_print, Priority};
use tracing::debug;

use super::sink::JournalSink;

/// Socket the journal daemon listens on.
const JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

/// Mirror sink backed by the systemd journal.
pub struct JournaldSink;

impl JournaldSink {
    /// Create a new journald sink.
    pub fn new() -> Self {
        Self
    }

    /// Whether the journal socket exists on this host.
    pub fn available() -> bool {
        Path::new(JOURNAL_SOCKET).exists()
    }
}

impl Default for JournaldSink {
    fn default() -> Self {
        Self::new()
    }
}

impl JournalSink for JournaldSink {
    fn mirror(&self, message: &str) {
        // Best-effort: a failed send must never fail the audit write
        if let Err(e) = journal_print(Priority::Info, message) {
            debug!(error = %e, "Journal mirror send failed");
        }
    }
}
