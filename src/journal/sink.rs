//! Journal sink interface and acquisition.

/// A secondary sink receiving the raw message of each audit entry.
///
/// Mirroring is infallible by contract: implementations swallow their own
/// failures so the primary file sink can never be affected.
pub trait JournalSink: Send + Sync {
    /// Forward a raw message to the journal.
    fn mirror(&self, message: &str);
}

/// Sink used when journal mirroring is disabled or unavailable.
pub struct NullSink;

impl JournalSink for NullSink {
    fn mirror(&self, _message: &str) {}
}

/// Acquire the journal sink for this process.
///
/// Probes for a usable journal once; callers hold the returned sink for
/// their lifetime and need no conditional branching per call.
pub fn acquire(enabled: bool) -> Box<dyn JournalSink> {
    if !enabled {
        return Box::new(NullSink);
    }

    #[cfg(target_os = "linux")]
    {
        if super::JournaldSink::available() {
            tracing::debug!("systemd journal detected, mirroring enabled");
            return Box::new(super::JournaldSink::new());
        }
        tracing::debug!("systemd journal unavailable, mirroring skipped");
    }

    Box::new(NullSink)
}
