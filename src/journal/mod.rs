//! Journal mirroring module.
//!
//! Best-effort forwarding of raw audit messages to the systemd journal.
//! The journal is a secondary sink: availability is probed once at startup,
//! call sites hold a no-op sink when it is absent, and send failures are
//! never surfaced to the caller.

#[cfg(target_os = "linux")]
mod journald;
mod sink;

#[cfg(target_os = "linux")]
pub use journald::JournaldSink;
pub use sink::{acquire, JournalSink, NullSink};
