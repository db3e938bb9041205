//! Audit logger facade.
//!
//! Builds entries, renders them as JSON, persists them through the rotating
//! writer, and mirrors the raw message to the journal sink.
//!
//! ## Features
//!
//! - One JSON line appended per call, newline-terminated
//! - Size-based rotation with a bounded set of numbered backups
//! - Optional zlib compression of text payloads (stored hex-encoded)
//! - Best-effort journal mirroring that can never fail a write

mod rotating;

pub use rotating::RotatingWriter;

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::entry::{LogEntry, Payload};
use crate::error::AuditError;
use crate::journal::{self, JournalSink};

/// Audit logger bound to one active log file.
///
/// Constructed from [`Settings`] by the application's startup routine and
/// passed to consumers; there is no process-wide default instance.
pub struct AuditLogger {
    /// Upper-cased system tag embedded in every entry.
    system_tag: String,
    /// Size-rotated file sink.
    writer: RotatingWriter,
    /// Secondary sink; a no-op implementation when mirroring is off.
    journal: Box<dyn JournalSink>,
    /// Pretty JSON plus stderr echo when set.
    debug_mode: bool,
}

impl AuditLogger {
    /// Create a new audit logger from settings.
    ///
    /// Creates the log directory and active file on first use. Journal
    /// availability is probed here, once.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the directory or
    /// file cannot be created.
    pub fn new(settings: &Settings) -> Result<Self, AuditError> {
        settings.validate()?;

        let path = settings.log_file_path();
        let writer = RotatingWriter::new(&path, settings.max_log_size, settings.backup_count)?;
        let journal = journal::acquire(settings.enable_journal);

        debug!(
            system = %settings.system_tag(),
            path = %path.display(),
            "Audit logger initialized"
        );

        Ok(Self {
            system_tag: settings.system_tag(),
            writer,
            journal,
            debug_mode: settings.debug,
        })
    }

    /// Log one audit entry.
    ///
    /// `message` is free text or a structured mapping; `metadata` is an
    /// optional JSON object stored alongside it; `compress` zlib-compresses
    /// text payloads before writing (ignored for structured messages).
    ///
    /// The file write completes (including any rotation) before this call
    /// returns. The journal mirror receives the raw, uncompressed message
    /// and never contributes an error.
    ///
    /// # Errors
    ///
    /// Returns an error if compression, serialization, or the file write
    /// fails.
    pub fn log(
        &self,
        message: impl Into<Payload>,
        metadata: Option<Value>,
        compress: bool,
    ) -> Result<(), AuditError> {
        let payload = message.into();
        let raw = payload.render_raw();

        let entry = LogEntry::build(&self.system_tag, payload, metadata, compress)?;
        let line = entry.render(self.debug_mode)?;

        self.writer.write_line(&line)?;
        self.journal.mirror(&raw);

        if self.debug_mode {
            // Duplicate human-readable copy on the error stream
            eprintln!("[AUDIT] {}", line);
        }

        Ok(())
    }

    /// Path of the active log file.
    pub fn log_path(&self) -> &Path {
        self.writer.path()
    }

    /// Archive rotated logs with encryption.
    ///
    /// The archival format and key handling are undefined, so this fails
    /// explicitly instead of silently succeeding.
    ///
    /// # Errors
    ///
    /// Always returns [`AuditError::Unsupported`].
    pub fn archive_logs(&self) -> Result<(), AuditError> {
        Err(AuditError::Unsupported {
            operation: "archive_logs".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_settings(temp_dir: &TempDir) -> Settings {
        Settings {
            system: "test".to_string(),
            log_dir: temp_dir.path().join("audit"),
            enable_journal: false,
            ..Settings::default()
        }
    }

    fn read_lines(logger: &AuditLogger) -> Vec<String> {
        std::fs::read_to_string(logger.log_path())
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_log_appends_one_json_line() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(&test_settings(&temp_dir)).unwrap();

        logger.log("Systemstart", Some(json!({"version": "2.1.0"})), false).unwrap();

        let lines = read_lines(&logger);
        assert_eq!(lines.len(), 1);

        let parsed: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["system"], "TEST");
        assert_eq!(parsed["message"], "Systemstart");
        assert_eq!(parsed["metadata"]["version"], "2.1.0");
        assert_eq!(parsed["compressed"], false);
    }

    #[test]
    fn test_log_file_name_embeds_system_tag() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(&test_settings(&temp_dir)).unwrap();
        assert!(logger.log_path().ends_with("TEST_audit.log"));
    }

    #[test]
    fn test_compressed_message_stored_as_hex() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(&test_settings(&temp_dir)).unwrap();

        logger.log("secret", None, true).unwrap();

        let lines = read_lines(&logger);
        let parsed: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["compressed"], true);

        let stored = parsed["message"].as_str().unwrap();
        assert_eq!(crate::entry::inflate_text(stored).unwrap(), "secret");
    }

    #[test]
    fn test_structured_message() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(&test_settings(&temp_dir)).unwrap();

        logger
            .log(json!({"event": "shutdown", "code": 0}), None, false)
            .unwrap();

        let parsed: Value = serde_json::from_str(&read_lines(&logger)[0]).unwrap();
        assert_eq!(parsed["message"]["event"], "shutdown");
        assert_eq!(parsed["message"]["code"], 0);
    }

    #[test]
    fn test_construction_fails_on_unwritable_dir() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();

        let settings = Settings {
            system: "test".to_string(),
            log_dir: blocker.join("audit"),
            enable_journal: false,
            ..Settings::default()
        };
        assert!(AuditLogger::new(&settings).is_err());
    }

    #[test]
    fn test_archive_logs_is_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(&test_settings(&temp_dir)).unwrap();

        let err = logger.archive_logs().unwrap_err();
        assert!(matches!(err, AuditError::Unsupported { .. }));
    }
}
