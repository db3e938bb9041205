//! Configuration settings for the audit logger.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AuditError;

/// Environment variable toggling debug output (pretty JSON plus stderr echo).
///
/// Resolved exactly once, when settings are loaded.
pub const DEBUG_ENV: &str = "SCRIBE_DEBUG";

/// Main configuration structure for the audit logger.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// System identifier embedded in entries and the log file name.
    /// Stored as given; upper-cased wherever it is used.
    #[serde(default = "default_system")]
    pub system: String,
    /// Directory for the active log file and its rotated backups.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Byte threshold triggering rotation of the active file.
    #[serde(default = "default_max_log_size")]
    pub max_log_size: u64,
    /// Maximum number of rotated backup files to keep.
    #[serde(default = "default_backup_count")]
    pub backup_count: u32,
    /// Whether to mirror messages to the systemd journal (best-effort).
    #[serde(default = "default_enable_journal")]
    pub enable_journal: bool,
    /// Debug mode: pretty-printed JSON and a duplicate line on stderr.
    #[serde(default)]
    pub debug: bool,
}

// Default value functions
fn default_system() -> String {
    "scribe".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("/var/log/scribe/audit")
}

fn default_max_log_size() -> u64 {
    10 * 1024 * 1024 // 10 MiB
}

fn default_backup_count() -> u32 {
    5
}

fn default_enable_journal() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            system: default_system(),
            log_dir: default_log_dir(),
            max_log_size: default_max_log_size(),
            backup_count: default_backup_count(),
            enable_journal: default_enable_journal(),
            debug: false,
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    ///
    /// Applies the [`DEBUG_ENV`] overlay and validates the result.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AuditError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let mut settings: Settings = toml::from_str(&content).map_err(|e| AuditError::Config {
            message: format!("Failed to parse config file '{}': {}", path.display(), e),
        })?;

        settings.apply_debug_env();
        settings.validate()?;

        Ok(settings)
    }

    /// Overlay the debug flag from the environment, if the variable is set.
    pub fn apply_debug_env(&mut self) {
        if let Some(value) = std::env::var_os(DEBUG_ENV) {
            self.debug = debug_flag_enabled(&value);
        }
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.system.is_empty() {
            return Err(AuditError::Config {
                message: "System tag must not be empty".to_string(),
            });
        }

        if !self
            .system
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AuditError::Config {
                message: format!(
                    "Invalid system tag '{}'. Allowed characters: A-Z a-z 0-9 _ -",
                    self.system
                ),
            });
        }

        if self.max_log_size == 0 {
            return Err(AuditError::Config {
                message: "max_log_size must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// The upper-cased system tag embedded in entries and the file name.
    pub fn system_tag(&self) -> String {
        self.system.to_uppercase()
    }

    /// Path of the active log file: `<log_dir>/<SYSTEM>_audit.log`.
    ///
    /// Deterministic: identical `system`/`log_dir` always resolve the same
    /// path, regardless of which logger instance computes it.
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}_audit.log", self.system_tag()))
    }
}

/// Interpret a debug flag value: any non-empty value other than `0` or
/// `false` (case-insensitive) enables debug mode.
fn debug_flag_enabled(value: &OsStr) -> bool {
    match value.to_str() {
        Some(s) => {
            let s = s.trim();
            !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false")
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.system, "scribe");
        assert_eq!(settings.max_log_size, 10 * 1024 * 1024);
        assert_eq!(settings.backup_count, 5);
        assert!(settings.enable_journal);
        assert!(!settings.debug);
    }

    #[test]
    fn test_log_file_path_uppercases_system() {
        let settings = Settings {
            system: "payments".to_string(),
            log_dir: PathBuf::from("/tmp/audit"),
            ..Settings::default()
        };
        assert_eq!(
            settings.log_file_path(),
            PathBuf::from("/tmp/audit/PAYMENTS_audit.log")
        );
    }

    #[test]
    fn test_identical_settings_resolve_same_path() {
        let a = Settings {
            system: "test".to_string(),
            log_dir: PathBuf::from("/tmp/audit"),
            ..Settings::default()
        };
        let b = Settings {
            system: "test".to_string(),
            log_dir: PathBuf::from("/tmp/audit"),
            ..Settings::default()
        };
        assert_eq!(a.log_file_path(), b.log_file_path());
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            system = "billing"
            log_dir = "/var/log/billing"
            "#,
        )
        .unwrap();
        assert_eq!(settings.system, "billing");
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/billing"));
        assert_eq!(settings.max_log_size, 10 * 1024 * 1024);
        assert_eq!(settings.backup_count, 5);
    }

    #[test]
    fn test_validate_rejects_empty_system() {
        let settings = Settings {
            system: String::new(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_path_separator_in_system() {
        let settings = Settings {
            system: "../etc".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_max_log_size() {
        let settings = Settings {
            max_log_size: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_debug_flag_values() {
        assert!(debug_flag_enabled(OsStr::new("1")));
        assert!(debug_flag_enabled(OsStr::new("true")));
        assert!(debug_flag_enabled(OsStr::new("yes")));
        assert!(!debug_flag_enabled(OsStr::new("")));
        assert!(!debug_flag_enabled(OsStr::new("0")));
        assert!(!debug_flag_enabled(OsStr::new("false")));
        assert!(!debug_flag_enabled(OsStr::new("FALSE")));
    }
}
