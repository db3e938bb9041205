//! Size-rotated log file writer.
//!
//! Appends newline-terminated lines to an active file. When an incoming
//! line would push the file past its size threshold, the active file is
//! renamed to `.1`, existing backups cascade upward, and anything beyond
//! the backup bound is dropped.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{AuditError, AuditResult};

/// Mode for the log directory on creation: owner/group only, no world access.
#[cfg(unix)]
const DIR_MODE: u32 = 0o750;

/// Mode for active and rotated files on creation.
#[cfg(unix)]
const FILE_MODE: u32 = 0o640;

/// Open handle plus tracked size of the active file.
struct ActiveFile {
    file: File,
    size: u64,
}

/// Writer for the active log file with size-based rotation.
///
/// The whole append-or-rotate sequence runs under one mutex, so threads
/// sharing a writer cannot interleave lines or corrupt a rotation.
pub struct RotatingWriter {
    /// Path to the active log file.
    path: PathBuf,
    /// Byte threshold triggering rotation.
    max_size: u64,
    /// Number of rotated backups to retain; 0 truncates in place.
    backup_count: u32,
    /// The active file handle, guarded for thread safety.
    active: Mutex<ActiveFile>,
}

impl RotatingWriter {
    /// Create a new writer for the given path.
    ///
    /// Creates the parent directory (mode 0750) if missing and opens the
    /// active file (mode 0640) in append mode, picking up its current size.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be opened.
    pub fn new(path: &Path, max_size: u64, backup_count: u32) -> AuditResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                debug!(path = %parent.display(), "Creating log directory");
                create_dir_restricted(parent)?;
            }
        }

        let file = open_active(path)?;
        let size = file.metadata()?.len();

        debug!(path = %path.display(), size, "Rotating writer initialized");

        Ok(Self {
            path: path.to_path_buf(),
            max_size,
            backup_count,
            active: Mutex::new(ActiveFile { file, size }),
        })
    }

    /// Append a line (plus newline) to the active file, rotating first if
    /// the write would reach the size threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation or the write fails. A failed `sync`
    /// after a successful write is only logged.
    pub fn write_line(&self, line: &str) -> AuditResult<()> {
        let mut active = self.active.lock().map_err(|e| AuditError::Lock {
            message: format!("Failed to acquire log file lock: {}", e),
        })?;

        let incoming = line.len() as u64 + 1;
        if active.size > 0 && active.size + incoming >= self.max_size {
            self.rotate(&mut active)?;
        }

        writeln!(active.file, "{}", line)?;
        active.size += incoming;

        // Durability: sync but don't fail the write over it
        if let Err(e) = active.file.sync_data() {
            warn!(error = %e, "Failed to sync log file");
        }

        Ok(())
    }

    /// Path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rotate the active file into the numbered backup set.
    ///
    /// Cascade runs oldest-first: `.N` is dropped, `.i` becomes `.i+1`,
    /// the active file becomes `.1`, and a fresh active file is opened.
    fn rotate(&self, active: &mut ActiveFile) -> AuditResult<()> {
        active.file.flush()?;

        if self.backup_count == 0 {
            // No backups retained: truncate the active file in place
            truncate_active(&self.path)?;
            active.file = open_active(&self.path)?;
            active.size = 0;
            return Ok(());
        }

        for i in (1..=self.backup_count).rev() {
            let src = self.backup_path(i);
            if !src.exists() {
                continue;
            }
            if i == self.backup_count {
                fs::remove_file(&src)?;
            } else {
                fs::rename(&src, self.backup_path(i + 1))?;
            }
        }

        fs::rename(&self.path, self.backup_path(1))?;

        active.file = open_active(&self.path)?;
        active.size = 0;

        debug!(path = %self.path.display(), "Rotated log file");

        Ok(())
    }

    /// Path of the `n`-th rotated backup: `<file>.<n>`.
    fn backup_path(&self, n: u32) -> PathBuf {
        let name = self.path.file_name().unwrap_or_default().to_string_lossy();
        self.path.with_file_name(format!("{}.{}", name, n))
    }
}

/// Create a directory chain with restrictive permissions.
fn create_dir_restricted(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new()
            .recursive(true)
            .mode(DIR_MODE)
            .create(path)
    }
    #[cfg(not(unix))]
    {
        fs::create_dir_all(path)
    }
}

/// Open the active file in append mode, creating it with restrictive
/// permissions when absent.
fn open_active(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

/// Truncate the active file in place, creating it when absent.
fn truncate_active(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}
