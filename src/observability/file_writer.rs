//! Size-rotated, line-oriented file output for exported spans.
//!
//! Backups are numbered: `cinefind-otlp.json.1` is the most recent, higher
//! numbers are older, and anything past the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold used by the plugin (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept by the plugin.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Appends lines to a file, rotating it once it grows past `max_bytes`.
///
/// The file is opened lazily on the first write. Safe to share between
/// threads; each line is written and flushed under one lock.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Writes `line` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation, opening or writing fails, or if a
    /// previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut slot = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("trace file lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *slot = None;
            self.rotate()?;
        }

        if slot.is_none() {
            *slot = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = slot.as_mut() else {
            return Err(io::Error::other("trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Shifts `path.N` to `path.N+1`, drops the oldest, moves `path` to `path.1`.
    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return remove_if_present(&self.path);
        }

        remove_if_present(&self.backup_path(self.max_backups))?;
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
