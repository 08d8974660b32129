//! Timestamped per-step log files.
//!
//! Each fetch or build writes to `<log_dir>/<kind>_log_<YYYYMMDD_HHMMSS>.txt`.
//! Files are opened for appending only; the program never reads them back.

use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Timestamp layout used in log file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Which step a log file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    GitClone,
    Build,
}

impl LogKind {
    fn prefix(self) -> &'static str {
        match self {
            LogKind::GitClone => "git_clone",
            LogKind::Build => "build",
        }
    }
}

/// Log file path for `kind` at the given instant.
pub fn log_file_path_at(log_dir: &Path, kind: LogKind, at: DateTime<Local>) -> PathBuf {
    log_dir.join(format!(
        "{}_log_{}.txt",
        kind.prefix(),
        at.format(TIMESTAMP_FORMAT)
    ))
}

/// Log file path for `kind`, stamped with the current local time.
pub fn log_file_path(log_dir: &Path, kind: LogKind) -> PathBuf {
    log_file_path_at(log_dir, kind, Local::now())
}

/// Open `path` for appending, creating it if needed.
pub fn open_append(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Append `bytes` to the log at `path`.
pub fn append(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = open_append(path)?;
    file.write_all(bytes)?;
    Ok(())
}
