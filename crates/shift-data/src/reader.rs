//! Raw-log loading.
//!
//! The report core consumes one complete text blob; this module is the thin
//! plumbing that produces it from disk. The input path may be a single file
//! or a directory, in which case the newest-named log file found under it
//! is used (log drops are conventionally timestamp-named).

use std::path::{Path, PathBuf};

use shift_core::error::{Result, ShiftError};
use tracing::{debug, warn};

/// File extensions recognised as shift-log drops.
const LOG_EXTENSIONS: &[&str] = &["log", "txt", "csv"];

/// Find all log files recursively under `dir`, sorted by path.
pub fn find_log_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Input path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| LOG_EXTENSIONS.contains(&ext))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Read the raw log text for `path`.
///
/// A file path is read directly. A directory is scanned recursively and the
/// lexically last log file wins.
pub fn load_raw_log(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ShiftError::DataPathNotFound(path.to_path_buf()));
    }

    let file = if path.is_dir() {
        let files = find_log_files(path);
        let Some(newest) = files.last().cloned() else {
            return Err(ShiftError::NoLogFiles(path.to_path_buf()));
        };
        debug!("selected {} of {} log files", newest.display(), files.len());
        newest
    } else {
        path.to_path_buf()
    };

    std::fs::read_to_string(&file).map_err(|source| ShiftError::FileRead { path: file, source })
}
