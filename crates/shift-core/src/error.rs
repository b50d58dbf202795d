use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Shiftlog crates.
///
/// The report transformation itself never fails (malformed input is
/// discarded record by record); these variants cover the I/O surfaces
/// around it.
#[derive(Error, Debug)]
pub enum ShiftError {
    /// A log file could not be opened or read from disk.
    #[error("Failed to read log file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured input path does not exist.
    #[error("Input path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// The input directory contains no recognisable log files.
    #[error("No log files found in {0}")]
    NoLogFiles(PathBuf),

    /// A report could not be serialised for export.
    #[error("Failed to serialise report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the shiftlog crates.
pub type Result<T> = std::result::Result<T, ShiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ShiftError::FileRead {
            path: PathBuf::from("/some/shift.log"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read log file"));
        assert!(msg.contains("/some/shift.log"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_data_path_not_found() {
        let err = ShiftError::DataPathNotFound(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "Input path not found: /missing/dir");
    }

    #[test]
    fn test_error_display_no_log_files() {
        let err = ShiftError::NoLogFiles(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No log files found in /empty/dir");
    }

    #[test]
    fn test_error_display_config() {
        let err = ShiftError::Config("refresh rate out of range".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: refresh rate out of range"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ShiftError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: ShiftError = json_err.into();
        assert!(err.to_string().contains("Failed to serialise report"));
    }
}
