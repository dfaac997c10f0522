use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in `restr`.
///
/// Per-file and per-entry failures are carried by this type too, but the
/// worker pool and the walker only count and log them; the variants that end
/// a run are `Config`, `RootNotFound`, `NotADirectory`, a root-level `Walk`,
/// `QueueClosed` and `WorkerPanic`.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value failed validation.
    #[error("Config error: {0}")]
    Config(String),

    /// The root directory does not exist or cannot be stat-ed.
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    /// The root path exists but is not a directory.
    #[error("Root is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An error from the `walkdir` crate.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The temporary file could not be renamed over the original.
    #[error("Tempfile error: {0}")]
    TempFile(#[from] tempfile::PersistError),

    /// Every worker hung up before the walker finished publishing paths.
    #[error("Work queue closed before the walk finished")]
    QueueClosed,

    /// A worker thread panicked while processing files.
    #[error("A worker thread panicked")]
    WorkerPanic,

    /// The escaped search string could not be compiled.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// An error related to JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, restr::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversions_become_config_errors() {
        let err: Error = "search string must not be empty".into();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "Config error: search string must not be empty");

        let err: Error = format!("bad workers: {}", 0).into();
        assert_eq!(err.to_string(), "Config error: bad workers: 0");
    }

    #[test]
    fn test_root_error_messages() {
        let err = Error::RootNotFound(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "Root directory not found: /no/such/dir");

        let err = Error::NotADirectory(PathBuf::from("/etc/hosts"));
        assert_eq!(err.to_string(), "Root is not a directory: /etc/hosts");
    }
}
