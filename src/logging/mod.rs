//! Tracing subscriber initialization.
//!
//! Events go to a plain-text file. The level directive comes from the config
//! file, never from the environment.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Level directive could not be parsed
    #[error("Invalid log level '{directive}': {reason}")]
    InvalidLevel {
        /// The rejected directive
        directive: String,
        /// Parser message
        reason: String,
    },

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Parse a level directive such as `"info"` or `"shelfview=debug,warn"`.
pub fn level_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidLevel {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install a global subscriber writing to `log_path` at `level`.
///
/// Creates the log directory if it doesn't exist. The directory is created
/// before the subscriber is installed, so it exists even when installation
/// fails because another subscriber is already set.
///
/// # Errors
///
/// Fails if the directory cannot be created, the path has no file name, the
/// level directive is invalid, or a global subscriber is already set.
pub fn init(log_path: &Path, level: &str) -> Result<(), LoggingError> {
    let filter = level_filter(level)?;

    let file_name = log_path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
