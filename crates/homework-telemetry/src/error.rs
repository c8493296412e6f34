//! Logging setup errors.

use std::path::PathBuf;

use thiserror::Error;

/// Why logging could not be set up.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level, a directive or the format name does not parse.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// The log directory could not be created.
    #[error("cannot create log directory {}: {source}", path.display())]
    LogDirectory {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("logging already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Result type for logging setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
