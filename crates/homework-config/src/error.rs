//! Configuration errors.

use std::io;
use thiserror::Error;

/// Why the bot could not be configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but cannot be read.
    #[error("cannot read config file {path}: {source}")]
    ReadError {
        /// File that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A config file is not valid TOML or has a wrongly typed value.
    #[error("invalid config in {path}: {source}")]
    ParseError {
        /// File, or a `<...>` marker for the embedded and merged trees.
        path: String,
        /// TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is well-formed but not acceptable.
    #[error("invalid value for '{field}': {message}")]
    ValidationError {
        /// Dotted field path, e.g. `polling.retry_period_secs`.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// An environment variable fallback does not parse.
    #[error("bad value in ${var_name}: {message}")]
    EnvError {
        /// Variable name.
        var_name: String,
        /// What is wrong with it.
        message: String,
    },

    /// One or more required secrets are absent.
    #[error("Missing required environment variables: {}", vars.join(", "))]
    MissingSecrets {
        /// Names of the variables that were not provided.
        vars: Vec<&'static str>,
    },
}

/// Convenience alias.
pub type ConfigResult<T> = Result<T, ConfigError>;
