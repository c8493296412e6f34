#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration for the homework status bot.
//!
//! A single [`Config`] is assembled once at startup and then narrowed into
//! [`Settings`], which is what the poller and notifier receive by reference.
//!
//! # Usage
//!
//! ```rust,no_run
//! use homework_config::Config;
//!
//! let resolved = Config::load(None).unwrap();
//! let settings = resolved.config.require().unwrap();
//! println!("polling {}", settings.endpoint);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Secret environment variables** (`PRACTICUM_TOKEN`, `TELEGRAM_TOKEN`,
//!    `TELEGRAM_CHAT_ID`) when non-empty
//! 2. **Config file** (`--config`, `HOMEWORK_BOT_CONFIG`, or the per-user
//!    `config.toml`)
//! 3. **Other environment variables** (`PRACTICUM_ENDPOINT`,
//!    `TELEGRAM_API_URL`, `HOMEWORK_BOT_*`) for fields no file set
//! 4. **Embedded defaults** (`defaults.toml` compiled into the binary)

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered merging with per-field source tracking.
pub mod merge;
/// Startup secret checks and the runtime settings handed to the bot.
pub mod settings;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use settings::Settings;
pub use types::*;

impl Config {
    /// Load configuration from defaults, an optional file and the process
    /// environment.
    ///
    /// See [`loader::load`] for the discovery rules.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config file is unreadable or
    /// malformed, or the merged configuration fails validation.
    pub fn load(config_file: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(config_file)
    }
}
