//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge the config file, if one is found
//! 3. Apply env vars: secrets always, everything else only where the file
//!    did not set a value
//! 4. Deserialize merged tree → `Config`
//! 5. Validate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, deep_merge_tracking, record_leaves};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "HOMEWORK_BOT_CONFIG";

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A fully merged configuration plus where its values came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged, validated configuration.
    pub config: Config,
    /// Source layer of every leaf field.
    pub field_sources: FieldSources,
    /// Config files that contributed, in load order.
    pub loaded_files: Vec<String>,
}

/// Load configuration using the process environment.
///
/// The config file is, in order of preference: `config_file`, the path in
/// `HOMEWORK_BOT_CONFIG`, or `config.toml` in the per-user config directory
/// when it exists. The first two must be readable; the per-user file is
/// optional.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the config file is unreadable or malformed,
/// an env var fallback does not parse, or validation fails.
pub fn load(config_file: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let env_vars = collect_env_vars();

    let path = config_file
        .map(Path::to_path_buf)
        .or_else(|| env_vars.get(CONFIG_PATH_VAR).map(PathBuf::from))
        .or_else(user_config_file);

    load_with_env(path.as_deref(), &env_vars)
}

/// Load configuration from an explicit file (if any) and an injected
/// environment map.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_env<S: ::std::hash::BuildHasher>(
    config_file: Option<&Path>,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<ResolvedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();
    record_leaves(&merged, "", &ConfigLayer::Defaults, &mut field_sources);

    if let Some(path) = config_file {
        let overlay = load_file_value(path)?;
        let layer = ConfigLayer::File(path.display().to_string());
        deep_merge_tracking(&mut merged, &overlay, "", &layer, &mut field_sources);
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), "loaded config file");
    }

    let env_count = apply_env_fallbacks(&mut merged, &mut field_sources, env_vars)?;
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable fallbacks");
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        field_sources,
        loaded_files,
    })
}

/// Read and parse a config file into a raw TOML tree.
fn load_file_value(path: &Path) -> ConfigResult<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

/// `config.toml` in the per-user config directory, if present.
fn user_config_file() -> Option<PathBuf> {
    let Some(dirs) = directories::ProjectDirs::from("", "", "homework-bot") else {
        debug!("no home directory; skipping per-user config");
        return None;
    };
    let path = dirs.config_dir().join("config.toml");
    path.is_file().then_some(path)
}
