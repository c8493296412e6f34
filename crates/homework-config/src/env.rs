//! Environment variable fallbacks.
//!
//! Env vars are **fallback**, not override: they only fill fields that no
//! config file set. The three secrets are the exception and always come from
//! the environment when it has them. Empty values are treated as unset.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
    numeric: bool,
    /// Wins over a config file value.
    overrides_file: bool,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "PRACTICUM_TOKEN",
        field_path: "practicum.token",
        numeric: false,
        overrides_file: true,
    },
    EnvMapping {
        var_name: "PRACTICUM_ENDPOINT",
        field_path: "practicum.endpoint",
        numeric: false,
        overrides_file: false,
    },
    EnvMapping {
        var_name: "TELEGRAM_TOKEN",
        field_path: "telegram.bot_token",
        numeric: false,
        overrides_file: true,
    },
    EnvMapping {
        var_name: "TELEGRAM_CHAT_ID",
        field_path: "telegram.chat_id",
        numeric: false,
        overrides_file: true,
    },
    EnvMapping {
        var_name: "TELEGRAM_API_URL",
        field_path: "telegram.api_url",
        numeric: false,
        overrides_file: false,
    },
    EnvMapping {
        var_name: "HOMEWORK_BOT_RETRY_PERIOD",
        field_path: "polling.retry_period_secs",
        numeric: true,
        overrides_file: false,
    },
    EnvMapping {
        var_name: "HOMEWORK_BOT_LOOKBACK",
        field_path: "polling.initial_lookback_secs",
        numeric: true,
        overrides_file: false,
    },
    EnvMapping {
        var_name: "HOMEWORK_BOT_LOG_LEVEL",
        field_path: "logging.level",
        numeric: false,
        overrides_file: false,
    },
    EnvMapping {
        var_name: "HOMEWORK_BOT_LOG_FORMAT",
        field_path: "logging.format",
        numeric: false,
        overrides_file: false,
    },
];

/// Snapshot the process environment, dropping empty values.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().filter(|(_, v)| !v.is_empty()).collect()
}

/// Apply environment variable fallbacks to fields that were not set by any
/// config file.
///
/// Returns the number of env vars applied.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] when a numeric variable does not parse.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<usize> {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if !mapping.overrides_file
            && matches!(sources.get(mapping.field_path), Some(ConfigLayer::File(_)))
        {
            continue;
        }

        let Some(raw) = env_vars.get(mapping.var_name).filter(|v| !v.is_empty()) else {
            continue;
        };

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var fallback"
        );

        let value = coerce(mapping, raw)?;
        set_field(merged, mapping.field_path, value);
        sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
        count = count.saturating_add(1);
    }

    Ok(count)
}

fn coerce(mapping: &EnvMapping, raw: &str) -> ConfigResult<toml::Value> {
    if !mapping.numeric {
        return Ok(toml::Value::String(raw.to_owned()));
    }
    raw.trim()
        .parse::<u32>()
        .map(|n| toml::Value::Integer(i64::from(n)))
        .map_err(|e| ConfigError::EnvError {
            var_name: mapping.var_name.to_owned(),
            message: format!("expected a whole number of seconds: {e}"),
        })
}

/// Set a dotted field path in the TOML tree, creating intermediate tables.
fn set_field(root: &mut toml::Value, path: &str, value: toml::Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_owned(), value);
            return;
        }
        current = table
            .entry(segment.to_owned())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }
}
