//! Checks applied after the layers are merged.
//!
//! The review endpoint is only checked when a poll uses it.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const FORMATS: &[&str] = &["pretty", "compact", "json", "full"];
const TARGETS: &[&str] = &["stdout", "stderr", "file"];

/// Check a merged configuration.
///
/// # Errors
///
/// Returns a [`ConfigError::ValidationError`] for the first bad field.
pub fn validate(config: &Config) -> ConfigResult<()> {
    if config.polling.retry_period_secs == 0 {
        return Err(invalid("polling.retry_period_secs", "must be greater than zero"));
    }

    let logging = &config.logging;
    one_of("logging.level", &logging.level, LEVELS)?;
    one_of("logging.format", &logging.format, FORMATS)?;
    one_of("logging.target", &logging.target, TARGETS)?;

    if logging.target == "file" && logging.directory.as_deref().is_none_or(str::is_empty) {
        return Err(invalid(
            "logging.directory",
            "required when logging.target is 'file'",
        ));
    }

    Ok(())
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> ConfigResult<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(invalid(
        field,
        &format!("'{value}' is not one of {}", allowed.join(", ")),
    ))
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.to_owned(),
    }
}
