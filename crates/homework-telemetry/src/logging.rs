//! Subscriber construction for the bot's log output.

use std::path::PathBuf;
use std::str::FromStr;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::Directive,
    fmt::{self, MakeWriter},
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::error::{TelemetryError, TelemetryResult};

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync + 'static>;

/// File name prefix for rolling log files, e.g. `homework-bot.2024-01-15`.
const LOG_FILE_PREFIX: &str = "homework-bot";

/// How each event is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, colored.
    Pretty,
    /// Single line, abbreviated fields.
    Compact,
    /// One JSON object per line.
    Json,
    /// Single line with timestamp, level, target, message and fields.
    #[default]
    Full,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            "full" => Ok(Self::Full),
            other => Err(TelemetryError::InvalidFilter(format!(
                "unknown log format '{other}'"
            ))),
        }
    }
}

/// Where log lines go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// Daily-rotated files in this directory.
    File(PathBuf),
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base level filter, e.g. `info`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Output target.
    pub target: LogTarget,
    /// Emit ANSI colors. Off for file targets.
    pub ansi: bool,
    /// Extra per-target directives, e.g. `reqwest=warn`.
    pub directives: Vec<String>,
    /// `RUST_LOG` entries that did not parse; reported once logging is up.
    skipped_env_directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl LogConfig {
    /// Stdout, full format, at `level`.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            ansi: true,
            directives: Vec::new(),
            skipped_env_directives: Vec::new(),
        }
    }

    /// Set the log format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log target. File targets disable ANSI colors.
    #[must_use]
    pub fn with_target(mut self, target: LogTarget) -> Self {
        if matches!(target, LogTarget::File(_)) {
            self.ansi = false;
        }
        self.target = target;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Append the comma-separated directives from `RUST_LOG`, if set.
    ///
    /// Entries that do not parse are dropped and reported as a warning by
    /// [`setup_logging`], matching how `EnvFilter::from_env` treats them.
    #[must_use]
    pub fn with_env_directives(self) -> Self {
        match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(raw) => self.with_directive_list(&raw),
            Err(_) => self,
        }
    }

    fn with_directive_list(mut self, raw: &str) -> Self {
        for directive in raw.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            if directive.parse::<Directive>().is_ok() {
                self.directives.push(directive.to_owned());
            } else {
                self.skipped_env_directives.push(directive.to_owned());
            }
        }
        self
    }

    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter = EnvFilter::try_new(&self.level)
            .map_err(|e| TelemetryError::InvalidFilter(format!("'{}': {e}", self.level)))?;

        for directive in &self.directives {
            let parsed = directive
                .parse::<Directive>()
                .map_err(|e| TelemetryError::InvalidFilter(format!("'{directive}': {e}")))?;
            filter = filter.add_directive(parsed);
        }

        Ok(filter)
    }

    fn build_layer<W>(&self, writer: W) -> BoxedLayer
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let layer = fmt::layer().with_writer(writer).with_ansi(self.ansi);

        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Full => layer.boxed(),
        }
    }
}

#[cfg(feature = "config")]
impl LogConfig {
    /// Build a log config from the `[logging]` section of the bot config.
    ///
    /// An unknown format falls back to [`LogFormat::Full`]; config
    /// validation rejects those before this is reached.
    #[must_use]
    pub fn from_section(section: &homework_config::LoggingSection) -> Self {
        let format = section.format.parse().unwrap_or_default();
        let target = match (section.target.as_str(), section.directory.as_deref()) {
            ("stderr", _) => LogTarget::Stderr,
            ("file", Some(dir)) => LogTarget::File(PathBuf::from(dir)),
            _ => LogTarget::Stdout,
        };

        let mut config = Self::new(section.level.clone())
            .with_format(format)
            .with_target(target);
        config.directives.extend(section.directives.iter().cloned());
        config
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if the filter does not parse, the log directory cannot
/// be created, or a subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.build_filter()?;

    let layer = match &config.target {
        LogTarget::Stdout => config.build_layer(std::io::stdout),
        LogTarget::Stderr => config.build_layer(std::io::stderr),
        LogTarget::File(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| TelemetryError::LogDirectory {
                path: dir.clone(),
                source,
            })?;
            config.build_layer(RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX))
        },
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialised(e.to_string()))?;

    for directive in &config.skipped_env_directives {
        tracing::warn!(%directive, "ignoring invalid RUST_LOG directive");
    }
    Ok(())
}

/// Stdout logging at `info`, for use before configuration is available.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_info_full_stdout() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Full);
        assert_eq!(config.target, LogTarget::Stdout);
        assert!(config.ansi);
    }

    #[test]
    fn file_target_disables_ansi() {
        let config = LogConfig::default().with_target(LogTarget::File(PathBuf::from("logs")));
        assert!(!config.ansi);
    }

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" compact ".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn directive_list_skips_blanks() {
        let config = LogConfig::default().with_directive_list("reqwest=warn, ,homework_bot=debug,");
        assert_eq!(config.directives, vec!["reqwest=warn", "homework_bot=debug"]);
    }

    #[test]
    fn malformed_env_directive_is_skipped_not_fatal() {
        let config = LogConfig::default().with_directive_list("reqwest=warn,[bad=syntax");

        assert_eq!(config.directives, vec!["reqwest=warn"]);
        assert_eq!(config.skipped_env_directives, vec!["[bad=syntax"]);
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn filter_accepts_target_directives() {
        let config = LogConfig::new("debug").with_directive("homework_bot=trace");
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn filter_rejects_bad_directive() {
        let config = LogConfig::new("debug").with_directive("[invalid=syntax");
        assert!(matches!(
            config.build_filter(),
            Err(TelemetryError::InvalidFilter(_))
        ));
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_section_maps_file_target() {
        let section = homework_config::LoggingSection {
            level: "debug".to_owned(),
            format: "json".to_owned(),
            target: "file".to_owned(),
            directory: Some("/tmp/homework-bot".to_owned()),
            directives: vec!["reqwest=warn".to_owned()],
        };
        let config = LogConfig::from_section(&section);

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(
            config.target,
            LogTarget::File(PathBuf::from("/tmp/homework-bot"))
        );
        assert!(!config.ansi);
        assert_eq!(config.directives, vec!["reqwest=warn"]);
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_section_stderr_ignores_directory() {
        let section = homework_config::LoggingSection {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            target: "stderr".to_owned(),
            directory: Some("/tmp/ignored".to_owned()),
            directives: Vec::new(),
        };
        let config = LogConfig::from_section(&section);
        assert_eq!(config.target, LogTarget::Stderr);
        assert!(config.ansi);
    }
}
