//! Configuration types for the homework status bot.
//!
//! Every struct implements [`Default`] with the production values from
//! `defaults.toml`, so a bare `[section]` header in TOML still produces a
//! working configuration. Token fields are never printed by [`Debug`].

use serde::Deserialize;

/// Review service endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Homework review service access.
    pub practicum: PracticumSection,
    /// Telegram bot and target chat.
    pub telegram: TelegramSection,
    /// Poll scheduling.
    pub polling: PollingSection,
    /// Logging level, format, and output target.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// PracticumSection
// ---------------------------------------------------------------------------

/// Homework review service settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct PracticumSection {
    /// `OAuth` token sent in the `Authorization` header.
    /// Prefer the `PRACTICUM_TOKEN` environment variable over a file.
    pub token: Option<String>,
    /// Status endpoint URL.
    pub endpoint: String,
}

impl Default for PracticumSection {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

impl std::fmt::Debug for PracticumSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumSection")
            .field("has_token", &self.token.is_some())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TelegramSection
// ---------------------------------------------------------------------------

/// Telegram notification settings.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelegramSection {
    /// Telegram Bot API token (from `@BotFather`).
    /// Prefer the `TELEGRAM_TOKEN` environment variable over a file.
    pub bot_token: Option<String>,
    /// Numeric chat id or `@channel` username that receives notifications.
    pub chat_id: Option<String>,
    /// Alternate Bot API server, e.g. a self-hosted `telegram-bot-api`.
    pub api_url: Option<String>,
}

impl std::fmt::Debug for TelegramSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSection")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[REDACTED]"))
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// PollingSection
// ---------------------------------------------------------------------------

/// Poll loop timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingSection {
    /// Seconds to sleep between cycles.
    pub retry_period_secs: u64,
    /// How far back the first poll looks, in seconds.
    pub initial_lookback_secs: u64,
}

impl Default for PollingSection {
    fn default() -> Self {
        Self {
            retry_period_secs: 600,
            initial_lookback_secs: 604_800,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Base level filter (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Output format (`pretty`, `compact`, `json`, `full`).
    pub format: String,
    /// Output target (`stdout`, `stderr`, `file`).
    pub target: String,
    /// Log directory, required when `target = "file"`.
    pub directory: Option<String>,
    /// Extra per-target directives, e.g. `homework_bot=debug`.
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "full".to_owned(),
            target: "stdout".to_owned(),
            directory: None,
            directives: Vec::new(),
        }
    }
}
