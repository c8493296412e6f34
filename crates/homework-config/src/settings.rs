use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validated runtime settings with every required secret present.
///
/// Built once at startup by [`Config::require`] and passed by reference to
/// the poller and notifier.
#[derive(Clone)]
pub struct Settings {
    /// `OAuth` token for the review service.
    pub practicum_token: String,
    /// Telegram Bot API token.
    pub telegram_token: String,
    /// Target chat: numeric id or `@channel` username.
    pub chat_id: String,
    /// Review service status endpoint.
    pub endpoint: String,
    /// Alternate Bot API server URL.
    pub telegram_api_url: Option<String>,
    /// Sleep between poll cycles.
    pub retry_period: Duration,
    /// How far back the first poll looks.
    pub initial_lookback: Duration,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("practicum_token", &"[REDACTED]")
            .field("telegram_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("initial_lookback", &self.initial_lookback)
            .finish()
    }
}

impl Config {
    /// Check that all three secrets are present and build [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSecrets`] naming every absent or empty
    /// variable among `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN` and
    /// `TELEGRAM_CHAT_ID`.
    pub fn require(&self) -> ConfigResult<Settings> {
        let practicum_token = present(self.practicum.token.as_deref());
        let telegram_token = present(self.telegram.bot_token.as_deref());
        let chat_id = present(self.telegram.chat_id.as_deref());

        let (Some(practicum_token), Some(telegram_token), Some(chat_id)) =
            (practicum_token, telegram_token, chat_id)
        else {
            let vars = [
                ("PRACTICUM_TOKEN", practicum_token),
                ("TELEGRAM_TOKEN", telegram_token),
                ("TELEGRAM_CHAT_ID", chat_id),
            ]
            .into_iter()
            .filter_map(|(name, value)| value.is_none().then_some(name))
            .collect();
            return Err(ConfigError::MissingSecrets { vars });
        };

        Ok(Settings {
            practicum_token: practicum_token.to_owned(),
            telegram_token: telegram_token.to_owned(),
            chat_id: chat_id.to_owned(),
            endpoint: self.practicum.endpoint.clone(),
            telegram_api_url: self
                .telegram
                .api_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
            retry_period: Duration::from_secs(self.polling.retry_period_secs),
            initial_lookback: Duration::from_secs(self.polling.initial_lookback_secs),
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
