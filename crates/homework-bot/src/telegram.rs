//! Telegram delivery via teloxide.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use url::Url;

use crate::error::{BotError, BotResult};
use crate::notifier::Messenger;
use homework_config::Settings;

/// Sends notifications to a single Telegram chat.
pub struct TelegramMessenger {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramMessenger {
    /// Build a messenger from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Endpoint`] if a custom Bot API URL is configured
    /// but does not parse.
    pub fn new(settings: &Settings) -> BotResult<Self> {
        let mut bot = Bot::new(&settings.telegram_token);
        if let Some(api_url) = &settings.telegram_api_url {
            let url = Url::parse(api_url)
                .map_err(|e| BotError::Endpoint(format!("telegram api url '{api_url}': {e}")))?;
            bot = bot.set_api_url(url);
        }
        Ok(Self {
            bot,
            recipient: parse_recipient(&settings.chat_id),
        })
    }

    /// The chat messages are addressed to.
    #[must_use]
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, text: &str) -> BotResult<()> {
        self.bot
            .send_message(self.recipient.clone(), text)
            .await
            .map(|_| ())
            .map_err(|e| BotError::Delivery(e.to_string()))
    }
}

/// Numeric ids address chats directly; anything else is a channel username.
fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if chat_id.starts_with('@') => Recipient::ChannelUsername(chat_id.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{chat_id}")),
    }
}
