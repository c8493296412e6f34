//! Chat delivery with duplicate suppression.

use async_trait::async_trait;
use tracing::debug;

use crate::error::BotResult;

/// A chat that can receive plain-text notifications.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver one message.
    async fn send(&self, text: &str) -> BotResult<()>;
}

/// Sends a message only when it differs from the previous one.
pub struct Notifier<M> {
    messenger: M,
    last_message: Option<String>,
}

impl<M: Messenger> Notifier<M> {
    /// Wrap a messenger with no message sent yet.
    pub fn new(messenger: M) -> Self {
        Self {
            messenger,
            last_message: None,
        }
    }

    /// The last message handed to the messenger, if any.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Borrow the underlying messenger.
    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Send `text` unless it repeats the last message.
    ///
    /// Returns `Ok(true)` when delivered and `Ok(false)` when suppressed. The
    /// text becomes the last message even when delivery fails, so a broken
    /// chat is not retried with the same text every cycle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BotError::Delivery`] if the messenger fails. Callers
    /// log it and continue.
    pub async fn notify(&mut self, text: &str) -> BotResult<bool> {
        if self.last_message.as_deref() == Some(text) {
            debug!("message unchanged, not sending");
            return Ok(false);
        }

        self.last_message = Some(text.to_string());
        self.messenger.send(text).await?;
        debug!(message = text, "sent message to chat");
        Ok(true)
    }
}
