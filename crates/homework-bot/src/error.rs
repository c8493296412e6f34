//! Error types for a poll cycle.

use thiserror::Error;

/// Errors produced while polling, parsing or notifying.
///
/// None of these stop the bot: the poll loop reports them and carries on.
/// Missing configuration is reported separately by `homework_config`.
#[derive(Debug, Error)]
pub enum BotError {
    /// The request could not be sent or the body could not be read.
    #[error("request to the review service failed: {0}")]
    Transport(String),

    /// The endpoint address is missing or not a valid URL.
    #[error("review service endpoint is unusable: {0}")]
    Endpoint(String),

    /// The review service answered with something other than 200 OK.
    #[error("review service answered with HTTP {status}")]
    Status {
        /// HTTP status code received.
        status: u16,
    },

    /// The body is not valid JSON.
    #[error("review service returned invalid JSON: {0}")]
    Decode(String),

    /// The JSON does not have the expected structure.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// A homework record lacks a required field.
    #[error("homework record is incomplete: {0}")]
    Field(String),

    /// A homework status outside the known verdicts.
    #[error("unknown homework status '{0}'")]
    UnknownVerdict(String),

    /// Sending a chat message failed.
    #[error("failed to deliver notification: {0}")]
    Delivery(String),
}

impl BotError {
    /// Whether this error came from the notification channel itself.
    #[must_use]
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

/// Convenience alias.
pub type BotResult<T> = Result<T, BotError>;
