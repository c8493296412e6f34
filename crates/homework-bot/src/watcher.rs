//! The poll loop: fetch → validate → describe → notify → sleep.

use std::time::Duration;

use tracing::{error, info};

use crate::api::HomeworkApi;
use crate::clock::Clock;
use crate::error::{BotError, BotResult};
use crate::notifier::{Messenger, Notifier};
use crate::status::{describe, validate_response};
use homework_config::Settings;

/// Sent once when the bot starts.
pub const STARTUP_MESSAGE: &str = "Бот начал работу";

/// Prefix of the chat message reporting a failed cycle.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// What a single cycle ended with.
#[derive(Debug)]
pub enum CycleOutcome {
    /// A new status message was delivered.
    Delivered(String),
    /// Nothing new to report, or the message repeated the last one.
    Unchanged,
    /// The cycle failed; a failure notice was attempted.
    Failed(BotError),
}

/// Successful poll: the cursor to use next and the message to send, if any.
struct CycleReport {
    current_date: i64,
    message: Option<String>,
}

/// Polls the review service and forwards status changes to a chat.
///
/// Owns the only state that survives between cycles: the `from_date` cursor
/// and, inside the [`Notifier`], the last message sent.
pub struct StatusWatcher<A, M, C> {
    api: A,
    notifier: Notifier<M>,
    clock: C,
    retry_period: Duration,
    cursor: i64,
}

impl<A, M, C> StatusWatcher<A, M, C>
where
    A: HomeworkApi,
    M: Messenger,
    C: Clock,
{
    /// Create a watcher whose first poll looks back `initial_lookback`.
    pub fn new(api: A, messenger: M, clock: C, settings: &Settings) -> Self {
        let lookback = i64::try_from(settings.initial_lookback.as_secs()).unwrap_or(i64::MAX);
        let cursor = clock.now().saturating_sub(lookback);
        Self {
            api,
            notifier: Notifier::new(messenger),
            clock,
            retry_period: settings.retry_period,
            cursor,
        }
    }

    /// Override the starting cursor.
    #[must_use]
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// The `from_date` the next poll will use.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// The notifier, for inspecting the last message sent.
    pub fn notifier(&self) -> &Notifier<M> {
        &self.notifier
    }

    /// Announce startup in the chat. Delivery failures are only logged.
    pub async fn announce_start(&mut self) {
        self.deliver(STARTUP_MESSAGE).await;
    }

    /// Run one poll cycle without sleeping.
    ///
    /// On success the cursor advances to the server's `current_date`. On
    /// failure the cursor is left alone and a failure notice is sent, subject
    /// to the usual duplicate suppression.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(report) => {
                self.cursor = report.current_date;
                match report.message {
                    Some(message) => {
                        info!(%message, cursor = self.cursor, "homework status received");
                        if self.deliver(&message).await {
                            CycleOutcome::Delivered(message)
                        } else {
                            CycleOutcome::Unchanged
                        }
                    },
                    None => {
                        info!(cursor = self.cursor, "no new homework statuses");
                        CycleOutcome::Unchanged
                    },
                }
            },
            Err(e) => {
                let notice = format!("{FAILURE_PREFIX}{e}");
                error!(error = %e, cursor = self.cursor, "poll cycle failed");
                self.deliver(&notice).await;
                CycleOutcome::Failed(e)
            },
        }
    }

    /// Run `cycles` cycles, sleeping the retry period after each.
    pub async fn run_cycles(&mut self, cycles: usize) {
        for _ in 0..cycles {
            self.run_cycle().await;
            self.clock.sleep(self.retry_period).await;
        }
    }

    /// Poll forever. Only process termination stops this loop.
    pub async fn run(mut self) {
        info!(
            cursor = self.cursor,
            period_secs = self.retry_period.as_secs(),
            "starting poll loop"
        );
        loop {
            self.run_cycle().await;
            self.clock.sleep(self.retry_period).await;
        }
    }

    async fn poll(&self) -> BotResult<CycleReport> {
        let response = self.api.fetch(self.cursor).await?;
        let result = validate_response(&response)?;
        let message = result.latest.as_ref().map(describe).transpose()?;
        Ok(CycleReport {
            current_date: result.current_date,
            message,
        })
    }

    /// Best-effort send. Returns whether a message actually went out.
    async fn deliver(&mut self, text: &str) -> bool {
        match self.notifier.notify(text).await {
            Ok(sent) => sent,
            Err(e) => {
                error!(error = %e, "could not send message to chat");
                false
            },
        }
    }
}
