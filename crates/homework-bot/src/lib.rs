//! Homework status bot.
//!
//! Polls the homework review service on a fixed interval, turns the latest
//! submission's status into a human-readable verdict, and posts it to a
//! Telegram chat when it changes.
//!
//! The pieces are kept behind small traits ([`HomeworkApi`], [`Messenger`],
//! [`Clock`]) so [`StatusWatcher`] can be driven deterministically in tests.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod api;
pub mod clock;
pub mod error;
pub mod notifier;
pub mod status;
pub mod telegram;
pub mod watcher;

pub use api::{HomeworkApi, PracticumClient};
pub use clock::{Clock, SystemClock};
pub use error::{BotError, BotResult};
pub use notifier::{Messenger, Notifier};
pub use status::{Homework, PollResult, Verdict, describe, validate_response};
pub use telegram::TelegramMessenger;
pub use watcher::{CycleOutcome, FAILURE_PREFIX, STARTUP_MESSAGE, StatusWatcher};
