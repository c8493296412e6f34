//! Logging for the homework status bot.
//!
//! Thin layer over `tracing-subscriber`: pick a level, a format and a target,
//! then call [`setup_logging`] once at startup.
//!
//! # Example
//!
//! ```rust,no_run
//! use homework_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), homework_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("reqwest=warn");
//!
//! setup_logging(&config)?;
//! tracing::info!("polling started");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
