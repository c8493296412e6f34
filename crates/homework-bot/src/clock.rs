//! Wall-clock time and sleeping, behind a trait so the poll loop can be
//! driven without real delays.

use std::time::Duration;

use async_trait::async_trait;

/// Time source for the poll loop.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current time in unix seconds.
    fn now(&self) -> i64;

    /// Suspend the loop for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Real time: `chrono` for the timestamp, `tokio` for sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
