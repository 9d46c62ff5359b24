use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::errors::TransportError;

/// Bounded retry with exponential backoff.
///
/// Every failure is retried regardless of its kind, and the delay doubles
/// after each attempt with no jitter and no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    /// Run `f` until it succeeds or `max_attempts` calls have failed.
    ///
    /// The backoff sleep also follows the final failure before the error is
    /// returned, wrapped with the attempt count.
    pub async fn run<T, F, Fut>(&self, mut f: F) -> Result<T, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut delay = self.initial_delay;
        let mut attempt = 1;

        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!(attempt, max_attempts = attempts, error = %err, "light call failed");
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);

                    if attempt >= attempts {
                        return Err(TransportError::RetriesExhausted {
                            attempts,
                            source: Box::new(err),
                        });
                    }
                    attempt += 1;
                }
            }
        }
    }
}
