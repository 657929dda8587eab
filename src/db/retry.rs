use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Exponential backoff with full jitter for idempotent reads.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Upper bound of the sleep before retry number `attempt` (1-based).
    fn max_delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }

    pub async fn retry_async<F, Fut, T, E>(&self, mut f: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 0u32;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        return Err(e);
                    }
                    let max_millis = self.max_delay(attempt).as_millis() as u64;
                    let delay = if max_millis == 0 {
                        Duration::ZERO
                    } else {
                        Duration::from_millis(rand::thread_rng().gen_range(0..max_millis))
                    };
                    tracing::warn!(attempt, ?delay, error = %e, "Store read failed, retrying");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
