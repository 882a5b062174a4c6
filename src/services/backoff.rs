//! Retry with exponential backoff.
//!
//! Wraps a single fallible async call. Attempt 1 runs immediately; attempt
//! `k >= 2` runs `base_delay * 2^(k-2)` after attempt `k-1` failed. There is no
//! jitter and no cap, so the schedule is fully deterministic.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Attempt budget and base delay for one kind of call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for every later retry.
    pub base_delay: Duration,
}

impl BackoffPolicy {
    /// Policy for text-generation calls.
    pub const TEXT_GENERATION: BackoffPolicy = BackoffPolicy {
        max_attempts: 5,
        base_delay: Duration::from_millis(100),
    };

    /// Policy for image-generation calls.
    pub const IMAGE_GENERATION: BackoffPolicy = BackoffPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(100),
    };

    /// Delay to wait after `failed_attempt` (zero-based) before trying again.
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(failed_attempt)
    }
}

/// All attempts failed. Carries the error of the last attempt.
#[derive(Debug, thiserror::Error)]
#[error("gave up after {attempts} attempts: {last_error}")]
pub struct Exhausted<E> {
    pub attempts: u32,
    #[source]
    pub last_error: E,
}

/// Run `op` until it succeeds or `policy.max_attempts` calls have failed.
///
/// `operation` names the call in logs and metrics.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: BackoffPolicy,
    operation: &'static str,
    mut op: F,
) -> Result<T, Exhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        metrics::counter!("backoff_attempts_total", "operation" => operation).increment(1);

        let err = match op().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(operation, attempts = attempt + 1, "Call succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if attempt + 1 >= max_attempts {
            metrics::counter!("backoff_exhausted_total", "operation" => operation).increment(1);
            tracing::error!(
                operation,
                attempts = max_attempts,
                error = %err,
                "Retry budget exhausted"
            );
            return Err(Exhausted {
                attempts: max_attempts,
                last_error: err,
            });
        }

        let delay = policy.delay_after(attempt);
        tracing::warn!(
            operation,
            attempt = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Call failed, retrying"
        );
        sleep(delay).await;
        attempt += 1;
    }
}
