//! The retry executor. The teacher wraps a `tower::Service` in a `RetryLayer`
//! (`tower_resilience_retry::layer`); guardian's `Provider` trait isn't a
//! tower service, so `RetryController` exposes a direct async executor
//! method instead of a `Layer`. The attempt loop, backoff and policy check
//! are carried over verbatim from that layer's `call` implementation, and
//! from `RetryManager.execute_with_retry` for the retryable-error gate.

use crate::config::RetryConfig;
use crate::error::RetryError;
use crate::events::RetryEvent;

pub struct RetryController<E> {
    config: RetryConfig<E>,
}

impl<E> RetryController<E> {
    pub fn new(config: RetryConfig<E>) -> Self {
        Self { config }
    }

    /// Calls `f(attempt)` up to `max_attempts` times (attempt is 0-indexed),
    /// sleeping with exponential backoff between attempts, stopping early if
    /// the policy says an error isn't retryable.
    pub async fn execute<F, Fut, T>(&self, mut f: F) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match f(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if !self.config.policy.is_retryable(&err) {
                        return Err(RetryError::NotRetryable(err));
                    }
                    if attempt >= self.config.max_attempts {
                        self.config
                            .event_listeners
                            .emit(&RetryEvent::RetriesExhausted { attempts: attempt });
                        return Err(RetryError::Exhausted { attempts: attempt, last: err });
                    }
                    let delay = self.config.backoff.delay_for(attempt - 1);
                    self.config
                        .event_listeners
                        .emit(&RetryEvent::AttemptFailed { attempt, delay_before_next: delay });
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn retries_until_success() {
        let config = RetryConfig::builder()
            .max_attempts(5)
            .exponential_backoff(Duration::from_millis(1), Duration::from_millis(5), 2.0)
            .build();
        let controller = RetryController::new(config);
        let calls = AtomicU32::new(0);

        let result = controller
            .execute(|_attempt| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { if n < 2 { Err::<u32, _>("transient") } else { Ok(42) } }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausts_after_max_attempts() {
        let config = RetryConfig::<&str>::builder()
            .max_attempts(2)
            .exponential_backoff(Duration::from_millis(1), Duration::from_millis(5), 2.0)
            .build();
        let controller = RetryController::new(config);

        let result = controller.execute(|_| async { Err::<(), _>("always fails") }).await;
        assert!(matches!(result, Err(RetryError::Exhausted { attempts: 2, .. })));
    }

    #[tokio::test]
    async fn stops_immediately_on_non_retryable_error() {
        let config = RetryConfig::<&str>::builder()
            .max_attempts(5)
            .retry_if(|e: &&str| *e != "fatal")
            .build();
        let controller = RetryController::new(config);

        let result = controller.execute(|_| async { Err::<(), _>("fatal") }).await;
        assert!(matches!(result, Err(RetryError::NotRetryable("fatal"))));
    }
}
