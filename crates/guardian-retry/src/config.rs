use guardian_core::events::EventListeners;
use std::sync::Arc;
use std::time::Duration;

use crate::backoff::ExponentialBackoff;
use crate::events::RetryEvent;
use crate::policy::RetryPolicy;

pub struct RetryConfig<E> {
    pub(crate) max_attempts: u32,
    pub(crate) backoff: ExponentialBackoff,
    pub(crate) policy: RetryPolicy<E>,
    pub(crate) event_listeners: EventListeners<RetryEvent>,
}

pub struct RetryConfigBuilder<E> {
    max_attempts: u32,
    backoff: ExponentialBackoff,
    policy: RetryPolicy<E>,
    event_listeners: EventListeners<RetryEvent>,
}

impl<E> RetryConfigBuilder<E> {
    pub fn new() -> Self {
        Self {
            max_attempts: 3,
            backoff: ExponentialBackoff::new(Duration::from_millis(500), Duration::from_secs(30), 2.0),
            policy: RetryPolicy::always(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Includes the initial attempt: `max_attempts = 3` means 1 try + 2 retries.
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn exponential_backoff(mut self, initial: Duration, max: Duration, base: f64) -> Self {
        self.backoff = ExponentialBackoff::new(initial, max, base);
        self
    }

    pub fn retry_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.policy = RetryPolicy::new(Arc::new(predicate));
        self
    }

    pub fn on_event<F>(mut self, listener: F) -> Self
    where
        F: Fn(&RetryEvent) + Send + Sync + 'static,
    {
        self.event_listeners.register(Arc::new(listener));
        self
    }

    pub fn build(self) -> RetryConfig<E> {
        RetryConfig {
            max_attempts: self.max_attempts,
            backoff: self.backoff,
            policy: self.policy,
            event_listeners: self.event_listeners,
        }
    }
}

impl<E> Default for RetryConfigBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RetryConfig<E> {
    pub fn builder() -> RetryConfigBuilder<E> {
        RetryConfigBuilder::new()
    }

    pub fn from_guardian_config(cfg: &guardian_core::config::RetryStrategyConfig) -> RetryConfigBuilder<E> {
        RetryConfigBuilder::new()
            .max_attempts(cfg.max_attempts as u32)
            .exponential_backoff(
                Duration::from_millis(cfg.initial_delay_ms),
                Duration::from_millis(cfg.max_delay_ms),
                cfg.backoff_base,
            )
    }
}
