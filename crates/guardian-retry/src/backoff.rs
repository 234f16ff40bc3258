//! Exponential backoff with full jitter, grounded on
//! `llm_guardian.recovery.retry_manager.RetryStrategy.get_delay`:
//! `min(initial * base ** attempt, max) * (0.5 + random() * 0.5)`. The
//! teacher's `ExponentialBackoff` (`tower_resilience_retry::backoff`) uses
//! the same doubling shape without the 0.5..1.0 jitter floor; we keep the
//! original's jitter formula since SPEC_FULL.md tracks it exactly.

use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    pub initial: Duration,
    pub max: Duration,
    pub base: f64,
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max: Duration, base: f64) -> Self {
        Self { initial, max, base }
    }

    /// `attempt` is 0-indexed: the delay before the first retry uses `attempt = 0`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let raw = self.initial.as_secs_f64() * self.base.powi(attempt as i32);
        let capped = raw.min(self.max.as_secs_f64());
        let jitter = 0.5 + rand::rng().random::<f64>() * 0.5;
        Duration::from_secs_f64(capped * jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_at_max_delay() {
        let backoff = ExponentialBackoff::new(Duration::from_millis(500), Duration::from_secs(30), 2.0);
        for attempt in 0..20 {
            let delay = backoff.delay_for(attempt);
            assert!(delay <= Duration::from_secs(30));
        }
    }

    #[test]
    fn grows_with_attempt() {
        let backoff = ExponentialBackoff::new(Duration::from_millis(100), Duration::from_secs(60), 2.0);
        let raw_attempt0 = backoff.initial.as_secs_f64();
        let raw_attempt3 = backoff.initial.as_secs_f64() * backoff.base.powi(3);
        assert!(raw_attempt3 > raw_attempt0);
    }
}
