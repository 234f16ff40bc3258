//! A token bucket guarded by its own `Mutex`, grounded on the teacher's
//! `FixedWindowState` (`tower_resilience_ratelimiter::limiter`) and on the
//! original `TokenBucket` (async-lock refill/acquire) from
//! `llm_guardian.safety.rate_limiter`. No lock is ever held across an
//! `.await`, so a plain `std::sync::Mutex` is enough.

use std::sync::Mutex;
use std::time::Instant;

#[derive(Debug)]
struct TokenBucketState {
    tokens: f64,
    capacity: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucketState {
    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        if elapsed <= 0.0 {
            return;
        }
        self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        self.last_refill = now;
    }
}

/// A token bucket limiter: `capacity` tokens, refilled at `refill_per_sec`.
pub struct TokenBucket {
    state: Mutex<TokenBucketState>,
}

impl TokenBucket {
    pub fn new(capacity: f64, refill_per_sec: f64, now: Instant) -> Self {
        Self {
            state: Mutex::new(TokenBucketState {
                tokens: capacity,
                capacity,
                refill_per_sec,
                last_refill: now,
            }),
        }
    }

    /// Try to take `cost` tokens. Returns `true` if admitted.
    pub fn try_acquire(&self, cost: f64, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap();
        state.refill(now);
        if state.tokens >= cost {
            state.tokens -= cost;
            true
        } else {
            false
        }
    }

    pub fn available_tokens(&self, now: Instant) -> f64 {
        let mut state = self.state.lock().unwrap();
        state.refill(now);
        state.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn admits_up_to_capacity_then_rejects() {
        let t0 = Instant::now();
        let bucket = TokenBucket::new(3.0, 1.0, t0);
        assert!(bucket.try_acquire(1.0, t0));
        assert!(bucket.try_acquire(1.0, t0));
        assert!(bucket.try_acquire(1.0, t0));
        assert!(!bucket.try_acquire(1.0, t0));
    }

    #[test]
    fn refills_over_time() {
        let t0 = Instant::now();
        let bucket = TokenBucket::new(2.0, 2.0, t0);
        assert!(bucket.try_acquire(2.0, t0));
        assert!(!bucket.try_acquire(1.0, t0));
        let t1 = t0 + Duration::from_millis(600);
        assert!(bucket.try_acquire(1.0, t1));
    }
}
