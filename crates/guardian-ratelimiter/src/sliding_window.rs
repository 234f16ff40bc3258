//! Approximate sliding-window counter, grounded on the teacher's
//! `SlidingCounterState` (`tower_resilience_ratelimiter::limiter`): two fixed
//! windows are kept and the previous window's count is weighted by how much
//! of it still overlaps the current instant, avoiding the memory cost of
//! `SlidingLogState`'s per-call timestamp log.

use std::sync::Mutex;
use std::time::{Duration, Instant};

struct SlidingWindowState {
    window: Duration,
    limit: u32,
    current_start: Instant,
    current_count: u32,
    previous_count: u32,
}

impl SlidingWindowState {
    fn roll(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.current_start);
        if elapsed >= self.window * 2 {
            self.previous_count = 0;
            self.current_count = 0;
            self.current_start = now;
        } else if elapsed >= self.window {
            self.previous_count = self.current_count;
            self.current_count = 0;
            self.current_start += self.window;
        }
    }

    fn weighted_count(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.current_start).as_secs_f64();
        let window_secs = self.window.as_secs_f64();
        let overlap = (1.0 - elapsed / window_secs).clamp(0.0, 1.0);
        self.previous_count as f64 * overlap + self.current_count as f64
    }
}

pub struct SlidingWindowCounter {
    state: Mutex<SlidingWindowState>,
}

impl SlidingWindowCounter {
    pub fn new(limit: u32, window: Duration, now: Instant) -> Self {
        Self {
            state: Mutex::new(SlidingWindowState {
                window,
                limit,
                current_start: now,
                current_count: 0,
                previous_count: 0,
            }),
        }
    }

    pub fn try_acquire(&self, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap();
        state.roll(now);
        if state.weighted_count(now) >= state.limit as f64 {
            return false;
        }
        state.current_count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_once_limit_reached() {
        let t0 = Instant::now();
        let counter = SlidingWindowCounter::new(2, Duration::from_secs(60), t0);
        assert!(counter.try_acquire(t0));
        assert!(counter.try_acquire(t0));
        assert!(!counter.try_acquire(t0));
    }

    #[test]
    fn relaxes_after_window_rolls() {
        let t0 = Instant::now();
        let counter = SlidingWindowCounter::new(1, Duration::from_secs(10), t0);
        assert!(counter.try_acquire(t0));
        assert!(!counter.try_acquire(t0));
        let t1 = t0 + Duration::from_secs(21);
        assert!(counter.try_acquire(t1));
    }
}
