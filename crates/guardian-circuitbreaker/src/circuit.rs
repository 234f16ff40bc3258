//! Per-provider circuit breaker. Grounded on the teacher's `Circuit`
//! (`tower_resilience_circuitbreaker::circuit`) for the state-machine shape,
//! and on `llm_guardian.safety.circuit_breaker.CircuitBreaker` for the
//! consecutive-failure-count trip condition and the "call executed outside
//! the lock" discipline. Unlike the teacher, state lives behind a plain
//! `Mutex<Inner>` rather than an `AtomicU8` shadow copy: SPEC_FULL.md calls
//! for closed variants here, and nothing in this crate holds the lock across
//! an `.await`.

use guardian_core::clock::Clock;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::CircuitBreakerConfig;
use crate::error::CircuitBreakerError;
use crate::events::CircuitBreakerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

struct Inner {
    state: CircuitState,
    consecutive_failures: u32,
    half_open_calls_in_flight: u32,
    last_transition: Instant,
    total_calls: u64,
    total_failures: u64,
    time_in_closed: Duration,
    time_in_open: Duration,
    time_in_half_open: Duration,
}

pub struct CircuitBreakerStatistics {
    pub state: CircuitState,
    pub total_calls: u64,
    pub total_failures: u64,
    pub consecutive_failures: u32,
    pub time_since_last_transition: Duration,
}

pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig, clock: &dyn Clock) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                half_open_calls_in_flight: 0,
                last_transition: clock.now(),
                total_calls: 0,
                total_failures: 0,
                time_in_closed: Duration::ZERO,
                time_in_open: Duration::ZERO,
                time_in_half_open: Duration::ZERO,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn state(&self) -> CircuitState {
        self.inner.lock().unwrap().state
    }

    pub fn is_available(&self, clock: &dyn Clock) -> bool {
        self.admit(clock).is_ok()
    }

    fn transition_to(&self, inner: &mut Inner, to: CircuitState, now: Instant) {
        let from = inner.state;
        if from == to {
            return;
        }
        let elapsed = now.saturating_duration_since(inner.last_transition);
        match from {
            CircuitState::Closed => inner.time_in_closed += elapsed,
            CircuitState::Open => inner.time_in_open += elapsed,
            CircuitState::HalfOpen => inner.time_in_half_open += elapsed,
        }
        inner.state = to;
        inner.last_transition = now;
        if to == CircuitState::Closed {
            inner.consecutive_failures = 0;
        }
        self.config
            .event_listeners
            .emit(&CircuitBreakerEvent::StateTransition { name: self.config.name.clone(), from, to });
    }

    /// Decide whether a call may proceed right now, transitioning Open ->
    /// HalfOpen if the wait duration has elapsed.
    fn admit(&self, clock: &dyn Clock) -> Result<(), ()> {
        let now = clock.now();
        let mut inner = self.inner.lock().unwrap();
        match inner.state {
            CircuitState::Closed => Ok(()),
            CircuitState::Open => {
                if now.saturating_duration_since(inner.last_transition) >= self.config.wait_duration_in_open {
                    self.transition_to(&mut inner, CircuitState::HalfOpen, now);
                    inner.half_open_calls_in_flight = 1;
                    Ok(())
                } else {
                    Err(())
                }
            }
            CircuitState::HalfOpen => {
                if inner.half_open_calls_in_flight < self.config.half_open_max_calls {
                    inner.half_open_calls_in_flight += 1;
                    Ok(())
                } else {
                    Err(())
                }
            }
        }
    }

    fn on_success(&self, clock: &dyn Clock) {
        let now = clock.now();
        let mut inner = self.inner.lock().unwrap();
        inner.total_calls += 1;
        match inner.state {
            CircuitState::HalfOpen => {
                inner.half_open_calls_in_flight = inner.half_open_calls_in_flight.saturating_sub(1);
                self.transition_to(&mut inner, CircuitState::Closed, now);
            }
            CircuitState::Closed => {
                inner.consecutive_failures = 0;
            }
            CircuitState::Open => {}
        }
    }

    fn on_failure(&self, clock: &dyn Clock) {
        let now = clock.now();
        let mut inner = self.inner.lock().unwrap();
        inner.total_calls += 1;
        inner.total_failures += 1;
        match inner.state {
            CircuitState::HalfOpen => {
                inner.half_open_calls_in_flight = inner.half_open_calls_in_flight.saturating_sub(1);
                self.transition_to(&mut inner, CircuitState::Open, now);
            }
            CircuitState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.config.failure_threshold {
                    self.transition_to(&mut inner, CircuitState::Open, now);
                }
            }
            CircuitState::Open => {}
        }
    }

    /// Wrap a fallible async call. The call runs outside the lock; only the
    /// admission check and the outcome bookkeeping hold it.
    pub async fn call<F, Fut, T, E>(&self, clock: &dyn Clock, f: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
    {
        if self.admit(clock).is_err() {
            self.config
                .event_listeners
                .emit(&CircuitBreakerEvent::CallRejected { name: self.config.name.clone() });
            return Err(CircuitBreakerError::OpenCircuit { name: self.config.name.clone() });
        }

        match f().await {
            Ok(value) => {
                self.on_success(clock);
                Ok(value)
            }
            Err(err) => {
                self.on_failure(clock);
                Err(CircuitBreakerError::Inner(err))
            }
        }
    }

    pub fn statistics(&self, clock: &dyn Clock) -> CircuitBreakerStatistics {
        let inner = self.inner.lock().unwrap();
        CircuitBreakerStatistics {
            state: inner.state,
            total_calls: inner.total_calls,
            total_failures: inner.total_failures,
            consecutive_failures: inner.consecutive_failures,
            time_since_last_transition: clock.now().saturating_duration_since(inner.last_transition),
        }
    }

    pub fn reset(&self, clock: &dyn Clock) {
        let mut inner = self.inner.lock().unwrap();
        inner.consecutive_failures = 0;
        inner.half_open_calls_in_flight = 0;
        self.transition_to(&mut inner, CircuitState::Closed, clock.now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_core::clock::FakeClock;
    use std::time::Duration;

    #[tokio::test]
    async fn opens_after_consecutive_failures() {
        let clock = FakeClock::new();
        let config = CircuitBreakerConfig::builder("test").failure_threshold(2).build();
        let breaker = CircuitBreaker::new(config, &clock);

        let _ = breaker.call(&clock, || async { Err::<(), _>("boom") }).await;
        assert_eq!(breaker.state(), CircuitState::Closed);
        let _ = breaker.call(&clock, || async { Err::<(), _>("boom") }).await;
        assert_eq!(breaker.state(), CircuitState::Open);

        let result = breaker.call(&clock, || async { Ok::<_, &str>(()) }).await;
        assert!(matches!(result, Err(CircuitBreakerError::OpenCircuit { .. })));
    }

    #[tokio::test]
    async fn half_open_after_wait_duration_then_closes_on_success() {
        let clock = FakeClock::new();
        let config = CircuitBreakerConfig::builder("test")
            .failure_threshold(1)
            .wait_duration_in_open(Duration::from_secs(30))
            .build();
        let breaker = CircuitBreaker::new(config, &clock);

        let _ = breaker.call(&clock, || async { Err::<(), _>("boom") }).await;
        assert_eq!(breaker.state(), CircuitState::Open);

        clock.advance(Duration::from_secs(31));
        let result = breaker.call(&clock, || async { Ok::<_, &str>(42) }).await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(breaker.state(), CircuitState::Closed);
    }
}
