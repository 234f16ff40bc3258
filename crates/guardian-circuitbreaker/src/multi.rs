//! A named registry of circuit breakers, one per provider, grounded on
//! `llm_guardian.safety.circuit_breaker.MultiCircuitBreaker`.

use guardian_core::clock::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::circuit::{CircuitBreaker, CircuitBreakerStatistics};
use crate::config::CircuitBreakerConfig;

pub struct MultiCircuitBreaker {
    breakers: Mutex<HashMap<String, Arc<CircuitBreaker>>>,
}

impl Default for MultiCircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiCircuitBreaker {
    pub fn new() -> Self {
        Self { breakers: Mutex::new(HashMap::new()) }
    }

    /// Get the breaker for `name`, creating it with `config_factory` on
    /// first use.
    pub fn get_or_create(
        &self,
        name: &str,
        clock: &dyn Clock,
        config_factory: impl FnOnce() -> CircuitBreakerConfig,
    ) -> Arc<CircuitBreaker> {
        let mut breakers = self.breakers.lock().unwrap();
        breakers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(CircuitBreaker::new(config_factory(), clock)))
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<CircuitBreaker>> {
        self.breakers.lock().unwrap().get(name).cloned()
    }

    pub fn statistics(&self, clock: &dyn Clock) -> HashMap<String, CircuitBreakerStatistics> {
        self.breakers
            .lock()
            .unwrap()
            .iter()
            .map(|(name, breaker)| (name.clone(), breaker.statistics(clock)))
            .collect()
    }

    pub fn reset_all(&self, clock: &dyn Clock) {
        for breaker in self.breakers.lock().unwrap().values() {
            breaker.reset(clock);
        }
    }
}
