use guardian_core::events::EventListeners;
use std::sync::Arc;
use std::time::Duration;

use crate::events::CircuitBreakerEvent;

pub struct CircuitBreakerConfig {
    pub(crate) name: String,
    pub(crate) failure_threshold: u32,
    pub(crate) window_size: usize,
    pub(crate) wait_duration_in_open: Duration,
    pub(crate) half_open_max_calls: u32,
    pub(crate) event_listeners: EventListeners<CircuitBreakerEvent>,
}

pub struct CircuitBreakerConfigBuilder {
    name: String,
    failure_threshold: u32,
    window_size: usize,
    wait_duration_in_open: Duration,
    half_open_max_calls: u32,
    event_listeners: EventListeners<CircuitBreakerEvent>,
}

impl CircuitBreakerConfigBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failure_threshold: 5,
            window_size: 20,
            wait_duration_in_open: Duration::from_secs(60),
            half_open_max_calls: 1,
            event_listeners: EventListeners::new(),
        }
    }

    pub fn failure_threshold(mut self, n: u32) -> Self {
        self.failure_threshold = n;
        self
    }

    pub fn window_size(mut self, n: usize) -> Self {
        self.window_size = n;
        self
    }

    pub fn wait_duration_in_open(mut self, d: Duration) -> Self {
        self.wait_duration_in_open = d;
        self
    }

    pub fn half_open_max_calls(mut self, n: u32) -> Self {
        self.half_open_max_calls = n;
        self
    }

    pub fn on_state_transition<F>(mut self, listener: F) -> Self
    where
        F: Fn(&CircuitBreakerEvent) + Send + Sync + 'static,
    {
        self.event_listeners.register(Arc::new(listener));
        self
    }

    pub fn build(self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            name: self.name,
            failure_threshold: self.failure_threshold,
            window_size: self.window_size,
            wait_duration_in_open: self.wait_duration_in_open,
            half_open_max_calls: self.half_open_max_calls,
            event_listeners: self.event_listeners,
        }
    }
}

impl CircuitBreakerConfig {
    pub fn builder(name: impl Into<String>) -> CircuitBreakerConfigBuilder {
        CircuitBreakerConfigBuilder::new(name)
    }

    pub fn from_guardian_config(
        name: impl Into<String>,
        cfg: &guardian_core::config::SafetyConfig,
    ) -> CircuitBreakerConfig {
        CircuitBreakerConfigBuilder::new(name)
            .failure_threshold(cfg.circuit_breaker_threshold)
            .wait_duration_in_open(Duration::from_secs(cfg.circuit_breaker_timeout_seconds))
            .build()
    }
}
