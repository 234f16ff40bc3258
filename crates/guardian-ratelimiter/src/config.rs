use guardian_core::events::EventListeners;
use std::sync::Arc;

use crate::events::RateLimiterEvent;

/// Builder-style configuration, in the idiom of
/// `tower_resilience_ratelimiter::config::RateLimiterConfigBuilder`.
pub struct RateLimiterConfig {
    pub(crate) global_max_per_minute: u32,
    pub(crate) user_max_per_minute: u32,
    pub(crate) user_daily_quota: u32,
    pub(crate) session_max_budget_usd: f64,
    pub(crate) event_listeners: EventListeners<RateLimiterEvent>,
}

pub struct RateLimiterConfigBuilder {
    global_max_per_minute: u32,
    user_max_per_minute: u32,
    user_daily_quota: u32,
    session_max_budget_usd: f64,
    event_listeners: EventListeners<RateLimiterEvent>,
}

impl Default for RateLimiterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterConfigBuilder {
    pub fn new() -> Self {
        Self {
            global_max_per_minute: 1000,
            user_max_per_minute: 60,
            user_daily_quota: 2000,
            session_max_budget_usd: 10.0,
            event_listeners: EventListeners::new(),
        }
    }

    pub fn global_max_requests_per_minute(mut self, n: u32) -> Self {
        self.global_max_per_minute = n;
        self
    }

    pub fn user_max_requests_per_minute(mut self, n: u32) -> Self {
        self.user_max_per_minute = n;
        self
    }

    pub fn user_daily_quota(mut self, n: u32) -> Self {
        self.user_daily_quota = n;
        self
    }

    pub fn session_max_budget_usd(mut self, usd: f64) -> Self {
        self.session_max_budget_usd = usd;
        self
    }

    pub fn on_event<F>(mut self, listener: F) -> Self
    where
        F: Fn(&RateLimiterEvent) + Send + Sync + 'static,
    {
        self.event_listeners.register(Arc::new(listener));
        self
    }

    pub fn build(self) -> RateLimiterConfig {
        RateLimiterConfig {
            global_max_per_minute: self.global_max_per_minute,
            user_max_per_minute: self.user_max_per_minute,
            user_daily_quota: self.user_daily_quota,
            session_max_budget_usd: self.session_max_budget_usd,
            event_listeners: self.event_listeners,
        }
    }
}

impl RateLimiterConfig {
    pub fn builder() -> RateLimiterConfigBuilder {
        RateLimiterConfigBuilder::new()
    }

    pub fn from_guardian_config(cfg: &guardian_core::config::RateLimitingConfig) -> Self {
        RateLimiterConfigBuilder::new()
            .global_max_requests_per_minute(cfg.global_max_requests_per_minute)
            .user_max_requests_per_minute(cfg.user_max_requests_per_minute)
            .user_daily_quota(cfg.user_daily_quota)
            .session_max_budget_usd(cfg.session_max_budget_usd)
            .build()
    }
}
