//! Admission control in four stages, in the exact order used by
//! `RateLimiter.check_limits` in `llm_guardian.safety.rate_limiter`:
//! global requests/minute, then per-user requests/minute, then the user's
//! daily request quota, then the session's dollar budget.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::RateLimiterConfig;
use crate::error::RateLimiterError;
use crate::events::RateLimiterEvent;
use crate::sliding_window::SlidingWindowCounter;
use crate::token_bucket::TokenBucket;

struct DailyQuota {
    count: u32,
    reset_date: NaiveDate,
}

pub struct RateLimiter {
    config: RateLimiterConfig,
    global: TokenBucket,
    per_user: Mutex<HashMap<String, Arc<SlidingWindowCounter>>>,
    daily_quota: Mutex<HashMap<String, DailyQuota>>,
    session_spend: Mutex<HashMap<String, f64>>,
}

impl RateLimiter {
    pub fn new(config: RateLimiterConfig, now: Instant) -> Self {
        let refill_per_sec = config.global_max_per_minute as f64 / 60.0;
        let global = TokenBucket::new(config.global_max_per_minute as f64, refill_per_sec, now);
        Self {
            config,
            global,
            per_user: Mutex::new(HashMap::new()),
            daily_quota: Mutex::new(HashMap::new()),
            session_spend: Mutex::new(HashMap::new()),
        }
    }

    fn user_counter(&self, user_id: &str, now: Instant) -> Arc<SlidingWindowCounter> {
        let mut table = self.per_user.lock().unwrap();
        table
            .entry(user_id.to_string())
            .or_insert_with(|| {
                Arc::new(SlidingWindowCounter::new(
                    self.config.user_max_per_minute,
                    Duration::from_secs(60),
                    now,
                ))
            })
            .clone()
    }

    /// Admission order: global -> user -> daily quota -> session budget.
    /// `today` is passed in (rather than read from the wall clock) so quota
    /// rollover is deterministic under test.
    pub fn check_limits(
        &self,
        user_id: &str,
        session_id: &str,
        today: NaiveDate,
        now: Instant,
    ) -> Result<(), RateLimiterError> {
        if !self.global.try_acquire(1.0, now) {
            self.emit(RateLimiterEvent::RequestRejected {
                user_id: user_id.to_string(),
                reason: "global_limit".to_string(),
            });
            return Err(RateLimiterError::GlobalLimitExceeded);
        }

        if !self.user_counter(user_id, now).try_acquire(now) {
            self.emit(RateLimiterEvent::RequestRejected {
                user_id: user_id.to_string(),
                reason: "user_limit".to_string(),
            });
            return Err(RateLimiterError::UserLimitExceeded {
                user_id: user_id.to_string(),
            });
        }

        {
            let mut quotas = self.daily_quota.lock().unwrap();
            let quota = quotas.entry(user_id.to_string()).or_insert(DailyQuota {
                count: 0,
                reset_date: today,
            });
            if quota.reset_date != today {
                quota.count = 0;
                quota.reset_date = today;
                self.emit(RateLimiterEvent::QuotaReset {
                    user_id: user_id.to_string(),
                });
            }
            if quota.count >= self.config.user_daily_quota {
                self.emit(RateLimiterEvent::RequestRejected {
                    user_id: user_id.to_string(),
                    reason: "daily_quota".to_string(),
                });
                return Err(RateLimiterError::DailyQuotaExceeded {
                    user_id: user_id.to_string(),
                });
            }
            quota.count += 1;
        }

        {
            let spend = self.session_spend.lock().unwrap();
            let spent = spend.get(session_id).copied().unwrap_or(0.0);
            if spent >= self.config.session_max_budget_usd {
                self.emit(RateLimiterEvent::RequestRejected {
                    user_id: user_id.to_string(),
                    reason: "session_budget".to_string(),
                });
                return Err(RateLimiterError::SessionBudgetExceeded {
                    session_id: session_id.to_string(),
                });
            }
        }

        self.emit(RateLimiterEvent::RequestAdmitted {
            user_id: user_id.to_string(),
        });
        Ok(())
    }

    /// Record actual spend against a session's budget, called after a
    /// provider call completes and its real cost is known.
    pub fn record_cost(&self, session_id: &str, cost_usd: f64) {
        let mut spend = self.session_spend.lock().unwrap();
        *spend.entry(session_id.to_string()).or_insert(0.0) += cost_usd;
    }

    pub fn user_quota_status(&self, user_id: &str) -> (u32, u32) {
        let quotas = self.daily_quota.lock().unwrap();
        let used = quotas.get(user_id).map(|q| q.count).unwrap_or(0);
        (used, self.config.user_daily_quota)
    }

    pub fn session_budget_status(&self, session_id: &str) -> (f64, f64) {
        let spend = self.session_spend.lock().unwrap();
        let spent = spend.get(session_id).copied().unwrap_or(0.0);
        (spent, self.config.session_max_budget_usd)
    }

    fn emit(&self, event: RateLimiterEvent) {
        self.config.event_listeners.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 30).unwrap()
    }

    #[test]
    fn admits_within_all_limits() {
        let now = Instant::now();
        let limiter = RateLimiter::new(RateLimiterConfig::builder().build(), now);
        assert!(limiter.check_limits("u1", "s1", today(), now).is_ok());
    }

    #[test]
    fn rejects_once_daily_quota_exhausted() {
        let now = Instant::now();
        let cfg = RateLimiterConfig::builder()
            .user_daily_quota(2)
            .global_max_requests_per_minute(1000)
            .user_max_requests_per_minute(1000)
            .build();
        let limiter = RateLimiter::new(cfg, now);
        assert!(limiter.check_limits("u1", "s1", today(), now).is_ok());
        assert!(limiter.check_limits("u1", "s1", today(), now).is_ok());
        assert_eq!(
            limiter.check_limits("u1", "s1", today(), now),
            Err(RateLimiterError::DailyQuotaExceeded { user_id: "u1".to_string() })
        );
    }

    #[test]
    fn rejects_once_session_budget_exhausted() {
        let now = Instant::now();
        let cfg = RateLimiterConfig::builder().session_max_budget_usd(1.0).build();
        let limiter = RateLimiter::new(cfg, now);
        limiter.record_cost("s1", 1.0);
        assert_eq!(
            limiter.check_limits("u1", "s1", today(), now),
            Err(RateLimiterError::SessionBudgetExceeded { session_id: "s1".to_string() })
        );
    }

    #[test]
    fn daily_quota_resets_on_new_day() {
        let now = Instant::now();
        let cfg = RateLimiterConfig::builder().user_daily_quota(1).build();
        let limiter = RateLimiter::new(cfg, now);
        assert!(limiter.check_limits("u1", "s1", today(), now).is_ok());
        let tomorrow = today().succ_opt().unwrap();
        assert!(limiter.check_limits("u1", "s1", tomorrow, now).is_ok());
    }
}
