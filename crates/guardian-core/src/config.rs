//! Layered configuration, grounded on `llm_guardian.core.config`'s Pydantic
//! `BaseSettings` classes (env-prefixed `MONITORING__`, `SAFETY__`,
//! `RATE_LIMITING__`, `RETRY_STRATEGY__`) and on the `config` crate usage seen
//! elsewhere in the retrieval pack for layered env/file settings.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub quality_alert_threshold: f64,
    pub hallucination_weight: f64,
    pub length_weight: f64,
    pub performance_anomaly_multiplier: f64,
    pub performance_baseline_min_samples: usize,
    pub performance_history_capacity: usize,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            quality_alert_threshold: 0.6,
            hallucination_weight: 0.7,
            length_weight: 0.3,
            performance_anomaly_multiplier: 2.0,
            performance_baseline_min_samples: 100,
            performance_history_capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    pub circuit_breaker_threshold: u32,
    pub circuit_breaker_timeout_seconds: u64,
    pub content_safety_threshold: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            circuit_breaker_threshold: 5,
            circuit_breaker_timeout_seconds: 60,
            content_safety_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitingConfig {
    pub global_max_requests_per_minute: u32,
    pub user_max_requests_per_minute: u32,
    pub user_daily_quota: u32,
    pub session_max_budget_usd: f64,
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            global_max_requests_per_minute: 1000,
            user_max_requests_per_minute: 60,
            user_daily_quota: 2000,
            session_max_budget_usd: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryStrategyConfig {
    pub max_attempts: usize,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_base: f64,
}

impl Default for RetryStrategyConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
            backoff_base: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardianConfig {
    pub monitoring: MonitoringConfig,
    pub safety: SafetyConfig,
    pub rate_limiting: RateLimitingConfig,
    pub retry_strategy: RetryStrategyConfig,
    pub fallback_provider: Option<String>,
    pub fallback_model: String,
    pub audit_log_dir: String,
    pub checkpoint_dir: String,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            monitoring: MonitoringConfig::default(),
            safety: SafetyConfig::default(),
            rate_limiting: RateLimitingConfig::default(),
            retry_strategy: RetryStrategyConfig::default(),
            fallback_provider: Some("openai".to_string()),
            fallback_model: "gpt-3.5-turbo".to_string(),
            audit_log_dir: "./audit_logs".to_string(),
            checkpoint_dir: "./checkpoints".to_string(),
        }
    }
}

impl GuardianConfig {
    /// Load defaults, then an optional config file, then environment
    /// overrides using the same double-underscore nesting separator as the
    /// original `BaseSettings` classes (e.g. `GUARDIAN_SAFETY__CIRCUIT_BREAKER_THRESHOLD=10`).
    pub fn load(config_file: Option<&str>) -> Result<Self, CoreError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder().add_source(
            config::Config::try_from(&defaults).map_err(CoreError::Config)?,
        );

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("GUARDIAN")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_settings() {
        let cfg = GuardianConfig::default();
        assert_eq!(cfg.monitoring.quality_alert_threshold, 0.6);
        assert_eq!(cfg.safety.circuit_breaker_threshold, 5);
        assert_eq!(cfg.rate_limiting.global_max_requests_per_minute, 1000);
        assert_eq!(cfg.retry_strategy.max_attempts, 3);
        assert_eq!(cfg.fallback_provider.as_deref(), Some("openai"));
        assert_eq!(cfg.fallback_model, "gpt-3.5-turbo");
    }

    #[test]
    fn load_without_file_yields_defaults() {
        let cfg = GuardianConfig::load(None).unwrap();
        assert_eq!(cfg.safety.circuit_breaker_threshold, 5);
    }
}
