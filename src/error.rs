//! Unifies every component error at the orchestrator boundary, the way
//! `tower_resilience_core::ResilienceError<E>` unifies tower-layer errors —
//! except here each variant is a concrete per-crate error rather than a
//! generic wrapped application error, since the orchestrator already knows
//! the full set of components it composes.

use guardian_circuitbreaker::CircuitBreakerError;
use guardian_quality::QualityError;
use guardian_ratelimiter::RateLimiterError;
use guardian_retry::RetryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider '{provider}' request failed: {message}")]
    RequestFailed { provider: String, message: String },

    #[error("provider '{provider}' timed out")]
    Timeout { provider: String },

    #[error("provider '{provider}' rate limited the request")]
    RateLimited { provider: String },
}

impl ProviderError {
    /// Mirrors `RetryManager`'s `retryable_errors` tuple: connection/timeout
    /// and provider rate-limit errors are worth retrying, other request
    /// failures are assumed to be caused by the request itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Timeout { .. } | ProviderError::RateLimited { .. })
    }
}

#[derive(Debug, Error)]
pub enum GuardianError {
    #[error("rate limiter rejected the request: {0}")]
    RateLimited(#[from] RateLimiterError),

    #[error("circuit breaker rejected the request: {0}")]
    CircuitOpen(#[from] CircuitBreakerError<ProviderError>),

    #[error("retries exhausted: {0}")]
    RetryExhausted(#[from] RetryError<CircuitBreakerError<ProviderError>>),

    #[error("input rejected by validation: {0}")]
    ValidationFailed(String),

    #[error("response rejected by quality assessment: {0}")]
    QualityRejected(String),

    #[error(transparent)]
    Quality(#[from] QualityError),

    #[error("no provider available and no fallback configured")]
    NoProviderAvailable,

    #[error(transparent)]
    Core(#[from] guardian_core::CoreError),
}
