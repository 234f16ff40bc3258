use thiserror::Error;

/// Mirrors the admission order in `RateLimiter::check_limits`: global, then
/// per-user, then daily quota, then session budget.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RateLimiterError {
    #[error("global request rate limit exceeded")]
    GlobalLimitExceeded,

    #[error("per-user request rate limit exceeded for user {user_id}")]
    UserLimitExceeded { user_id: String },

    #[error("daily quota exceeded for user {user_id}")]
    DailyQuotaExceeded { user_id: String },

    #[error("session budget exceeded for session {session_id}")]
    SessionBudgetExceeded { session_id: String },
}
