//! Safety and reliability middleware for LLM provider calls.
//!
//! `Orchestrator::execute_request` runs every call through input validation,
//! multi-stage rate limiting, a per-provider circuit breaker, retry with
//! backoff, output validation, quality assessment, performance recording and
//! an audit trail — falling back to a secondary provider on failure. See
//! `guardian_core`, `guardian_ratelimiter`, `guardian_circuitbreaker`,
//! `guardian_retry` and `guardian_quality` for the individual components.

pub mod audit;
pub mod error;
pub mod orchestrator;
pub mod performance;
pub mod provider;
pub mod state;

pub use error::{GuardianError, ProviderError};
pub use orchestrator::Orchestrator;
pub use provider::{AnthropicProvider, Provider};

pub use guardian_core::config::GuardianConfig;
