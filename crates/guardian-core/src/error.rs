use thiserror::Error;

/// Errors raised by `guardian-core` itself: config loading and checkpoint I/O.
/// Per-component failures (rate limiting, circuit breaking, retries, quality
/// rejection) have their own error enums in their crates and are unified at
/// the orchestrator boundary by `guardian::error::GuardianError`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to (de)serialize checkpoint data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
