use thiserror::Error;

#[derive(Debug, Error)]
pub enum QualityError {
    #[error("input rejected: {0}")]
    InputRejected(String),

    #[error("output rejected: {0}")]
    OutputRejected(String),

    #[error("failed to compile validation pattern: {0}")]
    Pattern(#[from] regex::Error),
}
