use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("retries exhausted after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: E },

    #[error("error is not retryable: {0}")]
    NotRetryable(E),
}

impl<E> RetryError<E> {
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::NotRetryable(e) => e,
        }
    }
}
