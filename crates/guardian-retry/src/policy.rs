//! Which errors are worth retrying, grounded on
//! `RetryManager.execute_with_retry`'s `retryable_errors` tuple
//! (`ConnectionError`, `TimeoutError`, provider timeout/rate-limit errors).

use std::sync::Arc;

pub type RetryPredicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

pub struct RetryPolicy<E> {
    predicate: RetryPredicate<E>,
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self { predicate: self.predicate.clone() }
    }
}

impl<E> RetryPolicy<E> {
    pub fn new(predicate: RetryPredicate<E>) -> Self {
        Self { predicate }
    }

    /// Retry every error. The conservative default when no provider-specific
    /// classification is registered.
    pub fn always() -> Self {
        Self::new(Arc::new(|_| true))
    }

    pub fn is_retryable(&self, error: &E) -> bool {
        (self.predicate)(error)
    }
}
