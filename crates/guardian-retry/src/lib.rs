pub mod backoff;
pub mod config;
pub mod error;
pub mod events;
pub mod policy;
pub mod retry;

pub use backoff::ExponentialBackoff;
pub use config::{RetryConfig, RetryConfigBuilder};
pub use error::RetryError;
pub use events::RetryEvent;
pub use policy::RetryPolicy;
pub use retry::RetryController;
