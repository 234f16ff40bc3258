pub mod config;
pub mod error;
pub mod events;
pub mod limiter;
pub mod sliding_window;
pub mod token_bucket;

pub use config::{RateLimiterConfig, RateLimiterConfigBuilder};
pub use error::RateLimiterError;
pub use events::RateLimiterEvent;
pub use limiter::RateLimiter;
pub use sliding_window::SlidingWindowCounter;
pub use token_bucket::TokenBucket;
