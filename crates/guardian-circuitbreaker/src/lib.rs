pub mod circuit;
pub mod config;
pub mod error;
pub mod events;
pub mod multi;

pub use circuit::{CircuitBreaker, CircuitBreakerStatistics, CircuitState};
pub use config::{CircuitBreakerConfig, CircuitBreakerConfigBuilder};
pub use error::CircuitBreakerError;
pub use events::CircuitBreakerEvent;
pub use multi::MultiCircuitBreaker;
