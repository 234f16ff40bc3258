//! Shared domain types, configuration, event plumbing and a test clock used
//! by every `guardian-*` crate. Grounded on `tower_resilience_core`, the
//! teacher's own shared crate.

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod models;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::GuardianConfig;
pub use error::CoreError;
pub use events::{EventListener, EventListeners, GuardianEvent};
