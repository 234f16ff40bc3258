//! Observer hooks for guardian components, modeled on `tower_resilience_core::events`.
//!
//! Each component (rate limiter, circuit breaker, retry controller, quality
//! assessor) defines its own event enum and uses `EventListeners<E>` to fan
//! it out to registered listeners. A listener that panics is caught and
//! logged rather than allowed to unwind into the caller.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Marker trait for a component's event enum.
pub trait GuardianEvent: Send + Sync + 'static {}

/// Something that wants to observe a component's events.
pub trait EventListener<E>: Send + Sync {
    fn on_event(&self, event: &E);
}

impl<E, F> EventListener<E> for F
where
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        self(event)
    }
}

/// A collection of listeners for one event type, cheap to clone and share
/// across a component's internal `Mutex`-guarded state.
#[derive(Clone)]
pub struct EventListeners<E> {
    listeners: Vec<Arc<dyn EventListener<E>>>,
}

impl<E> Default for EventListeners<E> {
    fn default() -> Self {
        Self { listeners: Vec::new() }
    }
}

impl<E> EventListeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn EventListener<E>>) {
        self.listeners.push(listener);
    }

    /// Fan the event out to every listener. A listener panic is caught so one
    /// misbehaving observer can't take down the call it's observing.
    pub fn emit(&self, event: &E) {
        for listener in &self.listeners {
            let result = panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(event)));
            if result.is_err() {
                #[cfg(feature = "tracing")]
                tracing::error!("event listener panicked while handling an event");
            }
        }
    }
}

impl<E> std::fmt::Debug for EventListeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
