use guardian_core::events::GuardianEvent;

use crate::circuit::CircuitState;

#[derive(Debug, Clone)]
pub enum CircuitBreakerEvent {
    StateTransition {
        name: String,
        from: CircuitState,
        to: CircuitState,
    },
    CallRejected {
        name: String,
    },
}

impl GuardianEvent for CircuitBreakerEvent {}
