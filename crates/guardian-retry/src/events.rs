use guardian_core::events::GuardianEvent;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum RetryEvent {
    AttemptFailed { attempt: u32, delay_before_next: Duration },
    RetriesExhausted { attempts: u32 },
}

impl GuardianEvent for RetryEvent {}
