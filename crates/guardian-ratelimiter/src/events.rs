use guardian_core::events::GuardianEvent;

#[derive(Debug, Clone)]
pub enum RateLimiterEvent {
    RequestAdmitted { user_id: String },
    RequestRejected { user_id: String, reason: String },
    QuotaReset { user_id: String },
}

impl GuardianEvent for RateLimiterEvent {}
