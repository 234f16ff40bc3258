use guardian_core::events::GuardianEvent;
use guardian_core::models::MonitoringAlert;

#[derive(Debug, Clone)]
pub enum QualityEvent {
    AlertRaised(MonitoringAlert),
}

impl GuardianEvent for QualityEvent {}
