//! Combines the three detectors into one composite assessment, grounded on
//! `QualityMonitor.assess_quality`: weighted scoring, categorization,
//! recommendation and warning generation, and alert raising below threshold.

use guardian_core::events::EventListeners;
use guardian_core::models::{
    AlertCategory, AlertSeverity, MonitoringAlert, QualityAssessment, RecommendedAction, ResponseQuality,
};
use std::sync::Arc;

use crate::error::QualityError;
use crate::events::QualityEvent;
use crate::hallucination::HallucinationDetector;
use crate::offtask::OffTaskDetector;
use crate::safety::ContentSafetyChecker;

pub struct QualityAssessor {
    hallucination: HallucinationDetector,
    safety: ContentSafetyChecker,
    off_task: OffTaskDetector,
    alert_threshold: f64,
    event_listeners: EventListeners<QualityEvent>,
}

impl QualityAssessor {
    pub fn new(alert_threshold: f64) -> Result<Self, QualityError> {
        Ok(Self {
            hallucination: HallucinationDetector::new()?,
            safety: ContentSafetyChecker::new()?,
            off_task: OffTaskDetector::new()?,
            alert_threshold,
            event_listeners: EventListeners::new(),
        })
    }

    pub fn on_alert<F>(&mut self, listener: F)
    where
        F: Fn(&QualityEvent) + Send + Sync + 'static,
    {
        self.event_listeners.register(Arc::new(listener));
    }

    pub fn assess(&self, prompt: &str, response: &str) -> QualityAssessment {
        let hallucination_score = self.hallucination.score(prompt, response);
        let (safety_score, violations) = self.safety.check(response);
        let off_task_score = self.off_task.score(prompt, response);

        let overall_score = (0.4 * (1.0 - hallucination_score) + 0.4 * safety_score + 0.2 * (1.0 - off_task_score))
            .clamp(0.0, 1.0);
        let quality = ResponseQuality::from_score(overall_score);

        let mut warnings = Vec::new();
        if hallucination_score > 0.5 {
            warnings.push("response may contain fabricated claims".to_string());
        }
        if off_task_score > 0.6 {
            warnings.push("response does not appear to address the prompt".to_string());
        }
        for violation in &violations {
            warnings.push(format!("content safety violation: {} ({:.2})", violation.category, violation.score));
        }

        let recommended_action = if !violations.is_empty() || overall_score < 0.4 {
            RecommendedAction::Reject
        } else if overall_score < self.alert_threshold {
            RecommendedAction::Regenerate
        } else if !warnings.is_empty() {
            RecommendedAction::Warn
        } else {
            RecommendedAction::Accept
        };

        let assessment = QualityAssessment {
            overall_score,
            quality,
            hallucination_score,
            safety_score,
            off_task_score,
            warnings,
            recommended_action,
            timestamp: chrono::Utc::now(),
        };

        if overall_score < self.alert_threshold {
            let severity = if !violations.is_empty() { AlertSeverity::Critical } else { AlertSeverity::Warning };
            self.event_listeners.emit(&QualityEvent::AlertRaised(MonitoringAlert {
                alert_id: uuid_like(),
                severity,
                category: AlertCategory::Quality,
                message: format!("quality score {:.2} below threshold {:.2}", overall_score, self.alert_threshold),
                timestamp: chrono::Utc::now(),
                resolved: false,
            }));
        }

        assessment
    }
}

/// A short, non-cryptographic id, good enough to correlate an alert with its
/// assessment in logs without pulling in a dedicated uuid dependency.
fn uuid_like() -> String {
    format!("alert-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_clean_on_task_response() {
        let assessor = QualityAssessor::new(0.6).unwrap();
        let result = assessor.assess(
            "Explain how photosynthesis works",
            "Photosynthesis converts light energy into chemical energy in plants, using chlorophyll to capture sunlight.",
        );
        assert_eq!(result.recommended_action, RecommendedAction::Accept);
    }

    #[test]
    fn rejects_response_with_safety_violation() {
        let assessor = QualityAssessor::new(0.6).unwrap();
        let result = assessor.assess("Tell me something", "Here are suicide instructions.");
        assert_eq!(result.recommended_action, RecommendedAction::Reject);
    }
}
