//! Domain types shared by every guardian component.
//!
//! These mirror the request/response/assessment records that flow through
//! `Orchestrator::execute_request` in the root `guardian` crate. Grounded on
//! the original `llm_guardian.core.models` Pydantic models, re-expressed as
//! closed Rust enums per the REDESIGN FLAGS in SPEC_FULL.md (severity and
//! recommended-action fields are no longer free-form, regex-validated strings).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single provider call, as handed to the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: String,
    pub user_id: String,
    pub session_id: String,
    pub provider: String,
    pub model: String,
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A provider's response, before quality assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub cost_usd: f64,
    pub latency_ms: u64,
    pub finish_reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Coarse bucket a response's quality assessment lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResponseQuality {
    Unacceptable,
    Poor,
    Acceptable,
    Good,
    Excellent,
}

impl ResponseQuality {
    /// Categorize a 0.0..=1.0 composite score the way `QualityMonitor.assess_quality` does.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            ResponseQuality::Excellent
        } else if score >= 0.75 {
            ResponseQuality::Good
        } else if score >= 0.6 {
            ResponseQuality::Acceptable
        } else if score >= 0.4 {
            ResponseQuality::Poor
        } else {
            ResponseQuality::Unacceptable
        }
    }
}

/// What the orchestrator should do with a response once it's been assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    Accept,
    Warn,
    Regenerate,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCategory {
    Quality,
    Safety,
    Performance,
    RateLimit,
    CircuitBreaker,
}

/// An event raised by any monitoring component for the audit/alerting surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringAlert {
    pub alert_id: String,
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
}

/// Outcome of `QualityAssessor::assess`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub overall_score: f64,
    pub quality: ResponseQuality,
    pub hallucination_score: f64,
    pub safety_score: f64,
    pub off_task_score: f64,
    pub warnings: Vec<String>,
    pub recommended_action: RecommendedAction,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// Outcome of `InputValidator`/`OutputValidator`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub severity: ValidationSeverity,
    pub issues: Vec<String>,
    pub recommended_action: RecommendedAction,
    pub timestamp: DateTime<Utc>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            severity: ValidationSeverity::Info,
            issues: Vec::new(),
            recommended_action: RecommendedAction::Accept,
            timestamp: Utc::now(),
        }
    }
}

/// A single recorded call, kept in `PerformanceRecorder`'s rolling history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub request_id: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
    pub tokens_used: u64,
    pub cost_usd: f64,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

/// A point-in-time snapshot written by `StateCheckpoint::save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub snapshot_id: String,
    pub request_context: RequestContext,
    pub checkpoint_data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}
