//! Append-only audit trail, grounded on
//! `llm_guardian.recovery.audit_logger.AuditLogger`: one JSONL file per UTC
//! day, each line a small event record with long text fields truncated to a
//! 100-character preview.

use chrono::Utc;
use guardian_core::models::{MonitoringAlert, RequestContext};
use guardian_core::CoreError;
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

const PREVIEW_LEN: usize = 100;

fn preview(text: &str) -> String {
    if text.len() <= PREVIEW_LEN {
        text.to_string()
    } else {
        format!("{}...", &text[..PREVIEW_LEN])
    }
}

#[derive(Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
enum AuditEvent<'a> {
    Request { request_id: &'a str, user_id: &'a str, provider: &'a str, prompt_preview: String },
    Response { request_id: &'a str, provider: &'a str, content_preview: String, latency_ms: u64 },
    Error { request_id: &'a str, message: String },
    Alert { alert_id: &'a str, category: String, message: String },
}

pub struct AuditJournal {
    dir: PathBuf,
}

impl AuditJournal {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for_today(&self) -> PathBuf {
        self.dir.join(format!("{}.jsonl", Utc::now().format("%Y-%m-%d")))
    }

    async fn append(&self, event: &AuditEvent<'_>) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for_today())
            .await?;
        file.write_all(&line).await?;
        Ok(())
    }

    pub async fn log_request(&self, ctx: &RequestContext) -> Result<(), CoreError> {
        self.append(&AuditEvent::Request {
            request_id: &ctx.request_id,
            user_id: &ctx.user_id,
            provider: &ctx.provider,
            prompt_preview: preview(&ctx.prompt),
        })
        .await
    }

    pub async fn log_response(&self, request_id: &str, provider: &str, content: &str, latency_ms: u64) -> Result<(), CoreError> {
        self.append(&AuditEvent::Response {
            request_id,
            provider,
            content_preview: preview(content),
            latency_ms,
        })
        .await
    }

    pub async fn log_error(&self, request_id: &str, message: &str) -> Result<(), CoreError> {
        self.append(&AuditEvent::Error { request_id, message: preview(message) }).await
    }

    pub async fn log_alert(&self, alert: &MonitoringAlert) -> Result<(), CoreError> {
        self.append(&AuditEvent::Alert {
            alert_id: &alert.alert_id,
            category: format!("{:?}", alert.category),
            message: preview(&alert.message),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let journal = AuditJournal::new(dir.path());
        let ctx = RequestContext {
            request_id: "req-1".to_string(),
            user_id: "user-1".to_string(),
            session_id: "sess-1".to_string(),
            provider: "anthropic".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            prompt: "x".repeat(200),
            timestamp: chrono::Utc::now(),
            metadata: HashMap::new(),
        };
        journal.log_request(&ctx).await.unwrap();
        journal.log_response("req-1", "anthropic", "reply", 42).await.unwrap();

        let path = journal.path_for_today();
        let contents = tokio::fs::read_to_string(path).await.unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().next().unwrap().contains("\"event_type\":\"request\""));
    }
}
