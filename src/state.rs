//! Checkpoint persistence, grounded on
//! `llm_guardian.recovery.state_manager.StateManager`: one JSON file per
//! snapshot, named by `snapshot_id`, under a configured directory.

use guardian_core::models::{RequestContext, StateSnapshot};
use guardian_core::CoreError;
use std::path::{Path, PathBuf};

pub struct StateCheckpoint {
    dir: PathBuf,
}

impl StateCheckpoint {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, snapshot_id: &str) -> PathBuf {
        self.dir.join(format!("{snapshot_id}.json"))
    }

    pub async fn save(
        &self,
        snapshot_id: &str,
        request_context: &RequestContext,
        checkpoint_data: serde_json::Value,
    ) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let snapshot = StateSnapshot {
            snapshot_id: snapshot_id.to_string(),
            request_context: request_context.clone(),
            checkpoint_data,
            timestamp: chrono::Utc::now(),
        };
        let serialized = serde_json::to_vec_pretty(&snapshot)?;
        tokio::fs::write(self.path_for(snapshot_id), serialized).await?;
        Ok(())
    }

    pub async fn load(&self, snapshot_id: &str) -> Result<Option<StateSnapshot>, CoreError> {
        let path = self.path_for(snapshot_id);
        if !Path::new(&path).exists() {
            return Ok(None);
        }
        let bytes = tokio::fs::read(path).await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub async fn delete(&self, snapshot_id: &str) -> Result<bool, CoreError> {
        let path = self.path_for(snapshot_id);
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn context() -> RequestContext {
        RequestContext {
            request_id: "req-1".to_string(),
            user_id: "user-1".to_string(),
            session_id: "sess-1".to_string(),
            provider: "anthropic".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            prompt: "hello".to_string(),
            timestamp: chrono::Utc::now(),
            metadata: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn save_load_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = StateCheckpoint::new(dir.path());

        checkpoint.save("snap-1", &context(), serde_json::json!({"step": 3})).await.unwrap();
        let loaded = checkpoint.load("snap-1").await.unwrap().unwrap();
        assert_eq!(loaded.snapshot_id, "snap-1");
        assert_eq!(loaded.checkpoint_data["step"], 3);

        assert!(checkpoint.delete("snap-1").await.unwrap());
        assert!(checkpoint.load("snap-1").await.unwrap().is_none());
        assert!(!checkpoint.delete("snap-1").await.unwrap());
    }
}
