//! Filesystem log store for local runs

use crate::error::Result;
use crate::invocation::InvocationLog;
use crate::store::{LogStore, new_object_key};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Writes invocation logs under a directory, using the same key layout as S3
#[derive(Debug, Clone)]
pub struct LocalLogStore {
    root: PathBuf,
    prefix: String,
}

impl LocalLogStore {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl LogStore for LocalLogStore {
    async fn save(&self, log: &InvocationLog) -> Result<String> {
        let path = self.root.join(new_object_key(&self.prefix));
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&path, log.to_pretty_json()?).await?;

        let location = path.display().to_string();
        info!(path = %location, "Invocation log saved");
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::InputMessage;
    use agent_core::{AgentStep, StepRole};

    #[tokio::test]
    async fn test_save_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalLogStore::new(dir.path(), "logs/");

        let mut log = InvocationLog::start(
            InputMessage::user("What are the latest news stories about Apple"),
            vec!["Apple".to_string()],
            None,
        );
        log.record_step(&AgentStep::new(0, StepRole::Assistant, "Apple is up"));

        let location = store.save(&log).await.unwrap();
        let path = PathBuf::from(&location);

        assert!(path.starts_with(dir.path().join("logs")));
        assert!(location.ends_with(".json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let restored: InvocationLog = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, log);
        assert!(text.contains("\n  \"companies\""));
    }
}
