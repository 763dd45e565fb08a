use crate::checkpoint::Checkpointer;
use crate::types::{CheckpointError, CheckpointResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

#[derive(Debug, Clone)]
struct Snapshot {
    data: Vec<u8>,
    saved_at: DateTime<Utc>,
}

/// In-memory checkpoint store keyed by session identifier.
///
/// Snapshots are JSON-serialized, so a loaded state is a deep copy with no
/// aliasing back into the saved one. Intended for tests and single-process
/// use; persistent stores implement the same `Checkpointer` trait.
#[derive(Debug, Clone, Default)]
pub struct MemorySaver {
    storage: Arc<RwLock<HashMap<String, Snapshot>>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot exists for the session.
    pub fn has(&self, session_id: &str) -> CheckpointResult<bool> {
        let storage = self.storage.read().map_err(poisoned)?;
        Ok(storage.contains_key(session_id))
    }

    /// Drop the session's snapshot. Returns whether one existed.
    pub fn delete(&self, session_id: &str) -> CheckpointResult<bool> {
        let mut storage = self.storage.write().map_err(poisoned)?;
        Ok(storage.remove(session_id).is_some())
    }

    /// All session identifiers with a saved snapshot.
    pub fn sessions(&self) -> CheckpointResult<Vec<String>> {
        let storage = self.storage.read().map_err(poisoned)?;
        Ok(storage.keys().cloned().collect())
    }

    /// When the session's snapshot was last written.
    pub fn saved_at(&self, session_id: &str) -> CheckpointResult<Option<DateTime<Utc>>> {
        let storage = self.storage.read().map_err(poisoned)?;
        Ok(storage.get(session_id).map(|snapshot| snapshot.saved_at))
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver
where
    S: Serialize + DeserializeOwned + Send + Sync,
{
    async fn save(&self, session_id: &str, state: &S) -> CheckpointResult<()> {
        let data = serde_json::to_vec(state)
            .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
        let mut storage = self.storage.write().map_err(poisoned)?;
        debug!(session = %session_id, bytes = data.len(), "saving checkpoint");
        storage.insert(
            session_id.to_string(),
            Snapshot {
                data,
                saved_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn load(&self, session_id: &str) -> CheckpointResult<Option<S>> {
        let storage = self.storage.read().map_err(poisoned)?;
        match storage.get(session_id) {
            Some(snapshot) => {
                let state = serde_json::from_slice(&snapshot.data)
                    .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> CheckpointError {
    CheckpointError::Store("checkpoint store lock poisoned".to_string())
}
