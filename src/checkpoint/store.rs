use crate::types::CheckpointResult;
use async_trait::async_trait;

/// A key-value store of state snapshots keyed by session identifier.
///
/// `load` on a session that was never saved returns `Ok(None)`, not an
/// error; the caller supplies the empty-state default.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync {
    /// Persist a full snapshot of the session's state.
    async fn save(&self, session_id: &str, state: &S) -> CheckpointResult<()>;

    /// Return the session's last snapshot, if any.
    async fn load(&self, session_id: &str) -> CheckpointResult<Option<S>>;
}
