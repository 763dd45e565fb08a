use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::checkpoint::Checkpointer;
use crate::graph::{Built, Graph};
use crate::node::Context;
use crate::types::{GraphResult, GraphState};

/// A built graph paired with a checkpointer, giving it per-session memory.
///
/// Each invocation loads the session's last snapshot (or the empty default),
/// merges the new input with the state's normal merge rules, runs the graph
/// to completion, and saves the result. The whole load-run-save sequence is a
/// single critical section per session id, so concurrent runs for the same
/// session cannot lose updates. Distinct sessions never observe each other's
/// state.
pub struct SessionGraph<S>
where
    S: GraphState,
{
    graph: Graph<S, Built>,
    saver: Arc<dyn Checkpointer<S>>,
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S> SessionGraph<S>
where
    S: GraphState,
{
    pub(crate) fn new(graph: Graph<S, Built>, saver: Arc<dyn Checkpointer<S>>) -> Self {
        Self {
            graph,
            saver,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn graph(&self) -> &Graph<S, Built> {
        &self.graph
    }

    /// Run the graph for a session, resuming from its last checkpoint.
    pub async fn run_session(
        &self,
        ctx: &Context,
        session_id: &str,
        updates: Vec<S::Update>,
    ) -> GraphResult<S>
    where
        S: Default,
    {
        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut state = self
            .saver
            .load(session_id)
            .await?
            .unwrap_or_else(S::default);
        state.apply_many(updates);

        debug!(
            graph = %self.graph.name(),
            session = %session_id,
            "running checkpointed session"
        );

        let final_state = self.graph.run(ctx, state).await?;
        self.saver.save(session_id, &final_state).await?;
        Ok(final_state)
    }

    async fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.lock().await;
        // A lock whose only reference is this map has no run holding or
        // awaiting it, so the entry can be dropped instead of piling up.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    pub(crate) async fn tracked_session_locks(&self) -> usize {
        self.session_locks.lock().await.len()
    }
}
