use crate::types::{CheckpointError, GraphError, GraphState, NodeError};

/// What a node hands back to the executor.
#[derive(Debug)]
pub enum NodeOutput<S>
where
    S: GraphState,
{
    /// The node has produced an entirely new state.
    Full(S),

    /// The node has produced zero or more updates to the existing state.
    Updates(Vec<S::Update>),
}

pub type NodeResult<S> = Result<NodeOutput<S>, NodeError>;

pub type GraphResult<T> = Result<T, GraphError>;

pub type CheckpointResult<T> = Result<T, CheckpointError>;
