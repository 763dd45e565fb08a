//! Stategraph is a small framework for building stateful, graph-structured
//! workflows around LLMs: typed state threaded through named nodes, fixed and
//! conditional edges, cyclic tool-calling loops, and checkpointed sessions.

pub mod checkpoint;
pub mod completion;
pub mod graph;
pub mod node;
pub mod tool;
pub mod types;

pub mod prelude {
    //! Convenient re-exports of commonly used types
    pub use crate::checkpoint::{Checkpointer, MemorySaver};
    pub use crate::completion::{ChatClient, ChatClientConfig, ChatClientImpl, CompletionOptions};
    pub use crate::graph::{Built, Condition, Edge, Graph, NotBuilt, SessionGraph, END, START};
    pub use crate::node::{Context, FunctionNode, Node};
    pub use crate::tool::{tools_condition, ErasedTool, JsonSchema, ToolFunction, ToolNode, ToolSchema};
    pub use crate::types::{
        BuildError, CheckpointError, CheckpointResult, CompletionError, GraphError, GraphResult,
        GraphState, Message, MessageState, NodeError, NodeOutput, NodeResult, Role, ToolCall,
        ToolError, ValidationError, Violation,
    };
}

// Re-export main types
pub use prelude::*;
