mod error;
mod message;
mod result;
mod state;

pub use error::{
    BuildError, CheckpointError, CompletionError, GraphError, NodeError, ToolError,
    ValidationError, Violation,
};
pub use message::{Message, Role, ToolCall};
pub use result::{CheckpointResult, GraphResult, NodeOutput, NodeResult};
pub use state::{GraphState, MessageState};
