use async_openai::error::OpenAIError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single violated constraint on a state field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Error raised when a state fails its declared schema. Collects every
/// violated constraint rather than stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Ok if nothing was recorded, Err(self) otherwise.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state validation failed:")?;
        for v in &self.violations {
            write!(f, " [{}: {}]", v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Error type for tool operations
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Execution: {0}")]
    Execution(String),

    #[error("Serialization: {0}")]
    Serialization(String),
}

/// Error type for the chat-completion boundary
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CompletionError {
    #[error("Api: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<OpenAIError> for CompletionError {
    fn from(err: OpenAIError) -> Self {
        CompletionError::Api(err.to_string())
    }
}

/// Error type for node operations
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum NodeError {
    #[error("Node execution: {0}")]
    Execution(String),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Model: {0}")]
    Model(String),

    #[error("Subgraph execution: {0}")]
    Subgraph(String),

    #[error("Other: {0}")]
    Other(String),
}

impl From<anyhow::Error> for NodeError {
    fn from(err: anyhow::Error) -> Self {
        NodeError::Other(err.to_string())
    }
}

impl From<CompletionError> for NodeError {
    fn from(err: CompletionError) -> Self {
        NodeError::Model(err.to_string())
    }
}

/// Structural errors detected when a graph is built, before any execution.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BuildError {
    #[error("Graph has no nodes")]
    Empty,

    #[error("No entry edge from START")]
    MissingEntry,

    #[error("Edge source references unknown node: {0}")]
    UnknownSource(String),

    #[error("Edge from {from} targets unknown node: {target}")]
    UnknownTarget { from: String, target: String },

    #[error("No edge targets END")]
    EndUnreachable,
}

/// Error type for checkpoint stores
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CheckpointError {
    #[error("Serialization: {0}")]
    Serialization(String),

    #[error("Store: {0}")]
    Store(String),
}

/// Error type for overall graph operations
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GraphError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Conditional edge at {node} returned {returned}, declared targets: {declared:?}")]
    InvalidRoute {
        node: String,
        returned: String,
        declared: Vec<String>,
    },

    #[error("Step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize },

    // NodeError can bubble up automatically
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    State(#[from] ValidationError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}
