use crate::types::ToolError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Trait for types that can be converted to JSON Schema
pub trait JsonSchema {
    /// Generate JSON Schema representation of the type
    fn schema() -> Value;
}

/// A tool's declared signature, as advertised to the completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Trait that must be implemented by callable tools
#[async_trait]
pub trait ToolFunction: Send + Sync {
    /// The parameter type for the tool
    type Params: JsonSchema + DeserializeOwned + Send;
    /// The response type for the tool
    type Response: JsonSchema + Serialize;

    /// Get the name of the tool
    fn name() -> &'static str;

    /// Get a description of what the tool does
    fn description() -> &'static str;

    /// Get the JSON Schema for the tool's parameters
    fn parameters_schema() -> Value {
        Self::Params::schema()
    }

    /// Get the complete signature advertised to the model
    fn schema() -> ToolSchema {
        ToolSchema {
            name: Self::name().to_string(),
            description: Self::description().to_string(),
            parameters: Self::parameters_schema(),
        }
    }

    /// Execute the tool with the given parameters
    async fn execute(&self, params: Self::Params) -> Result<Self::Response, ToolError>;
}

/// Object-safe view of a tool: JSON arguments in, JSON result out. Lets
/// tools with different parameter types share a registry.
#[async_trait]
pub trait ErasedTool: Send + Sync {
    fn name(&self) -> &str;

    fn schema(&self) -> ToolSchema;

    async fn call(&self, arguments: Value) -> Result<Value, ToolError>;
}

#[async_trait]
impl<T> ErasedTool for T
where
    T: ToolFunction,
{
    fn name(&self) -> &str {
        T::name()
    }

    fn schema(&self) -> ToolSchema {
        T::schema()
    }

    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let params: T::Params = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        let response = self.execute(params).await?;
        serde_json::to_value(response).map_err(|e| ToolError::Serialization(e.to_string()))
    }
}
