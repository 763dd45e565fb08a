use crate::node::{Context, Node};
use crate::tool::ErasedTool;
use crate::types::{Message, MessageState, NodeOutput, NodeResult, ToolError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::debug;

/// Routing function for tool-calling graphs: if the newest message carries a
/// tool-call request, route to the tool node, otherwise terminate.
pub fn tools_condition(state: &MessageState) -> String {
    match state.last_message() {
        Some(message) if message.has_tool_calls() => "tools".to_string(),
        _ => crate::graph::END.to_string(),
    }
}

/// Prebuilt node that executes the tool calls requested by the newest
/// message and appends one tool-result message per call.
pub struct ToolNode {
    name: String,
    tools: HashMap<String, Arc<dyn ErasedTool>>,
}

impl ToolNode {
    /// Create a tool node named "tools", matching `tools_condition`.
    pub fn new(tools: Vec<Arc<dyn ErasedTool>>) -> Self {
        Self::with_name("tools", tools)
    }

    pub fn with_name(name: impl Into<String>, tools: Vec<Arc<dyn ErasedTool>>) -> Self {
        Self {
            name: name.into(),
            tools: tools
                .into_iter()
                .map(|tool| (tool.name().to_string(), tool))
                .collect(),
        }
    }

    fn render(result: &Value) -> String {
        match result {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl Node<MessageState> for ToolNode {
    async fn process(&self, _ctx: &Context, state: MessageState) -> NodeResult<MessageState> {
        let tool_calls = match state.last_message() {
            Some(message) => message.tool_calls.clone(),
            None => Vec::new(),
        };

        let mut results = Vec::with_capacity(tool_calls.len());
        for call in tool_calls {
            let tool = self
                .tools
                .get(&call.name)
                .ok_or_else(|| ToolError::UnknownTool(call.name.clone()))?;

            debug!(tool = %call.name, call_id = %call.id, "dispatching tool call");
            let result = tool.call(call.arguments.clone()).await?;
            results.push(Message::tool(Self::render(&result), call.id).with_name(call.name));
        }

        Ok(NodeOutput::Updates(results))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Debug for ToolNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        f.debug_struct("ToolNode")
            .field("name", &self.name)
            .field("tools", &names)
            .finish()
    }
}
