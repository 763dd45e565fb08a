//! A ReAct-style agent: the assistant node calls the model with bound
//! arithmetic tools, and the tool node feeds results back to the assistant,
//! forming a cycle. The loop continues as long as the model keeps requesting
//! tool calls; a step limit guards against a runaway loop.
//!
//! Run with: OPENAI_API_KEY=... cargo run --example agent

use anyhow::Context as _;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use stategraph::prelude::*;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct BinaryParams {
    a: f64,
    b: f64,
}

impl JsonSchema for BinaryParams {
    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "a": {"type": "number", "description": "first operand"},
                "b": {"type": "number", "description": "second operand"}
            },
            "required": ["a", "b"]
        })
    }
}

#[derive(Debug, Serialize)]
struct NumberResponse {
    result: f64,
}

impl JsonSchema for NumberResponse {
    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {"result": {"type": "number"}},
            "required": ["result"]
        })
    }
}

struct Add;

#[async_trait]
impl ToolFunction for Add {
    type Params = BinaryParams;
    type Response = NumberResponse;

    fn name() -> &'static str {
        "add"
    }

    fn description() -> &'static str {
        "Adds a and b"
    }

    async fn execute(&self, params: BinaryParams) -> Result<NumberResponse, ToolError> {
        Ok(NumberResponse {
            result: params.a + params.b,
        })
    }
}

struct Multiply;

#[async_trait]
impl ToolFunction for Multiply {
    type Params = BinaryParams;
    type Response = NumberResponse;

    fn name() -> &'static str {
        "multiply"
    }

    fn description() -> &'static str {
        "Multiply a and b"
    }

    async fn execute(&self, params: BinaryParams) -> Result<NumberResponse, ToolError> {
        Ok(NumberResponse {
            result: params.a * params.b,
        })
    }
}

struct Divide;

#[async_trait]
impl ToolFunction for Divide {
    type Params = BinaryParams;
    type Response = NumberResponse;

    fn name() -> &'static str {
        "divide"
    }

    fn description() -> &'static str {
        "Divide a and b"
    }

    async fn execute(&self, params: BinaryParams) -> Result<NumberResponse, ToolError> {
        Ok(NumberResponse {
            result: params.a / params.b,
        })
    }
}

fn agent_graph(client: Arc<dyn ChatClient>) -> Result<Graph<MessageState, Built>, BuildError> {
    let options = CompletionOptions::default()
        .with_tools(vec![<Add as ToolFunction>::schema(), <Multiply as ToolFunction>::schema(), <Divide as ToolFunction>::schema()]);

    // The assistant node is just the model with bound tools
    let assistant = FunctionNode::new("assistant", move |_ctx, state: MessageState| {
        let client = client.clone();
        let options = options.clone();
        async move {
            let mut messages = vec![Message::system(
                "You are a helpful assistant tasked with performing arithmetic on a set of inputs.",
            )];
            messages.extend(state.messages.iter().cloned());
            let reply = client.complete(&messages, &options).await?;
            Ok(NodeOutput::Updates(vec![reply]))
        }
    });

    let tools = ToolNode::new(vec![Arc::new(Add), Arc::new(Multiply), Arc::new(Divide)]);

    // The edge from "tools" back to "assistant" closes the cycle
    let mut graph = Graph::new("agent");
    graph
        .add_node(assistant)
        .add_node(tools)
        .add_edge(START, "assistant")
        .add_conditional_edge("assistant", ["tools", END], tools_condition)
        .add_edge("tools", "assistant")
        .with_step_limit(25);
    graph.build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let client: Arc<dyn ChatClient> = Arc::new(ChatClientImpl::new(ChatClientConfig::new(api_key)));
    let graph = agent_graph(client)?;

    let ctx = Context::default();
    let state = graph
        .run(
            &ctx,
            MessageState::new(vec![Message::human(
                "Add 3 and 4. Multiply the output by 2. Divide the output by 5",
            )]),
        )
        .await?;

    for message in &state.messages {
        if message.has_tool_calls() {
            for call in &message.tool_calls {
                println!("{:?}: tool call {}({})", message.role, call.name, call.arguments);
            }
        } else {
            println!("{:?}: {}", message.role, message.content);
        }
    }

    Ok(())
}
