//! Conditional routing: if the model's reply requests a tool call, route to
//! the tool node; otherwise terminate. The tool node executes the call and
//! appends the result, so the final history actually contains the product.
//!
//! Run with: OPENAI_API_KEY=... cargo run --example router

use anyhow::Context as _;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use stategraph::prelude::*;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct MultiplyParams {
    a: i64,
    b: i64,
}

impl JsonSchema for MultiplyParams {
    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "a": {"type": "integer", "description": "first int"},
                "b": {"type": "integer", "description": "second int"}
            },
            "required": ["a", "b"]
        })
    }
}

#[derive(Debug, Serialize)]
struct MultiplyResponse {
    result: i64,
}

impl JsonSchema for MultiplyResponse {
    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {"result": {"type": "integer"}},
            "required": ["result"]
        })
    }
}

struct Multiply;

#[async_trait]
impl ToolFunction for Multiply {
    type Params = MultiplyParams;
    type Response = MultiplyResponse;

    fn name() -> &'static str {
        "multiply"
    }

    fn description() -> &'static str {
        "Multiply a and b"
    }

    async fn execute(&self, params: MultiplyParams) -> Result<MultiplyResponse, ToolError> {
        Ok(MultiplyResponse {
            result: params.a * params.b,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let client: Arc<dyn ChatClient> = Arc::new(ChatClientImpl::new(ChatClientConfig::new(api_key)));

    let options = CompletionOptions::default().with_tools(vec![<Multiply as ToolFunction>::schema()]);
    let tool_calling_llm = FunctionNode::new("tool_calling_llm", move |_ctx, state: MessageState| {
        let client = client.clone();
        let options = options.clone();
        async move {
            println!("At tool_calling_llm node");
            let reply = client.complete(&state.messages, &options).await?;
            Ok(NodeOutput::Updates(vec![reply]))
        }
    });

    // Build graph: the conditional edge inspects the newest message.
    // A tool-call request routes to "tools"; anything else routes to END.
    let mut graph = Graph::new("router");
    graph
        .add_node(tool_calling_llm)
        .add_node(ToolNode::new(vec![Arc::new(Multiply)]))
        .add_edge(START, "tool_calling_llm")
        .add_conditional_edge("tool_calling_llm", ["tools", END], tools_condition)
        .add_edge("tools", END);
    let graph = graph.build()?;

    // Run graph with a tool input; the tool node appends the result message
    let ctx = Context::default();
    let state = graph
        .run(
            &ctx,
            MessageState::new(vec![Message::human("Hello, what is 2 multiplied by 2?")]),
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
