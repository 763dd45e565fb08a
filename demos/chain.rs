//! A chain with a tool-calling LLM node but no tool node. The model may
//! answer with a tool-call request, and because nothing in the graph
//! executes it, the request just sits at the end of the message history.
//! The router demo adds the missing node.
//!
//! Run with: OPENAI_API_KEY=... cargo run --example chain

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

fn print_history(state: &MessageState) {
    for message in &state.messages {
        if message.has_tool_calls() {
            for call in &message.tool_calls {
                println!("{:?}: tool call {}({})", message.role, call.name, call.arguments);
            }
        } else {
            println!("{:?}: {}", message.role, message.content);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let client: Arc<dyn ChatClient> = Arc::new(ChatClientImpl::new(ChatClientConfig::new(api_key)));

    // The LLM node has the multiply tool bound: the model can request the
    // call, it just won't be executed anywhere in this graph.
    let options = CompletionOptions::default().with_tools(vec![<Multiply as ToolFunction>::schema()]);
    let tool_calling_llm = FunctionNode::new("tool_calling_llm", move |_ctx, state: MessageState| {
        let client = client.clone();
        let options = options.clone();
        async move {
            println!("At llm with tools node");
            let reply = client.complete(&state.messages, &options).await?;
            Ok(NodeOutput::Updates(vec![reply]))
        }
    });

    // Build graph
    let mut graph = Graph::new("chain");
    graph
        .add_node(tool_calling_llm)
        .add_edge(START, "tool_calling_llm")
        .add_edge("tool_calling_llm", END);
    let graph = graph.build()?;
    let ctx = Context::default();

    // Run graph with a non-tool input
    let state = graph
        .run(&ctx, MessageState::new(vec![Message::human("Hello!")]))
        .await?;
    print_history(&state);

    // Run graph with a tool input: the reply is a dangling tool-call request
    let state = graph
        .run(
            &ctx,
            MessageState::new(vec![Message::human("Multiply 2 and 3")]),
        )
        .await?;
    print_history(&state);

    Ok(())
}
