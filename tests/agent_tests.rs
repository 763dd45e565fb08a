//! End-to-end tests of the cyclic tool-calling agent graph, driven by a
//! scripted chat client instead of the hosted API.

use async_trait::async_trait;
use serde_json::{json, Value};
use stategraph::prelude::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, serde::Deserialize)]
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

#[derive(Debug, serde::Serialize)]
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

macro_rules! arithmetic_tool {
    ($name:ident, $tool_name:literal, $description:literal, $op:expr) => {
        struct $name;

        #[async_trait]
        impl ToolFunction for $name {
            type Params = BinaryParams;
            type Response = NumberResponse;

            fn name() -> &'static str {
                $tool_name
            }

            fn description() -> &'static str {
                $description
            }

            async fn execute(&self, params: BinaryParams) -> Result<NumberResponse, ToolError> {
                let op: fn(f64, f64) -> f64 = $op;
                Ok(NumberResponse {
                    result: op(params.a, params.b),
                })
            }
        }
    };
}

arithmetic_tool!(Add, "add", "Adds a and b", |a, b| a + b);
arithmetic_tool!(Multiply, "multiply", "Multiply a and b", |a, b| a * b);
arithmetic_tool!(Divide, "divide", "Divide a and b", |a, b| a / b);

/// Chat client that replays a fixed list of replies.
struct ScriptedClient {
    replies: Mutex<VecDeque<Message>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Message>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn complete(
        &self,
        _messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<Message, CompletionError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CompletionError::MalformedResponse("script exhausted".to_string()))
    }
}

fn tool_call(id: &str, name: &str, arguments: Value) -> Message {
    Message::ai("").with_tool_calls(vec![ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }])
}

fn agent_graph(client: Arc<dyn ChatClient>) -> Graph<MessageState, Built> {
    let options = CompletionOptions::default()
        .with_tools(vec![<Add as ToolFunction>::schema(), <Multiply as ToolFunction>::schema(), <Divide as ToolFunction>::schema()]);

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

    let mut graph = Graph::new("agent");
    graph
        .add_node(assistant)
        .add_node(tools)
        .add_edge(START, "assistant")
        .add_conditional_edge("assistant", ["tools", END], tools_condition)
        .add_edge("tools", "assistant")
        .with_step_limit(25);
    graph.build().unwrap()
}

#[tokio::test]
async fn test_agent_loop_terminates_with_computed_result() {
    // Scripted run of "Add 3 and 4. Multiply the output by 2."
    let client = Arc::new(ScriptedClient::new(vec![
        tool_call("call_1", "add", json!({"a": 3, "b": 4})),
        tool_call("call_2", "multiply", json!({"a": 7, "b": 2})),
        Message::ai("3 plus 4 is 7, and multiplied by 2 that gives 14."),
    ]));

    let graph = agent_graph(client);
    let ctx = Context::new("test");
    let final_state = graph
        .run(
            &ctx,
            MessageState::new(vec![Message::human(
                "Add 3 and 4. Multiply the output by 2.",
            )]),
        )
        .await
        .unwrap();

    // human, ai(add), tool(7), ai(multiply), tool(14), ai(final)
    assert_eq!(final_state.messages.len(), 6);

    let tool_results: Vec<&Message> = final_state
        .messages
        .iter()
        .filter(|m| m.role == Role::Tool)
        .collect();
    assert_eq!(tool_results.len(), 2);
    assert_eq!(tool_results[0].content, r#"{"result":7.0}"#);
    assert_eq!(tool_results[1].content, r#"{"result":14.0}"#);

    let last = final_state.last_message().unwrap();
    assert_eq!(last.role, Role::Ai);
    assert!(last.content.contains("14"));
}

#[tokio::test]
async fn test_agent_without_tool_calls_goes_straight_to_end() {
    let client = Arc::new(ScriptedClient::new(vec![Message::ai("Hello!")]));

    let graph = agent_graph(client);
    let ctx = Context::new("test");
    let final_state = graph
        .run(&ctx, MessageState::new(vec![Message::human("Hello")]))
        .await
        .unwrap();

    assert_eq!(final_state.messages.len(), 2);
    assert_eq!(final_state.last_message().unwrap().content, "Hello!");
}

#[tokio::test]
async fn test_agent_model_failure_propagates() {
    // An empty script makes the first completion fail
    let client = Arc::new(ScriptedClient::new(vec![]));

    let graph = agent_graph(client);
    let ctx = Context::new("test");
    let err = graph
        .run(&ctx, MessageState::new(vec![Message::human("Hello")]))
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Node(NodeError::Model(_))));
}

#[tokio::test]
async fn test_agent_history_only_grows() {
    let client = Arc::new(ScriptedClient::new(vec![
        tool_call("call_1", "add", json!({"a": 1, "b": 2})),
        Message::ai("1 plus 2 is 3."),
    ]));

    let graph = agent_graph(client);
    let ctx = Context::new("test");
    let initial = MessageState::new(vec![Message::human("Add 1 and 2.")]);
    let final_state = graph.run(&ctx, initial.clone()).await.unwrap();

    // The initial prefix is preserved verbatim
    assert_eq!(final_state.messages[..initial.messages.len()], initial.messages[..]);
    assert!(final_state.messages.len() > initial.messages.len());
}
