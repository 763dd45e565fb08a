//! A minimal one-node graph: the chatbot node sends the message history to
//! the model and appends the reply. State is transient, so each turn only
//! sees its own input; the agent_memory demo adds persistence.
//!
//! Run with: OPENAI_API_KEY=... cargo run --example chatbot

use anyhow::Context as _;
use std::io::{BufRead, Write};
use std::sync::Arc;
use stategraph::prelude::*;

fn chatbot_graph(client: Arc<dyn ChatClient>) -> Result<Graph<MessageState, Built>, BuildError> {
    let chatbot = FunctionNode::new("chatbot", move |_ctx, state: MessageState| {
        let client = client.clone();
        async move {
            let reply = client
                .complete(&state.messages, &CompletionOptions::default())
                .await?;
            Ok(NodeOutput::Updates(vec![reply]))
        }
    });

    let mut graph = Graph::new("chatbot");
    graph
        .add_node(chatbot)
        .add_edge(START, "chatbot")
        .add_edge("chatbot", END);
    graph.build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let client: Arc<dyn ChatClient> = Arc::new(ChatClientImpl::new(ChatClientConfig::new(api_key)));
    let graph = chatbot_graph(client)?;
    let ctx = Context::default();

    let stdin = std::io::stdin();
    loop {
        print!("User: ");
        std::io::stdout().flush()?;

        let mut user_input = String::new();
        if stdin.lock().read_line(&mut user_input)? == 0 {
            break;
        }
        let user_input = user_input.trim();
        if matches!(user_input, "quit" | "exit" | "q") {
            println!("Goodbye!");
            break;
        }

        let final_state = graph
            .run(&ctx, MessageState::new(vec![Message::human(user_input)]))
            .await?;
        if let Some(reply) = final_state.last_message() {
            println!("Assistant: {}", reply.content);
        }
    }

    Ok(())
}
