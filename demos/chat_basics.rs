//! Invoking the chat model directly, without any graph: build a message
//! list by hand and ask for one completion.
//!
//! Run with: OPENAI_API_KEY=... cargo run --example chat_basics

use anyhow::Context as _;
use stategraph::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let client = ChatClientImpl::new(ChatClientConfig::new(api_key));

    // An in-flight conversation, built by hand
    let messages = vec![
        Message::ai("So you said you were researching ocean mammals?").with_name("Model"),
        Message::human("Yes, that's right.").with_name("Lance"),
        Message::ai("Great, what would you like to learn about.").with_name("Model"),
        Message::human("I want to learn about the best place to see Orcas in the US.")
            .with_name("Lance"),
    ];

    for message in &messages {
        println!("{:?}: {}", message.role, message.content);
    }

    let reply = client
        .complete(&messages, &CompletionOptions::default())
        .await?;
    println!("\n{:?}: {}", reply.role, reply.content);

    Ok(())
}
