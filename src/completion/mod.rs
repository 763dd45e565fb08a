mod client;
mod config;

pub use client::{ChatClient, ChatClientImpl, CompletionOptions};
pub use config::ChatClientConfig;
