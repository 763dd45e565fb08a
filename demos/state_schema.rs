//! Custom state schemas with validation. `MoodState` constrains its fields
//! through `GraphState::validate`; an invalid state is rejected up front with
//! a report naming each violated field, and a graph built with
//! `with_state_validation` enforces the same constraints after every merge.
//!
//! Run with: cargo run --example state_schema

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stategraph::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
struct MoodState {
    name: String,
    mood: String,
}

#[derive(Debug)]
enum MoodUpdate {
    Name(String),
    Mood(String),
}

impl GraphState for MoodState {
    type Update = MoodUpdate;

    fn apply(&mut self, update: MoodUpdate) {
        match update {
            MoodUpdate::Name(name) => self.name = name,
            MoodUpdate::Mood(mood) => self.mood = mood,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        if self.name.is_empty() {
            errors.push("name", "must not be empty");
        }
        if self.mood != "happy" && self.mood != "sad" {
            errors.push("mood", "must be either 'happy' or 'sad'");
        }
        errors.into_result()
    }
}

fn mood_graph() -> Result<Graph<MoodState, Built>, BuildError> {
    let rng = Arc::new(Mutex::new(StdRng::from_entropy()));

    let node_1 = FunctionNode::new("node_1", |_ctx, state: MoodState| async move {
        println!("---Node 1---");
        Ok(NodeOutput::Updates(vec![MoodUpdate::Name(format!(
            "{} is ... ",
            state.name
        ))]))
    });
    let node_2 = FunctionNode::new("node_2", |_ctx, _state: MoodState| async move {
        println!("---Node 2---");
        Ok(NodeOutput::Updates(vec![MoodUpdate::Mood("happy".into())]))
    });
    let node_3 = FunctionNode::new("node_3", |_ctx, _state: MoodState| async move {
        println!("---Node 3---");
        Ok(NodeOutput::Updates(vec![MoodUpdate::Mood("sad".into())]))
    });

    let mut graph = Graph::new("state_schema");
    graph
        .add_node(node_1)
        .add_node(node_2)
        .add_node(node_3)
        .add_edge(START, "node_1")
        .add_conditional_edge("node_1", ["node_2", "node_3"], move |_state: &MoodState| {
            if rng.lock().unwrap().gen_bool(0.5) {
                "node_2".to_string()
            } else {
                "node_3".to_string()
            }
        })
        .add_edge("node_2", END)
        .add_edge("node_3", END)
        .with_state_validation();
    graph.build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A state that breaks the schema is reported field by field.
    let invalid = MoodState {
        name: "Lance".to_string(),
        mood: "mad".to_string(),
    };
    match invalid.validate() {
        Ok(()) => println!("unexpectedly valid"),
        Err(err) => println!("rejected: {err}"),
    }

    let valid = MoodState {
        name: "Lance".to_string(),
        mood: "sad".to_string(),
    };
    valid.validate()?;

    // The graph re-checks the schema after every node's updates are merged.
    let graph = mood_graph()?;
    let ctx = Context::default();
    let state = graph.run(&ctx, valid).await?;
    println!("{state:?}");

    Ok(())
}
