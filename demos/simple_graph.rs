//! The smallest interesting graph: three nodes transforming a single string
//! field, with a conditional edge taking a random 50/50 branch.
//!
//! Run with: cargo run --example simple_graph

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stategraph::prelude::*;
use std::sync::{Arc, Mutex};

// This struct holds the graph state
#[derive(Debug, Clone, Default)]
struct State {
    graph_state: String,
}

#[derive(Debug)]
enum StateUpdate {
    GraphState(String),
}

impl GraphState for State {
    type Update = StateUpdate;

    fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::GraphState(value) => self.graph_state = value,
        }
    }
}

// Nodes accept the graph state as input and operate on the state
fn append(name: &str, suffix: &'static str) -> impl Fn(&Context, State) -> std::future::Ready<NodeResult<State>> + Send + Sync {
    let name = name.to_string();
    move |_ctx, state: State| {
        println!("---{}---", name);
        std::future::ready(Ok(NodeOutput::Updates(vec![StateUpdate::GraphState(
            format!("{}{}", state.graph_state, suffix),
        )])))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let rng = Arc::new(Mutex::new(StdRng::from_entropy()));

    // Build graph
    let mut graph = Graph::new("simple");
    graph
        .add_node(FunctionNode::new("node_1", append("Node 1", " I am")))
        .add_node(FunctionNode::new("node_2", append("Node 2", " happy!")))
        .add_node(FunctionNode::new("node_3", append("Node 3", " sad!")))
        .add_edge(START, "node_1")
        // Conditional edge: decides which branch to run based on state
        .add_conditional_edge("node_1", ["node_2", "node_3"], move |state: &State| {
            println!("In conditional edge: {}", state.graph_state);
            // A random 50/50 split between nodes 2 and 3
            if rng.lock().unwrap().gen_bool(0.5) {
                "node_2".to_string()
            } else {
                "node_3".to_string()
            }
        })
        .add_edge("node_2", END)
        .add_edge("node_3", END);
    let graph = graph.build()?;

    // Invoke
    let ctx = Context::default();
    let result = graph
        .run(
            &ctx,
            State {
                graph_state: "Hi, this is Lance.".to_string(),
            },
        )
        .await?;
    println!("{:?}", result);

    Ok(())
}
