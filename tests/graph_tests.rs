use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stategraph::prelude::*;
use std::sync::{Arc, Mutex};

/// State for the mood graph: a single string threaded through the nodes.
#[derive(Debug, Clone, Default, PartialEq)]
struct GreetingState {
    graph_state: String,
}

#[derive(Debug)]
enum GreetingUpdate {
    Set(String),
}

impl GraphState for GreetingState {
    type Update = GreetingUpdate;

    fn apply(&mut self, update: GreetingUpdate) {
        match update {
            GreetingUpdate::Set(value) => self.graph_state = value,
        }
    }
}

fn append_node(
    name: &str,
    suffix: &'static str,
) -> FunctionNode<
    GreetingState,
    impl Fn(&Context, GreetingState) -> std::future::Ready<NodeResult<GreetingState>> + Send + Sync,
> {
    FunctionNode::new(name, move |_ctx, state: GreetingState| {
        std::future::ready(Ok(NodeOutput::Updates(vec![GreetingUpdate::Set(format!(
            "{}{}",
            state.graph_state, suffix
        ))])))
    })
}

fn mood_graph(seed: u64) -> Graph<GreetingState, Built> {
    let rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));

    let mut graph = Graph::new("mood");
    graph
        .add_node(append_node("node_1", " I am"))
        .add_node(append_node("node_2", " happy!"))
        .add_node(append_node("node_3", " sad!"))
        .add_edge(START, "node_1")
        .add_conditional_edge("node_1", ["node_2", "node_3"], move |_: &GreetingState| {
            // 50/50 split between the two moods
            if rng.lock().unwrap().gen_bool(0.5) {
                "node_2".to_string()
            } else {
                "node_3".to_string()
            }
        })
        .add_edge("node_2", END)
        .add_edge("node_3", END);
    graph.build().unwrap()
}

#[tokio::test]
async fn test_mood_graph_produces_exactly_one_of_two_outcomes() {
    let ctx = Context::new("test");
    for seed in 0..10 {
        let graph = mood_graph(seed);
        let final_state = graph
            .run(
                &ctx,
                GreetingState {
                    graph_state: "Hi, this is Lance.".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(
            final_state.graph_state == "Hi, this is Lance. I am happy!"
                || final_state.graph_state == "Hi, this is Lance. I am sad!",
            "unexpected result: {}",
            final_state.graph_state
        );
    }
}

#[tokio::test]
async fn test_mood_graph_is_deterministic_under_a_seed() {
    let ctx = Context::new("test");
    let initial = GreetingState {
        graph_state: "Hi, this is Lance.".to_string(),
    };

    let first = mood_graph(42).run(&ctx, initial.clone()).await.unwrap();
    let second = mood_graph(42).run(&ctx, initial).await.unwrap();
    assert_eq!(first, second);
}

/// Strictly-validated state: `mood` may only be "happy" or "sad".
#[derive(Debug, Clone, Default, PartialEq)]
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
        let mut err = ValidationError::new();
        if self.name.is_empty() {
            err.push("name", "must not be empty");
        }
        if self.mood != "happy" && self.mood != "sad" {
            err.push("mood", "must be either 'happy' or 'sad'");
        }
        err.into_result()
    }
}

#[test]
fn test_mood_schema_rejects_invalid_mood() {
    let state = MoodState {
        name: "Lance".to_string(),
        mood: "mad".to_string(),
    };

    let err = state.validate().unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].field, "mood");
    assert!(err.to_string().contains("mood"));
}

#[test]
fn test_mood_schema_accepts_valid_mood() {
    let state = MoodState {
        name: "Lance".to_string(),
        mood: "sad".to_string(),
    };
    assert!(state.validate().is_ok());
}

#[tokio::test]
async fn test_validated_graph_rejects_bad_update() {
    let set_mad = FunctionNode::new("set_mad", |_ctx, _: MoodState| async move {
        Ok(NodeOutput::Updates(vec![MoodUpdate::Mood(
            "mad".to_string(),
        )]))
    });

    let built_graph = {
        let mut graph = Graph::new("moods");
        graph
            .add_node(set_mad)
            .add_edge(START, "set_mad")
            .add_edge("set_mad", END)
            .with_state_validation();
        graph.build().unwrap()
    };

    let ctx = Context::new("test");
    let err = built_graph
        .run(
            &ctx,
            MoodState {
                name: "Lance".to_string(),
                mood: "happy".to_string(),
            },
        )
        .await
        .unwrap_err();

    match err {
        GraphError::State(validation) => {
            assert_eq!(validation.violations[0].field, "mood");
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
}
