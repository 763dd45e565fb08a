use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use super::*;
use crate::checkpoint::Checkpointer;
use crate::node::{Context, Node};
use crate::types::*;

pub const START: &str = "_START_";
pub const END: &str = "_END_";

fn edge_targets<S>(edge: &Edge<S>) -> &[String] {
    match edge {
        Edge::Direct(target) => std::slice::from_ref(target),
        Edge::Conditional { targets, .. } => targets,
    }
}

/// A graph that executes nodes in a defined order.
///
/// Construction and execution are split by the `BuildState` marker:
/// `build()` validates the structure once, and only a `Built` graph can run.
#[derive(Debug)]
pub struct Graph<S, BuildState = NotBuilt> {
    graph_name: String,
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: HashMap<String, Edge<S>>,
    step_limit: Option<usize>,
    validate_state: bool,
    _build_state: std::marker::PhantomData<BuildState>,
}

impl<S> Graph<S, NotBuilt>
where
    S: GraphState,
{
    /// Create a new graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph_name: name.into(),
            nodes: HashMap::new(),
            edges: HashMap::new(),
            step_limit: None,
            validate_state: false,
            _build_state: std::marker::PhantomData,
        }
    }

    /// Add a node to the graph
    pub fn add_node<N>(&mut self, node: N) -> &mut Self
    where
        N: Node<S> + 'static,
    {
        self.nodes.insert(node.name().to_string(), Arc::new(node));
        self
    }

    /// Add a direct edge between nodes
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.insert(from.into(), Edge::Direct(to.into()));
        self
    }

    /// Add a conditional edge from a node. The routing function must return
    /// one of the declared targets (END included, when declared).
    pub fn add_conditional_edge<F, I, T>(
        &mut self,
        from: impl Into<String>,
        targets: I,
        condition: F,
    ) -> &mut Self
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.edges.insert(
            from.into(),
            Edge::Conditional {
                targets: targets.into_iter().map(Into::into).collect(),
                condition: Arc::new(condition),
            },
        );
        self
    }

    /// Fail runs that execute more than `limit` nodes. Off by default; cyclic
    /// graphs should set this so a runaway loop fails instead of spinning.
    pub fn with_step_limit(&mut self, limit: usize) -> &mut Self {
        self.step_limit = Some(limit);
        self
    }

    /// Validate the state against its declared schema before the run and
    /// after every merge.
    pub fn with_state_validation(&mut self) -> &mut Self {
        self.validate_state = true;
        self
    }

    /// Build the graph, making it ready for execution.
    ///
    /// Structural errors are rejected here, before any node runs: a dangling
    /// node reference, a missing entry edge, or a graph that can never reach
    /// END from START.
    pub fn build(self) -> Result<Graph<S, Built>, BuildError> {
        if self.nodes.is_empty() {
            return Err(BuildError::Empty);
        }
        if !self.edges.contains_key(START) {
            return Err(BuildError::MissingEntry);
        }

        for (from, edge) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(BuildError::UnknownSource(from.clone()));
            }
            for target in edge_targets(edge) {
                if target != END && !self.nodes.contains_key(target) {
                    return Err(BuildError::UnknownTarget {
                        from: from.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        // END must be reachable by walking the edge table from START; an END
        // edge hanging off a disconnected node does not count.
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![START];
        let mut end_reachable = false;
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(edge) = self.edges.get(current) {
                for target in edge_targets(edge) {
                    if target == END {
                        end_reachable = true;
                    } else {
                        stack.push(target);
                    }
                }
            }
        }
        if !end_reachable {
            return Err(BuildError::EndUnreachable);
        }

        Ok(Graph {
            graph_name: self.graph_name,
            nodes: self.nodes,
            edges: self.edges,
            step_limit: self.step_limit,
            validate_state: self.validate_state,
            _build_state: std::marker::PhantomData,
        })
    }
}

impl<S> Graph<S, Built>
where
    S: GraphState,
{
    pub fn name(&self) -> &str {
        &self.graph_name
    }

    /// Attach a checkpointer, turning this graph into a session-aware runner.
    pub fn with_checkpointer(self, saver: Arc<dyn Checkpointer<S>>) -> SessionGraph<S> {
        SessionGraph::new(self, saver)
    }

    /// Run the graph with an initial state.
    ///
    /// The loop selects the next node via the edge table, invokes it, merges
    /// its output into the state, and repeats until END. Node failures
    /// propagate; the engine never retries.
    pub async fn run(&self, ctx: &Context, initial_state: S) -> GraphResult<S> {
        let mut current_state = initial_state;
        let mut current_node = START.to_string();
        let mut steps = 0usize;

        if self.validate_state {
            current_state.validate()?;
        }

        loop {
            // Get next node based on edges
            let next_node = match self.edges.get(&current_node) {
                Some(Edge::Direct(next)) => next.clone(),
                Some(Edge::Conditional { targets, condition }) => {
                    let target = condition(&current_state);
                    if !targets.iter().any(|t| t == &target) {
                        return Err(GraphError::InvalidRoute {
                            node: current_node,
                            returned: target,
                            declared: targets.clone(),
                        });
                    }
                    target
                }
                None => {
                    return Err(GraphError::InvalidTransition(format!(
                        "No transition defined from node: {}",
                        current_node
                    )));
                }
            };

            if next_node == END {
                break;
            }

            if let Some(limit) = self.step_limit {
                steps += 1;
                if steps > limit {
                    return Err(GraphError::StepLimitExceeded { limit });
                }
            }

            let node = self
                .nodes
                .get(&next_node)
                .ok_or_else(|| GraphError::NodeNotFound(next_node.clone()))?;

            debug!(
                graph = %self.graph_name,
                node = %next_node,
                trace_id = %ctx.trace_id,
                "executing node"
            );

            let output = node.process(ctx, current_state.clone()).await?;
            match output {
                NodeOutput::Full(new_state) => current_state = new_state,
                NodeOutput::Updates(updates) => current_state.apply_many(updates),
            }

            if self.validate_state {
                current_state.validate()?;
            }

            current_node = next_node;
        }

        Ok(current_state)
    }
}

// A built graph can itself serve as a node, so graphs compose
#[async_trait]
impl<S> Node<S> for Graph<S, Built>
where
    S: GraphState,
{
    async fn process(&self, ctx: &Context, state: S) -> NodeResult<S> {
        let new_state = self
            .run(ctx, state)
            .await
            .map_err(|e| NodeError::Subgraph(e.to_string()))?;
        Ok(NodeOutput::Full(new_state))
    }

    fn name(&self) -> &str {
        &self.graph_name
    }
}
