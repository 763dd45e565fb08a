use std::fmt::{Debug, Formatter, Result};
use std::sync::Arc;

/// Represents a condition for edge transitions
pub type Condition<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Edge definition for graph transitions
#[derive(Clone)]
pub enum Edge<S> {
    /// Direct edge to next node
    Direct(String),
    /// Conditional edge based on state; the routing function must return one
    /// of the declared targets
    Conditional {
        targets: Vec<String>,
        condition: Condition<S>,
    },
}

// Manual Debug implementation since conditions are opaque functions
impl<S> Debug for Edge<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Edge::Direct(target) => f.debug_tuple("Direct").field(target).finish(),
            Edge::Conditional { targets, .. } => f
                .debug_struct("Conditional")
                .field("targets", targets)
                .finish(),
        }
    }
}
