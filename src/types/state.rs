use crate::types::{Message, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// State threaded through a graph run.
///
/// `Update` is the partial-update type nodes emit; `apply` fixes the merge
/// strategy per field (replace, append, ...) at the type level, so every node
/// output is merged the same way.
pub trait GraphState: Clone + Debug + Send + Sync + 'static {
    type Update: Send + Debug;

    /// Merge a single update into this state.
    fn apply(&mut self, update: Self::Update);

    /// Merge multiple updates in sequence.
    fn apply_many<I: IntoIterator<Item = Self::Update>>(&mut self, updates: I) {
        for update in updates {
            self.apply(update);
        }
    }

    /// Check this state against its declared schema. The default is
    /// unchecked; strict states override this and report every violated
    /// constraint.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Prebuilt state for conversational graphs: a message history whose merge
/// strategy is append-only. Prior messages are never removed or rewritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageState {
    pub messages: Vec<Message>,
}

impl MessageState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl GraphState for MessageState {
    type Update = Message;

    fn apply(&mut self, update: Message) {
        self.messages.push(update);
    }
}
