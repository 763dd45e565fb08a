use std::collections::HashMap;

/// Per-run context handed to every node: the run's trace identifier, which
/// tags the executor's log events, plus free-form metadata for node authors.
#[derive(Debug, Clone)]
pub struct Context {
    pub trace_id: String,
    pub metadata: HashMap<String, String>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

impl Context {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
