/// Credentials and endpoint for the completion service, passed explicitly at
/// client construction. The library never reads environment variables;
/// applications resolve their configuration and hand it over.
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    pub api_key: String,
    pub api_base: Option<String>,
}

impl ChatClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: None,
        }
    }

    /// Point the client at a non-default endpoint (e.g. a proxy or an
    /// Azure-style deployment URL).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }
}
