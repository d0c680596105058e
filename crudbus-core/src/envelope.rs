use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The inbound message envelope routed by the dispatcher.
///
/// `payload` and `query` default to JSON null when a sender omits them;
/// handlers treat null the same as an empty object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Role namespace the handler was registered under.
    pub role: String,
    /// Target model name. Absent for model-wildcard commands like `query`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Command name: one of the ten operations, `query`, or `upsert`.
    pub cmd: String,
    /// Primary operation arguments.
    #[serde(default)]
    pub payload: Value,
    /// Secondary arguments (the `update` filter, the raw query string).
    #[serde(default)]
    pub query: Value,
}

impl Request {
    pub fn new(role: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            model: None,
            cmd: cmd.into(),
            payload: Value::Null,
            query: Value::Null,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_query(mut self, query: Value) -> Self {
        self.query = query;
        self
    }
}
