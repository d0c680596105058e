/// The routing key for a registered handler.
///
/// `model: None` is a model wildcard: the entry matches any request with the
/// same role and cmd whose model has no exact entry of its own. The `query`
/// and `upsert` commands register this way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub role: String,
    pub cmd: String,
    pub model: Option<String>,
}

impl Pattern {
    /// A pattern bound to one specific model.
    pub fn exact(
        role: impl Into<String>,
        model: impl Into<String>,
        cmd: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            cmd: cmd.into(),
            model: Some(model.into()),
        }
    }

    /// A model-wildcard pattern.
    pub fn wildcard(role: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            cmd: cmd.into(),
            model: None,
        }
    }
}
