use crate::backend::ModelHandle;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A model reference found in a payload, after resolution.
///
/// Unknown names are kept as [`ModelRef::Unresolved`] rather than rejected:
/// the resolver is a pure structural rewrite, and the backend is the one
/// that refuses to operate on a handle it never defined.
#[derive(Clone)]
pub enum ModelRef {
    Resolved(Arc<dyn ModelHandle>),
    Unresolved(String),
}

impl ModelRef {
    /// The referenced model's name, resolved or not.
    pub fn name(&self) -> &str {
        match self {
            ModelRef::Resolved(handle) => handle.name(),
            ModelRef::Unresolved(name) => name,
        }
    }

    /// The live handle, if resolution found one.
    pub fn handle(&self) -> Option<&Arc<dyn ModelHandle>> {
        match self {
            ModelRef::Resolved(handle) => Some(handle),
            ModelRef::Unresolved(_) => None,
        }
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelRef::Resolved(handle) => write!(f, "Resolved({})", handle.name()),
            ModelRef::Unresolved(name) => write!(f, "Unresolved({name})"),
        }
    }
}

/// A payload after model-reference resolution.
///
/// Object payloads have their `model` / `include` fields lifted into typed
/// form; everything else in the object is carried unchanged. Non-object
/// payloads (arrays, scalars) contain no references and pass through as-is.
#[derive(Debug, Clone)]
pub enum ResolvedPayload {
    Object(ResolvedObject),
    Value(Value),
}

/// The object arm of [`ResolvedPayload`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedObject {
    /// The payload's `model` reference, when the field held a string.
    pub model: Option<ModelRef>,
    /// Recursively resolved `include` entries, order preserved.
    pub include: Vec<ResolvedPayload>,
    /// All remaining fields, untouched.
    pub fields: Map<String, Value>,
}

impl ResolvedPayload {
    /// An empty object payload — what a null/omitted payload resolves to.
    pub fn empty() -> Self {
        ResolvedPayload::Object(ResolvedObject::default())
    }

    pub fn as_object(&self) -> Option<&ResolvedObject> {
        match self {
            ResolvedPayload::Object(obj) => Some(obj),
            ResolvedPayload::Value(_) => None,
        }
    }

    /// A field carried through from the original object payload.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.fields.get(name))
    }

    /// The `where` filter object, when present.
    pub fn where_clause(&self) -> Option<&Map<String, Value>> {
        self.field("where").and_then(Value::as_object)
    }

    /// First unresolved model name anywhere in this payload, scanning
    /// includes depth-first. Backends use this to reject payloads whose
    /// references never resolved.
    pub fn first_unresolved(&self) -> Option<&str> {
        let obj = self.as_object()?;
        if let Some(ModelRef::Unresolved(name)) = &obj.model {
            return Some(name);
        }
        obj.include.iter().find_map(|inc| inc.first_unresolved())
    }
}

impl Default for ResolvedPayload {
    fn default() -> Self {
        Self::empty()
    }
}

/// The argument list handed to [`ModelHandle::call`], built per operation:
/// `create` gets the raw payload (model names inside it are plain data),
/// `update` gets a resolved payload plus a resolved query filter, and every
/// other operation gets the resolved payload alone.
#[derive(Debug, Clone)]
pub enum CallArgs {
    Payload(ResolvedPayload),
    Raw(Value),
    PayloadAndQuery(ResolvedPayload, ResolvedPayload),
}
