//! Model-reference resolution.
//!
//! Rewrites model-name strings inside a payload into live handles before the
//! payload reaches the backend. This is a pure structural transform: unknown
//! names are kept as [`ModelRef::Unresolved`] and rejected later by the
//! backend, never here.

use crudbus_core::{Backend, ModelRef, ResolvedObject, ResolvedPayload};
use serde_json::Value;

/// Resolves a payload's `model` and `include` references against the
/// backend's model registry, recursively and order-preserving.
///
/// - a string `model` field becomes a [`ModelRef`] (resolved or not);
/// - an array `include` field is resolved element by element;
/// - every other field is carried through unchanged;
/// - a null payload resolves like an empty object;
/// - arrays and scalars contain no references and pass through as-is.
pub fn resolve(backend: &dyn Backend, payload: &Value) -> ResolvedPayload {
    let obj = match payload {
        Value::Object(obj) => obj,
        Value::Null => return ResolvedPayload::empty(),
        other => return ResolvedPayload::Value(other.clone()),
    };

    let mut resolved = ResolvedObject::default();
    for (key, value) in obj {
        match (key.as_str(), value) {
            ("model", Value::String(name)) => {
                resolved.model = Some(match backend.model(name) {
                    Some(handle) => ModelRef::Resolved(handle),
                    None => ModelRef::Unresolved(name.clone()),
                });
            }
            ("include", Value::Array(inclusions)) => {
                resolved.include = inclusions
                    .iter()
                    .map(|inclusion| resolve(backend, inclusion))
                    .collect();
            }
            _ => {
                resolved.fields.insert(key.clone(), value.clone());
            }
        }
    }
    ResolvedPayload::Object(resolved)
}
