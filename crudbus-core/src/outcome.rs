use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Plain-form conversion for backend record types.
///
/// The dispatcher never inspects backend records beyond this: whatever
/// internal state a record carries, `to_plain` is the serializable shape
/// that goes on the wire.
pub trait Record: Send + Sync {
    fn to_plain(&self) -> Value;
}

/// One element of a multi-row result. Backends may interleave records with
/// bare values (e.g. a found-or-created record paired with a created flag).
#[derive(Clone)]
pub enum Fetched {
    Record(Arc<dyn Record>),
    Value(Value),
}

/// What a backend call may return. The result normalizer maps each arm to
/// a stable wire shape, so callers never see backend-internal record types.
#[derive(Clone)]
pub enum CallOutcome {
    /// No matching record.
    Null,
    /// An ordered sequence of rows.
    Many(Vec<Fetched>),
    /// A single record.
    One(Arc<dyn Record>),
    /// A bare scalar or plain object (counts, affected-row lists, ...).
    Value(Value),
}

impl fmt::Debug for Fetched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fetched::Record(r) => write!(f, "Record({})", r.to_plain()),
            Fetched::Value(v) => write!(f, "Value({v})"),
        }
    }
}

impl fmt::Debug for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallOutcome::Null => f.write_str("Null"),
            CallOutcome::Many(items) => f.debug_tuple("Many").field(items).finish(),
            CallOutcome::One(r) => write!(f, "One({})", r.to_plain()),
            CallOutcome::Value(v) => write!(f, "Value({v})"),
        }
    }
}
