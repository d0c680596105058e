use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of CRUD-style primitives registered for every model.
///
/// Wire names are camelCase (`findOrCreate`, `bulkCreate`, ...) to stay
/// compatible with existing message consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Create,
    FindOrCreate,
    FindById,
    FindOne,
    FindAll,
    FindAndCountAll,
    Count,
    BulkCreate,
    Update,
    Destroy,
}

impl Operation {
    /// Every supported operation, in registration order.
    pub const ALL: [Operation; 10] = [
        Operation::Create,
        Operation::FindOrCreate,
        Operation::FindById,
        Operation::FindOne,
        Operation::FindAll,
        Operation::FindAndCountAll,
        Operation::Count,
        Operation::BulkCreate,
        Operation::Update,
        Operation::Destroy,
    ];

    /// The operation's wire name, as used in the `cmd` field of a request.
    pub fn wire_name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::FindOrCreate => "findOrCreate",
            Operation::FindById => "findById",
            Operation::FindOne => "findOne",
            Operation::FindAll => "findAll",
            Operation::FindAndCountAll => "findAndCountAll",
            Operation::Count => "count",
            Operation::BulkCreate => "bulkCreate",
            Operation::Update => "update",
            Operation::Destroy => "destroy",
        }
    }

    /// Parses a wire name back into an operation. Returns `None` for
    /// anything outside the supported set (including `query` and `upsert`,
    /// which are commands but not model operations).
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.wire_name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
