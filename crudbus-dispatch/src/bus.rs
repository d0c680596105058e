//! The message bus: routes requests through an installed dispatch table.

use crate::error::DispatchError;
use crate::table::DispatchTable;
use crudbus_core::Request;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// An immutable, cheaply cloneable router over a [`DispatchTable`].
///
/// The table is fixed at construction; concurrent dispatches share it
/// without locking. Handlers receive a clone of the bus, which is how the
/// upsert orchestrator issues its findOne/create/update legs through the
/// same routing as external callers.
#[derive(Clone)]
pub struct MessageBus {
    table: Arc<DispatchTable>,
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBus")
            .field("patterns", &self.table.len())
            .finish()
    }
}

impl MessageBus {
    /// Installs a dispatch table into a new bus.
    pub fn new(table: DispatchTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Routes a request to its handler and awaits the reply.
    pub async fn dispatch(&self, req: Request) -> Result<Value, DispatchError> {
        let handler = self
            .table
            .lookup(&req.role, req.model.as_deref(), &req.cmd)
            .cloned()
            .ok_or_else(|| DispatchError::NoMatchingPattern {
                role: req.role.clone(),
                model: req.model.clone(),
                cmd: req.cmd.clone(),
            })?;
        debug!(role = %req.role, model = ?req.model, cmd = %req.cmd, "dispatching");
        handler(self.clone(), req).await
    }

    /// Number of installed patterns.
    pub fn pattern_count(&self) -> usize {
        self.table.len()
    }

    /// The installed table, for introspection.
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }
}
