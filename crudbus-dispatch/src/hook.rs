use crate::error::PluginError;
use crate::table::DispatchTable;
use crudbus_core::Backend;
use std::sync::Arc;

/// Post-registration extension point.
///
/// Hooks are supplied as an explicit list in the plugin config and run once
/// each, after the generated CRUD/query/upsert handlers are in the table.
/// A hook may add patterns or override generated ones. A hook error aborts
/// initialization.
pub trait Hook: Send + Sync {
    fn install(
        &self,
        table: &mut DispatchTable,
        backend: &Arc<dyn Backend>,
    ) -> Result<(), PluginError>;
}
