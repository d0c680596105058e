//! Plugin initialization: registry build, associate pass, table build,
//! hook installation.

use crate::error::PluginError;
use crate::handlers::{crud_handler, query_handler};
use crate::hook::Hook;
use crate::pattern::Pattern;
use crate::table::DispatchTable;
use crate::upsert::upsert_handler;
use crate::MessageBus;
use crudbus_core::{Backend, ModelDescriptor, ModelMap, Operation};
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration supplied at plugin construction. The backend handle is
/// passed alongside it to [`init_plugin`].
pub struct PluginConfig {
    /// Role namespace all handlers register under.
    pub role: String,
    /// Explicit model registration list.
    pub models: Vec<ModelDescriptor>,
    /// Extension hooks, run in order after handler generation.
    pub hooks: Vec<Arc<dyn Hook>>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            role: "crud".to_string(),
            models: Vec::new(),
            hooks: Vec::new(),
        }
    }
}

impl PluginConfig {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, descriptor: ModelDescriptor) -> Self {
        self.models.push(descriptor);
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }
}

/// Defines every descriptor in the backend and builds the name→handle map,
/// then runs each descriptor's associate hook once with the complete map.
///
/// Fails on the first duplicate name or define error; a partial registry is
/// never returned.
pub fn build_registry(
    backend: &Arc<dyn Backend>,
    descriptors: &[ModelDescriptor],
) -> Result<ModelMap, PluginError> {
    let mut models = ModelMap::new();
    for descriptor in descriptors {
        if models.contains_key(&descriptor.name) {
            return Err(PluginError::DuplicateModel(descriptor.name.clone()));
        }
        let handle = backend.define(descriptor)?;
        debug!(model = %descriptor.name, "model defined");
        models.insert(descriptor.name.clone(), handle);
    }

    // Associations run only once the whole map exists, so a hook can wire
    // against models registered after its own.
    for descriptor in descriptors {
        if let Some(associate) = &descriptor.associate {
            associate.associate(&models);
        }
    }

    Ok(models)
}

/// Computes the full dispatch table for a config: ten operation handlers per
/// model, the `query` and `upsert` wildcard handlers, then the hooks.
///
/// Pure with respect to routing state — nothing is installed until the
/// returned table is handed to [`MessageBus::new`].
pub fn build_dispatch_table(
    backend: &Arc<dyn Backend>,
    config: &PluginConfig,
) -> Result<DispatchTable, PluginError> {
    let models = build_registry(backend, &config.models)?;

    let mut table = DispatchTable::new();
    for descriptor in &config.models {
        let handle = &models[&descriptor.name];
        for op in Operation::ALL {
            table.insert(
                Pattern::exact(&config.role, &descriptor.name, op.wire_name()),
                crud_handler(op, Arc::clone(handle), Arc::clone(backend)),
            );
        }
    }

    table.insert(
        Pattern::wildcard(&config.role, "query"),
        query_handler(Arc::clone(backend)),
    );
    table.insert(Pattern::wildcard(&config.role, "upsert"), upsert_handler());

    for hook in &config.hooks {
        hook.install(&mut table, backend)?;
    }

    Ok(table)
}

/// Builds the dispatch table and installs it into a fresh bus.
pub fn init_plugin(
    backend: Arc<dyn Backend>,
    config: PluginConfig,
) -> Result<MessageBus, PluginError> {
    let table = build_dispatch_table(&backend, &config)?;
    info!(
        role = %config.role,
        models = config.models.len(),
        patterns = table.len(),
        "crud plugin initialized"
    );
    Ok(MessageBus::new(table))
}
