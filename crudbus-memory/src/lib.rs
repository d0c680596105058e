//! In-memory reference backend.
//!
//! Implements the [`Backend`] / [`ModelHandle`] collaborator traits over
//! plain JSON rows guarded by async locks. This is the backend the
//! integration tests run against and the template for real backend authors;
//! it is deliberately not a storage engine. `where` filtering is top-level
//! field equality, includes are accepted but not eagerly loaded, and the
//! raw-query surface is a single statement shape.

mod model;

pub use model::{MemoryModel, Row};

use crudbus_core::{Backend, BackendError, ModelDescriptor, ModelHandle};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// A backend holding every model's rows in process memory.
#[derive(Default)]
pub struct MemoryBackend {
    models: RwLock<HashMap<String, Arc<MemoryModel>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn define(&self, descriptor: &ModelDescriptor) -> Result<Arc<dyn ModelHandle>, BackendError> {
        let model = Arc::new(MemoryModel::new(&descriptor.name));
        debug!(model = %descriptor.name, "memory model defined");
        self.models
            .write()
            .expect("model registry lock poisoned")
            .insert(descriptor.name.clone(), Arc::clone(&model));
        Ok(model)
    }

    fn model(&self, name: &str) -> Option<Arc<dyn ModelHandle>> {
        self.models
            .read()
            .expect("model registry lock poisoned")
            .get(name)
            .cloned()
            .map(|model| model as Arc<dyn ModelHandle>)
    }

    /// Supports exactly `SELECT * FROM <model>` (keywords case-insensitive);
    /// anything else is rejected. Params are accepted and ignored.
    async fn raw_query(&self, query: &str, _params: &Value) -> Result<Value, BackendError> {
        let parts: Vec<&str> = query.split_whitespace().collect();
        let table = match parts.as_slice() {
            [select, "*", from, table]
                if select.eq_ignore_ascii_case("select") && from.eq_ignore_ascii_case("from") =>
            {
                *table
            }
            _ => return Err(BackendError::QueryNotSupported(query.to_string())),
        };

        let model = self
            .models
            .read()
            .expect("model registry lock poisoned")
            .get(table)
            .cloned()
            .ok_or_else(|| BackendError::UnknownModel(table.to_string()))?;
        Ok(Value::Array(model.plain_rows().await))
    }
}
