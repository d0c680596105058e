use crate::backend::ModelHandle;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The complete name→handle mapping built during plugin initialization.
/// Immutable once the associate pass has run.
pub type ModelMap = HashMap<String, Arc<dyn ModelHandle>>;

/// Optional capability for descriptors that need inter-model wiring.
///
/// Invoked exactly once per descriptor, after every model has been defined
/// and before any operation handler exists, with the complete model map.
pub trait Associate: Send + Sync {
    fn associate(&self, models: &ModelMap);
}

/// A caller-supplied registration entry for one data model.
///
/// Descriptors are handed to the plugin as an explicit list; the backend
/// turns each one into a live [`ModelHandle`] via [`Backend::define`].
///
/// [`Backend::define`]: crate::Backend::define
#[derive(Clone)]
pub struct ModelDescriptor {
    /// Unique model name. A duplicate aborts plugin initialization.
    pub name: String,
    /// Association hook, run once with the full model map.
    pub associate: Option<Arc<dyn Associate>>,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            associate: None,
        }
    }

    pub fn with_associate(mut self, associate: Arc<dyn Associate>) -> Self {
        self.associate = Some(associate);
        self
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("name", &self.name)
            .field("associate", &self.associate.is_some())
            .finish()
    }
}
