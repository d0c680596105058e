//! Error types for dispatch and plugin initialization.

use crudbus_core::BackendError;
use thiserror::Error;

/// A failure reply for a dispatched request.
///
/// Backend failures pass through unwrapped — no retry, no classification.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no handler matches role '{role}', model '{model:?}', cmd '{cmd}'")]
    NoMatchingPattern {
        role: String,
        model: Option<String>,
        cmd: String,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// A fatal error during plugin initialization. No partial dispatch table is
/// ever installed: any of these aborts startup.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("duplicate model name: {0}")]
    DuplicateModel(String),

    #[error("hook failed: {0}")]
    Hook(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
