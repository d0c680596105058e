//! Error types for backend collaborators.

use crate::operation::Operation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("model '{model}' does not support operation '{operation}'")]
    UnsupportedOperation { model: String, operation: Operation },

    #[error("invalid arguments for {operation} on '{model}': {detail}")]
    InvalidArguments {
        model: String,
        operation: Operation,
        detail: String,
    },

    #[error("query not supported: {0}")]
    QueryNotSupported(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend failure: {0}")]
    Internal(String),
}
