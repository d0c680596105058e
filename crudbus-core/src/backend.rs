//! Persistence collaborator traits.
//!
//! The dispatcher owns no storage. Everything it does ends in a call through
//! one of these two traits, and any ORM-ish layer that can implement them
//! can sit behind the bus.

use crate::descriptor::ModelDescriptor;
use crate::error::BackendError;
use crate::operation::Operation;
use crate::payload::CallArgs;
use crate::CallOutcome;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A live model inside the backend, exposing the CRUD-style primitives.
#[async_trait]
pub trait ModelHandle: Send + Sync {
    /// The model's unique name.
    fn name(&self) -> &str;

    /// Executes one operation with arguments built by the dispatcher.
    ///
    /// A backend that does not support some operation for a model returns
    /// [`BackendError::UnsupportedOperation`] rather than panicking.
    async fn call(&self, op: Operation, args: CallArgs) -> Result<CallOutcome, BackendError>;
}

/// The persistence layer itself.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Defines a model from a descriptor and returns its handle.
    /// Called once per descriptor during plugin initialization.
    fn define(&self, descriptor: &ModelDescriptor) -> Result<Arc<dyn ModelHandle>, BackendError>;

    /// Looks up a previously defined model by name.
    fn model(&self, name: &str) -> Option<Arc<dyn ModelHandle>>;

    /// Executes a raw query with positional/named params, bypassing the
    /// model layer entirely. Results are backend-shaped and returned to the
    /// caller unnormalized.
    async fn raw_query(&self, query: &str, params: &Value) -> Result<Value, BackendError>;
}
