//! Generated handlers: one per model and operation, plus the raw-query
//! passthrough.

use crate::error::DispatchError;
use crate::normalizer::normalize;
use crate::resolver::resolve;
use crate::table::{handler, Handler};
use crudbus_core::{Backend, CallArgs, ModelHandle, Operation, Request};
use std::sync::Arc;

/// Builds the handler for one operation on one model.
///
/// Argument rules: `create` forwards the raw payload (model names inside a
/// create payload are plain data, not references); `update` resolves both
/// payload and query and passes them in that order; every other operation
/// resolves the payload and passes it alone. Backend failures become the
/// failure reply unchanged.
pub(crate) fn crud_handler(
    op: Operation,
    model: Arc<dyn ModelHandle>,
    backend: Arc<dyn Backend>,
) -> Handler {
    handler(move |_bus, req: Request| {
        let model = Arc::clone(&model);
        let backend = Arc::clone(&backend);
        async move {
            let args = match op {
                Operation::Create => CallArgs::Raw(req.payload),
                Operation::Update => CallArgs::PayloadAndQuery(
                    resolve(backend.as_ref(), &req.payload),
                    resolve(backend.as_ref(), &req.query),
                ),
                _ => CallArgs::Payload(resolve(backend.as_ref(), &req.payload)),
            };
            let outcome = model.call(op, args).await?;
            Ok(normalize(outcome))
        }
    })
}

/// Builds the ad-hoc query handler: forwards the query string and params
/// straight to the backend and returns its result unnormalized.
pub(crate) fn query_handler(backend: Arc<dyn Backend>) -> Handler {
    handler(move |_bus, req: Request| {
        let backend = Arc::clone(&backend);
        async move {
            let query = req
                .query
                .as_str()
                .ok_or_else(|| DispatchError::BadRequest("query must be a string".to_string()))?
                .to_string();
            Ok(backend.raw_query(&query, &req.payload).await?)
        }
    })
}
