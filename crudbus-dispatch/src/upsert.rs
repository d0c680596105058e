//! The compound upsert orchestrator.
//!
//! Not a backend primitive: a lookup followed by a create or an update, each
//! leg issued as an ordinary dispatched request through the same bus external
//! callers use. The two legs are not transactional — two concurrent upserts
//! on the same query can both miss the lookup and both create. Arbitrating
//! that race belongs to a backend with a native conditional write, not here.

use crate::table::{handler, Handler};
use crate::DispatchError;
use crudbus_core::Request;
use serde_json::{json, Value};
use tracing::debug;

/// The fixed target of the update leg. Lookup and create use the caller's
/// model, but the update has always been pinned to the `dataset` model;
/// existing deployments depend on that wire behavior, so it stays.
const UPDATE_MODEL: &str = "dataset";

/// Builds the upsert handler for a role. Registered once, model-wildcard.
pub(crate) fn upsert_handler() -> Handler {
    handler(move |bus, req: Request| async move {
        let model = req
            .model
            .clone()
            .ok_or_else(|| DispatchError::BadRequest("upsert requires a model".to_string()))?;
        let mut payload = req.payload;

        let lookup = Request::new(&req.role, "findOne")
            .with_model(&model)
            .with_payload(req.query.clone());
        let existing = bus.dispatch(lookup).await?;

        if existing.is_null() {
            debug!(model = %model, "upsert: no match, creating");
            let create = Request::new(&req.role, "create")
                .with_model(&model)
                .with_payload(payload);
            bus.dispatch(create).await
        } else {
            let id = existing.get("id").cloned().unwrap_or(Value::Null);
            debug!(model = %model, id = %id, "upsert: match found, updating");
            if let Some(fields) = payload.as_object_mut() {
                fields.insert("id".to_string(), id.clone());
            }
            let update = Request::new(&req.role, "update")
                .with_model(UPDATE_MODEL)
                .with_query(json!({ "where": { "id": id } }))
                .with_payload(payload);
            bus.dispatch(update).await
        }
    })
}
