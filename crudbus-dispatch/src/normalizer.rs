//! Result normalization.
//!
//! Every model operation's reply goes through [`normalize`], so the wire
//! shape is stable no matter which backend call produced the value.

use crudbus_core::{CallOutcome, Fetched};
use serde_json::{json, Value};

/// Maps a backend outcome to its wire shape:
/// no record → null; a sequence → an array with each record in plain form
/// and bare values untouched; a single record → its plain form; anything
/// else → wrapped as `{"result": value}`.
pub fn normalize(outcome: CallOutcome) -> Value {
    match outcome {
        CallOutcome::Null => Value::Null,
        CallOutcome::Many(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Fetched::Record(record) => record.to_plain(),
                    Fetched::Value(value) => value,
                })
                .collect(),
        ),
        CallOutcome::One(record) => record.to_plain(),
        CallOutcome::Value(value) => json!({ "result": value }),
    }
}
