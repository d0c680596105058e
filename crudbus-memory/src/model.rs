use async_trait::async_trait;
use crudbus_core::{
    BackendError, CallArgs, CallOutcome, Fetched, ModelHandle, Operation, Record, ResolvedPayload,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One stored row: a JSON object with an `id` field.
#[derive(Debug, Clone)]
pub struct Row {
    data: Map<String, Value>,
}

impl Row {
    /// Top-level field equality against a `where` filter. An empty filter
    /// matches every row.
    fn matches(&self, filter: &Map<String, Value>) -> bool {
        filter.iter().all(|(key, value)| self.data.get(key) == Some(value))
    }
}

impl Record for Row {
    fn to_plain(&self) -> Value {
        Value::Object(self.data.clone())
    }
}

/// A single model's rows.
pub struct MemoryModel {
    name: String,
    rows: RwLock<Vec<Row>>,
}

impl MemoryModel {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: RwLock::new(Vec::new()),
        }
    }

    pub(crate) async fn plain_rows(&self) -> Vec<Value> {
        self.rows.read().await.iter().map(Row::to_plain).collect()
    }

    fn invalid(&self, op: Operation, detail: &str) -> BackendError {
        BackendError::InvalidArguments {
            model: self.name.clone(),
            operation: op,
            detail: detail.to_string(),
        }
    }

    /// Appends a row, assigning a UUIDv4 id when the data has none.
    fn insert_row(&self, rows: &mut Vec<Row>, mut data: Map<String, Value>) -> Row {
        if !data.contains_key("id") {
            data.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        let row = Row { data };
        rows.push(row.clone());
        row
    }
}

/// The `where` filter of a resolved payload, defaulting to match-all.
fn filter_of(payload: &ResolvedPayload) -> Map<String, Value> {
    payload.where_clause().cloned().unwrap_or_default()
}

/// Unresolved references are the resolver's silent gap; this is where they
/// finally surface as errors.
fn reject_unresolved(args: &CallArgs) -> Result<(), BackendError> {
    let unresolved = match args {
        CallArgs::Payload(payload) => payload.first_unresolved(),
        CallArgs::PayloadAndQuery(payload, query) => {
            payload.first_unresolved().or_else(|| query.first_unresolved())
        }
        CallArgs::Raw(_) => None,
    };
    match unresolved {
        Some(name) => Err(BackendError::UnknownModel(name.to_string())),
        None => Ok(()),
    }
}

#[async_trait]
impl ModelHandle for MemoryModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, op: Operation, args: CallArgs) -> Result<CallOutcome, BackendError> {
        reject_unresolved(&args)?;

        match (op, args) {
            (Operation::Create, CallArgs::Raw(payload)) => {
                let data = match payload {
                    Value::Object(data) => data,
                    _ => return Err(self.invalid(op, "payload must be an object")),
                };
                let mut rows = self.rows.write().await;
                let row = self.insert_row(&mut rows, data);
                Ok(CallOutcome::One(Arc::new(row)))
            }

            (Operation::FindOrCreate, CallArgs::Payload(payload)) => {
                let filter = filter_of(&payload);
                let mut rows = self.rows.write().await;
                if let Some(row) = rows.iter().find(|row| row.matches(&filter)) {
                    return Ok(CallOutcome::Many(vec![
                        Fetched::Record(Arc::new(row.clone())),
                        Fetched::Value(Value::Bool(false)),
                    ]));
                }
                let mut data = filter;
                if let Some(defaults) = payload.field("defaults").and_then(Value::as_object) {
                    for (key, value) in defaults {
                        data.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                }
                let row = self.insert_row(&mut rows, data);
                Ok(CallOutcome::Many(vec![
                    Fetched::Record(Arc::new(row)),
                    Fetched::Value(Value::Bool(true)),
                ]))
            }

            (Operation::FindById, CallArgs::Payload(payload)) => {
                let id = payload
                    .field("id")
                    .cloned()
                    .ok_or_else(|| self.invalid(op, "missing id"))?;
                let rows = self.rows.read().await;
                Ok(match rows.iter().find(|row| row.data.get("id") == Some(&id)) {
                    Some(row) => CallOutcome::One(Arc::new(row.clone())),
                    None => CallOutcome::Null,
                })
            }

            (Operation::FindOne, CallArgs::Payload(payload)) => {
                let filter = filter_of(&payload);
                let rows = self.rows.read().await;
                Ok(match rows.iter().find(|row| row.matches(&filter)) {
                    Some(row) => CallOutcome::One(Arc::new(row.clone())),
                    None => CallOutcome::Null,
                })
            }

            (Operation::FindAll, CallArgs::Payload(payload)) => {
                let filter = filter_of(&payload);
                let rows = self.rows.read().await;
                Ok(CallOutcome::Many(
                    rows.iter()
                        .filter(|row| row.matches(&filter))
                        .map(|row| Fetched::Record(Arc::new(row.clone()) as Arc<dyn Record>))
                        .collect(),
                ))
            }

            (Operation::FindAndCountAll, CallArgs::Payload(payload)) => {
                let filter = filter_of(&payload);
                let rows = self.rows.read().await;
                let matched: Vec<Value> = rows
                    .iter()
                    .filter(|row| row.matches(&filter))
                    .map(Row::to_plain)
                    .collect();
                Ok(CallOutcome::Value(
                    json!({ "count": matched.len(), "rows": matched }),
                ))
            }

            (Operation::Count, CallArgs::Payload(payload)) => {
                let filter = filter_of(&payload);
                let rows = self.rows.read().await;
                let count = rows.iter().filter(|row| row.matches(&filter)).count();
                Ok(CallOutcome::Value(json!(count)))
            }

            (Operation::BulkCreate, CallArgs::Payload(payload)) => {
                let items = match payload {
                    ResolvedPayload::Value(Value::Array(items)) => items,
                    _ => return Err(self.invalid(op, "payload must be an array of objects")),
                };
                let mut rows = self.rows.write().await;
                let mut created = Vec::with_capacity(items.len());
                for item in items {
                    let data = match item {
                        Value::Object(data) => data,
                        _ => return Err(self.invalid(op, "rows must be objects")),
                    };
                    let row = self.insert_row(&mut rows, data);
                    created.push(Fetched::Record(Arc::new(row) as Arc<dyn Record>));
                }
                Ok(CallOutcome::Many(created))
            }

            (Operation::Update, CallArgs::PayloadAndQuery(payload, query)) => {
                let changes = match payload.as_object() {
                    Some(obj) => obj.fields.clone(),
                    None => return Err(self.invalid(op, "payload must be an object")),
                };
                let filter = filter_of(&query);
                let mut rows = self.rows.write().await;
                let mut affected: u64 = 0;
                for row in rows.iter_mut().filter(|row| row.matches(&filter)) {
                    for (key, value) in &changes {
                        row.data.insert(key.clone(), value.clone());
                    }
                    affected += 1;
                }
                // The affected count rides in a one-element array, matching
                // the classic ORM update result shape.
                Ok(CallOutcome::Value(json!([affected])))
            }

            (Operation::Destroy, CallArgs::Payload(payload)) => {
                let filter = filter_of(&payload);
                let mut rows = self.rows.write().await;
                let before = rows.len();
                rows.retain(|row| !row.matches(&filter));
                Ok(CallOutcome::Value(json!(before - rows.len())))
            }

            (op, _) => Err(self.invalid(op, "argument shape does not match operation")),
        }
    }
}
