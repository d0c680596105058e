//! A recording backend: captures every model call so tests can assert on
//! the exact arguments the dispatcher built, with scriptable outcomes.

#![allow(dead_code)]

use async_trait::async_trait;
use crudbus_core::{
    Backend, BackendError, CallArgs, CallOutcome, ModelDescriptor, ModelHandle, Operation, Record,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// A record wrapping a plain JSON value, for scripting outcomes.
pub struct PlainRecord(pub Value);

impl Record for PlainRecord {
    fn to_plain(&self) -> Value {
        self.0.clone()
    }
}

pub type Responder =
    Box<dyn Fn(Operation, &CallArgs) -> Result<CallOutcome, BackendError> + Send + Sync>;

pub struct RecordingModel {
    name: String,
    calls: Mutex<Vec<(Operation, CallArgs)>>,
    responder: Mutex<Responder>,
}

impl RecordingModel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Mutex::new(Vec::new()),
            responder: Mutex::new(Box::new(|_, _| Ok(CallOutcome::Null))),
        }
    }

    /// Replaces the scripted outcome (default: every call returns Null).
    pub fn respond_with(&self, responder: Responder) {
        *self.responder.lock().unwrap() = responder;
    }

    pub fn calls(&self) -> Vec<(Operation, CallArgs)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, op: Operation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(called, _)| *called == op)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelHandle for RecordingModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, op: Operation, args: CallArgs) -> Result<CallOutcome, BackendError> {
        self.calls.lock().unwrap().push((op, args.clone()));
        let responder = self.responder.lock().unwrap();
        (*responder)(op, &args)
    }
}

#[derive(Default)]
pub struct RecordingBackend {
    models: RwLock<HashMap<String, Arc<RecordingModel>>>,
}

impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The recording model for a name; panics if it was never defined.
    pub fn model_named(&self, name: &str) -> Arc<RecordingModel> {
        self.models
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("model '{name}' was never defined"))
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    fn define(&self, descriptor: &ModelDescriptor) -> Result<Arc<dyn ModelHandle>, BackendError> {
        let model = Arc::new(RecordingModel::new(&descriptor.name));
        self.models
            .write()
            .unwrap()
            .insert(descriptor.name.clone(), Arc::clone(&model));
        Ok(model)
    }

    fn model(&self, name: &str) -> Option<Arc<dyn ModelHandle>> {
        self.models
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .map(|model| model as Arc<dyn ModelHandle>)
    }

    /// Echoes its inputs so passthrough tests can see them unnormalized.
    async fn raw_query(&self, query: &str, params: &Value) -> Result<Value, BackendError> {
        Ok(json!({ "echo": query, "params": params }))
    }
}
