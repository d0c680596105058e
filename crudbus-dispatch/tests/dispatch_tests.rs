mod common;

use common::{PlainRecord, RecordingBackend};
use crudbus_core::{
    Backend, BackendError, CallArgs, CallOutcome, ModelDescriptor, ModelRef, Operation, Request,
};
use crudbus_dispatch::{init_plugin, DispatchError, MessageBus, Pattern, PluginConfig};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

fn setup(models: &[&str]) -> (Arc<RecordingBackend>, MessageBus) {
    let backend = RecordingBackend::new();
    let mut config = PluginConfig::default();
    for name in models {
        config = config.with_model(ModelDescriptor::new(*name));
    }
    let bus = init_plugin(Arc::clone(&backend) as Arc<dyn Backend>, config).unwrap();
    (backend, bus)
}

// ── Registration ─────────────────────────────────────────────────

#[tokio::test]
async fn registers_ten_patterns_per_model_plus_query_and_upsert() {
    let (_, bus) = setup(&["note", "task", "dataset"]);
    assert_eq!(bus.pattern_count(), 10 * 3 + 2);

    for op in Operation::ALL {
        assert!(bus.table().contains(&Pattern::exact("crud", "note", op.wire_name())));
    }
    assert!(bus.table().contains(&Pattern::wildcard("crud", "query")));
    assert!(bus.table().contains(&Pattern::wildcard("crud", "upsert")));
}

#[tokio::test]
async fn no_models_still_registers_the_special_commands() {
    let (_, bus) = setup(&[]);
    assert_eq!(bus.pattern_count(), 2);
}

// ── Argument building ────────────────────────────────────────────

#[tokio::test]
async fn create_forwards_the_raw_payload() {
    let (backend, bus) = setup(&["note"]);
    let payload = json!({"model": "note", "title": "x"});

    let req = Request::new("crud", "create")
        .with_model("note")
        .with_payload(payload.clone());
    bus.dispatch(req).await.unwrap();

    let calls = backend.model_named("note").calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        // model names inside a create payload stay plain data
        (Operation::Create, CallArgs::Raw(raw)) => assert_eq!(*raw, payload),
        other => panic!("unexpected call: {other:?}"),
    }
}

#[tokio::test]
async fn find_all_resolves_payload_references() {
    let (backend, bus) = setup(&["note", "tag"]);

    let req = Request::new("crud", "findAll").with_model("note").with_payload(json!({
        "model": "note",
        "where": {"done": false},
        "include": [{"model": "tag"}],
    }));
    bus.dispatch(req).await.unwrap();

    let calls = backend.model_named("note").calls();
    let (op, args) = &calls[0];
    assert_eq!(*op, Operation::FindAll);
    let payload = match args {
        CallArgs::Payload(payload) => payload,
        other => panic!("unexpected args: {other:?}"),
    };

    let obj = payload.as_object().unwrap();
    assert!(matches!(&obj.model, Some(ModelRef::Resolved(h)) if h.name() == "note"));
    assert_eq!(obj.fields.get("where"), Some(&json!({"done": false})));
    let included = obj.include[0].as_object().unwrap();
    assert!(matches!(&included.model, Some(ModelRef::Resolved(h)) if h.name() == "tag"));
}

#[tokio::test]
async fn update_resolves_payload_and_query_in_order() {
    let (backend, bus) = setup(&["note"]);

    let req = Request::new("crud", "update")
        .with_model("note")
        .with_payload(json!({"model": "note", "title": "y"}))
        .with_query(json!({"where": {"id": 1}}));
    bus.dispatch(req).await.unwrap();

    let calls = backend.model_named("note").calls();
    let (op, args) = &calls[0];
    assert_eq!(*op, Operation::Update);
    match args {
        CallArgs::PayloadAndQuery(payload, query) => {
            let payload = payload.as_object().unwrap();
            assert!(matches!(&payload.model, Some(ModelRef::Resolved(_))));
            assert_eq!(payload.fields.get("title"), Some(&json!("y")));
            assert_eq!(query.where_clause().map(|w| Value::Object(w.clone())), Some(json!({"id": 1})));
        }
        other => panic!("unexpected args: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_reference_is_forwarded_unresolved() {
    let (backend, bus) = setup(&["note"]);

    let req = Request::new("crud", "findOne")
        .with_model("note")
        .with_payload(json!({"model": "ghost"}));
    // resolution does not validate; the recording backend accepts anything
    bus.dispatch(req).await.unwrap();

    let calls = backend.model_named("note").calls();
    match &calls[0].1 {
        CallArgs::Payload(payload) => assert_eq!(payload.first_unresolved(), Some("ghost")),
        other => panic!("unexpected args: {other:?}"),
    }
}

#[tokio::test]
async fn omitted_payload_resolves_like_an_empty_object() {
    let (backend, bus) = setup(&["note"]);

    bus.dispatch(Request::new("crud", "findAll").with_model("note"))
        .await
        .unwrap();

    match &backend.model_named("note").calls()[0].1 {
        CallArgs::Payload(payload) => {
            let obj = payload.as_object().unwrap();
            assert!(obj.model.is_none());
            assert!(obj.fields.is_empty());
        }
        other => panic!("unexpected args: {other:?}"),
    }
}

// ── Reply normalization ──────────────────────────────────────────

#[tokio::test]
async fn scalar_outcomes_are_wrapped() {
    let (backend, bus) = setup(&["note"]);
    backend
        .model_named("note")
        .respond_with(Box::new(|_, _| Ok(CallOutcome::Value(json!(5)))));

    let reply = bus
        .dispatch(Request::new("crud", "count").with_model("note"))
        .await
        .unwrap();
    assert_eq!(reply, json!({"result": 5}));
}

#[tokio::test]
async fn record_outcomes_reply_in_plain_form() {
    let (backend, bus) = setup(&["note"]);
    backend.model_named("note").respond_with(Box::new(|_, _| {
        Ok(CallOutcome::One(Arc::new(PlainRecord(json!({"id": 3})))))
    }));

    let reply = bus
        .dispatch(Request::new("crud", "findOne").with_model("note"))
        .await
        .unwrap();
    assert_eq!(reply, json!({"id": 3}));
}

#[tokio::test]
async fn each_dispatch_makes_exactly_one_backend_call() {
    let (backend, bus) = setup(&["note"]);

    bus.dispatch(Request::new("crud", "destroy").with_model("note"))
        .await
        .unwrap();
    bus.dispatch(Request::new("crud", "count").with_model("note"))
        .await
        .unwrap();

    assert_eq!(backend.model_named("note").total_calls(), 2);
}

// ── Failure paths ────────────────────────────────────────────────

#[tokio::test]
async fn backend_failures_pass_through_unwrapped() {
    let (backend, bus) = setup(&["note"]);
    backend
        .model_named("note")
        .respond_with(Box::new(|_, _| Err(BackendError::Internal("boom".to_string()))));

    let err = bus
        .dispatch(Request::new("crud", "findAll").with_model("note"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Backend(BackendError::Internal(ref msg)) if msg == "boom"
    ));
}

#[tokio::test]
async fn unknown_cmd_has_no_matching_pattern() {
    let (_, bus) = setup(&["note"]);
    let err = bus
        .dispatch(Request::new("crud", "explode").with_model("note"))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::NoMatchingPattern { .. }));
}

#[tokio::test]
async fn unknown_model_has_no_matching_pattern() {
    let (_, bus) = setup(&["note"]);
    let err = bus
        .dispatch(Request::new("crud", "findAll").with_model("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::NoMatchingPattern { .. }));
}

#[tokio::test]
async fn unknown_role_has_no_matching_pattern() {
    let (_, bus) = setup(&["note"]);
    let err = bus
        .dispatch(Request::new("vault", "findAll").with_model("note"))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::NoMatchingPattern { .. }));
}

// ── Raw query passthrough ────────────────────────────────────────

#[tokio::test]
async fn query_forwards_string_and_params_unnormalized() {
    let (_, bus) = setup(&["note"]);

    let reply = bus
        .dispatch(
            Request::new("crud", "query")
                .with_query(json!("SELECT * FROM note"))
                .with_payload(json!({"limit": 10})),
        )
        .await
        .unwrap();
    // the recording backend echoes; no {"result": ...} wrapping happens
    assert_eq!(
        reply,
        json!({"echo": "SELECT * FROM note", "params": {"limit": 10}})
    );
}

#[tokio::test]
async fn query_rejects_a_non_string_query() {
    let (_, bus) = setup(&[]);
    let err = bus
        .dispatch(Request::new("crud", "query").with_query(json!({"not": "a string"})))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::BadRequest(_)));
}
