use crudbus_core::Operation;
use pretty_assertions::assert_eq;

// ── Wire names ───────────────────────────────────────────────────

#[test]
fn wire_names_are_camel_case() {
    assert_eq!(Operation::Create.wire_name(), "create");
    assert_eq!(Operation::FindOrCreate.wire_name(), "findOrCreate");
    assert_eq!(Operation::FindById.wire_name(), "findById");
    assert_eq!(Operation::FindOne.wire_name(), "findOne");
    assert_eq!(Operation::FindAll.wire_name(), "findAll");
    assert_eq!(Operation::FindAndCountAll.wire_name(), "findAndCountAll");
    assert_eq!(Operation::Count.wire_name(), "count");
    assert_eq!(Operation::BulkCreate.wire_name(), "bulkCreate");
    assert_eq!(Operation::Update.wire_name(), "update");
    assert_eq!(Operation::Destroy.wire_name(), "destroy");
}

#[test]
fn all_lists_every_operation_once() {
    assert_eq!(Operation::ALL.len(), 10);
    for op in Operation::ALL {
        assert_eq!(Operation::ALL.iter().filter(|o| **o == op).count(), 1);
    }
}

#[test]
fn parse_round_trips_every_wire_name() {
    for op in Operation::ALL {
        assert_eq!(Operation::parse(op.wire_name()), Some(op));
    }
}

#[test]
fn parse_rejects_special_commands() {
    // query and upsert are commands but not model operations
    assert_eq!(Operation::parse("query"), None);
    assert_eq!(Operation::parse("upsert"), None);
    assert_eq!(Operation::parse("FindOne"), None);
    assert_eq!(Operation::parse(""), None);
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serializes_to_wire_name() {
    let json = serde_json::to_value(Operation::FindAndCountAll).unwrap();
    assert_eq!(json, serde_json::json!("findAndCountAll"));
}

#[test]
fn deserializes_from_wire_name() {
    let op: Operation = serde_json::from_str("\"bulkCreate\"").unwrap();
    assert_eq!(op, Operation::BulkCreate);
}

#[test]
fn display_matches_wire_name() {
    assert_eq!(Operation::Destroy.to_string(), "destroy");
}
