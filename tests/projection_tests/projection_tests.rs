//! Tests for ProjectionDecoder
//!
//! These tests verify:
//! - A recorded multi-lookup response merges into the full document
//! - Dynamic, typed and map access to the projection
//! - Failed paths are recorded on the spec and left out of the tree
//! - Shape conflicts and truncated bodies fail the decode
//! - Sparse array positions are padded with null

mod fixture;

use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use serde::Deserialize;
use serde_json::json;
use subdockv::error::SubdocError;
use subdockv::projection::{split_fields, ProjectionDecoder};
use subdockv::protocol::{encode_frame, OpCode, PacketHeader, ResponseStatus};
use subdockv::subdoc::JsonTranscoder;
use subdockv::OperationSpec;

use fixture::{LOOKUP_OPAQUE, LOOKUP_PATHS, LOOKUP_RESPONSE};

// =============================================================================
// Helper Functions
// =============================================================================

fn decoder() -> ProjectionDecoder {
    ProjectionDecoder::new(Arc::new(JsonTranscoder))
}

fn fixture_specs() -> Vec<OperationSpec> {
    LOOKUP_PATHS.iter().map(|path| OperationSpec::get(*path)).collect()
}

/// Multi-lookup response with one group per `(status, value)`
fn lookup_frame(fields: &[(ResponseStatus, &str)]) -> Bytes {
    let mut body = BytesMut::new();
    for (status, value) in fields {
        body.put_u16(status.as_u16());
        body.put_u32(value.len() as u32);
        body.put_slice(value.as_bytes());
    }
    let header = PacketHeader::response(OpCode::MultiLookup, 1, ResponseStatus::Success);
    encode_frame(header, &[], &[], &body).unwrap()
}

fn ok(value: &str) -> (ResponseStatus, &str) {
    (ResponseStatus::Success, value)
}

#[derive(Debug, Deserialize)]
struct Dimensions {
    height: u32,
    weight: u32,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    long: f64,
}

#[derive(Debug, Deserialize)]
struct Details {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Hobby {
    r#type: String,
    name: String,
    details: Option<Details>,
}

#[derive(Debug, Deserialize)]
struct Attributes {
    hair: String,
    dimensions: Dimensions,
    hobbies: Vec<Hobby>,
}

#[derive(Debug, Deserialize)]
struct Person {
    name: String,
    age: u32,
    animals: Vec<String>,
    attributes: Attributes,
}

// =============================================================================
// Recorded Response Tests
// =============================================================================

#[test]
fn test_fixture_header() {
    let packet = subdockv::protocol::decode_packet(Bytes::from_static(&LOOKUP_RESPONSE)).unwrap();

    assert_eq!(packet.header.op_code(), Some(OpCode::MultiLookup));
    assert_eq!(packet.header.opaque, LOOKUP_OPAQUE);
    assert_eq!(packet.header.status(), ResponseStatus::Success);
    assert_eq!(packet.header.body_length, 877);

    let fields = split_fields(packet.value, LOOKUP_PATHS.len()).unwrap();
    assert_eq!(fields.len(), 14);
    assert!(fields.iter().all(|f| f.status.is_success()));
    assert_eq!(&fields[1].value[..], b"26");
}

#[test]
fn test_projection_dynamic_access() {
    let mut specs = fixture_specs();
    let projection = decoder()
        .decode(Bytes::from_static(&LOOKUP_RESPONSE), &mut specs)
        .unwrap();

    let root = projection.value();
    assert_eq!(root["name"], "Emmy-lou Dickerson");
    assert_eq!(root["age"], 26);
    assert_eq!(root["animals"], json!(["cat", "dog", "parrot"]));
    assert_eq!(root["attributes"]["hobbies"][1]["name"], "water skiing");

    let long = projection
        .get("attributes.hobbies[1].details.location.long")
        .unwrap()
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!((long - -123.120735).abs() < 1e-9);

    assert_eq!(projection.get("animals[1]").unwrap(), Some(&json!("dog")));
    assert_eq!(projection.get("attributes.missing").unwrap(), None);
    assert_eq!(projection.get("animals[7]").unwrap(), None);
}

#[test]
fn test_projection_matches_full_document() {
    let mut specs = fixture_specs();
    let projection = decoder()
        .decode(Bytes::from_static(&LOOKUP_RESPONSE), &mut specs)
        .unwrap();

    let expected = json!({
        "name": "Emmy-lou Dickerson",
        "age": 26,
        "animals": ["cat", "dog", "parrot"],
        "attributes": {
            "hair": "brown",
            "dimensions": {"height": 67, "weight": 175},
            "hobbies": [
                {"type": "winter sports", "name": "curling"},
                {
                    "type": "summer sports",
                    "name": "water skiing",
                    "details": {"location": {"lat": 49.282730, "long": -123.120735}}
                }
            ]
        }
    });
    assert_eq!(projection.into_value(), expected);
}

#[test]
fn test_projection_typed() {
    let mut specs = fixture_specs();
    let projection = decoder()
        .decode(Bytes::from_static(&LOOKUP_RESPONSE), &mut specs)
        .unwrap();

    let person: Person = projection.content_as().unwrap();
    assert_eq!(person.name, "Emmy-lou Dickerson");
    assert_eq!(person.age, 26);
    assert_eq!(person.animals, vec!["cat", "dog", "parrot"]);
    assert_eq!(person.attributes.hair, "brown");
    assert_eq!(person.attributes.dimensions.height, 67);
    assert_eq!(person.attributes.dimensions.weight, 175);
    assert_eq!(person.attributes.hobbies.len(), 2);
    assert_eq!(person.attributes.hobbies[0].r#type, "winter sports");
    assert_eq!(person.attributes.hobbies[0].name, "curling");
    assert!(person.attributes.hobbies[0].details.is_none());

    let location = &person.attributes.hobbies[1]
        .details
        .as_ref()
        .unwrap()
        .location;
    assert!((location.lat - 49.282730).abs() < 1e-9);
    assert!((location.long - -123.120735).abs() < 1e-9);
}

#[test]
fn test_projection_typed_mismatch() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Wrong {
        name: u64,
    }

    let mut specs = fixture_specs();
    let projection = decoder()
        .decode(Bytes::from_static(&LOOKUP_RESPONSE), &mut specs)
        .unwrap();

    assert!(matches!(
        projection.content_as::<Wrong>(),
        Err(SubdocError::Serialization(_))
    ));
}

#[test]
fn test_projection_as_map() {
    let mut specs = fixture_specs();
    let projection = decoder()
        .decode(Bytes::from_static(&LOOKUP_RESPONSE), &mut specs)
        .unwrap();

    let map = projection.into_map();
    assert_eq!(map.len(), 4);
    assert_eq!(map["name"], "Emmy-lou Dickerson");
    assert_eq!(map["attributes"]["dimensions"]["height"], 67);
}

#[test]
fn test_specs_receive_status_and_value() {
    let mut specs = fixture_specs();
    decoder()
        .decode(Bytes::from_static(&LOOKUP_RESPONSE), &mut specs)
        .unwrap();

    assert!(specs.iter().all(OperationSpec::succeeded));
    assert_eq!(specs[1].value, Some(json!(26)));
    assert_eq!(specs[3].value, Some(json!("dog")));
}

// =============================================================================
// Partial Failure Tests
// =============================================================================

#[test]
fn test_failed_path_is_omitted() {
    let frame = lookup_frame(&[
        ok("\"Emmy\""),
        (ResponseStatus::SubdocPathNotFound, ""),
        ok("26"),
    ]);
    let mut specs = vec![
        OperationSpec::get("name"),
        OperationSpec::get("nickname"),
        OperationSpec::get("age"),
    ];

    let projection = decoder().decode(frame, &mut specs).unwrap();

    assert_eq!(projection.value(), &json!({"name": "Emmy", "age": 26}));
    assert_eq!(specs[1].status, Some(ResponseStatus::SubdocPathNotFound));
    assert_eq!(specs[1].value, None);
    assert!(!specs[1].succeeded());
    assert!(specs[0].succeeded() && specs[2].succeeded());
}

#[test]
fn test_exists_spec_not_in_tree() {
    let frame = lookup_frame(&[ok(""), ok("\"brown\"")]);
    let mut specs = vec![
        OperationSpec::exists("attributes"),
        OperationSpec::get("attributes.hair"),
    ];

    let projection = decoder().decode(frame, &mut specs).unwrap();

    assert!(specs[0].succeeded());
    assert_eq!(projection.value(), &json!({"attributes": {"hair": "brown"}}));
}

#[test]
fn test_all_failed_gives_empty_projection() {
    let frame = lookup_frame(&[(ResponseStatus::SubdocPathNotFound, "")]);
    let mut specs = vec![OperationSpec::get("missing")];

    let projection = decoder().decode(frame, &mut specs).unwrap();
    assert!(projection.is_empty());
}

// =============================================================================
// Merging Tests
// =============================================================================

#[test]
fn test_sparse_array_padding() {
    let frame = lookup_frame(&[ok("\"c\""), ok("\"a\"")]);
    let mut specs = vec![OperationSpec::get("list[2]"), OperationSpec::get("list[0]")];

    let projection = decoder().decode(frame, &mut specs).unwrap();
    assert_eq!(projection.value(), &json!({"list": ["a", null, "c"]}));
}

#[test]
fn test_nested_array_of_objects() {
    let frame = lookup_frame(&[ok("1"), ok("2")]);
    let mut specs = vec![
        OperationSpec::get("items[1].x"),
        OperationSpec::get("items[0].y"),
    ];

    let projection = decoder().decode(frame, &mut specs).unwrap();
    assert_eq!(
        projection.value(),
        &json!({"items": [{"y": 2}, {"x": 1}]})
    );
}

#[test]
fn test_later_scalar_replaces_earlier() {
    let frame = lookup_frame(&[ok("{\"a\":1,\"b\":2}"), ok("3")]);
    let mut specs = vec![OperationSpec::get("obj"), OperationSpec::get("obj.a")];

    let projection = decoder().decode(frame, &mut specs).unwrap();
    assert_eq!(projection.value(), &json!({"obj": {"a": 3, "b": 2}}));
}

#[test]
fn test_null_counts_as_absent() {
    let frame = lookup_frame(&[ok("null"), ok("1"), ok("null")]);
    let mut specs = vec![
        OperationSpec::get("a"),
        OperationSpec::get("a.b"),
        OperationSpec::get("a.b"),
    ];

    let projection = decoder().decode(frame, &mut specs).unwrap();
    assert_eq!(projection.value(), &json!({"a": {"b": 1}}));
}

#[test]
fn test_conflict_field_into_scalar() {
    let frame = lookup_frame(&[ok("1"), ok("2")]);
    let mut specs = vec![OperationSpec::get("a"), OperationSpec::get("a.b")];

    match decoder().decode(frame, &mut specs) {
        Err(SubdocError::ProjectionConflict { path }) => assert_eq!(path, "a"),
        other => panic!("Expected ProjectionConflict, got {:?}", other),
    }
}

#[test]
fn test_conflict_index_into_object() {
    let frame = lookup_frame(&[ok("{\"x\":1}"), ok("2")]);
    let mut specs = vec![
        OperationSpec::get("attributes"),
        OperationSpec::get("attributes[0]"),
    ];

    match decoder().decode(frame, &mut specs) {
        Err(SubdocError::ProjectionConflict { path }) => assert_eq!(path, "attributes"),
        other => panic!("Expected ProjectionConflict, got {:?}", other),
    }
}

#[test]
fn test_conflict_object_with_array() {
    let frame = lookup_frame(&[ok("{\"x\":1}"), ok("[1]")]);
    let mut specs = vec![OperationSpec::get("a.b"), OperationSpec::get("a.b")];

    match decoder().decode(frame, &mut specs) {
        Err(SubdocError::ProjectionConflict { path }) => assert_eq!(path, "a.b"),
        other => panic!("Expected ProjectionConflict, got {:?}", other),
    }
}

#[test]
fn test_conflict_nested_in_merge() {
    let frame = lookup_frame(&[ok("{\"x\":{\"y\":1}}"), ok("{\"x\":[1]}")]);
    let mut specs = vec![OperationSpec::get("doc"), OperationSpec::get("doc")];

    match decoder().decode(frame, &mut specs) {
        Err(SubdocError::ProjectionConflict { path }) => assert_eq!(path, "doc.x"),
        other => panic!("Expected ProjectionConflict, got {:?}", other),
    }
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_group_value_past_body() {
    let mut body = BytesMut::new();
    body.put_u16(0);
    body.put_u32(100);
    body.put_slice(b"short");
    let header = PacketHeader::response(OpCode::MultiLookup, 1, ResponseStatus::Success);
    let frame = encode_frame(header, &[], &[], &body).unwrap();

    let mut specs = vec![OperationSpec::get("a")];
    assert!(matches!(
        decoder().decode(frame, &mut specs),
        Err(SubdocError::TruncatedFrame { needed: 100, available: 5 })
    ));
}

#[test]
fn test_fewer_groups_than_specs() {
    let frame = lookup_frame(&[ok("1")]);
    let mut specs = vec![OperationSpec::get("a"), OperationSpec::get("b")];

    assert!(matches!(
        decoder().decode(frame, &mut specs),
        Err(SubdocError::TruncatedFrame { needed: 6, available: 0 })
    ));
}

#[test]
fn test_truncated_frame() {
    let short = Bytes::from_static(&LOOKUP_RESPONSE[..500]);
    let mut specs = fixture_specs();

    assert!(matches!(
        decoder().decode(short, &mut specs),
        Err(SubdocError::TruncatedFrame { .. })
    ));
}

#[test]
fn test_split_fields_ignores_trailing_bytes() {
    let mut body = BytesMut::new();
    body.put_u16(0xc0);
    body.put_u32(0);
    body.put_slice(b"extra");

    let fields = split_fields(body.freeze(), 1).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].status, ResponseStatus::SubdocPathNotFound);
    assert!(fields[0].value.is_empty());
}
