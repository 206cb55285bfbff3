//! Projection decoder
//!
//! Splits a multi-lookup response into per-spec results and merges the
//! successful ones into a single value tree.
//!
//! ## Response Body
//! ```text
//! ┌───────────┬─────────────┬──────────────┐
//! │ Status 2  │ ValueLen 4  │ Value        │  × one per requested spec
//! └───────────┴─────────────┴──────────────┘
//! ```

use std::sync::Arc;

use bytes::{Buf, Bytes};
use serde_json::{Map, Value};

use super::Projection;
use crate::error::{Result, SubdocError};
use crate::protocol::{decode_packet, OpCode, ResponseStatus};
use crate::subdoc::{parse_path, OperationSpec, PathSegment, Transcoder};

/// Status + value-length prefix of each result group
const GROUP_HEADER_SIZE: usize = 6;

/// Raw result for one requested path
#[derive(Debug, Clone, PartialEq)]
pub struct LookupField {
    pub status: ResponseStatus,
    pub value: Bytes,
}

/// Turns multi-lookup responses into projections
pub struct ProjectionDecoder {
    transcoder: Arc<dyn Transcoder>,
}

impl ProjectionDecoder {
    pub fn new(transcoder: Arc<dyn Transcoder>) -> Self {
        Self { transcoder }
    }

    /// Decode a full response frame against the specs that produced it
    ///
    /// Every spec gets its `status`; successful `GET` specs also get their
    /// decoded `value` and contribute to the projection. A failed path is
    /// recorded and skipped; truncated data or incompatible shapes fail the
    /// whole decode.
    pub fn decode(&self, frame: Bytes, specs: &mut [OperationSpec]) -> Result<Projection> {
        let packet = decode_packet(frame)?;
        let fields = split_fields(packet.value, specs.len())?;

        let mut root = Value::Object(Map::new());
        for (spec, field) in specs.iter_mut().zip(fields) {
            spec.status = Some(field.status);
            if !field.status.is_success() {
                tracing::trace!("Lookup of '{}' failed: {:?}", spec.path, field.status);
                continue;
            }
            if spec.op_code != OpCode::SubdocGet {
                continue;
            }

            let value = self.transcoder.decode(&field.value)?;
            let segments = parse_path(&spec.path)?;
            insert(&mut root, &segments, value.clone())?;
            spec.value = Some(value);
        }

        Ok(Projection::new(root))
    }
}

/// Walk the result groups once, in request order
pub fn split_fields(mut body: Bytes, count: usize) -> Result<Vec<LookupField>> {
    let mut fields = Vec::with_capacity(count);

    for _ in 0..count {
        if body.len() < GROUP_HEADER_SIZE {
            return Err(SubdocError::TruncatedFrame {
                needed: GROUP_HEADER_SIZE,
                available: body.len(),
            });
        }
        let status = ResponseStatus::from_u16(body.get_u16());
        let length = body.get_u32() as usize;
        if body.len() < length {
            return Err(SubdocError::TruncatedFrame {
                needed: length,
                available: body.len(),
            });
        }
        let value = body.split_to(length);
        fields.push(LookupField { status, value });
    }

    if !body.is_empty() {
        tracing::trace!("Ignoring {} trailing bytes after lookup results", body.len());
    }

    Ok(fields)
}

// =============================================================================
// Tree Merging
// =============================================================================

/// Place `value` at `segments`, creating objects and arrays on the way
fn insert(root: &mut Value, segments: &[PathSegment], value: Value) -> Result<()> {
    let mut current = root;
    let mut walked = String::new();

    for segment in segments {
        current = step(current, segment, &walked)?;
        push_segment(&mut walked, segment);
    }

    merge(current, value, &walked)
}

/// Descend one segment, shaping an empty slot to fit
fn step<'a>(node: &'a mut Value, segment: &PathSegment, walked: &str) -> Result<&'a mut Value> {
    match segment {
        PathSegment::Field(name) => {
            if node.is_null() {
                *node = Value::Object(Map::new());
            }
            match node {
                Value::Object(map) => Ok(map.entry(name.clone()).or_insert(Value::Null)),
                _ => Err(conflict(walked)),
            }
        }
        PathSegment::Index(index) => {
            if node.is_null() {
                *node = Value::Array(Vec::new());
            }
            match node {
                Value::Array(items) => {
                    if items.len() <= *index {
                        items.resize(index + 1, Value::Null);
                    }
                    Ok(&mut items[*index])
                }
                _ => Err(conflict(walked)),
            }
        }
    }
}

/// Combine an incoming value with whatever already sits in `slot`
///
/// Objects merge by field, arrays by position, scalars are replaced.
/// Null on either side counts as absent.
fn merge(slot: &mut Value, incoming: Value, path: &str) -> Result<()> {
    if slot.is_null() {
        *slot = incoming;
        return Ok(());
    }
    if incoming.is_null() {
        return Ok(());
    }

    match (slot, incoming) {
        (Value::Object(existing), Value::Object(fields)) => {
            for (name, value) in fields {
                let mut child = path.to_string();
                push_segment(&mut child, &PathSegment::Field(name.clone()));
                merge(existing.entry(name).or_insert(Value::Null), value, &child)?;
            }
            Ok(())
        }
        (Value::Array(existing), Value::Array(items)) => {
            if existing.len() < items.len() {
                existing.resize(items.len(), Value::Null);
            }
            for (index, value) in items.into_iter().enumerate() {
                let mut child = path.to_string();
                push_segment(&mut child, &PathSegment::Index(index));
                merge(&mut existing[index], value, &child)?;
            }
            Ok(())
        }
        (slot, incoming) => {
            if is_container(slot) || is_container(&incoming) {
                return Err(conflict(path));
            }
            *slot = incoming;
            Ok(())
        }
    }
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

fn push_segment(path: &mut String, segment: &PathSegment) {
    if let PathSegment::Field(_) = segment {
        if !path.is_empty() {
            path.push('.');
        }
    }
    path.push_str(&segment.to_string());
}

fn conflict(path: &str) -> SubdocError {
    let path = if path.is_empty() { "<root>" } else { path };
    SubdocError::ProjectionConflict {
        path: path.to_string(),
    }
}
