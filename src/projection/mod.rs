//! Projection Module
//!
//! A document rebuilt from several independently fetched paths.
//!
//! ## Responsibilities
//! - Split a multi-lookup response into per-path results
//! - Merge successful results into one tree, rejecting shape conflicts
//! - Expose the tree dynamically, as a typed value, or as a flat map

mod decoder;

pub use decoder::{split_fields, LookupField, ProjectionDecoder};

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, SubdocError};
use crate::subdoc::{parse_path, PathSegment};

/// Merged result of a multi-path lookup
///
/// The root is always an object. Array positions no spec covered are `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    root: Value,
}

impl Projection {
    pub(crate) fn new(root: Value) -> Self {
        Self { root }
    }

    /// The whole tree, for dynamic traversal (`projection.value()["name"]`)
    pub fn value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Look up a node by path, e.g. `attributes.hobbies[1].name`
    pub fn get(&self, path: &str) -> Result<Option<&Value>> {
        let mut current = &self.root;
        for segment in parse_path(path)? {
            let next = match (&segment, current) {
                (PathSegment::Field(name), Value::Object(map)) => map.get(name),
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Populate a caller-defined structure; field names match case-sensitively
    pub fn content_as<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.root).map_err(|e| SubdocError::Serialization(e.to_string()))
    }

    /// Top-level field name to sub-tree
    pub fn into_map(self) -> HashMap<String, Value> {
        match self.root {
            Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.as_object().map(|map| map.is_empty()).unwrap_or(true)
    }
}
