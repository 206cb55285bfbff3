//! Sub-document Module
//!
//! Path-addressed operations on parts of a stored JSON document.
//!
//! ## Responsibilities
//! - Describe one path-addressed request unit (`OperationSpec`)
//! - Encode path + flags into the conditional extras layout (`path`)
//! - Assemble complete request frames (`builder`)
//! - Turn values into bytes and back (`transcoder`)

mod builder;
mod path;
mod transcoder;

pub use builder::{
    strip_brackets, MutationToken, OperationBuilder, RequestOptions, MAX_LOOKUP_SPECS,
};
pub use path::{
    decode_mutation, encode_extras, extras_length, parse_path, DecodedMutation, PathSegment,
};
pub use transcoder::{JsonTranscoder, Transcoder};

use std::ops::BitOr;

use serde_json::Value;

use crate::protocol::{OpCode, ResponseStatus};

/// Longest path, in UTF-8 bytes, the node accepts
pub const MAX_PATH_LENGTH: usize = 1024;

/// Per-path flags (one byte on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathFlags(u8);

impl PathFlags {
    pub const NONE: PathFlags = PathFlags(0x00);
    /// Create intermediate objects/arrays that do not exist yet
    pub const CREATE_PARENTS: PathFlags = PathFlags(0x01);
    /// Path refers to an extended attribute
    pub const XATTR: PathFlags = PathFlags(0x04);
    /// Expand server macros such as `${Mutation.CAS}`
    pub const EXPAND_MACROS: PathFlags = PathFlags(0x10);

    pub const fn from_bits(bits: u8) -> Self {
        PathFlags(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: PathFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PathFlags {
    type Output = PathFlags;

    fn bitor(self, rhs: PathFlags) -> PathFlags {
        PathFlags(self.0 | rhs.0)
    }
}

/// Document-level flags (one optional byte on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocFlags(u8);

impl DocFlags {
    pub const NONE: DocFlags = DocFlags(0x00);
    /// Create the document if it does not exist ("upsert" semantics)
    pub const MKDOC: DocFlags = DocFlags(0x01);
    /// Fail if the document already exists ("add" semantics)
    pub const ADD: DocFlags = DocFlags(0x02);
    pub const ACCESS_DELETED: DocFlags = DocFlags(0x04);

    pub const fn from_bits(bits: u8) -> Self {
        DocFlags(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: DocFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DocFlags {
    type Output = DocFlags;

    fn bitor(self, rhs: DocFlags) -> DocFlags {
        DocFlags(self.0 | rhs.0)
    }
}

/// One path-addressed request unit
///
/// Built per call and discarded after the round trip. `status` is filled in
/// when a response is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSpec {
    pub op_code: OpCode,
    pub path: String,
    pub path_flags: PathFlags,
    pub doc_flags: DocFlags,
    pub value: Option<Value>,
    /// Splice the value into an existing array without its own brackets
    pub remove_brackets: bool,
    pub status: Option<ResponseStatus>,
}

impl OperationSpec {
    fn new(op_code: OpCode, path: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            op_code,
            path: path.into(),
            path_flags: PathFlags::NONE,
            doc_flags: DocFlags::NONE,
            value,
            remove_brackets: false,
            status: None,
        }
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Fetch the value at `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(OpCode::SubdocGet, path, None)
    }

    /// Check whether `path` exists
    pub fn exists(path: impl Into<String>) -> Self {
        Self::new(OpCode::SubdocExists, path, None)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Add a dictionary field; fails if it exists
    pub fn insert(path: impl Into<String>, value: Value) -> Self {
        Self::new(OpCode::SubdocDictAdd, path, Some(value))
    }

    /// Add or replace a dictionary field
    pub fn upsert(path: impl Into<String>, value: Value) -> Self {
        Self::new(OpCode::SubdocDictUpsert, path, Some(value))
    }

    /// Replace an existing value
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self::new(OpCode::SubdocReplace, path, Some(value))
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::new(OpCode::SubdocDelete, path, None)
    }

    /// Append one or more elements to the array at `path`
    pub fn array_append(path: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(OpCode::SubdocArrayPushLast, path, Some(Value::Array(values))).spliced()
    }

    /// Prepend one or more elements to the array at `path`
    pub fn array_prepend(path: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(OpCode::SubdocArrayPushFirst, path, Some(Value::Array(values))).spliced()
    }

    /// Insert elements at the array position named by `path` (ends in `[n]`)
    pub fn array_insert(path: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(OpCode::SubdocArrayInsert, path, Some(Value::Array(values))).spliced()
    }

    /// Append a primitive only if the array does not already hold it
    pub fn array_add_unique(path: impl Into<String>, value: Value) -> Self {
        Self::new(OpCode::SubdocArrayAddUnique, path, Some(value))
    }

    /// Add `delta` to the number at `path`
    pub fn counter(path: impl Into<String>, delta: i64) -> Self {
        Self::new(OpCode::SubdocCounter, path, Some(Value::from(delta)))
    }

    // -------------------------------------------------------------------------
    // Modifiers
    // -------------------------------------------------------------------------

    pub fn with_path_flags(mut self, flags: PathFlags) -> Self {
        self.path_flags = flags;
        self
    }

    pub fn with_doc_flags(mut self, flags: DocFlags) -> Self {
        self.doc_flags = flags;
        self
    }

    /// Shorthand for `CREATE_PARENTS`
    pub fn create_parents(mut self) -> Self {
        self.path_flags = self.path_flags | PathFlags::CREATE_PARENTS;
        self
    }

    fn spliced(mut self) -> Self {
        self.remove_brackets = true;
        self
    }

    /// True once a response reported success for this spec
    pub fn succeeded(&self) -> bool {
        self.status.map(ResponseStatus::is_success).unwrap_or(false)
    }
}
