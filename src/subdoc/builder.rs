//! Operation builder
//!
//! Assembles complete request frames for sub-document operations.
//!
//! ## Single-path Mutation Frame
//! ```text
//! ┌──────────────┬─────────────────┬───────┬──────────────┬──────────────┐
//! │ Header (24)  │ Extras (3/4/7/8)│ Key   │ Path         │ Value        │
//! └──────────────┴─────────────────┴───────┴──────────────┴──────────────┘
//! ```
//!
//! ## Multi-lookup Body (after header, optional 1-byte doc-flags extras, key)
//! ```text
//! ┌──────────┬───────────┬────────────┬──────────┐
//! │ Opcode 1 │ PathFlg 1 │ PathLen 2  │ Path     │  × N specs
//! └──────────┴───────────┴────────────┴──────────┘
//! ```

use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::path::{checked_path_length, encode_extras, parse_path};
use super::{DocFlags, OperationSpec, Transcoder};
use crate::error::{Result, SubdocError};
use crate::protocol::{encode_header, OpCode, PacketHeader, HEADER_SIZE};

/// Most paths a node accepts in one multi-lookup
pub const MAX_LOOKUP_SPECS: usize = 16;

/// Per-request header fields the caller controls
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    pub opaque: u32,
    pub vbucket: u16,
    /// Compare-and-swap guard, 0 = unconditional
    pub cas: u64,
    /// Document expiry in seconds, 0 = none
    pub expiry: u32,
}

/// Position of a mutation in its vbucket's history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationToken {
    pub vbucket_id: u16,
    pub vbucket_uuid: u64,
    pub sequence_number: u64,
}

/// Builds request frames, reusing its buffers between calls
pub struct OperationBuilder {
    transcoder: Arc<dyn Transcoder>,
    /// Frame under construction
    frame: BytesMut,
    /// Staging area for bracket-stripped values
    scratch: BytesMut,
}

impl OperationBuilder {
    pub fn new(transcoder: Arc<dyn Transcoder>) -> Self {
        Self {
            transcoder,
            frame: BytesMut::with_capacity(256),
            scratch: BytesMut::with_capacity(128),
        }
    }

    /// Build a single-path mutation request
    pub fn build_mutation(
        &mut self,
        key: &[u8],
        spec: &OperationSpec,
        options: RequestOptions,
    ) -> Result<Bytes> {
        if !spec.op_code.is_subdoc_mutation() {
            return Err(SubdocError::InvalidArgument(format!(
                "{:?} is not a sub-document mutation",
                spec.op_code
            )));
        }
        let key_length = checked_key_length(key)?;

        self.begin_frame();
        let extras_length = self.write_extras(spec, options.expiry)?;
        self.frame.extend_from_slice(key);
        self.write_body(spec)?;

        let mut header = PacketHeader::request(spec.op_code, options.opaque);
        header.key_length = key_length;
        header.extras_length = extras_length as u8;
        header.vbucket_or_status = options.vbucket;
        header.cas = options.cas;
        self.finish_frame(header)
    }

    /// Build a multi-lookup request for up to `MAX_LOOKUP_SPECS` paths
    pub fn build_lookup(
        &mut self,
        key: &[u8],
        specs: &[OperationSpec],
        doc_flags: DocFlags,
        options: RequestOptions,
    ) -> Result<Bytes> {
        if specs.is_empty() {
            return Err(SubdocError::InvalidArgument(
                "lookup needs at least one spec".to_string(),
            ));
        }
        if specs.len() > MAX_LOOKUP_SPECS {
            return Err(SubdocError::TooManySpecs {
                count: specs.len(),
                max: MAX_LOOKUP_SPECS,
            });
        }
        let key_length = checked_key_length(key)?;

        self.begin_frame();
        let extras_length = if doc_flags.is_none() {
            0
        } else {
            self.frame.put_u8(doc_flags.bits());
            1
        };
        self.frame.extend_from_slice(key);

        for spec in specs {
            if !spec.op_code.is_subdoc_lookup() {
                return Err(SubdocError::InvalidArgument(format!(
                    "{:?} cannot appear in a lookup",
                    spec.op_code
                )));
            }
            // The reply is merged along these segments
            parse_path(&spec.path)?;
            let path_length = checked_path_length(&spec.path)?;
            self.frame.put_u8(spec.op_code as u8);
            self.frame.put_u8(spec.path_flags.bits());
            self.frame.put_u16(path_length);
            self.frame.extend_from_slice(spec.path.as_bytes());
        }

        let mut header = PacketHeader::request(OpCode::MultiLookup, options.opaque);
        header.key_length = key_length;
        header.extras_length = extras_length;
        header.vbucket_or_status = options.vbucket;
        self.finish_frame(header)
    }

    /// Append path length, path flags, optional expiry and doc flags
    ///
    /// Returns the extras length to advertise in the header.
    pub fn write_extras(&mut self, spec: &OperationSpec, expiry: u32) -> Result<usize> {
        encode_extras(&spec.path, spec.path_flags, expiry, spec.doc_flags, &mut self.frame)
    }

    /// Append the path bytes followed by the encoded value
    ///
    /// With `remove_brackets` the value is staged in the scratch buffer and
    /// its enclosing `[`/`]` are dropped, leaving bare elements to splice
    /// between existing siblings.
    pub fn write_body(&mut self, spec: &OperationSpec) -> Result<()> {
        checked_path_length(&spec.path)?;
        self.frame.extend_from_slice(spec.path.as_bytes());

        if !spec.op_code.takes_value() {
            return Ok(());
        }
        let value = spec.value.as_ref().ok_or_else(|| {
            SubdocError::InvalidArgument(format!("{:?} requires a value", spec.op_code))
        })?;

        if !spec.remove_brackets {
            return self.transcoder.encode(value, &mut self.frame);
        }

        self.scratch.clear();
        self.transcoder.encode(value, &mut self.scratch)?;
        let elements = strip_brackets(&self.scratch)?;
        self.frame.extend_from_slice(elements);
        Ok(())
    }

    /// Mutation token from response extras, if the node sent one
    pub fn read_extras(extras: &[u8], vbucket_id: u16) -> Option<MutationToken> {
        if extras.len() < 16 {
            return None;
        }
        let mut buf = extras;
        Some(MutationToken {
            vbucket_id,
            vbucket_uuid: buf.get_u64(),
            sequence_number: buf.get_u64(),
        })
    }

    fn begin_frame(&mut self) {
        self.frame.clear();
        self.frame.put_bytes(0, HEADER_SIZE);
    }

    fn finish_frame(&mut self, mut header: PacketHeader) -> Result<Bytes> {
        header.body_length = (self.frame.len() - HEADER_SIZE) as u32;
        encode_header(&header, &mut self.frame[..HEADER_SIZE])?;
        Ok(self.frame.split().freeze())
    }
}

fn checked_key_length(key: &[u8]) -> Result<u16> {
    if key.is_empty() {
        return Err(SubdocError::InvalidArgument("key must not be empty".to_string()));
    }
    u16::try_from(key.len())
        .map_err(|_| SubdocError::InvalidArgument(format!("key too long: {} bytes", key.len())))
}

/// Remove the outermost `[` and `]` of an encoded array
///
/// Surrounding ASCII whitespace is ignored; anything else that is not
/// bracket-delimited is rejected.
pub fn strip_brackets(encoded: &[u8]) -> Result<&[u8]> {
    let start = encoded
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(encoded.len());
    let end = encoded
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    let trimmed = &encoded[start..end];
    match trimmed {
        [b'[', inner @ .., b']'] => Ok(inner),
        _ => Err(SubdocError::InvalidArrayElementEncoding),
    }
}
