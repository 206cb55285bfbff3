//! Value transcoding
//!
//! The seam between document values and the bytes on the wire. The builder
//! and the projection decoder hold one `Transcoder` for their lifetime
//! instead of dispatching on value types per call.

use bytes::{BufMut, BytesMut};
use serde_json::Value;

use crate::error::{Result, SubdocError};

/// Encodes values into request frames and decodes response values
pub trait Transcoder: Send + Sync {
    /// Append the encoded form of `value` to `out`
    fn encode(&self, value: &Value, out: &mut BytesMut) -> Result<()>;

    /// Decode one value from its wire bytes
    fn decode(&self, bytes: &[u8]) -> Result<Value>;
}

/// Compact JSON, the node's native document format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTranscoder;

impl Transcoder for JsonTranscoder {
    fn encode(&self, value: &Value, out: &mut BytesMut) -> Result<()> {
        serde_json::to_writer(out.writer(), value)
            .map_err(|e| SubdocError::Serialization(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        // EXISTS and some counters answer with an empty value
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(bytes).map_err(|e| SubdocError::Serialization(e.to_string()))
    }
}
