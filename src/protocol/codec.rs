//! Protocol codec
//!
//! Header encoding/decoding and whole-frame stream I/O.
//!
//! ## Header Layout (24 bytes, big-endian)
//! ```text
//! ┌───────┬────────┬─────────┬────────┬──────────┬───────────────┐
//! │Magic 1│Opcode 1│KeyLen 2 │ExtLen 1│DataType 1│VBucket/Stat 2 │
//! ├───────┴────────┴─────────┴────────┴──────────┴───────────────┤
//! │ BodyLen 4        │ Opaque 4        │ CAS 8                    │
//! └──────────────────┴─────────────────┴─────────────────────────┘
//! ```
//!
//! The body that follows is `extras | key | value`, and
//! `BodyLen = ExtLen + KeyLen + len(value)`.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Magic, OpCode, ResponseStatus};
use crate::error::{Result, SubdocError};

/// Fixed header size
pub const HEADER_SIZE: usize = 24;

/// Maximum body size accepted from the wire (20 MB document limit plus slack)
pub const MAX_BODY_SIZE: u32 = 21 * 1024 * 1024;

/// Decoded frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub magic: Magic,
    /// Raw opcode byte; see [`PacketHeader::op_code`]
    pub opcode: u8,
    pub key_length: u16,
    pub extras_length: u8,
    pub data_type: u8,
    /// vbucket id on requests, status on responses
    pub vbucket_or_status: u16,
    pub body_length: u32,
    pub opaque: u32,
    pub cas: u64,
}

impl PacketHeader {
    /// Header for an outbound request; lengths are filled in by the builder
    pub fn request(opcode: OpCode, opaque: u32) -> Self {
        Self {
            magic: Magic::Request,
            opcode: opcode as u8,
            key_length: 0,
            extras_length: 0,
            data_type: 0,
            vbucket_or_status: 0,
            body_length: 0,
            opaque,
            cas: 0,
        }
    }

    /// Header for a response to `opcode`
    pub fn response(opcode: OpCode, opaque: u32, status: ResponseStatus) -> Self {
        Self {
            magic: Magic::Response,
            vbucket_or_status: status.as_u16(),
            ..Self::request(opcode, opaque)
        }
    }

    pub fn op_code(&self) -> Option<OpCode> {
        OpCode::from_u8(self.opcode)
    }

    /// Status of a response frame
    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::from_u16(self.vbucket_or_status)
    }

    /// Offset of the key region from the start of the frame
    pub fn key_offset(&self) -> usize {
        HEADER_SIZE + self.extras_length as usize
    }

    /// Offset of the value region from the start of the frame
    pub fn value_offset(&self) -> usize {
        self.key_offset() + self.key_length as usize
    }

    /// Header plus body
    pub fn frame_length(&self) -> usize {
        HEADER_SIZE + self.body_length as usize
    }
}

/// A frame split into its regions
///
/// Regions are cheap `Bytes` slices of the original frame.
#[derive(Debug, Clone)]
pub struct Packet {
    pub header: PacketHeader,
    pub extras: Bytes,
    pub key: Bytes,
    pub value: Bytes,
}

impl Packet {
    pub fn status(&self) -> ResponseStatus {
        self.header.status()
    }
}

// =============================================================================
// Header Encoding/Decoding
// =============================================================================

/// Write a header into the first `HEADER_SIZE` bytes of `out`
pub fn encode_header(header: &PacketHeader, out: &mut [u8]) -> Result<()> {
    if out.len() < HEADER_SIZE {
        return Err(SubdocError::TruncatedFrame {
            needed: HEADER_SIZE,
            available: out.len(),
        });
    }

    let mut buf = &mut out[..HEADER_SIZE];
    buf.put_u8(header.magic as u8);
    buf.put_u8(header.opcode);
    buf.put_u16(header.key_length);
    buf.put_u8(header.extras_length);
    buf.put_u8(header.data_type);
    buf.put_u16(header.vbucket_or_status);
    buf.put_u32(header.body_length);
    buf.put_u32(header.opaque);
    buf.put_u64(header.cas);
    Ok(())
}

/// Decode and validate a header
pub fn decode_header(bytes: &[u8]) -> Result<PacketHeader> {
    if bytes.len() < HEADER_SIZE {
        return Err(SubdocError::TruncatedFrame {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let mut buf = &bytes[..HEADER_SIZE];
    let magic_byte = buf.get_u8();
    let magic = Magic::from_u8(magic_byte).ok_or_else(|| {
        SubdocError::Protocol(format!("Unknown magic: 0x{:02x}", magic_byte))
    })?;

    let header = PacketHeader {
        magic,
        opcode: buf.get_u8(),
        key_length: buf.get_u16(),
        extras_length: buf.get_u8(),
        data_type: buf.get_u8(),
        vbucket_or_status: buf.get_u16(),
        body_length: buf.get_u32(),
        opaque: buf.get_u32(),
        cas: buf.get_u64(),
    };

    if header.body_length > MAX_BODY_SIZE {
        return Err(SubdocError::Protocol(format!(
            "Body too large: {} bytes (max {})",
            header.body_length, MAX_BODY_SIZE
        )));
    }

    let fixed = header.extras_length as u32 + header.key_length as u32;
    if header.body_length < fixed {
        return Err(SubdocError::Protocol(format!(
            "Body length {} smaller than extras ({}) + key ({})",
            header.body_length, header.extras_length, header.key_length
        )));
    }

    Ok(header)
}

/// Split a complete frame into header, extras, key and value
pub fn decode_packet(frame: Bytes) -> Result<Packet> {
    let header = decode_header(&frame)?;

    let frame_len = header.frame_length();
    if frame.len() < frame_len {
        return Err(SubdocError::TruncatedFrame {
            needed: frame_len,
            available: frame.len(),
        });
    }

    Ok(Packet {
        extras: frame.slice(HEADER_SIZE..header.key_offset()),
        key: frame.slice(header.key_offset()..header.value_offset()),
        value: frame.slice(header.value_offset()..frame_len),
        header,
    })
}

/// Assemble a request frame from its regions
///
/// Used for small control frames (SASL, NOOP); sub-document requests go
/// through `OperationBuilder`.
pub fn encode_request(
    opcode: OpCode,
    opaque: u32,
    extras: &[u8],
    key: &[u8],
    value: &[u8],
) -> Result<Bytes> {
    encode_frame(PacketHeader::request(opcode, opaque), extras, key, value)
}

/// Assemble a frame, filling in the header's length fields
pub fn encode_frame(
    mut header: PacketHeader,
    extras: &[u8],
    key: &[u8],
    value: &[u8],
) -> Result<Bytes> {
    header.key_length = u16::try_from(key.len())
        .map_err(|_| SubdocError::Protocol(format!("Key too long: {} bytes", key.len())))?;
    header.extras_length = u8::try_from(extras.len())
        .map_err(|_| SubdocError::Protocol(format!("Extras too long: {} bytes", extras.len())))?;
    let body_length = extras.len() + key.len() + value.len();
    header.body_length = body_length as u32;

    let mut frame = BytesMut::zeroed(HEADER_SIZE);
    encode_header(&header, &mut frame)?;
    frame.reserve(body_length);
    frame.extend_from_slice(extras);
    frame.extend_from_slice(key);
    frame.extend_from_slice(value);
    Ok(frame.freeze())
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one complete frame from a stream
///
/// Blocks until the header and the advertised body are received.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Bytes> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header_bytes)?;

    let header = decode_header(&header_bytes)?;

    let mut frame = BytesMut::with_capacity(header.frame_length());
    frame.extend_from_slice(&header_bytes);
    frame.resize(header.frame_length(), 0);
    if header.body_length > 0 {
        reader.read_exact(&mut frame[HEADER_SIZE..])?;
    }

    Ok(frame.freeze())
}

/// Write a frame to a stream
pub fn write_frame<W: Write>(writer: &mut W, frame: &[u8]) -> Result<()> {
    writer.write_all(frame)?;
    writer.flush()?;
    Ok(())
}
