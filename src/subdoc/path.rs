//! Path codec
//!
//! Extras layout for single-path mutations, its inverse, and path
//! segmentation.
//!
//! ## Extras Layout
//! ```text
//! ┌────────────┬───────────┬──────────────┬────────────┐
//! │ PathLen 2  │ PathFlg 1 │ [Expiry 4]   │ [DocFlg 1] │
//! └────────────┴───────────┴──────────────┴────────────┘
//! ```
//! Expiry is present only when non-zero; doc flags only when not `NONE`,
//! so the extras are 3, 4, 7 or 8 bytes long.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{DocFlags, PathFlags, MAX_PATH_LENGTH};
use crate::error::{Result, SubdocError};
use crate::protocol::decode_packet;

/// Extras length for the given optional fields
pub fn extras_length(expiry: u32, doc_flags: DocFlags) -> usize {
    let mut length = 3;
    if expiry > 0 {
        length += 4;
    }
    if !doc_flags.is_none() {
        length += 1;
    }
    length
}

/// Append mutation extras to `out`, returning how many bytes were written
pub fn encode_extras(
    path: &str,
    path_flags: PathFlags,
    expiry: u32,
    doc_flags: DocFlags,
    out: &mut BytesMut,
) -> Result<usize> {
    let path_length = checked_path_length(path)?;

    out.put_u16(path_length);
    out.put_u8(path_flags.bits());
    if expiry > 0 {
        out.put_u32(expiry);
    }
    if !doc_flags.is_none() {
        out.put_u8(doc_flags.bits());
    }

    Ok(extras_length(expiry, doc_flags))
}

pub(crate) fn checked_path_length(path: &str) -> Result<u16> {
    let length = path.len();
    if length > MAX_PATH_LENGTH {
        return Err(SubdocError::PathTooLong {
            length,
            max: MAX_PATH_LENGTH,
        });
    }
    Ok(length as u16)
}

/// A single-path mutation frame taken apart again
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMutation {
    pub opcode: u8,
    pub opaque: u32,
    pub cas: u64,
    pub key: Bytes,
    pub path: String,
    pub path_flags: PathFlags,
    /// 0 when the frame carried no expiry
    pub expiry: u32,
    pub doc_flags: DocFlags,
    pub value: Bytes,
}

/// Decode a frame produced by `OperationBuilder::build_mutation`
///
/// Reads nothing past `HEADER_SIZE + body_length`.
pub fn decode_mutation(frame: Bytes) -> Result<DecodedMutation> {
    let packet = decode_packet(frame)?;

    let mut extras = &packet.extras[..];
    let (has_expiry, has_doc_flags) = match extras.len() {
        3 => (false, false),
        4 => (false, true),
        7 => (true, false),
        8 => (true, true),
        other => {
            return Err(SubdocError::Protocol(format!(
                "Unexpected sub-document extras length: {}",
                other
            )))
        }
    };

    let path_length = extras.get_u16() as usize;
    let path_flags = PathFlags::from_bits(extras.get_u8());
    let expiry = if has_expiry { extras.get_u32() } else { 0 };
    let doc_flags = if has_doc_flags {
        DocFlags::from_bits(extras.get_u8())
    } else {
        DocFlags::NONE
    };

    if path_length > packet.value.len() {
        return Err(SubdocError::TruncatedFrame {
            needed: path_length,
            available: packet.value.len(),
        });
    }

    let path = std::str::from_utf8(&packet.value[..path_length])
        .map_err(|e| SubdocError::Protocol(format!("Path is not UTF-8: {}", e)))?
        .to_string();

    Ok(DecodedMutation {
        opcode: packet.header.opcode,
        opaque: packet.header.opaque,
        cas: packet.header.cas,
        key: packet.key,
        path,
        path_flags,
        expiry,
        doc_flags,
        value: packet.value.slice(path_length..),
    })
}

// =============================================================================
// Path Segmentation
// =============================================================================

/// One step of a document path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Split a path into field and index segments
///
/// `attributes.hobbies[1].details` becomes
/// `attributes`, `hobbies`, `[1]`, `details`. Field names may be quoted
/// with backticks to contain `.` or `[`; a doubled backtick inside quotes
/// is a literal backtick. The empty path addresses the document root.
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    let invalid = |reason: String| SubdocError::InvalidPath(format!("'{}': {}", path, reason));

    let mut segments = Vec::new();
    if path.is_empty() {
        return Ok(segments);
    }

    let mut chars = path.chars().peekable();

    // A path may open with an index (root array); otherwise with a field.
    if chars.peek() != Some(&'[') {
        segments.push(PathSegment::Field(read_field(&mut chars).map_err(invalid)?));
    }

    while let Some(c) = chars.next() {
        match c {
            '[' => segments.push(PathSegment::Index(read_index(&mut chars).map_err(invalid)?)),
            '.' => segments.push(PathSegment::Field(read_field(&mut chars).map_err(invalid)?)),
            other => return Err(invalid(format!("unexpected '{}'", other))),
        }
    }

    Ok(segments)
}

fn read_field(chars: &mut Peekable<Chars<'_>>) -> std::result::Result<String, String> {
    let mut name = String::new();

    if chars.peek() == Some(&'`') {
        chars.next();
        loop {
            match chars.next() {
                None => return Err("unterminated backtick".to_string()),
                Some('`') if chars.peek() == Some(&'`') => {
                    chars.next();
                    name.push('`');
                }
                Some('`') => break,
                Some(c) => name.push(c),
            }
        }
    } else {
        while let Some(&c) = chars.peek() {
            match c {
                '.' | '[' => break,
                ']' | '`' => return Err(format!("unexpected '{}'", c)),
                _ => {
                    name.push(c);
                    chars.next();
                }
            }
        }
    }

    if name.is_empty() {
        return Err("empty field name".to_string());
    }
    Ok(name)
}

fn read_index(chars: &mut Peekable<Chars<'_>>) -> std::result::Result<usize, String> {
    let mut digits = String::new();
    loop {
        match chars.next() {
            None => return Err("unterminated '['".to_string()),
            Some(']') => break,
            Some(c) => digits.push(c),
        }
    }

    if digits.starts_with('-') {
        return Err(format!("negative index [{}] cannot be resolved locally", digits));
    }
    digits
        .parse::<usize>()
        .map_err(|_| format!("invalid array index [{}]", digits))
}
