//! Protocol Module
//!
//! Binary request/response framing shared by every operation.
//!
//! ## Frame Format
//! ```text
//! ┌──────────────┬──────────┬─────────┬──────────────────────┐
//! │ Header (24)  │ Extras   │ Key     │ Value                │
//! └──────────────┴──────────┴─────────┴──────────────────────┘
//! ```
//!
//! ### Magic
//! - 0x80: request
//! - 0x81: response
//!
//! ### Status Codes (selection)
//! - 0x00: SUCCESS
//! - 0x01: KEY_NOT_FOUND
//! - 0x20: AUTH_ERROR
//! - 0x21: AUTH_CONTINUE
//! - 0xc0..=0xcc: sub-document path/document errors

mod codec;
mod opcode;
mod status;

pub use codec::{
    decode_header, decode_packet, encode_frame, encode_header, encode_request, read_frame,
    write_frame, Packet, PacketHeader, HEADER_SIZE, MAX_BODY_SIZE,
};
pub use opcode::{Magic, OpCode};
pub use status::ResponseStatus;
