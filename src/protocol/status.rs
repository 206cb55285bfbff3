//! Response status definitions
//!
//! Status codes carried in the vbucket/status header field of responses,
//! and in each group of a multi-lookup body.

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Success,
    KeyNotFound,
    KeyExists,
    ValueTooLarge,
    InvalidArguments,
    ItemNotStored,
    NonNumeric,
    NotMyVBucket,
    AuthError,
    AuthContinue,
    UnknownCommand,
    OutOfMemory,
    Busy,
    TemporaryFailure,
    SubdocPathNotFound,
    SubdocPathMismatch,
    SubdocPathInvalid,
    SubdocPathTooBig,
    SubdocDocTooDeep,
    SubdocCannotInsert,
    SubdocDocNotJson,
    SubdocNumRange,
    SubdocDeltaRange,
    SubdocPathExists,
    SubdocValueTooDeep,
    SubdocInvalidCombo,
    SubdocMultiPathFailure,
    /// Any code this client does not name
    Other(u16),
}

impl ResponseStatus {
    pub fn from_u16(code: u16) -> Self {
        match code {
            0x00 => ResponseStatus::Success,
            0x01 => ResponseStatus::KeyNotFound,
            0x02 => ResponseStatus::KeyExists,
            0x03 => ResponseStatus::ValueTooLarge,
            0x04 => ResponseStatus::InvalidArguments,
            0x05 => ResponseStatus::ItemNotStored,
            0x06 => ResponseStatus::NonNumeric,
            0x07 => ResponseStatus::NotMyVBucket,
            0x20 => ResponseStatus::AuthError,
            0x21 => ResponseStatus::AuthContinue,
            0x81 => ResponseStatus::UnknownCommand,
            0x82 => ResponseStatus::OutOfMemory,
            0x85 => ResponseStatus::Busy,
            0x86 => ResponseStatus::TemporaryFailure,
            0xc0 => ResponseStatus::SubdocPathNotFound,
            0xc1 => ResponseStatus::SubdocPathMismatch,
            0xc2 => ResponseStatus::SubdocPathInvalid,
            0xc3 => ResponseStatus::SubdocPathTooBig,
            0xc4 => ResponseStatus::SubdocDocTooDeep,
            0xc5 => ResponseStatus::SubdocCannotInsert,
            0xc6 => ResponseStatus::SubdocDocNotJson,
            0xc7 => ResponseStatus::SubdocNumRange,
            0xc8 => ResponseStatus::SubdocDeltaRange,
            0xc9 => ResponseStatus::SubdocPathExists,
            0xca => ResponseStatus::SubdocValueTooDeep,
            0xcb => ResponseStatus::SubdocInvalidCombo,
            0xcc => ResponseStatus::SubdocMultiPathFailure,
            other => ResponseStatus::Other(other),
        }
    }

    pub fn as_u16(self) -> u16 {
        match self {
            ResponseStatus::Success => 0x00,
            ResponseStatus::KeyNotFound => 0x01,
            ResponseStatus::KeyExists => 0x02,
            ResponseStatus::ValueTooLarge => 0x03,
            ResponseStatus::InvalidArguments => 0x04,
            ResponseStatus::ItemNotStored => 0x05,
            ResponseStatus::NonNumeric => 0x06,
            ResponseStatus::NotMyVBucket => 0x07,
            ResponseStatus::AuthError => 0x20,
            ResponseStatus::AuthContinue => 0x21,
            ResponseStatus::UnknownCommand => 0x81,
            ResponseStatus::OutOfMemory => 0x82,
            ResponseStatus::Busy => 0x85,
            ResponseStatus::TemporaryFailure => 0x86,
            ResponseStatus::SubdocPathNotFound => 0xc0,
            ResponseStatus::SubdocPathMismatch => 0xc1,
            ResponseStatus::SubdocPathInvalid => 0xc2,
            ResponseStatus::SubdocPathTooBig => 0xc3,
            ResponseStatus::SubdocDocTooDeep => 0xc4,
            ResponseStatus::SubdocCannotInsert => 0xc5,
            ResponseStatus::SubdocDocNotJson => 0xc6,
            ResponseStatus::SubdocNumRange => 0xc7,
            ResponseStatus::SubdocDeltaRange => 0xc8,
            ResponseStatus::SubdocPathExists => 0xc9,
            ResponseStatus::SubdocValueTooDeep => 0xca,
            ResponseStatus::SubdocInvalidCombo => 0xcb,
            ResponseStatus::SubdocMultiPathFailure => 0xcc,
            ResponseStatus::Other(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        self == ResponseStatus::Success
    }
}
