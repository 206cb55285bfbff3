//! Opcode definitions
//!
//! Operations understood by the node, plus the frame magic bytes.

/// Frame magic (first header byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Magic {
    Request = 0x80,
    Response = 0x81,
}

impl Magic {
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x80 => Some(Magic::Request),
            0x81 => Some(Magic::Response),
            _ => None,
        }
    }
}

/// Operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    Get = 0x00,
    Noop = 0x0a,

    // SASL
    SaslListMechs = 0x20,
    SaslAuth = 0x21,
    SaslStep = 0x22,

    // Single-path sub-document
    SubdocGet = 0xc5,
    SubdocExists = 0xc6,
    SubdocDictAdd = 0xc7,
    SubdocDictUpsert = 0xc8,
    SubdocDelete = 0xc9,
    SubdocReplace = 0xca,
    SubdocArrayPushLast = 0xcb,
    SubdocArrayPushFirst = 0xcc,
    SubdocArrayInsert = 0xcd,
    SubdocArrayAddUnique = 0xce,
    SubdocCounter = 0xcf,

    // Multi-path sub-document
    MultiLookup = 0xd0,
    MultiMutation = 0xd1,
}

impl OpCode {
    pub fn from_u8(byte: u8) -> Option<Self> {
        let op = match byte {
            0x00 => OpCode::Get,
            0x0a => OpCode::Noop,
            0x20 => OpCode::SaslListMechs,
            0x21 => OpCode::SaslAuth,
            0x22 => OpCode::SaslStep,
            0xc5 => OpCode::SubdocGet,
            0xc6 => OpCode::SubdocExists,
            0xc7 => OpCode::SubdocDictAdd,
            0xc8 => OpCode::SubdocDictUpsert,
            0xc9 => OpCode::SubdocDelete,
            0xca => OpCode::SubdocReplace,
            0xcb => OpCode::SubdocArrayPushLast,
            0xcc => OpCode::SubdocArrayPushFirst,
            0xcd => OpCode::SubdocArrayInsert,
            0xce => OpCode::SubdocArrayAddUnique,
            0xcf => OpCode::SubdocCounter,
            0xd0 => OpCode::MultiLookup,
            0xd1 => OpCode::MultiMutation,
            _ => return None,
        };
        Some(op)
    }

    /// Single-path reads that may appear inside a multi-lookup
    pub fn is_subdoc_lookup(self) -> bool {
        matches!(self, OpCode::SubdocGet | OpCode::SubdocExists)
    }

    /// Single-path sub-document mutations
    pub fn is_subdoc_mutation(self) -> bool {
        matches!(
            self,
            OpCode::SubdocDictAdd
                | OpCode::SubdocDictUpsert
                | OpCode::SubdocDelete
                | OpCode::SubdocReplace
                | OpCode::SubdocArrayPushLast
                | OpCode::SubdocArrayPushFirst
                | OpCode::SubdocArrayInsert
                | OpCode::SubdocArrayAddUnique
                | OpCode::SubdocCounter
        )
    }

    /// Whether the mutation carries a value after the path
    pub fn takes_value(self) -> bool {
        self.is_subdoc_mutation() && self != OpCode::SubdocDelete
    }
}
