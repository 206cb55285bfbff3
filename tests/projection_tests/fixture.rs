//! Recorded multi-lookup response
//!
//! Fourteen successful results for `LOOKUP_PATHS`, in order, against:
//!
//! ```text
//! {
//!   "name": "Emmy-lou Dickerson",
//!   "age": 26,
//!   "animals": ["cat", "dog", "parrot"],
//!   "attributes": {
//!     "hair": "brown",
//!     "dimensions": { "height": 67, "weight": 175 },
//!     "hobbies": [
//!       { "type": "winter sports", "name": "curling" },
//!       { "type": "summer sports", "name": "water skiing",
//!         "details": { "location": { "lat": 49.282730, "long": -123.120735 } } }
//!     ]
//!   }
//! }
//! ```

pub const LOOKUP_PATHS: [&str; 14] = [
    "name",
    "age",
    "animals",
    "animals[1]",
    "attributes",
    "attributes.hair",
    "attributes.dimensions",
    "attributes.dimensions.height",
    "attributes.dimensions.weight",
    "attributes.hobbies",
    "attributes.hobbies[0].type",
    "attributes.hobbies[1].name",
    "attributes.hobbies[1].details.location",
    "attributes.hobbies[1].details.location.long",
];

/// Opaque of the recorded response
pub const LOOKUP_OPAQUE: u32 = 0x19;

#[rustfmt::skip]
pub static LOOKUP_RESPONSE: [u8; 901] = [
    0x81, 0xd0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x6d, 0x00, 0x00, 0x00, 0x19,
    0x15, 0x87, 0x10, 0x16, 0x4e, 0xf7, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x14, 0x22, 0x45,
    0x6d, 0x6d, 0x79, 0x2d, 0x6c, 0x6f, 0x75, 0x20, 0x44, 0x69, 0x63, 0x6b, 0x65, 0x72, 0x73, 0x6f,
    0x6e, 0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x32, 0x36, 0x00, 0x00, 0x00, 0x00, 0x00, 0x18,
    0x5b, 0x22, 0x63, 0x61, 0x74, 0x22, 0x2c, 0x20, 0x22, 0x64, 0x6f, 0x67, 0x22, 0x2c, 0x20, 0x22,
    0x70, 0x61, 0x72, 0x72, 0x6f, 0x74, 0x22, 0x5d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x22, 0x64,
    0x6f, 0x67, 0x22, 0x00, 0x00, 0x00, 0x00, 0x01, 0x58, 0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x22, 0x68,
    0x61, 0x69, 0x72, 0x22, 0x3a, 0x20, 0x22, 0x62, 0x72, 0x6f, 0x77, 0x6e, 0x22, 0x2c, 0x0d, 0x0a,
    0x09, 0x09, 0x22, 0x64, 0x69, 0x6d, 0x65, 0x6e, 0x73, 0x69, 0x6f, 0x6e, 0x73, 0x22, 0x3a, 0x20,
    0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x22, 0x68, 0x65, 0x69, 0x67, 0x68, 0x74, 0x22, 0x3a, 0x20,
    0x36, 0x37, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x22, 0x77, 0x65, 0x69, 0x67, 0x68, 0x74, 0x22,
    0x3a, 0x20, 0x31, 0x37, 0x35, 0x0d, 0x0a, 0x09, 0x09, 0x7d, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x22,
    0x68, 0x6f, 0x62, 0x62, 0x69, 0x65, 0x73, 0x22, 0x3a, 0x20, 0x5b, 0x7b, 0x0d, 0x0a, 0x09, 0x09,
    0x09, 0x09, 0x22, 0x74, 0x79, 0x70, 0x65, 0x22, 0x3a, 0x20, 0x22, 0x77, 0x69, 0x6e, 0x74, 0x65,
    0x72, 0x20, 0x73, 0x70, 0x6f, 0x72, 0x74, 0x73, 0x22, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09,
    0x22, 0x6e, 0x61, 0x6d, 0x65, 0x22, 0x3a, 0x20, 0x22, 0x63, 0x75, 0x72, 0x6c, 0x69, 0x6e, 0x67,
    0x22, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x7d, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x7b, 0x0d, 0x0a,
    0x09, 0x09, 0x09, 0x09, 0x22, 0x74, 0x79, 0x70, 0x65, 0x22, 0x3a, 0x20, 0x22, 0x73, 0x75, 0x6d,
    0x6d, 0x65, 0x72, 0x20, 0x73, 0x70, 0x6f, 0x72, 0x74, 0x73, 0x22, 0x2c, 0x0d, 0x0a, 0x09, 0x09,
    0x09, 0x09, 0x22, 0x6e, 0x61, 0x6d, 0x65, 0x22, 0x3a, 0x20, 0x22, 0x77, 0x61, 0x74, 0x65, 0x72,
    0x20, 0x73, 0x6b, 0x69, 0x69, 0x6e, 0x67, 0x22, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x22,
    0x64, 0x65, 0x74, 0x61, 0x69, 0x6c, 0x73, 0x22, 0x3a, 0x20, 0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x09,
    0x09, 0x09, 0x22, 0x6c, 0x6f, 0x63, 0x61, 0x74, 0x69, 0x6f, 0x6e, 0x22, 0x3a, 0x20, 0x7b, 0x0d,
    0x0a, 0x09, 0x09, 0x09, 0x09, 0x09, 0x09, 0x22, 0x6c, 0x61, 0x74, 0x22, 0x3a, 0x20, 0x34, 0x39,
    0x2e, 0x32, 0x38, 0x32, 0x37, 0x33, 0x30, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x09, 0x09,
    0x22, 0x6c, 0x6f, 0x6e, 0x67, 0x22, 0x3a, 0x20, 0x2d, 0x31, 0x32, 0x33, 0x2e, 0x31, 0x32, 0x30,
    0x37, 0x33, 0x35, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x09, 0x7d, 0x0d, 0x0a, 0x09, 0x09, 0x09,
    0x09, 0x7d, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x7d, 0x0d, 0x0a, 0x09, 0x09, 0x5d, 0x0d, 0x0a, 0x09,
    0x7d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, 0x22, 0x62, 0x72, 0x6f, 0x77, 0x6e, 0x22, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x2a, 0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x22, 0x68, 0x65, 0x69, 0x67, 0x68,
    0x74, 0x22, 0x3a, 0x20, 0x36, 0x37, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x22, 0x77, 0x65, 0x69,
    0x67, 0x68, 0x74, 0x22, 0x3a, 0x20, 0x31, 0x37, 0x35, 0x0d, 0x0a, 0x09, 0x09, 0x7d, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x02, 0x36, 0x37, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x31, 0x37, 0x35, 0x00,
    0x00, 0x00, 0x00, 0x00, 0xf3, 0x5b, 0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x22, 0x74, 0x79,
    0x70, 0x65, 0x22, 0x3a, 0x20, 0x22, 0x77, 0x69, 0x6e, 0x74, 0x65, 0x72, 0x20, 0x73, 0x70, 0x6f,
    0x72, 0x74, 0x73, 0x22, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x22, 0x6e, 0x61, 0x6d, 0x65,
    0x22, 0x3a, 0x20, 0x22, 0x63, 0x75, 0x72, 0x6c, 0x69, 0x6e, 0x67, 0x22, 0x0d, 0x0a, 0x09, 0x09,
    0x09, 0x7d, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x22,
    0x74, 0x79, 0x70, 0x65, 0x22, 0x3a, 0x20, 0x22, 0x73, 0x75, 0x6d, 0x6d, 0x65, 0x72, 0x20, 0x73,
    0x70, 0x6f, 0x72, 0x74, 0x73, 0x22, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x22, 0x6e, 0x61,
    0x6d, 0x65, 0x22, 0x3a, 0x20, 0x22, 0x77, 0x61, 0x74, 0x65, 0x72, 0x20, 0x73, 0x6b, 0x69, 0x69,
    0x6e, 0x67, 0x22, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x22, 0x64, 0x65, 0x74, 0x61, 0x69,
    0x6c, 0x73, 0x22, 0x3a, 0x20, 0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x09, 0x22, 0x6c, 0x6f,
    0x63, 0x61, 0x74, 0x69, 0x6f, 0x6e, 0x22, 0x3a, 0x20, 0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09,
    0x09, 0x09, 0x22, 0x6c, 0x61, 0x74, 0x22, 0x3a, 0x20, 0x34, 0x39, 0x2e, 0x32, 0x38, 0x32, 0x37,
    0x33, 0x30, 0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x09, 0x09, 0x22, 0x6c, 0x6f, 0x6e, 0x67,
    0x22, 0x3a, 0x20, 0x2d, 0x31, 0x32, 0x33, 0x2e, 0x31, 0x32, 0x30, 0x37, 0x33, 0x35, 0x0d, 0x0a,
    0x09, 0x09, 0x09, 0x09, 0x09, 0x7d, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x7d, 0x0d, 0x0a, 0x09,
    0x09, 0x09, 0x7d, 0x0d, 0x0a, 0x09, 0x09, 0x5d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0f, 0x22, 0x77,
    0x69, 0x6e, 0x74, 0x65, 0x72, 0x20, 0x73, 0x70, 0x6f, 0x72, 0x74, 0x73, 0x22, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x0e, 0x22, 0x77, 0x61, 0x74, 0x65, 0x72, 0x20, 0x73, 0x6b, 0x69, 0x69, 0x6e, 0x67,
    0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3d, 0x7b, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x09, 0x09,
    0x22, 0x6c, 0x61, 0x74, 0x22, 0x3a, 0x20, 0x34, 0x39, 0x2e, 0x32, 0x38, 0x32, 0x37, 0x33, 0x30,
    0x2c, 0x0d, 0x0a, 0x09, 0x09, 0x09, 0x09, 0x09, 0x09, 0x22, 0x6c, 0x6f, 0x6e, 0x67, 0x22, 0x3a,
    0x20, 0x2d, 0x31, 0x32, 0x33, 0x2e, 0x31, 0x32, 0x30, 0x37, 0x33, 0x35, 0x0d, 0x0a, 0x09, 0x09,
    0x09, 0x09, 0x09, 0x7d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0b, 0x2d, 0x31, 0x32, 0x33, 0x2e, 0x31,
    0x32, 0x30, 0x37, 0x33, 0x35,
];
