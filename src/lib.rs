//! # subdockv
//!
//! Client core for the sub-document extension of a binary key-value
//! protocol:
//! - Path + flag extras encoding for single-path mutations
//! - Request assembly for mutations and multi-path lookups
//! - Bounded, authenticated connection pooling
//! - Merging multi-path lookup results into one document
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                               │
//! │                  (lookup_in / mutate_in)                     │
//! └──────────┬──────────────────┬──────────────────┬────────────┘
//!            │                  │                  │
//!            ▼                  ▼                  ▼
//!   ┌─────────────────┐ ┌──────────────┐ ┌──────────────────┐
//!   │ OperationBuilder│ │ConnectionPool│ │ProjectionDecoder │
//!   │   (PathCodec)   │ │ (SASL auth)  │ │  (value tree)    │
//!   └────────┬────────┘ └──────┬───────┘ └────────┬─────────┘
//!            │                 │                  │
//!            └─────────────────▼──────────────────┘
//!                     ┌─────────────────┐
//!                     │ Packet framing  │
//!                     │  (24-byte hdr)  │
//!                     └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod subdoc;
pub mod projection;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SubdocError, Result};
pub use config::Config;
pub use client::{Client, LookupResult, MutationResult};
pub use network::ConnectionPool;
pub use projection::Projection;
pub use subdoc::{DocFlags, OperationSpec, PathFlags, RequestOptions};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of subdockv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
