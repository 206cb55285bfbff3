//! Error types for subdockv
//!
//! Provides a unified error type for all operations.

use std::time::Duration;

use thiserror::Error;

use crate::protocol::ResponseStatus;

/// Result type alias using SubdocError
pub type Result<T> = std::result::Result<T, SubdocError>;

/// Unified error type for subdockv operations
#[derive(Debug, Error)]
pub enum SubdocError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    // -------------------------------------------------------------------------
    // Pool / Connection Errors
    // -------------------------------------------------------------------------
    #[error("Authentication failed on {endpoint}")]
    AuthenticationFailed { endpoint: String },

    #[error(
        "Timeout occurred while waiting for a connection. \
         Current queue_timeout is {queue_timeout:?} and max_pool_size is {max_pool_size}; \
         try increasing queue_timeout or max_pool_size"
    )]
    QueueExhausted {
        queue_timeout: Duration,
        max_pool_size: usize,
    },

    #[error("Connection pool has been disposed")]
    PoolDisposed,

    #[error("Connection is closed")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Path too long: {length} bytes (max {max})")]
    PathTooLong { length: usize, max: usize },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Truncated frame: need {needed} bytes, have {available}")]
    TruncatedFrame { needed: usize, available: usize },

    #[error("Value is not bracket-delimited and cannot be spliced into an array")]
    InvalidArrayElementEncoding,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Too many specs: {count} (max {max})")]
    TooManySpecs { count: usize, max: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Projection Errors
    // -------------------------------------------------------------------------
    #[error("Projection conflict at '{path}': incompatible shapes")]
    ProjectionConflict { path: String },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    #[error("Server returned {status:?}")]
    Server { status: ResponseStatus },
}
