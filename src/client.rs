//! Client
//!
//! Blocking facade over the pool, the builder and the projection decoder.
//!
//! ## Round Trip
//! ```text
//!   specs ─▶ OperationBuilder ─▶ frame ─▶ PooledConnection ─▶ node
//!                                                              │
//!   LookupResult ◀─ ProjectionDecoder ◀─────── response ◀──────┘
//!   MutationResult ◀─ status + read_extras ◀───┘
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{Result, SubdocError};
use crate::network::{ConnectionPool, PooledConnection};
use crate::projection::{Projection, ProjectionDecoder};
use crate::protocol::{decode_header, ResponseStatus};
use crate::subdoc::{
    DocFlags, JsonTranscoder, MutationToken, OperationBuilder, OperationSpec, RequestOptions,
    Transcoder,
};

/// Outcome of `Client::lookup_in`
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub cas: u64,
    /// The requested specs with their per-path `status` filled in
    pub specs: Vec<OperationSpec>,
    pub projection: Projection,
}

impl LookupResult {
    /// Whether every path was found
    pub fn all_succeeded(&self) -> bool {
        self.specs.iter().all(OperationSpec::succeeded)
    }
}

/// Outcome of `Client::mutate_in`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    pub cas: u64,
    /// Present when the node reports mutation tokens
    pub token: Option<MutationToken>,
}

/// Sub-document client for one node
pub struct Client {
    pool: ConnectionPool,
    builder: Mutex<OperationBuilder>,
    decoder: ProjectionDecoder,
    next_opaque: AtomicU32,
}

impl Client {
    /// Connect over TCP with JSON values
    pub fn connect(endpoint: impl Into<String>, config: Config) -> Result<Self> {
        let pool = ConnectionPool::new(endpoint, config)?;
        Ok(Self::with_pool(pool, Arc::new(JsonTranscoder)))
    }

    pub fn with_pool(pool: ConnectionPool, transcoder: Arc<dyn Transcoder>) -> Self {
        Self {
            pool,
            builder: Mutex::new(OperationBuilder::new(Arc::clone(&transcoder))),
            decoder: ProjectionDecoder::new(transcoder),
            next_opaque: AtomicU32::new(1),
        }
    }

    /// Fetch several paths of one document and merge them
    ///
    /// Paths the node could not resolve are left out of the projection;
    /// their status is kept on the returned specs.
    pub fn lookup_in(&self, key: &str, mut specs: Vec<OperationSpec>) -> Result<LookupResult> {
        let opaque = self.opaque();
        let options = RequestOptions {
            opaque,
            ..RequestOptions::default()
        };
        let frame = self
            .builder
            .lock()
            .build_lookup(key.as_bytes(), &specs, DocFlags::NONE, options)?;

        let connection = self.pool.acquire()?;
        connection.send(&frame)?;
        let response = connection.receive()?;

        let header = decode_header(&response)?;
        self.give_back(connection, opaque, header.opaque)?;

        let status = header.status();
        if !matches!(
            status,
            ResponseStatus::Success | ResponseStatus::SubdocMultiPathFailure
        ) {
            tracing::debug!("Lookup of '{}' failed: {:?}", key, status);
            return Err(SubdocError::Server { status });
        }

        let projection = self.decoder.decode(response, &mut specs)?;
        Ok(LookupResult {
            cas: header.cas,
            specs,
            projection,
        })
    }

    /// Apply one single-path mutation
    pub fn mutate_in(
        &self,
        key: &str,
        spec: &OperationSpec,
        options: RequestOptions,
    ) -> Result<MutationResult> {
        let opaque = self.opaque();
        let options = RequestOptions { opaque, ..options };
        let frame = self
            .builder
            .lock()
            .build_mutation(key.as_bytes(), spec, options)?;

        let connection = self.pool.acquire()?;
        let packet = connection.round_trip(&frame)?;
        self.give_back(connection, opaque, packet.header.opaque)?;

        let status = packet.status();
        if !status.is_success() {
            tracing::debug!("Mutation of '{}' at '{}' failed: {:?}", key, spec.path, status);
            return Err(SubdocError::Server { status });
        }

        Ok(MutationResult {
            cas: packet.header.cas,
            token: OperationBuilder::read_extras(&packet.extras, options.vbucket),
        })
    }

    /// Liveness check against the node
    pub fn ping(&self) -> Result<bool> {
        self.pool.ping()
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Close every connection; later calls fail with `PoolDisposed`
    pub fn dispose(&self) {
        self.pool.dispose();
    }

    fn opaque(&self) -> u32 {
        self.next_opaque.fetch_add(1, Ordering::Relaxed)
    }

    /// Return the connection, or close it if the reply answered some other
    /// request and the stream is out of step
    fn give_back(&self, connection: PooledConnection, sent: u32, received: u32) -> Result<()> {
        if sent == received {
            self.pool.release(connection);
            return Ok(());
        }
        tracing::warn!(
            "Connection {} answered opaque {} to request {}",
            connection.id(),
            received,
            sent
        );
        self.pool.close(connection);
        Err(SubdocError::Protocol(format!(
            "opaque mismatch: sent {}, received {}",
            sent, received
        )))
    }
}

