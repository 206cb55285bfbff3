//! Connection
//!
//! A transport with an identity and a close-once guarantee.

use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;

use crate::error::{Result, SubdocError};
use crate::protocol::{decode_packet, Packet};

use super::Transport;

/// One authenticated link to the node
///
/// Shared between its current owner and the pool's tracking list; the
/// tracking list only holds a `Weak`.
pub struct Connection {
    /// Instance id, unique within the pool
    id: u64,

    transport: Box<dyn Transport>,

    /// Set once by `close`
    closed: AtomicBool,

    /// Set on the first send/receive failure
    failed: AtomicBool,
}

impl Connection {
    pub fn new(id: u64, transport: Box<dyn Transport>) -> Self {
        Self {
            id,
            transport,
            closed: AtomicBool::new(false),
            failed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn send(&self, frame: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let result = self.transport.send(frame);
        self.note(result)
    }

    pub fn receive(&self) -> Result<Bytes> {
        self.ensure_open()?;
        let result = self.transport.receive();
        self.note(result)
    }

    /// Send a request and decode the reply
    pub fn round_trip(&self, frame: &[u8]) -> Result<Packet> {
        self.send(frame)?;
        let reply = self.receive()?;
        self.note(decode_packet(reply))
    }

    pub fn is_alive(&self) -> bool {
        !self.is_closed() && !self.has_failed() && self.transport.is_alive()
    }

    pub fn is_connected(&self) -> bool {
        !self.is_closed() && self.transport.is_connected()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// A failed connection is discarded instead of re-queued
    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }

    /// Close the transport; only the first call does anything
    ///
    /// Returns whether this call performed the close.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        tracing::debug!("Closing connection {}", self.id);
        self.transport.close();
        true
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(SubdocError::ConnectionClosed);
        }
        Ok(())
    }

    fn note<T>(&self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.failed.store(true, Ordering::Release);
        }
        result
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .field("failed", &self.has_failed())
            .finish()
    }
}
