//! Transport
//!
//! The byte pipe a pooled connection runs over, and the factory that opens
//! one to a node.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use parking_lot::Mutex;
use socket2::{Domain, Protocol, Socket, Type};

use crate::config::Config;
use crate::error::{Result, SubdocError};
use crate::protocol::{read_frame, write_frame};

/// A connected, frame-oriented byte pipe
///
/// Methods take `&self` so a pool can shut a transport down while its
/// current owner is blocked in `receive`.
pub trait Transport: Send + Sync {
    /// Write one complete frame
    fn send(&self, frame: &[u8]) -> Result<()>;

    /// Read one complete frame
    fn receive(&self) -> Result<Bytes>;

    /// Cheap health check; false once the peer is known to be gone
    fn is_alive(&self) -> bool;

    /// Whether the underlying socket still has a peer
    fn is_connected(&self) -> bool;

    /// Tear the pipe down; further I/O fails
    fn close(&self);
}

/// Opens transports to a node
pub trait Connector: Send + Sync {
    fn connect(&self, endpoint: &str, config: &Config) -> Result<Box<dyn Transport>>;
}

// =============================================================================
// TCP
// =============================================================================

/// Opens TCP transports with keep-alive, no-delay and timeouts from config
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    fn connect(&self, endpoint: &str, config: &Config) -> Result<Box<dyn Transport>> {
        let mut last_error = None;

        for addr in endpoint.to_socket_addrs()? {
            match connect_socket(addr, config) {
                Ok(stream) => return Ok(Box::new(TcpTransport::new(stream)?)),
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SubdocError::ConfigurationInvalid(format!("'{}' resolved to no addresses", endpoint))
        }))
    }
}

fn connect_socket(addr: SocketAddr, config: &Config) -> Result<TcpStream> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_keepalive(config.keep_alive)?;
    socket.set_nodelay(config.no_delay)?;
    socket.set_read_timeout(config.read_timeout())?;
    socket.set_write_timeout(config.write_timeout())?;

    match config.connect_timeout() {
        Some(timeout) => socket.connect_timeout(&addr.into(), timeout)?,
        None => socket.connect(&addr.into())?,
    }

    Ok(socket.into())
}

/// Frame transport over a TCP stream
pub struct TcpTransport {
    /// Control handle: health probes and shutdown
    stream: TcpStream,

    /// Buffered read half
    reader: Mutex<BufReader<TcpStream>>,

    /// Buffered write half
    writer: Mutex<BufWriter<TcpStream>>,

    /// Cleared on the first I/O failure or on close
    alive: AtomicBool,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let read_stream = stream.try_clone()?;
        let write_stream = stream.try_clone()?;

        Ok(Self {
            stream,
            reader: Mutex::new(BufReader::new(read_stream)),
            writer: Mutex::new(BufWriter::new(write_stream)),
            alive: AtomicBool::new(true),
            peer_addr,
        })
    }

    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    fn mark_dead<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            tracing::debug!("I/O failure on {}: {}", self.peer_addr, e);
            self.alive.store(false, Ordering::Release);
        }
        result
    }

    /// Non-blocking peek: EOF or a hard error means the peer is gone
    fn probe(&self) -> bool {
        if self.stream.set_nonblocking(true).is_err() {
            return false;
        }
        let mut byte = [0u8; 1];
        let alive = match self.stream.peek(&mut byte) {
            Ok(0) => false,
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::WouldBlock => true,
            Err(_) => false,
        };
        alive && self.stream.set_nonblocking(false).is_ok()
    }
}

impl Transport for TcpTransport {
    fn send(&self, frame: &[u8]) -> Result<()> {
        let mut writer = self.writer.lock();
        self.mark_dead(write_frame(&mut *writer, frame))
    }

    fn receive(&self) -> Result<Bytes> {
        let mut reader = self.reader.lock();
        self.mark_dead(read_frame(&mut *reader))
    }

    fn is_alive(&self) -> bool {
        if !self.alive.load(Ordering::Acquire) {
            return false;
        }
        let alive = self.probe();
        if !alive {
            self.alive.store(false, Ordering::Release);
        }
        alive
    }

    fn is_connected(&self) -> bool {
        self.alive.load(Ordering::Acquire) && self.stream.peer_addr().is_ok()
    }

    fn close(&self) {
        self.alive.store(false, Ordering::Release);
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            // Already reset by the peer
            tracing::trace!("Shutdown of {} failed: {}", self.peer_addr, e);
        }
    }
}
