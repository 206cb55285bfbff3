//! Network Module
//!
//! Pooled, authenticated connections to a single node.
//!
//! ## Architecture
//! - `Connector` opens a `Transport` (TCP by default)
//! - `Connection` wraps it with an id and close-once semantics
//! - `ConnectionPool` bounds, authenticates and recycles connections

mod auth;
mod connection;
mod pool;
mod transport;

pub use auth::{authenticate, AuthState, PlainMechanism, SaslMechanism};
pub use connection::Connection;
pub use pool::{ConnectionPool, PooledConnection};
pub use transport::{Connector, TcpConnector, TcpTransport, Transport};
