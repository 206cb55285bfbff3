//! Connection Pool
//!
//! Bounded, authenticated, health-checked connections to one node.
//!
//! ## Accounting
//! `outstanding` counts every connection the pool is responsible for: idle,
//! handed out, or being created. A slot is reserved under the lock before a
//! connection is created and creation itself runs outside the lock, so slow
//! connects and handshakes never stall other callers while
//! `outstanding <= max_pool_size` still holds.
//!
//! ## Lifecycle
//! ```text
//! Created ─▶ Authenticating ─▶ Idle ⇄ InUse ─▶ Dead | Closed
//! ```

use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

use crate::config::Config;
use crate::error::{Result, SubdocError};

use super::auth::{authenticate, PlainMechanism, SaslMechanism};
use super::{Connection, Connector, TcpConnector};

struct PoolState {
    /// Idle connections, served FIFO
    idle: VecDeque<Arc<Connection>>,

    /// Every connection created, for disposal
    tracked: Vec<Weak<Connection>>,

    /// Idle + in use + being created
    outstanding: usize,

    disposed: bool,
}

struct PoolInner {
    endpoint: String,
    config: Config,
    connector: Arc<dyn Connector>,
    mechanism: Option<Arc<dyn SaslMechanism>>,
    state: Mutex<PoolState>,
    available: Condvar,
    next_id: AtomicU64,
    span: tracing::Span,
}

/// Where `acquire` got its connection from
enum Slot {
    Idle(Arc<Connection>),
    Reserved,
}

/// Connection pool handle
///
/// Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    /// Pool over TCP, authenticating with `PLAIN` when credentials are set
    pub fn new(endpoint: impl Into<String>, config: Config) -> Result<Self> {
        let mechanism = match (&config.username, &config.password) {
            (Some(username), Some(password)) => Some(Arc::new(PlainMechanism::new(
                username.clone(),
                password.clone(),
            )) as Arc<dyn SaslMechanism>),
            _ => None,
        };
        Self::with_connector(endpoint, config, Arc::new(TcpConnector), mechanism)
    }

    /// Pool over any transport and credential provider
    ///
    /// Validates the config, then creates and authenticates
    /// `min_pool_size` connections before returning.
    pub fn with_connector(
        endpoint: impl Into<String>,
        config: Config,
        connector: Arc<dyn Connector>,
        mechanism: Option<Arc<dyn SaslMechanism>>,
    ) -> Result<Self> {
        config.validate()?;

        let endpoint = endpoint.into();
        let span = tracing::debug_span!("pool", endpoint = %endpoint);
        let min_pool_size = config.min_pool_size;

        let pool = ConnectionPool {
            inner: Arc::new(PoolInner {
                state: Mutex::new(PoolState {
                    idle: VecDeque::with_capacity(config.max_pool_size),
                    tracked: Vec::new(),
                    outstanding: 0,
                    disposed: false,
                }),
                endpoint,
                config,
                connector,
                mechanism,
                available: Condvar::new(),
                next_id: AtomicU64::new(1),
                span,
            }),
        };

        {
            let _entered = pool.inner.span.enter();
            tracing::debug!("Pre-allocating {} connections", min_pool_size);
        }
        if let Err(e) = pool.inner.prime(min_pool_size) {
            pool.inner.dispose();
            return Err(e);
        }

        Ok(pool)
    }

    /// Take a connection, waiting up to `queue_timeout` for one to free up
    ///
    /// Dead idle connections are closed and replaced on the way out.
    pub fn acquire(&self) -> Result<PooledConnection> {
        let inner = &self.inner;
        let _entered = inner.span.enter();
        tracing::trace!("Acquiring connection");

        let deadline = Instant::now() + inner.config.queue_timeout();
        let mut timed_out = false;
        let mut state = inner.state.lock();

        let slot = loop {
            if state.disposed {
                return Err(SubdocError::PoolDisposed);
            }
            if let Some(connection) = state.idle.pop_front() {
                break Slot::Idle(connection);
            }
            if state.outstanding < inner.config.max_pool_size {
                state.outstanding += 1;
                break Slot::Reserved;
            }
            if timed_out {
                tracing::warn!(
                    "No connection available within {:?} (max_pool_size {})",
                    inner.config.queue_timeout(),
                    inner.config.max_pool_size
                );
                return Err(SubdocError::QueueExhausted {
                    queue_timeout: inner.config.queue_timeout(),
                    max_pool_size: inner.config.max_pool_size,
                });
            }
            timed_out = inner.available.wait_until(&mut state, deadline).timed_out();
        };
        drop(state);

        let connection = match slot {
            Slot::Idle(connection) if connection.is_alive() => connection,
            Slot::Idle(connection) => {
                tracing::debug!("Connection {} is dead, replacing", connection.id());
                connection.close();
                inner.create_in_slot()?
            }
            Slot::Reserved => inner.create_in_slot()?,
        };

        tracing::debug!("Acquired connection {}", connection.id());
        Ok(PooledConnection::new(Arc::clone(inner), connection))
    }

    /// Return a connection to the tail of its pool's idle queue
    ///
    /// A connection always goes back to the pool that handed it out, even
    /// when released through another pool's handle.
    pub fn release(&self, mut connection: PooledConnection) {
        self.warn_if_foreign(&connection);
        if let Some(conn) = connection.take() {
            connection.pool.give_back(conn);
        }
    }

    /// Close a connection instead of returning it, freeing its slot
    pub fn close(&self, mut connection: PooledConnection) {
        self.warn_if_foreign(&connection);
        if let Some(conn) = connection.take() {
            let _entered = connection.pool.span.enter();
            conn.close();
            connection.pool.free_slots(1);
        }
    }

    fn warn_if_foreign(&self, connection: &PooledConnection) {
        if !Arc::ptr_eq(&connection.pool, &self.inner) {
            let _entered = self.inner.span.enter();
            tracing::warn!(
                "Connection {} belongs to the pool on {}",
                connection.id(),
                connection.pool.endpoint
            );
        }
    }

    /// Replace every idle connection with a fresh one
    ///
    /// Used after the node comes back from an outage. Re-primes to
    /// `min_pool_size`, bounded by the slots connections in use leave free.
    pub fn resurrect(&self) -> Result<()> {
        let inner = &self.inner;
        let _entered = inner.span.enter();

        let drained: Vec<Arc<Connection>> = {
            let mut state = inner.state.lock();
            if state.disposed {
                return Err(SubdocError::PoolDisposed);
            }
            let drained: Vec<_> = state.idle.drain(..).collect();
            state.outstanding -= drained.len();
            drained
        };

        tracing::debug!("Resurrecting: closing {} idle connections", drained.len());
        for connection in drained {
            connection.close();
        }

        inner.prime(inner.config.min_pool_size)
    }

    /// Close every connection this pool ever created and mark it dead
    ///
    /// Idempotent. Callers blocked in `acquire` fail with `PoolDisposed`.
    pub fn dispose(&self) {
        let _entered = self.inner.span.enter();
        if self.inner.dispose() {
            tracing::debug!("Disposed pool on {}", self.inner.endpoint);
        }
    }

    /// Open a throw-away connection and report whether it connected
    pub fn ping(&self) -> Result<bool> {
        let inner = &self.inner;
        let _entered = inner.span.enter();

        if inner.state.lock().disposed {
            return Err(SubdocError::PoolDisposed);
        }
        let connection = inner.create()?;
        let connected = connection.is_connected();
        tracing::debug!(
            "Pinging {} on {}",
            if connected { "succeeded" } else { "failed" },
            inner.endpoint
        );
        connection.close();
        Ok(connected)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// False once disposed
    pub fn is_alive(&self) -> bool {
        !self.inner.state.lock().disposed
    }

    /// Connections waiting in the idle queue
    pub fn idle_count(&self) -> usize {
        self.inner.state.lock().idle.len()
    }

    /// Idle + in use + being created
    pub fn outstanding(&self) -> usize {
        self.inner.state.lock().outstanding
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}

impl PoolInner {
    /// Open, authenticate and track one connection
    fn create(&self) -> Result<Arc<Connection>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Creating connection {} on {}", id, self.endpoint);

        let transport = self.connector.connect(&self.endpoint, &self.config)?;
        let connection = Arc::new(Connection::new(id, transport));

        if let Some(mechanism) = &self.mechanism {
            let authenticated = authenticate(&connection, mechanism).map_err(|e| {
                connection.close();
                e
            })?;
            if !authenticated {
                tracing::warn!("Authentication failed on {}", self.endpoint);
                connection.close();
                return Err(SubdocError::AuthenticationFailed {
                    endpoint: self.endpoint.clone(),
                });
            }
        }

        let mut state = self.state.lock();
        state.tracked.retain(|weak| weak.strong_count() > 0);
        state.tracked.push(Arc::downgrade(&connection));
        drop(state);

        tracing::debug!("Created connection {} on {}", id, self.endpoint);
        Ok(connection)
    }

    /// Create into a slot already counted in `outstanding`
    ///
    /// The slot is given back if creation fails or the pool was disposed
    /// meanwhile.
    fn create_in_slot(&self) -> Result<Arc<Connection>> {
        let connection = match self.create() {
            Ok(connection) => connection,
            Err(e) => {
                self.free_slots(1);
                return Err(e);
            }
        };

        if self.state.lock().disposed {
            connection.close();
            self.free_slots(1);
            return Err(SubdocError::PoolDisposed);
        }
        Ok(connection)
    }

    /// Create up to `count` idle connections within the free slots
    fn prime(&self, count: usize) -> Result<()> {
        let reserved = {
            let mut state = self.state.lock();
            if state.disposed {
                return Err(SubdocError::PoolDisposed);
            }
            let free = self.config.max_pool_size.saturating_sub(state.outstanding);
            let reserved = count.min(free);
            state.outstanding += reserved;
            reserved
        };

        for created in 0..reserved {
            match self.create_in_slot() {
                Ok(connection) => self.give_back(connection),
                Err(e) => {
                    // create_in_slot freed the failing slot
                    self.free_slots(reserved - created - 1);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Queue a connection again, or drop it if it cannot be reused
    fn give_back(&self, connection: Arc<Connection>) {
        let mut state = self.state.lock();

        if state.disposed || connection.is_closed() || connection.has_failed() {
            state.outstanding -= 1;
            drop(state);
            tracing::debug!("Discarding connection {}", connection.id());
            connection.close();
            self.available.notify_one();
            return;
        }

        tracing::trace!("Released connection {}", connection.id());
        state.idle.push_back(connection);
        drop(state);
        self.available.notify_one();
    }

    fn free_slots(&self, count: usize) {
        if count == 0 {
            return;
        }
        let mut state = self.state.lock();
        state.outstanding -= count;
        drop(state);
        for _ in 0..count {
            self.available.notify_one();
        }
    }

    /// Returns whether this call did the disposing
    fn dispose(&self) -> bool {
        let (idle, tracked) = {
            let mut state = self.state.lock();
            if state.disposed {
                return false;
            }
            state.disposed = true;
            let idle: Vec<_> = state.idle.drain(..).collect();
            state.outstanding -= idle.len();
            (idle, std::mem::take(&mut state.tracked))
        };
        self.available.notify_all();

        for connection in idle {
            connection.close();
        }
        for connection in tracked.iter().filter_map(Weak::upgrade) {
            connection.close();
        }
        true
    }
}

impl Drop for PoolInner {
    fn drop(&mut self) {
        if self.dispose() {
            tracing::warn!("Pool on {} dropped without dispose", self.endpoint);
        }
    }
}

/// A connection on loan from the pool
///
/// Dropping it returns the connection, like `ConnectionPool::release`.
pub struct PooledConnection {
    pool: Arc<PoolInner>,
    connection: Arc<Connection>,

    /// Set once released or closed explicitly
    returned: bool,
}

impl PooledConnection {
    fn new(pool: Arc<PoolInner>, connection: Arc<Connection>) -> Self {
        Self {
            pool,
            connection,
            returned: false,
        }
    }

    fn take(&mut self) -> Option<Arc<Connection>> {
        if std::mem::replace(&mut self.returned, true) {
            return None;
        }
        Some(Arc::clone(&self.connection))
    }
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.connection
    }
}

impl std::fmt::Debug for PooledConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PooledConnection")
            .field(&self.connection)
            .finish()
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(connection) = self.take() {
            self.pool.give_back(connection);
        }
    }
}
