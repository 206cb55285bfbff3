//! Configuration for subdockv
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{Result, SubdocError};

/// Main configuration for a node's connection pool
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Pool Configuration
    // -------------------------------------------------------------------------
    /// Connections created (and authenticated) when the pool is built,
    /// and again on every resurrect
    pub min_pool_size: usize,

    /// Upper bound on connections outstanding at once (idle + in use)
    pub max_pool_size: usize,

    /// How long `acquire` waits for a connection (milliseconds)
    pub queue_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// TCP connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Connection read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,

    /// Enable SO_KEEPALIVE
    pub keep_alive: bool,

    /// Disable Nagle's algorithm
    pub no_delay: bool,

    // -------------------------------------------------------------------------
    // Credentials
    // -------------------------------------------------------------------------
    /// SASL username; authentication is skipped when unset
    pub username: Option<String>,

    /// SASL password
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_pool_size: 1,
            max_pool_size: 4,
            queue_timeout_ms: 2500,
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            keep_alive: true,
            no_delay: true,
            username: None,
            password: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("min_pool_size", &self.min_pool_size)
            .field("max_pool_size", &self.max_pool_size)
            .field("queue_timeout_ms", &self.queue_timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .field("write_timeout_ms", &self.write_timeout_ms)
            .field("keep_alive", &self.keep_alive)
            .field("no_delay", &self.no_delay)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check pool bounds
    ///
    /// Sizes are unsigned and timeouts unsigned milliseconds, so only the
    /// ordering of min and max can be wrong.
    pub fn validate(&self) -> Result<()> {
        if self.max_pool_size < self.min_pool_size {
            return Err(SubdocError::ConfigurationInvalid(format!(
                "max_pool_size ({}) must be >= min_pool_size ({})",
                self.max_pool_size, self.min_pool_size
            )));
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(SubdocError::ConfigurationInvalid(
                "username and password must be set together".to_string(),
            ));
        }
        Ok(())
    }

    pub fn queue_timeout(&self) -> Duration {
        Duration::from_millis(self.queue_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.write_timeout_ms)
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the number of connections kept ready
    pub fn min_pool_size(mut self, size: usize) -> Self {
        self.config.min_pool_size = size;
        self
    }

    /// Set the maximum number of outstanding connections
    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.config.max_pool_size = size;
        self
    }

    /// Set the acquire wait limit (in milliseconds)
    pub fn queue_timeout_ms(mut self, ms: u64) -> Self {
        self.config.queue_timeout_ms = ms;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn keep_alive(mut self, enabled: bool) -> Self {
        self.config.keep_alive = enabled;
        self
    }

    pub fn no_delay(mut self, enabled: bool) -> Self {
        self.config.no_delay = enabled;
        self
    }

    /// Set SASL PLAIN credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
