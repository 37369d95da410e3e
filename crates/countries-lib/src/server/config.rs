//! HTTP server configuration types.

use crate::errors::{CountryError, Result};

/// Port the proxy listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 3001;

/// Graceful shutdown timeout in seconds.
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Listener address for the lookup proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on. `0` lets the OS pick one.
    pub port: u16,
    /// Bind address (e.g. "0.0.0.0").
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: "0.0.0.0".into(),
        }
    }
}

impl ServerConfig {
    /// Validate the configuration, returning an error if the host is blank.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(CountryError::Config("server host must not be empty".into()));
        }
        Ok(())
    }

    /// Returns the socket address string "host:port".
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
