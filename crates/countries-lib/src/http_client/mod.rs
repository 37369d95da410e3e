//! Shared HTTP client with connection pooling.
//!
//! Wraps `reqwest::Client`. The client is cheap to clone (internally
//! `Arc`-ed) and can be shared across tasks.

use std::time::Duration;

use crate::errors::{CountryError, Result};

/// User agent sent on every outbound request.
pub const USER_AGENT: &str = concat!("countries/", env!("CARGO_PKG_VERSION"));

/// Idle pooled connections are dropped after this long.
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const POOL_MAX_IDLE_PER_HOST: usize = 16;

#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Build a client. `timeout` bounds the whole request when set; `None`
    /// leaves reqwest's default (no total timeout).
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(CountryError::Http)?;
        Ok(Self { inner })
    }

    /// Build a client with no timeout override.
    pub fn from_defaults() -> Result<Self> {
        Self::new(None)
    }

    /// Get the underlying `reqwest::Client`.
    pub fn client(&self) -> &reqwest::Client {
        &self.inner
    }
}
