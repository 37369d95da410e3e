//! Application configuration.
//!
//! `AppConfig` is built once at process start from environment variables,
//! optionally overridden by CLI flags, and then passed by reference to the
//! proxy and the client session.

use std::time::Duration;

use crate::errors::{CountryError, Result};
use crate::presenter::{GiniYearPolicy, NativeNamePolicy, PresentPolicy};

/// Default REST Countries base URL (v3.1).
pub const DEFAULT_PROVIDER_URL: &str = "https://restcountries.com/v3.1";

/// Default base URL the client uses to reach the proxy.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3001";

pub const ENV_PROVIDER_URL: &str = "COUNTRIES_PROVIDER_URL";
pub const ENV_PROXY_URL: &str = "COUNTRIES_PROXY_URL";
pub const ENV_MAPS_API_KEY: &str = "COUNTRIES_MAPS_API_KEY";
pub const ENV_NATIVE_LANG: &str = "COUNTRIES_NATIVE_LANG";
pub const ENV_GINI_YEAR: &str = "COUNTRIES_GINI_YEAR";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "COUNTRIES_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the upstream country-data provider.
    pub provider_url: String,
    /// Base URL of the lookup proxy, used by the client session.
    pub proxy_url: String,
    /// API key for the map embed. Without one the client links to OpenStreetMap.
    pub maps_api_key: Option<String>,
    /// Total timeout for client-side requests to the proxy. `None` keeps
    /// reqwest's default. The proxy itself never sets one.
    pub http_timeout: Option<Duration>,
    pub present: PresentPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider_url: DEFAULT_PROVIDER_URL.into(),
            proxy_url: DEFAULT_PROXY_URL.into(),
            maps_api_key: None,
            http_timeout: None,
            present: PresentPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_PROVIDER_URL) {
            config.provider_url = url;
        }
        if let Some(url) = get(ENV_PROXY_URL) {
            config.proxy_url = url;
        }
        config.maps_api_key = get(ENV_MAPS_API_KEY);

        if let Some(lang) = get(ENV_NATIVE_LANG) {
            config.present.native_name = NativeNamePolicy::Prefer(lang);
        }
        if let Some(year) = get(ENV_GINI_YEAR) {
            config.present.gini_year = GiniYearPolicy::parse(&year)?;
        }
        if let Some(secs) = get(ENV_HTTP_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CountryError::Config(format!(
                    "{ENV_HTTP_TIMEOUT_SECS} must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            config.http_timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that both base URLs are absolute http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("provider_url", &self.provider_url), ("proxy_url", &self.proxy_url)] {
            let url = reqwest::Url::parse(value)
                .map_err(|e| CountryError::Config(format!("{name} '{value}' is not a URL: {e}")))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(CountryError::Config(format!(
                    "{name} '{value}' must use http or https"
                )));
            }
        }
        Ok(())
    }
}
