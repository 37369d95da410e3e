//! Upstream country-data provider.
//!
//! The proxy talks to the provider through the `CountryProvider` trait so the
//! HTTP layer can be exercised without the network.

pub mod rest_countries;

use async_trait::async_trait;

use crate::errors::Result;

pub use rest_countries::RestCountriesClient;

/// A successful provider answer, kept byte-for-byte for relaying.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Looks countries up by name.
///
/// Implementations return `CountryError::Upstream` for non-2xx answers,
/// `CountryError::NoResponse` when no answer arrived, and
/// `CountryError::RequestSetup` when the request could not be sent at all.
#[async_trait]
pub trait CountryProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch every country whose name matches `name`.
    async fn fetch_country(&self, name: &str) -> Result<ProviderResponse>;
}
