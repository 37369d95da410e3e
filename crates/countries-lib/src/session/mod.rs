//! Client-side search session.
//!
//! Owns the state a search page keeps between submissions: whether a search
//! is in flight and which country is currently displayed. Each search makes
//! exactly one request to the lookup proxy.

use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Url;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::country::{check_query_length, parse_result_set};
use crate::errors::{CountryError, Result};
use crate::http_client::HttpClient;
use crate::presenter::{DisplayRecord, PresentPolicy};
use crate::resolver::{self, Resolution};

/// What a completed search did to the display.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A record was selected and now replaces whatever was shown.
    Displayed(DisplayRecord),
    /// The proxy returned an empty list; the display was cleared.
    Cleared,
}

pub struct SearchSession {
    http: HttpClient,
    proxy_url: String,
    policy: PresentPolicy,
    in_flight: AtomicBool,
    current: RwLock<Option<DisplayRecord>>,
}

/// Clears the in-flight flag when dropped, whichever way the search ends.
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl SearchSession {
    pub fn new(http: HttpClient, proxy_url: impl Into<String>, policy: PresentPolicy) -> Self {
        Self {
            http,
            proxy_url: proxy_url.into(),
            policy,
            in_flight: AtomicBool::new(false),
            current: RwLock::new(None),
        }
    }

    /// Build a session from the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = HttpClient::new(config.http_timeout)?;
        Ok(Self::new(http, config.proxy_url.clone(), config.present.clone()))
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The record currently on display, if any.
    pub async fn current(&self) -> Option<DisplayRecord> {
        self.current.read().await.clone()
    }

    /// Mark a search as started. Fails if one is already running.
    pub fn begin_search(&self) -> Result<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| CountryError::SearchInFlight)?;
        Ok(InFlightGuard {
            flag: &self.in_flight,
        })
    }

    /// URL of the proxy's lookup endpoint for `name`.
    pub fn lookup_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.proxy_url).map_err(|e| {
            CountryError::Config(format!("invalid proxy URL '{}': {}", self.proxy_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                CountryError::Config(format!("proxy URL '{}' cannot carry a path", self.proxy_url))
            })?
            .pop_if_empty()
            .push("country")
            .push(name);
        Ok(url)
    }

    /// Run one search.
    ///
    /// Blank queries are rejected before any request. On failure the
    /// displayed record is left as it was.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        if query.trim().is_empty() {
            return Err(CountryError::EmptyQuery);
        }
        check_query_length(query)?;

        let _guard = self.begin_search()?;
        let url = self.lookup_url(query)?;
        tracing::info!(query, url = %url, "Searching country");

        let resp = self.http.client().get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read lookup error body");
                    format!("<body unavailable: {e}>")
                }
            };
            tracing::warn!(status = status.as_u16(), query, "Lookup failed");
            return Err(CountryError::Lookup {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        let results = parse_result_set(&body)?;

        let outcome = match resolver::resolve(&results, query, &self.policy)? {
            Resolution::Match(display) => {
                *self.current.write().await = Some(display.clone());
                SearchOutcome::Displayed(display)
            }
            Resolution::NoMatch => {
                *self.current.write().await = None;
                SearchOutcome::Cleared
            }
        };
        Ok(outcome)
    }
}
