//! Lookup proxy HTTP server.
//!
//! Serves `GET /country/{name}` by relaying the provider's answer, plus a
//! health check. Any origin may call it.

pub mod config;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::errors::{CountryError, Result};
use crate::http_client::HttpClient;
use crate::provider::{CountryProvider, RestCountriesClient};
use config::{ServerConfig, SHUTDOWN_TIMEOUT_SECS};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared state for Axum HTTP handlers.
pub struct AppState {
    pub provider: Arc<dyn CountryProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CountryProvider>) -> Self {
        Self { provider }
    }

    /// Build state backed by the REST Countries client from `config`.
    ///
    /// The proxy never overrides the request timeout, so the client is
    /// built without one regardless of `config.http_timeout`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = HttpClient::from_defaults()?;
        let provider = RestCountriesClient::new(http, config.provider_url.clone());
        Ok(Self::new(Arc::new(provider)))
    }
}

// ---------------------------------------------------------------------------
// ShutdownHandle
// ---------------------------------------------------------------------------

/// Handle returned by `start_server` that allows triggering graceful shutdown.
pub struct ShutdownHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ShutdownHandle {
    /// The address the server actually bound, useful when port 0 was asked for.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signal graceful shutdown and wait up to `SHUTDOWN_TIMEOUT_SECS` for
    /// in-flight requests to drain.
    pub async fn shutdown(self) -> Result<()> {
        self.shutdown_within(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS))
            .await
    }

    /// Signal graceful shutdown and wait at most `grace` for the server task.
    /// After that the server task is aborted and shutdown proceeds; connections
    /// still open end with the runtime.
    pub async fn shutdown_within(mut self, grace: Duration) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            if tx.send(()).is_err() {
                tracing::debug!("Server already stopped");
            }
        }
        let Some(mut task) = self.task.take() else {
            return Ok(());
        };
        match tokio::time::timeout(grace, &mut task).await {
            Ok(joined) => joined.map_err(|e| CountryError::Server {
                status: 500,
                message: format!("Server task failed: {}", e),
            }),
            Err(_) => {
                tracing::warn!(
                    grace_ms = grace.as_millis() as u64,
                    "In-flight requests did not finish in time, aborting server"
                );
                task.abort();
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Router construction
// ---------------------------------------------------------------------------

/// CORS policy: any origin, method and header.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the axum router with both endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/country/{name}", get(handlers::lookup_country))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

// ---------------------------------------------------------------------------
// Server startup
// ---------------------------------------------------------------------------

/// Bind and start the proxy in a background task.
///
/// Returns a `ShutdownHandle` that can be used to trigger graceful shutdown.
pub async fn start_server(config: ServerConfig, state: Arc<AppState>) -> Result<ShutdownHandle> {
    config.validate()?;

    let router = build_router(state);
    let addr = config.addr();

    let listener = TcpListener::bind(&addr).await.map_err(|e| CountryError::Server {
        status: 500,
        message: format!("Failed to bind to {}: {}", addr, e),
    })?;

    let local_addr = listener.local_addr().map_err(|e| CountryError::Server {
        status: 500,
        message: format!("Failed to get local address: {}", e),
    })?;

    tracing::info!(addr = %local_addr, "Server running on http://{}", local_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let serve = axum::serve(listener, router)
            .with_graceful_shutdown(graceful_shutdown_signal(shutdown_rx));

        if let Err(e) = serve.await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(ShutdownHandle {
        local_addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

/// Future that resolves when the shutdown signal is received.
async fn graceful_shutdown_signal(shutdown_rx: oneshot::Receiver<()>) {
    let _ = shutdown_rx.await;
    tracing::info!(
        "Shutdown signal received, allowing {}s for in-flight requests",
        SHUTDOWN_TIMEOUT_SECS
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
