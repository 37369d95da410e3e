//! HTTP endpoint handlers.
//!
//! The lookup handler relays whatever the provider said. Only transport
//! failures and the length guard produce bodies of our own.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::country::check_query_length;
use crate::errors::{CountryError, NO_RESPONSE_MESSAGE, REQUEST_SETUP_MESSAGE};

use super::AppState;

/// Body returned when the name exceeds the length guard.
pub const QUERY_TOO_LONG_MESSAGE: &str = "Country name is too long";

/// Relay a provider body with its own status and content type.
fn relay(status: u16, content_type: Option<&str>, body: Vec<u8>) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = content_type
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let mut response = (status, body).into_response();
    response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    response
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Maps a `CountryError` to the response the proxy sends.
pub fn error_to_response(err: &CountryError) -> Response {
    match err {
        CountryError::Upstream {
            status,
            content_type,
            body,
        } => relay(*status, content_type.as_deref(), body.clone()),
        CountryError::NoResponse(_) => {
            message(StatusCode::INTERNAL_SERVER_ERROR, NO_RESPONSE_MESSAGE)
        }
        CountryError::RequestSetup(_) => {
            message(StatusCode::INTERNAL_SERVER_ERROR, REQUEST_SETUP_MESSAGE)
        }
        CountryError::QueryTooLong { .. } => {
            message(StatusCode::BAD_REQUEST, QUERY_TOO_LONG_MESSAGE)
        }
        other => message(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "ok" })),
    )
}

// ---------------------------------------------------------------------------
// Country lookup
// ---------------------------------------------------------------------------

pub async fn lookup_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    if let Err(e) = check_query_length(&name) {
        tracing::warn!("Rejected lookup: {}", e);
        return error_to_response(&e);
    }

    match state.provider.fetch_country(&name).await {
        Ok(resp) => {
            tracing::info!(
                name = %name,
                provider = state.provider.name(),
                status = resp.status,
                "Country lookup relayed"
            );
            relay(resp.status, resp.content_type.as_deref(), resp.body)
        }
        Err(e) => {
            match &e {
                CountryError::Upstream { status, .. } => {
                    tracing::info!(name = %name, status, "Relaying provider error");
                }
                _ => tracing::error!(name = %name, "Country lookup failed: {}", e),
            }
            error_to_response(&e)
        }
    }
}
