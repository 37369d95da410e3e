//! REST Countries client.
//!
//! One GET to `{base}/name/{name}` per lookup. No retries, no caching, and
//! no timeout beyond what the shared client carries.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use super::{CountryProvider, ProviderResponse};
use crate::errors::{CountryError, Result};
use crate::http_client::HttpClient;

pub struct RestCountriesClient {
    http: HttpClient,
    base_url: String,
}

impl RestCountriesClient {
    /// * `http` – shared HTTP client
    /// * `base_url` – provider root, e.g. `https://restcountries.com/v3.1`
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Build the lookup URL. `name` becomes a single path segment, so
    /// reserved characters are percent-encoded rather than changing the path.
    pub fn lookup_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            CountryError::RequestSetup(format!("invalid provider URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                CountryError::RequestSetup(format!(
                    "provider URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("name")
            .push(name);
        Ok(url)
    }
}

/// Split send failures into "never left" and "left but nothing came back".
fn classify_send_error(err: reqwest::Error) -> CountryError {
    if err.is_builder() {
        CountryError::RequestSetup(err.to_string())
    } else {
        CountryError::NoResponse(err.to_string())
    }
}

#[async_trait]
impl CountryProvider for RestCountriesClient {
    fn name(&self) -> &str {
        "REST Countries"
    }

    async fn fetch_country(&self, name: &str) -> Result<ProviderResponse> {
        let url = self.lookup_url(name)?;
        tracing::debug!(url = %url, "Requesting country data");

        let resp = self
            .http
            .client()
            .get(url)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = resp
            .bytes()
            .await
            .map_err(|e| CountryError::NoResponse(e.to_string()))?
            .to_vec();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), name, "Provider returned an error");
            return Err(CountryError::Upstream {
                status: status.as_u16(),
                content_type,
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Provider responded");
        Ok(ProviderResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(base_url: &str) -> RestCountriesClient {
        RestCountriesClient::new(HttpClient::from_defaults().unwrap(), base_url)
    }

    /// Serve one canned HTTP response and hand back the request line.
    async fn one_shot_upstream(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/v3.1", listener.local_addr().unwrap());
        let task = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = stream.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request.lines().next().unwrap_or_default().to_string()
        });
        (base, task)
    }

    #[test]
    fn lookup_url_appends_name_segment() {
        let c = client("https://restcountries.com/v3.1");
        assert_eq!(
            c.lookup_url("France").unwrap().as_str(),
            "https://restcountries.com/v3.1/name/France"
        );
    }

    #[test]
    fn lookup_url_handles_trailing_slash() {
        let c = client("https://restcountries.com/v3.1/");
        assert_eq!(
            c.lookup_url("Peru").unwrap().as_str(),
            "https://restcountries.com/v3.1/name/Peru"
        );
    }

    #[test]
    fn lookup_url_encodes_reserved_characters() {
        let c = client("https://restcountries.com/v3.1");
        let url = c.lookup_url("united states/../x?y").unwrap();
        assert_eq!(
            url.as_str(),
            "https://restcountries.com/v3.1/name/united%20states%2F..%2Fx%3Fy"
        );
    }

    #[tokio::test]
    async fn invalid_base_url_is_request_setup_error() {
        let err = client("not a url").fetch_country("France").await.unwrap_err();
        assert!(matches!(err, CountryError::RequestSetup(_)));
    }

    #[tokio::test]
    async fn cannot_be_a_base_url_is_request_setup_error() {
        let err = client("mailto:someone@example.com")
            .fetch_country("France")
            .await
            .unwrap_err();
        assert!(matches!(err, CountryError::RequestSetup(_)));
    }

    #[tokio::test]
    async fn closed_port_is_no_response() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let err = client(&format!("http://{addr}/v3.1"))
            .fetch_country("France")
            .await
            .unwrap_err();
        assert!(matches!(err, CountryError::NoResponse(_)));
    }

    #[tokio::test]
    async fn success_body_is_returned_unmodified() {
        let body = r#"[{"name":{"common":"France"},"latlng":[46,2],"area":551695}]"#;
        let (base, upstream) = one_shot_upstream("HTTP/1.1 200 OK", body).await;

        let resp = client(&base).fetch_country("France").await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, body.as_bytes());
        assert_eq!(resp.content_type.as_deref(), Some("application/json"));

        let request_line = upstream.await.unwrap();
        assert!(request_line.starts_with("GET /v3.1/name/France "));
    }

    #[tokio::test]
    async fn not_found_is_upstream_error_with_exact_body() {
        let (base, upstream) =
            one_shot_upstream("HTTP/1.1 404 Not Found", r#"{"message":"Not Found"}"#).await;

        let err = client(&base).fetch_country("Atlantis").await.unwrap_err();
        match err {
            CountryError::Upstream { status, body, .. } => {
                assert_eq!(status, 404);
                assert_eq!(body, br#"{"message":"Not Found"}"#);
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        upstream.await.unwrap();
    }
}
