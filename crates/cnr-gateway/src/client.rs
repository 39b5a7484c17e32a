//! # CnrClient — HTTP plumbing shared by every endpoint
//!
//! Wraps a `reqwest::Client` with the backend base URL, a per-request
//! timeout, and consistent status-to-error mapping. The endpoint methods
//! themselves live in [`crate::auth`] and [`crate::pensions`].

use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// How much of an error body to keep in diagnostics.
const BODY_EXCERPT_LEN: usize = 256;

/// Typed client for the CNR pension backend.
#[derive(Debug, Clone)]
pub struct CnrClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: GatewayConfig,
}

impl CnrClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|source| GatewayError::Network {
                endpoint: config.base_url.to_string(),
                source,
            })?;
        Ok(Self { http, config })
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &url::Url {
        &self.config.base_url
    }

    /// Send a request, mapping transport failures (including timeouts)
    /// to [`GatewayError::Network`].
    pub(crate) async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        request
            .send()
            .await
            .map_err(|source| GatewayError::Network {
                endpoint: endpoint.to_string(),
                source,
            })
    }

    /// Send a bearer-authorized request. A 401 means the token is missing,
    /// expired, or invalid and maps to [`GatewayError::Auth`], which
    /// callers surface as a forced logout.
    pub(crate) async fn send_authorized(
        &self,
        request: reqwest::RequestBuilder,
        token: &str,
        endpoint: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        let resp = self.send(request.bearer_auth(token.trim()), endpoint).await?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!(endpoint, "backend rejected bearer token");
            return Err(GatewayError::auth("Invalid or expired token"));
        }
        Ok(resp)
    }

    /// Read a non-2xx response's body and extract the server's error
    /// message, falling back to the given default.
    pub(crate) async fn server_message(resp: reqwest::Response, fallback: &str) -> String {
        let body = resp.text().await.unwrap_or_default();
        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                // The backend uses "error" on auth routes and "message"
                // elsewhere.
                v.get("error")
                    .or_else(|| v.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Read a 2xx response body and parse it as JSON, mapping both read
    /// and parse failures to [`GatewayError::Data`].
    pub(crate) async fn json_body(
        resp: reqwest::Response,
        endpoint: &str,
    ) -> Result<serde_json::Value, GatewayError> {
        let body = resp.text().await.map_err(|e| {
            GatewayError::data(endpoint, format!("failed to read response body: {e}"))
        })?;
        serde_json::from_str(&body).map_err(|e| {
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            GatewayError::data(endpoint, format!("not valid JSON ({e}): {excerpt}"))
        })
    }
}
