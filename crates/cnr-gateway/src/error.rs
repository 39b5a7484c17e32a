//! Gateway error taxonomy.

/// Errors from CNR backend calls.
///
/// The four variants drive four distinct recovery paths: `Auth` forces a
/// logout and return to login, `Validation` is surfaced inline and is
/// non-fatal, `Data` and `Network` are surfaced with retry left to the
/// user via manual refresh. None of them may corrupt previously
/// displayed data.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Missing/expired/invalid token, or a malformed auth response.
    #[error("{message}")]
    Auth { message: String },

    /// Server-side rejection of user input (registration).
    #[error("{message}")]
    Validation { message: String },

    /// The response body did not match the endpoint's schema.
    #[error("unexpected response from {endpoint}: {reason}")]
    Data { endpoint: String, reason: String },

    /// HTTP transport failure or timeout.
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Client-side configuration error, rejected before any call is made.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl GatewayError {
    /// Whether this failure must force a logout and redirect to login.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    pub(crate) fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub(crate) fn data(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::Data {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }
}
