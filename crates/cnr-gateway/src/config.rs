//! Gateway configuration: backend base URL and request timeout.

use url::Url;

/// Default backend base URL when `CNR_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors raised before any call is made.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The base URL failed to parse.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The timeout value failed to parse.
    #[error("invalid timeout value {value:?}: expected seconds as an integer")]
    InvalidTimeout { value: String },
}

/// Connection settings for [`crate::CnrClient`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the backend API, e.g. `http://localhost:8080/api/v1`.
    pub base_url: Url,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Build a configuration for the given base URL with the default
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Build a configuration from `CNR_API_URL` and `CNR_TIMEOUT_SECS`,
    /// falling back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("CNR_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&url)?;
        if let Ok(raw) = std::env::var("CNR_TIMEOUT_SECS") {
            config.timeout_secs = raw
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw })?;
        }
        Ok(config)
    }

    /// Absolute URL for an endpoint path relative to the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = GatewayConfig::new("http://localhost:8080/api/v1/").unwrap();
        assert_eq!(
            config.endpoint("/auth/login"),
            "http://localhost:8080/api/v1/auth/login"
        );
        assert_eq!(
            config.endpoint("pensions"),
            "http://localhost:8080/api/v1/pensions"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(GatewayConfig::new("not a url").is_err());
    }

    #[test]
    fn default_timeout_applied() {
        let config = GatewayConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
