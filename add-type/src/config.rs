//! Client configuration.
//!
//! Values come from the environment (a `.env` file is honoured by the
//! binary) and can be overridden with the builder methods.

use crate::error::ConfigError;
use std::env;
use std::time::Duration;

/// Environment variable holding the API base URL.
pub const API_URL_VAR: &str = "TYPEBIND_API_URL";

/// Environment variable holding the per-request transport timeout, in seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "TYPEBIND_REQUEST_TIMEOUT_SECS";

/// Base URL used when [`API_URL_VAR`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8999";

/// Settings for the HTTP bind-type client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8999")
    pub base_url: String,

    /// Transport timeout for each request.
    ///
    /// Default: none
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidValue {
                        name: REQUEST_TIMEOUT_VAR,
                        value,
                    })?;
                Some(Duration::from_secs(secs))
            },
            None => None,
        };

        let config = Self {
            base_url,
            request_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the transport timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Check that the base URL is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse or is
    /// not http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {scheme}"),
            }),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
