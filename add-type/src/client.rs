//! HTTP implementation of the bind-type operation.

use crate::config::ClientConfig;
use crate::environment::BindTypeClient;
use crate::error::{BindTypeError, ConfigError};
use crate::types::{BindTypeRequest, BindTypeResponse, UserErrorResponse};
use reqwest::Client;
use std::future::Future;

/// Bind-type client talking to the project API over HTTP.
#[derive(Clone)]
pub struct HttpBindTypeClient {
    client: Client,
    endpoint: String,
}

impl HttpBindTypeClient {
    /// Create a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/project/bind-type", config.base_url.trim_end_matches('/')),
        })
    }

    /// Create a client configured from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the environment holds invalid values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// URL every request is posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: BindTypeRequest) -> Result<BindTypeResponse, BindTypeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| BindTypeError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<BindTypeResponse>()
                .await
                .map_err(|e| BindTypeError::Decode(e.to_string()));
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!(
                status = status.as_u16(),
                error = %e,
                "failed to read error response body"
            );
            BindTypeError::Transport(e.to_string())
        })?;
        if status.is_client_error() {
            if let Ok(rejection) = serde_json::from_str::<UserErrorResponse>(&body) {
                return Err(BindTypeError::Rejected(rejection));
            }
        }

        Err(BindTypeError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl std::fmt::Debug for HttpBindTypeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBindTypeClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl BindTypeClient for HttpBindTypeClient {
    fn bind_type(
        &self,
        request: BindTypeRequest,
    ) -> impl Future<Output = Result<BindTypeResponse, BindTypeError>> + Send {
        tracing::debug!(
            endpoint = %self.endpoint,
            project = %request.project_hash,
            "posting bind-type request"
        );
        self.post(request)
    }
}
