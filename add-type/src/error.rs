//! Error types for the add-type feature.

use crate::types::UserErrorResponse;
use serde::Serialize;
use thiserror::Error;

/// Failure value of a bind-type call.
///
/// Every way the call can go wrong is reported through this one type, and
/// every variant ends up in the same `Failed` state. The variants only exist
/// so the caller can render them differently.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum BindTypeError {
    /// The server understood the request and rejected it
    #[error("{0}")]
    Rejected(UserErrorResponse),

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// A success response could not be parsed
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The server answered with an unexpected status
    #[error("Server error (status {status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
}

impl From<UserErrorResponse> for BindTypeError {
    fn from(error: UserErrorResponse) -> Self {
        Self::Rejected(error)
    }
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },

    /// The API base URL does not parse
    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_server_message() {
        let error = BindTypeError::from(UserErrorResponse {
            code: "TYPE_ERROR".to_string(),
            message: "Cannot unify Int with String".to_string(),
        });

        assert_eq!(error.to_string(), "TYPE_ERROR: Cannot unify Int with String");
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_serialized_shape() {
        let error = BindTypeError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({
                "kind": "status",
                "detail": { "status": 502, "body": "bad gateway" }
            })
        );
    }
}
