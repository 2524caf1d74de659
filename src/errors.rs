//! Keyward error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used whenever a failure carries no usable message of its own.
pub const FALLBACK_MESSAGE: &str = "An unknown error occurred";

/// Code reported for every failure that did not come with a numeric server code.
pub const UNKNOWN_CODE: i64 = -1;

/// Errors that can occur while constructing a gateway.
#[derive(Debug, Error)]
pub enum KeywardError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// The single error shape returned by every API operation.
///
/// - Structured API errors carry the server's `message` and `code` and the HTTP `status`.
/// - Unstructured responses carry [`FALLBACK_MESSAGE`], code `-1` and the HTTP `status`.
/// - Transport failures and local validation failures carry code `-1` and no `status`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct ApiError {
    /// Human-readable message.
    pub message: String,

    /// Server error code, or `-1` when none was supplied.
    pub code: i64,

    /// HTTP status, present only when a response was actually received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    /// Create an error from its three fields.
    pub fn new(message: impl Into<String>, code: i64, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            code,
            status,
        }
    }

    /// Error raised before dispatch when a required field is empty.
    pub fn missing_field(field: &str) -> Self {
        Self::new(format!("{} is required", field), UNKNOWN_CODE, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_shape() {
        let err = ApiError::missing_field("productId");
        assert_eq!(err.message, "productId is required");
        assert_eq!(err.code, -1);
        assert_eq!(err.status, None);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::new("Invalid license key", 2, Some(400));
        assert_eq!(err.to_string(), "Invalid license key (code 2)");
    }

    #[test]
    fn test_config_error_display() {
        let err = KeywardError::ConfigError("api_token cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: api_token cannot be empty"
        );
    }
}
