//! Failure normalization.
//!
//! Every failed call is first captured as a [`Failure`] and then mapped by
//! [`normalize`] into the single [`ApiError`] shape. The mapping is pure, so
//! it is tested here without any network.

use crate::errors::{ApiError, FALLBACK_MESSAGE, UNKNOWN_CODE};
use serde_json::Value;

/// A failed call, as observed by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The server answered with a non-2xx status.
    HasResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response body (may be empty).
        body: Vec<u8>,
    },

    /// No response was received (connect, DNS, TLS, timeout, request setup).
    NoResponse {
        /// The transport's own description of the failure.
        message: Option<String>,
    },

    /// The server answered but the body could not be read or decoded.
    Undecodable {
        /// HTTP status code.
        status: u16,
        /// Decoder error description.
        detail: String,
    },
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        // The URL's query string may carry a license key.
        Failure::NoResponse {
            message: Some(err.without_url().to_string()),
        }
    }
}

/// Map a failure to the normalized error shape.
pub fn normalize(failure: Failure) -> ApiError {
    match failure {
        Failure::HasResponse { status, body } => from_error_body(status, &body),
        Failure::NoResponse { message } => {
            let message = message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
            ApiError::new(message, UNKNOWN_CODE, None)
        }
        Failure::Undecodable { status, detail } => ApiError::new(
            format!("Failed to decode response body: {}", detail),
            UNKNOWN_CODE,
            Some(status),
        ),
    }
}

fn from_error_body(status: u16, body: &[u8]) -> ApiError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    let Some(object) = parsed.as_ref().and_then(Value::as_object) else {
        return ApiError::new(FALLBACK_MESSAGE, UNKNOWN_CODE, Some(status));
    };
    let Some(message) = object.get("message") else {
        return ApiError::new(FALLBACK_MESSAGE, UNKNOWN_CODE, Some(status));
    };

    let message = message
        .as_str()
        .filter(|m| !m.is_empty())
        .unwrap_or(FALLBACK_MESSAGE);
    let code = object
        .get("code")
        .and_then(Value::as_i64)
        .unwrap_or(UNKNOWN_CODE);

    ApiError::new(message, code, Some(status))
}
