//! Wire records for the license API.
//!
//! Field names follow the API's camelCase contract exactly. Optional request
//! fields are omitted from the payload when `None`.

pub mod customers;
pub mod keys;

use crate::errors::ApiError;

/// Local validation run on every parameter record before dispatch.
pub trait Validate {
    /// Fail with [`ApiError::missing_field`] if a required field is empty.
    fn validate(&self) -> Result<(), ApiError>;
}

/// Check that a required string field is non-empty.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::missing_field(field));
    }
    Ok(())
}
