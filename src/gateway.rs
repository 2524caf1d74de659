//! License Gateway - the main public API for Keyward.
//!
//! One async method per remote operation. Each call:
//! 1. Validates required fields locally
//! 2. Sends exactly one request
//! 3. Returns the decoded body, or an [`ApiError`] built by the normalization rule

use crate::client::http::HttpClient;
use crate::config::KeywardConfig;
use crate::errors::ApiError;
use crate::protocol::customers::{
    CreateCustomerParams, CreateCustomerResponse, CustomerActionResponse, CustomerIdParams,
    CustomerKeysResponse, GetCustomerResponse, ListCustomersParams, ListCustomersResponse,
    UpdateCustomerParams, UpdateCustomerResponse,
};
use crate::protocol::keys::{
    ActivateKeyParams, ActivateKeyResponse, CreateKeyParams, CreateKeyResponse,
    DeactivateKeyParams, GetKeyResponse, KeyParams, MessageResponse,
};
use crate::protocol::Validate;
use crate::KeywardError;

/// Gateway to the license API.
///
/// Create one per credential and share it; every method takes `&self` and
/// the gateway holds no mutable state, so concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct LicenseGateway {
    config: KeywardConfig,
    client: HttpClient,
}

impl LicenseGateway {
    /// Create a gateway for the production endpoint.
    ///
    /// # Errors
    /// Returns `ConfigError` if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self, KeywardError> {
        Self::from_config(KeywardConfig::new(api_token))
    }

    /// Create a gateway for a custom base URL.
    pub fn with_base_url(
        api_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, KeywardError> {
        Self::from_config(KeywardConfig::new(api_token).with_base_url(base_url))
    }

    /// Create a gateway from explicit configuration.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Configuration validation fails
    /// - HTTP client creation fails
    pub fn from_config(config: KeywardConfig) -> Result<Self, KeywardError> {
        config.validate()?;
        let client = HttpClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Create a gateway from `KEYWARD_*` environment variables.
    pub fn from_env() -> Result<Self, KeywardError> {
        Self::from_config(KeywardConfig::from_env()?)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &KeywardConfig {
        &self.config
    }

    /// Get the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Issue a new license key (`POST /key`).
    pub async fn create_key(&self, params: &CreateKeyParams) -> Result<CreateKeyResponse, ApiError> {
        params.validate()?;
        self.client.post("/key", params).await
    }

    /// Activate a key on a device (`POST /key/activate`).
    pub async fn activate_key(
        &self,
        params: &ActivateKeyParams,
    ) -> Result<ActivateKeyResponse, ApiError> {
        params.validate()?;
        self.client.post("/key/activate", params).await
    }

    /// Release one device, or all devices when `host_id` is unset (`POST /key/deactivate`).
    pub async fn deactivate_key(
        &self,
        params: &DeactivateKeyParams,
    ) -> Result<MessageResponse, ApiError> {
        params.validate()?;
        self.client.post("/key/deactivate", params).await
    }

    /// Fetch key details (`GET /key`, parameters in the query string).
    pub async fn get_key(&self, params: &KeyParams) -> Result<GetKeyResponse, ApiError> {
        params.validate()?;
        self.client.get("/key", params).await
    }

    /// Block a key (`POST /key/block`).
    pub async fn block_key(&self, params: &KeyParams) -> Result<MessageResponse, ApiError> {
        params.validate()?;
        self.client.post("/key/block", params).await
    }

    /// Unblock a key (`POST /key/unblock`).
    pub async fn unblock_key(&self, params: &KeyParams) -> Result<MessageResponse, ApiError> {
        params.validate()?;
        self.client.post("/key/unblock", params).await
    }

    /// Create a customer (`POST /customer`).
    pub async fn create_customer(
        &self,
        params: &CreateCustomerParams,
    ) -> Result<CreateCustomerResponse, ApiError> {
        params.validate()?;
        self.client.post("/customer", params).await
    }

    /// List customers page by page (`GET /customer`).
    pub async fn list_customers(
        &self,
        params: &ListCustomersParams,
    ) -> Result<ListCustomersResponse, ApiError> {
        params.validate()?;
        self.client.get("/customer", params).await
    }

    /// Fetch one customer (`GET /customer/by-id`).
    pub async fn get_customer(
        &self,
        params: &CustomerIdParams,
    ) -> Result<GetCustomerResponse, ApiError> {
        params.validate()?;
        self.client.get("/customer/by-id", params).await
    }

    /// Fetch a customer together with its keys (`GET /customer/keys`).
    pub async fn get_customer_with_keys(
        &self,
        params: &CustomerIdParams,
    ) -> Result<CustomerKeysResponse, ApiError> {
        params.validate()?;
        self.client.get("/customer/keys", params).await
    }

    /// Update a customer (`PUT /customer/by-id`).
    pub async fn update_customer(
        &self,
        params: &UpdateCustomerParams,
    ) -> Result<UpdateCustomerResponse, ApiError> {
        params.validate()?;
        self.client
            .put("/customer/by-id", &params.id(), params)
            .await
    }

    /// Flip a customer between enabled and disabled (`POST /customer/disable`).
    pub async fn toggle_customer_status(
        &self,
        params: &CustomerIdParams,
    ) -> Result<CustomerActionResponse, ApiError> {
        params.validate()?;
        self.client.post("/customer/disable", params).await
    }

    /// Delete a customer (`DELETE /customer/by-id`, id in the query string).
    pub async fn delete_customer(
        &self,
        params: &CustomerIdParams,
    ) -> Result<CustomerActionResponse, ApiError> {
        params.validate()?;
        self.client.delete("/customer/by-id", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn test_gateway_creation() {
        let gateway = LicenseGateway::new("tok");
        assert!(gateway.is_ok());
        assert_eq!(gateway.unwrap().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_gateway_empty_token() {
        let result = LicenseGateway::new("");
        assert!(matches!(result, Err(KeywardError::ConfigError(_))));
    }

    #[test]
    fn test_gateway_custom_base_url() {
        let gateway = LicenseGateway::with_base_url("tok", "http://127.0.0.1:9/").unwrap();
        assert_eq!(gateway.base_url(), "http://127.0.0.1:9");
    }

    #[test]
    fn test_config_accessor() {
        let gateway = LicenseGateway::new("tok").unwrap();
        assert_eq!(gateway.config().api_token, "tok");
    }

    #[test]
    fn test_gateway_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LicenseGateway>();
    }
}
