//! License key requests and responses.

use crate::errors::ApiError;
use crate::protocol::{require, Validate};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Customer created inline together with a new key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl NewCustomer {
    /// Customer with a name and no email.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    /// Attach an email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Parameters for `POST /key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyParams {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_activations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// Existing customer to attach the key to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Customer to create and attach the key to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_customer: Option<NewCustomer>,
    /// Free-form metadata stored with the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl CreateKeyParams {
    /// Parameters for a key on `product_id` with server defaults for everything else.
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            ..Default::default()
        }
    }

    /// Limit how many devices may hold the key at once.
    pub fn max_activations(mut self, max_activations: u32) -> Self {
        self.max_activations = Some(max_activations);
        self
    }

    /// Set the expiry date exactly as the API should receive it.
    pub fn expiry_date(mut self, expiry_date: impl Into<String>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    /// Set the expiry as an RFC 3339 UTC timestamp.
    pub fn expires_at(self, expires_at: DateTime<Utc>) -> Self {
        self.expiry_date(expires_at.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Attach the key to an existing customer.
    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Create a customer together with the key.
    pub fn new_customer(mut self, customer: NewCustomer) -> Self {
        self.new_customer = Some(customer);
        self
    }

    /// Add one metadata entry.
    pub fn metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

impl Validate for CreateKeyParams {
    fn validate(&self) -> Result<(), ApiError> {
        require("productId", &self.product_id)?;
        if let Some(customer) = &self.new_customer {
            require("newCustomer.name", &customer.name)?;
        }
        Ok(())
    }
}

/// Response from `POST /key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyResponse {
    pub code: i64,
    /// The newly issued license key.
    pub key: String,
}

/// Identifies one key of one product.
///
/// Used by `GET /key`, `POST /key/block` and `POST /key/unblock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyParams {
    pub product_id: String,
    pub license_key: String,
}

impl KeyParams {
    /// Parameters addressing `license_key` of `product_id`.
    pub fn new(product_id: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            license_key: license_key.into(),
        }
    }
}

impl Validate for KeyParams {
    fn validate(&self) -> Result<(), ApiError> {
        require("productId", &self.product_id)?;
        require("licenseKey", &self.license_key)
    }
}

/// Parameters for `POST /key/activate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateKeyParams {
    pub product_id: String,
    pub license_key: String,
    /// Caller-chosen identifier of the device being activated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    /// Human-readable label for the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_tag: Option<String>,
}

impl ActivateKeyParams {
    /// Activation without a device identifier.
    pub fn new(product_id: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            license_key: license_key.into(),
            host_id: None,
            device_tag: None,
        }
    }

    /// Identify the device.
    pub fn host_id(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }

    /// Label the device.
    pub fn device_tag(mut self, device_tag: impl Into<String>) -> Self {
        self.device_tag = Some(device_tag.into());
        self
    }
}

impl Validate for ActivateKeyParams {
    fn validate(&self) -> Result<(), ApiError> {
        require("productId", &self.product_id)?;
        require("licenseKey", &self.license_key)
    }
}

/// Response from `POST /key/activate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateKeyResponse {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licensee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licensee_email: Option<String>,
}

/// Parameters for `POST /key/deactivate`.
///
/// Leaving `host_id` unset deactivates every device on the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateKeyParams {
    pub product_id: String,
    pub license_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
}

impl DeactivateKeyParams {
    /// Deactivation of every device on the key.
    pub fn new(product_id: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            license_key: license_key.into(),
            host_id: None,
        }
    }

    /// Release only this device.
    pub fn host_id(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }
}

impl Validate for DeactivateKeyParams {
    fn validate(&self) -> Result<(), ApiError> {
        require("productId", &self.product_id)?;
        require("licenseKey", &self.license_key)
    }
}

/// `{ code, message }` response shared by deactivate, block and unblock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub code: i64,
    pub message: String,
}

/// Response from `GET /key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetKeyResponse {
    pub code: i64,
    pub data: KeyDetails,
}

/// Key detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDetails {
    pub license: License,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<KeyCustomer>,
}

/// A license key record as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: String,
    pub key: String,
    pub product_id: String,
    pub max_activations: u32,
    /// Activations currently consumed.
    pub activations: u32,
    #[serde(default)]
    pub devices: Vec<Device>,
    pub activated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

impl License {
    /// Parse `expirationDate` as RFC 3339.
    ///
    /// Returns `None` when the key never expires or the date is unparseable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiration_date.as_deref().and_then(parse_timestamp)
    }

    /// Whether the key had expired at `now`. Keys without a parseable expiry never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expiry| expiry <= now)
    }

    /// Activations left before the quota is exhausted.
    pub fn remaining_activations(&self) -> u32 {
        self.max_activations.saturating_sub(self.activations)
    }
}

/// A device holding an activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub host_id: String,
    pub activation_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl Device {
    /// Parse `activationTime` as RFC 3339.
    pub fn activated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.activation_time)
    }
}

/// Customer attached to a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCustomer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub active: bool,
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GET_KEY_RESPONSE: &str = r#"{
        "code": 0,
        "data": {
            "license": {
                "id": "lic_1",
                "key": "lk_ABC",
                "productId": "P1",
                "maxActivations": 3,
                "activations": 1,
                "devices": [
                    {
                        "hostId": "host-a",
                        "activationTime": "2025-03-01T10:00:00Z",
                        "deviceTag": "Work Laptop",
                        "ipAddress": "10.0.0.5"
                    }
                ],
                "activated": true,
                "expirationDate": "2026-01-01T00:00:00Z"
            },
            "customer": {
                "id": "C1",
                "name": "Ada",
                "email": "ada@example.com",
                "active": true
            }
        }
    }"#;

    #[test]
    fn test_create_key_minimal_payload() {
        let params = CreateKeyParams::new("P1");
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"productId": "P1"}));
    }

    #[test]
    fn test_create_key_full_payload() {
        let params = CreateKeyParams::new("P1")
            .max_activations(5)
            .expiry_date("2026-01-01")
            .new_customer(NewCustomer::new("Ada").email("ada@example.com"))
            .metadata_entry("plan", "pro")
            .metadata_entry("seats", 5);

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "productId": "P1",
                "maxActivations": 5,
                "expiryDate": "2026-01-01",
                "newCustomer": {"name": "Ada", "email": "ada@example.com"},
                "metadata": {"plan": "pro", "seats": 5}
            })
        );
    }

    #[test]
    fn test_expires_at_formats_rfc3339() {
        let when = DateTime::parse_from_rfc3339("2026-06-30T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let params = CreateKeyParams::new("P1").expires_at(when);
        assert_eq!(params.expiry_date.as_deref(), Some("2026-06-30T12:00:00Z"));
    }

    #[test]
    fn test_create_key_validation() {
        assert!(CreateKeyParams::new("P1").validate().is_ok());
        assert_eq!(
            CreateKeyParams::default().validate().unwrap_err().message,
            "productId is required"
        );
        let nameless = CreateKeyParams::new("P1").new_customer(NewCustomer::new(""));
        assert_eq!(
            nameless.validate().unwrap_err().message,
            "newCustomer.name is required"
        );
    }

    #[test]
    fn test_activate_payload_omits_absent_fields() {
        let params = ActivateKeyParams::new("P1", "lk_ABC").host_id("host-a");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"productId": "P1", "licenseKey": "lk_ABC", "hostId": "host-a"})
        );
    }

    #[test]
    fn test_key_params_validation_order() {
        let err = KeyParams::new("", "").validate().unwrap_err();
        assert_eq!(err.message, "productId is required");
        let err = KeyParams::new("P1", "").validate().unwrap_err();
        assert_eq!(err.message, "licenseKey is required");
    }

    #[test]
    fn test_deactivate_without_host_targets_all_devices() {
        let params = DeactivateKeyParams::new("P1", "lk_ABC");
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("hostId").is_none());
    }

    #[test]
    fn test_parse_get_key_response() {
        let response: GetKeyResponse = serde_json::from_str(GET_KEY_RESPONSE).unwrap();
        let license = &response.data.license;

        assert_eq!(response.code, 0);
        assert_eq!(license.key, "lk_ABC");
        assert_eq!(license.devices.len(), 1);
        assert_eq!(license.devices[0].device_tag.as_deref(), Some("Work Laptop"));
        assert_eq!(response.data.customer.as_ref().unwrap().id, "C1");
    }

    #[test]
    fn test_get_key_response_without_customer() {
        let json = r#"{
            "code": 0,
            "data": {
                "license": {
                    "id": "lic_2",
                    "key": "lk_XYZ",
                    "productId": "P1",
                    "maxActivations": 1,
                    "activations": 0,
                    "devices": [],
                    "activated": false
                }
            }
        }"#;
        let response: GetKeyResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.customer.is_none());
        assert!(response.data.license.expires_at().is_none());
    }

    #[test]
    fn test_license_time_helpers() {
        let response: GetKeyResponse = serde_json::from_str(GET_KEY_RESPONSE).unwrap();
        let license = &response.data.license;

        let before = DateTime::parse_from_rfc3339("2025-12-31T23:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        let after = DateTime::parse_from_rfc3339("2026-01-01T00:00:01Z")
            .unwrap()
            .with_timezone(&Utc);

        assert!(!license.is_expired_at(before));
        assert!(license.is_expired_at(after));
        assert_eq!(license.remaining_activations(), 2);
        assert!(license.devices[0].activated_at().is_some());
    }

    #[test]
    fn test_remaining_activations_saturates() {
        let mut response: GetKeyResponse = serde_json::from_str(GET_KEY_RESPONSE).unwrap();
        response.data.license.activations = 10;
        assert_eq!(response.data.license.remaining_activations(), 0);
    }
}
