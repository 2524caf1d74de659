//! Customer requests and responses.
//!
//! Customer endpoints wrap their payload in an envelope of
//! `{ action, status, message?, data?, code }`.

use crate::errors::ApiError;
use crate::protocol::{require, Validate};
use serde::{Deserialize, Serialize};

/// A customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Present on records returned by read and update endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Parameters for `POST /customer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerParams {
    pub name: String,
    pub email: String,
}

impl CreateCustomerParams {
    /// Parameters for a customer with both required fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Validate for CreateCustomerParams {
    fn validate(&self) -> Result<(), ApiError> {
        require("name", &self.name)?;
        require("email", &self.email)
    }
}

/// Response from `POST /customer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerResponse {
    pub action: String,
    pub status: String,
    pub message: String,
    pub data: Customer,
    pub code: i64,
}

/// Parameters for `GET /customer`. All filters are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Restrict results to this email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ListCustomersParams {
    /// Request this page (1-based).
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Cap the number of customers per page.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only list customers with this email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Validate for ListCustomersParams {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Pagination metadata of a customer listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PageMeta {
    /// Whether a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Response from `GET /customer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersResponse {
    pub action: String,
    pub status: String,
    pub data: Vec<Customer>,
    pub meta: PageMeta,
    pub code: i64,
}

/// Identifies one customer.
///
/// Used by get, get-with-keys, toggle-status and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdParams {
    pub customer_id: String,
}

impl CustomerIdParams {
    /// Parameters addressing `customer_id`.
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
        }
    }
}

impl Validate for CustomerIdParams {
    fn validate(&self) -> Result<(), ApiError> {
        require("customerId", &self.customer_id)
    }
}

/// Response from `GET /customer/by-id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomerResponse {
    pub action: String,
    pub status: String,
    pub data: Vec<Customer>,
    pub code: i64,
}

/// Key summary listed under a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLicenseKey {
    pub id: String,
    pub key: String,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_activations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

/// Payload of `GET /customer/keys`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerKeys {
    pub customer: Customer,
    #[serde(default)]
    pub license_keys: Vec<CustomerLicenseKey>,
}

/// Response from `GET /customer/keys`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerKeysResponse {
    pub action: String,
    pub status: String,
    pub data: CustomerKeys,
    pub code: i64,
}

/// Parameters for `PUT /customer/by-id`.
///
/// `customer_id` travels in the query string; the remaining fields form the
/// JSON body and only the ones set are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerParams {
    #[serde(skip)]
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateCustomerParams {
    /// Update of `customer_id` that changes nothing until setters are applied.
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: None,
            email: None,
            active: None,
        }
    }

    /// Rename the customer.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Change the customer's email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Enable or disable the customer.
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// The query half of the request.
    pub fn id(&self) -> CustomerIdParams {
        CustomerIdParams::new(self.customer_id.clone())
    }
}

impl Validate for UpdateCustomerParams {
    fn validate(&self) -> Result<(), ApiError> {
        require("customerId", &self.customer_id)
    }
}

/// Response from `PUT /customer/by-id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerResponse {
    pub action: String,
    pub status: String,
    pub message: String,
    pub data: Customer,
    pub code: i64,
}

/// Envelope without data, returned by toggle-status and delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerActionResponse {
    pub action: String,
    pub status: String,
    pub message: String,
    pub code: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_params_empty_query() {
        let params = ListCustomersParams::default();
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({}));
    }

    #[test]
    fn test_list_params_filters() {
        let params = ListCustomersParams::default().page(2).limit(25).email("a@b.c");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"page": 2, "limit": 25, "email": "a@b.c"})
        );
    }

    #[test]
    fn test_update_body_excludes_customer_id() {
        let params = UpdateCustomerParams::new("C1").name("Grace").active(false);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"name": "Grace", "active": false})
        );
        assert_eq!(
            serde_json::to_value(params.id()).unwrap(),
            json!({"customerId": "C1"})
        );
    }

    #[test]
    fn test_customer_validation() {
        assert!(CreateCustomerParams::new("Ada", "ada@example.com").validate().is_ok());
        assert_eq!(
            CreateCustomerParams::new("Ada", "").validate().unwrap_err().message,
            "email is required"
        );
        assert_eq!(
            CustomerIdParams::new("").validate().unwrap_err().message,
            "customerId is required"
        );
        assert!(UpdateCustomerParams::new(" ").validate().is_err());
    }

    #[test]
    fn test_parse_list_response() {
        let json = r#"{
            "action": "list",
            "status": "success",
            "data": [
                {"id": "C1", "name": "Ada", "email": "ada@example.com", "active": true},
                {"id": "C2", "name": "Grace", "email": "grace@example.com", "active": false}
            ],
            "meta": {"total": 12, "page": 1, "limit": 2, "totalPages": 6},
            "code": 0
        }"#;
        let response: ListCustomersResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].active, Some(false));
        assert_eq!(response.meta.total_pages, 6);
        assert!(response.meta.has_next());
    }

    #[test]
    fn test_parse_customer_keys_response() {
        let json = r#"{
            "action": "get",
            "status": "success",
            "data": {
                "customer": {"id": "C1", "name": "Ada", "email": "ada@example.com"},
                "licenseKeys": [
                    {"id": "lic_1", "key": "lk_ABC", "productId": "P1", "activated": true}
                ]
            },
            "code": 0
        }"#;
        let response: CustomerKeysResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.data.customer.id, "C1");
        assert!(response.data.customer.active.is_none());
        assert_eq!(response.data.license_keys[0].key, "lk_ABC");
    }

    #[test]
    fn test_customer_without_name_or_email() {
        let json = r#"{"action":"list","status":"success","data":[{"id":"C3"}],
            "meta":{"total":1,"page":1,"limit":10,"totalPages":1},"code":0}"#;
        let response: ListCustomersResponse = serde_json::from_str(json).unwrap();

        assert!(response.data[0].name.is_none());
        assert!(response.data[0].email.is_none());
        assert_eq!(
            serde_json::to_value(&response.data[0]).unwrap(),
            serde_json::json!({"id": "C3"})
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let meta = PageMeta {
            total: 4,
            page: 2,
            limit: 2,
            total_pages: 2,
        };
        assert!(!meta.has_next());
    }
}
