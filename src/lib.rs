//! # Keyward
//!
//! **Async Rust client for the Keyward license-management API.**
//!
//! Keyward wraps the remote key and customer lifecycle endpoints behind one
//! typed gateway. Every call is a single HTTP round-trip; every failure comes
//! back in the same [`ApiError`] shape.
//!
//! ## Features
//!
//! - **Key lifecycle** - create, activate, deactivate, inspect, block, unblock
//! - **Customer lifecycle** - create, list, fetch, update, toggle status, delete
//! - **Uniform errors** - server errors, unreadable responses and transport
//!   failures all normalize to `{ message, code, status }`
//! - **Instance-scoped credentials** - each gateway owns its own client, so
//!   several tokens or base URLs can coexist in one process
//!
//! ## Quickstart
//!
//! ```no_run
//! use keyward::{ActivateKeyParams, CreateKeyParams, LicenseGateway};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = LicenseGateway::new("your-api-token")?;
//!
//! let created = gateway.create_key(&CreateKeyParams::new("P1").max_activations(3)).await?;
//! println!("issued {}", created.key);
//!
//! match gateway
//!     .activate_key(&ActivateKeyParams::new("P1", &created.key).host_id("host-a"))
//!     .await
//! {
//!     Ok(activation) => println!("{}", activation.message),
//!     Err(err) => eprintln!("activation failed: {} (code {}, status {:?})", err.message, err.code, err.status),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! - Construction fails with [`KeywardError`] when the token is empty or the
//!   base URL is unusable. No request is made.
//! - Every operation fails with [`ApiError`]. Required fields left empty are
//!   rejected locally, before dispatch, with `"<field> is required"`.
//!
//! ## Configuration
//!
//! - `api_token` - bearer token, sent as `Authorization: Bearer <token>`
//! - `base_url` - defaults to [`DEFAULT_BASE_URL`]
//! - `timeout` - optional per-request timeout
//!
//! See [`KeywardConfig`] for environment-based loading.

#![doc(html_root_url = "https://docs.rs/keyward/0.1.0")]

// Core modules
pub mod config;
pub mod errors;

// Protocol layer
pub mod protocol;

// Client layer
pub mod client;

// Gateway (main public API)
pub mod gateway;

// Re-exports for public API
pub use client::normalize::{normalize, Failure};
pub use config::{KeywardConfig, DEFAULT_BASE_URL};
pub use errors::{ApiError, KeywardError, FALLBACK_MESSAGE};
pub use gateway::LicenseGateway;
pub use protocol::customers::{
    CreateCustomerParams, CreateCustomerResponse, Customer, CustomerActionResponse,
    CustomerIdParams, CustomerKeys, CustomerKeysResponse, CustomerLicenseKey,
    GetCustomerResponse, ListCustomersParams, ListCustomersResponse, PageMeta,
    UpdateCustomerParams, UpdateCustomerResponse,
};
pub use protocol::keys::{
    ActivateKeyParams, ActivateKeyResponse, CreateKeyParams, CreateKeyResponse,
    DeactivateKeyParams, Device, GetKeyResponse, KeyCustomer, KeyDetails, KeyParams, License,
    MessageResponse, NewCustomer,
};
pub use protocol::Validate;
