//! Keyward configuration.

use crate::KeywardError;
use reqwest::Url;
use std::fmt;
use std::time::Duration;

/// Production endpoint of the license service.
pub const DEFAULT_BASE_URL: &str = "https://api.keyward.dev/v1";

/// Environment variable holding the bearer token.
pub const ENV_API_TOKEN: &str = "KEYWARD_API_TOKEN";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "KEYWARD_BASE_URL";

/// Environment variable setting a request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "KEYWARD_TIMEOUT_SECS";

/// Configuration for a [`LicenseGateway`](crate::LicenseGateway).
///
/// Immutable once the gateway is built. Changing the token means building
/// a new gateway.
#[derive(Clone)]
pub struct KeywardConfig {
    /// Bearer token sent as `Authorization: Bearer <token>`.
    pub api_token: String,

    /// Base URL every endpoint path is appended to.
    pub base_url: String,

    /// Optional product prefix for the User-Agent header (e.g., "myapp/1.2.0").
    pub user_agent_product: Option<String>,

    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl KeywardConfig {
    /// Configuration for the production endpoint.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent_product: None,
            timeout: None,
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the User-Agent product prefix.
    pub fn with_user_agent_product(mut self, product: impl Into<String>) -> Self {
        self.user_agent_product = Some(product.into());
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from `KEYWARD_*` environment variables.
    pub fn from_env() -> Result<Self, KeywardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, KeywardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup(ENV_API_TOKEN).ok_or_else(|| {
            KeywardError::ConfigError(format!("{} is not set", ENV_API_TOKEN))
        })?;

        let mut config = Self::new(api_token);

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                KeywardError::ConfigError(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), KeywardError> {
        if self.api_token.trim().is_empty() {
            return Err(KeywardError::ConfigError(
                "api_token cannot be empty".to_string(),
            ));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            KeywardError::ConfigError(format!("invalid base_url {:?}: {}", self.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(KeywardError::ConfigError(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(KeywardError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for KeywardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywardConfig")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent_product", &self.user_agent_product)
            .field("timeout", &self.timeout)
            .finish()
    }
}
