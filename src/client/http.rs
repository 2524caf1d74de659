//! Reqwest-based HTTP client for the license API.
//!
//! This module owns the configured `reqwest::Client` and turns every
//! response into either a decoded body or a normalized [`ApiError`].

use crate::client::normalize::{normalize, Failure};
use crate::config::KeywardConfig;
use crate::errors::ApiError;
use crate::KeywardError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// License API HTTP client.
///
/// Authorization, content type and user agent are installed as default
/// headers once, at construction. The client holds no mutable state.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new client from config.
    ///
    /// The config is expected to have been validated already.
    pub fn new(config: &KeywardConfig) -> Result<Self, KeywardError> {
        let mut builder = Client::builder().default_headers(default_headers(config)?);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| KeywardError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the configured base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a GET with `query` encoded into the URL.
    pub async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(path)).query(query);
        self.dispatch(Method::GET, path, request).await
    }

    /// Issue a POST with `body` as JSON.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.dispatch(Method::POST, path, request).await
    }

    /// Issue a PUT with `query` in the URL and `body` as JSON.
    pub async fn put<Q, B, T>(&self, path: &str, query: &Q, body: &B) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.put(self.url(path)).query(query).json(body);
        self.dispatch(Method::PUT, path, request).await
    }

    /// Issue a DELETE with `query` encoded into the URL and no body.
    pub async fn delete<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.delete(self.url(path)).query(query);
        self.dispatch(Method::DELETE, path, request).await
    }

    /// Send once and map the outcome. No retries.
    async fn dispatch<T>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        debug!(%method, path, "dispatching request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(fail(&method, path, Failure::from(e))),
        };

        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "received response");

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let failure = if status.is_success() {
                    Failure::Undecodable {
                        status: status.as_u16(),
                        detail: e.to_string(),
                    }
                } else {
                    Failure::HasResponse {
                        status: status.as_u16(),
                        body: Vec::new(),
                    }
                };
                return Err(fail(&method, path, failure));
            }
        };

        if !status.is_success() {
            let failure = Failure::HasResponse {
                status: status.as_u16(),
                body: body.to_vec(),
            };
            return Err(fail(&method, path, failure));
        }

        serde_json::from_slice(&body).map_err(|e| {
            fail(
                &method,
                path,
                Failure::Undecodable {
                    status: status.as_u16(),
                    detail: e.to_string(),
                },
            )
        })
    }
}

fn fail(method: &Method, path: &str, failure: Failure) -> ApiError {
    let err = normalize(failure);
    warn!(%method, path, status = ?err.status, code = err.code, "request failed");
    err
}

fn default_headers(config: &KeywardConfig) -> Result<HeaderMap, KeywardError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token.trim()))
        .map_err(|_| {
            KeywardError::ConfigError("api_token contains invalid header characters".to_string())
        })?;
    auth.set_sensitive(true);

    let user_agent = HeaderValue::from_str(&build_user_agent(config)).map_err(|_| {
        KeywardError::ConfigError(
            "user_agent_product contains invalid header characters".to_string(),
        )
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, user_agent);
    Ok(headers)
}

/// Build a User-Agent string from config.
///
/// Format: `[<product> ]keyward/<version>`
/// Example: `myapp/1.0.0 keyward/0.1.0`
pub fn build_user_agent(config: &KeywardConfig) -> String {
    let version = env!("CARGO_PKG_VERSION");

    match config.user_agent_product.as_deref().map(str::trim) {
        Some(product) if !product.is_empty() => format!("{} keyward/{}", product, version),
        _ => format!("keyward/{}", version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_user_agent_default() {
        let config = KeywardConfig::new("tok");
        let ua = build_user_agent(&config);
        assert_eq!(ua, format!("keyward/{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_build_user_agent_with_product() {
        let config = KeywardConfig::new("tok").with_user_agent_product("myapp/2.0.0");
        let ua = build_user_agent(&config);
        assert_eq!(
            ua,
            format!("myapp/2.0.0 keyward/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_blank_product_ignored() {
        let config = KeywardConfig::new("tok").with_user_agent_product("  ");
        assert!(build_user_agent(&config).starts_with("keyward/"));
    }

    #[test]
    fn test_default_headers() {
        let config = KeywardConfig::new("tok-123");
        let headers = default_headers(&config).unwrap();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok-123");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_token_with_newline_rejected() {
        let config = KeywardConfig::new("tok\nX-Injected: 1");
        let result = HttpClient::new(&config);
        assert!(matches!(result, Err(KeywardError::ConfigError(_))));
    }

    #[test]
    fn test_client_creation() {
        let config = KeywardConfig::new("tok");
        let client = HttpClient::new(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = KeywardConfig::new("tok").with_base_url("http://localhost:8080/api/");
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/key"), "http://localhost:8080/api/key");
    }
}
