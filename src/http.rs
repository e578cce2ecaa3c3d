//! HTTP client implementation for the Strato crate
//!
//! This module provides the shared HTTP transport for making requests to the
//! Strato API. Responses are returned as raw body text on success; decoding
//! into the response envelope happens at the resource layer so parse failures
//! can be attributed to the operation that issued the request.
//!
//! The client can be configured to automatically retry requests when rate
//! limited (HTTP 429 responses) and to pace outgoing requests client-side.
//! Both behaviors are controlled through [`HttpOptions`].

use crate::error::{Error, Result};
use crate::types::HttpOptions;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client as ReqwestClient, RequestBuilder, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials used to authenticate against the Strato API
#[derive(Clone)]
pub enum Credentials {
    /// A scoped API token, sent as a bearer header
    ApiToken(String),

    /// A legacy API key paired with the account email
    ApiKey {
        /// The API key
        key: String,
        /// Email address the key belongs to
        email: String,
    },
}

/// HTTP client for making requests to the Strato API
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// Credentials applied to every request
    credentials: Credentials,

    /// API version
    api_version: String,

    /// Additional headers applied to every request
    headers: HashMap<String, String>,

    /// Whether to automatically retry requests when rate limited
    retry_on_rate_limit: bool,

    /// Maximum number of retry attempts for rate-limited requests
    max_retries: u32,

    /// Default retry delay in seconds if no Retry-After header is provided
    default_retry_after_secs: u64,

    /// Client-side request pacer (shared across clones)
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

#[cfg(test)]
impl HttpClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl HttpClient {
    /// Create a new HTTP client authenticating with an API token
    pub fn with_api_token(token: String) -> Self {
        Self::with_api_token_and_options(token, HttpOptions::default())
    }

    /// Create a new HTTP client with an API token and custom options
    pub fn with_api_token_and_options(token: String, options: HttpOptions) -> Self {
        Self::new(Credentials::ApiToken(token), options)
    }

    /// Create a new HTTP client authenticating with a legacy API key and email
    pub fn with_api_key(key: String, email: String) -> Self {
        Self::with_api_key_and_options(key, email, HttpOptions::default())
    }

    /// Create a new HTTP client with a legacy API key and custom options
    pub fn with_api_key_and_options(key: String, email: String, options: HttpOptions) -> Self {
        Self::new(Credentials::ApiKey { key, email }, options)
    }

    fn new(credentials: Credentials, options: HttpOptions) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        let limiter = if options.enable_client_side_rate_limiting {
            let per_minute =
                NonZeroU32::new(options.requests_per_minute).unwrap_or(NonZeroU32::MIN);
            Some(Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))))
        } else {
            None
        };

        Self {
            client,
            base_url: "https://api.strato.net/client".to_string(),
            credentials,
            api_version: options.api_version,
            headers: options.headers,
            retry_on_rate_limit: options.retry_on_rate_limit,
            max_retries: options.max_retries,
            default_retry_after_secs: options.default_retry_after_secs,
            limiter,
        }
    }

    /// Build a URL for the Strato API
    fn build_url(&self, path: &str) -> Result<Url> {
        let url = format!("{}/{}/{}", self.base_url, self.api_version, path);
        Url::parse(&url).map_err(|e| Error::Other(format!("Invalid URL: {}", e)))
    }

    /// Apply credentials and configured headers to a request
    fn apply_auth(&self, mut request: RequestBuilder) -> RequestBuilder {
        request = match &self.credentials {
            Credentials::ApiToken(token) => request.bearer_auth(token),
            Credentials::ApiKey { key, email } => request
                .header("X-Auth-Key", key)
                .header("X-Auth-Email", email),
        };

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        request
    }

    /// Prepare a GET request
    #[instrument(skip(self), level = "debug")]
    pub async fn get(&self, path: &str) -> Result<String> {
        let url = self.build_url(path)?;
        let request = self.apply_auth(self.client.get(url));

        debug!("Sending GET request to {}", path);
        self.execute_request(request).await
    }

    /// Prepare a PATCH request with a JSON body
    #[instrument(skip(self, body), level = "debug")]
    pub async fn patch<B: Serialize + std::fmt::Debug>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String> {
        let url = self.build_url(path)?;
        let request = self.apply_auth(self.client.patch(url).json(body));

        debug!("Sending PATCH request to {}", path);
        self.execute_request(request).await
    }

    /// Prepare a DELETE request
    #[instrument(skip(self), level = "debug")]
    pub async fn delete(&self, path: &str) -> Result<String> {
        let url = self.build_url(path)?;
        let request = self.apply_auth(self.client.delete(url));

        debug!("Sending DELETE request to {}", path);
        self.execute_request(request).await
    }

    /// Execute an HTTP request and return the raw response body
    async fn execute_request(&self, request: RequestBuilder) -> Result<String> {
        // Pace outgoing requests before touching the network
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let mut attempts = 0;

        loop {
            // Clone the request builder for each attempt
            let request_clone = request
                .try_clone()
                .ok_or_else(|| Error::Other("Failed to clone request for retry".to_string()))?;

            let response = request_clone.send().await.map_err(Error::Http)?;
            let status = response.status();

            // Check for rate limit response
            if status == StatusCode::TOO_MANY_REQUESTS {
                attempts += 1;

                // Extract retry-after header if available
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(self.default_retry_after_secs);

                let response_text = response.text().await.map_err(Error::Http)?;
                error!("API error: {} - {}", status, response_text);

                if self.retry_on_rate_limit && attempts <= self.max_retries {
                    // Exponential backoff, capped at 60 seconds
                    let exp_factor = u64::pow(2, attempts - 1);
                    let delay = std::cmp::min(retry_after.saturating_mul(exp_factor), 60);

                    debug!(
                        "Rate limited. Retrying after {} seconds (attempt {}/{})",
                        delay, attempts, self.max_retries
                    );

                    tokio::time::sleep(Duration::from_secs(delay)).await;
                    continue;
                }

                return Err(Error::RateLimit {
                    retry_after_secs: retry_after,
                });
            }

            let response_text = response.text().await.map_err(Error::Http)?;

            if status.is_success() {
                return Ok(response_text);
            }

            error!("API error: {} - {}", status, response_text);

            return if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                Err(Error::Auth("Invalid API token or credentials".to_string()))
            } else {
                Err(Error::Api {
                    status_code: status.as_u16(),
                    message: response_text,
                })
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_get_request_success() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/v4/test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"message\": \"success\"}")
            .expect(1)
            .create_async()
            .await;

        let mut client = HttpClient::with_api_token("test-token".to_string());
        client.set_base_url(server.url());

        let body = client.get("test").await.unwrap();
        assert_eq!(body, "{\"message\": \"success\"}");

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_patch_request_sends_json_body() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("PATCH", "/v4/test")
            .match_body(mockito::Matcher::Json(serde_json::json!({"test": "data"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let mut client = HttpClient::with_api_token("test-token".to_string());
        client.set_base_url(server.url());

        let body = serde_json::json!({"test": "data"});
        client.patch("test", &body).await.unwrap();

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_auth_error() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/v4/test")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let mut client = HttpClient::with_api_token("bad-token".to_string());
        client.set_base_url(server.url());

        let result = client.get("test").await;
        assert!(matches!(result, Err(Error::Auth(_))));

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_passes_body_through() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/v4/test")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let mut client = HttpClient::with_api_token("test-token".to_string());
        client.set_base_url(server.url());

        let result = client.get("test").await;
        match result {
            Err(Error::Api {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected API error, got {:?}", other),
        }

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_retry_success() {
        let mut server = Server::new_async().await;

        // First request returns 429 Too Many Requests
        let mock_rate_limit = server
            .mock("GET", "/v4/test")
            .with_status(429)
            .with_header("retry-after", "1")
            .with_body("{\"success\":false,\"errors\":[{\"code\":971,\"message\":\"Rate limited\"}]}")
            .expect(1)
            .create_async()
            .await;

        // Second request succeeds
        let mock_success = server
            .mock("GET", "/v4/test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"message\": \"success after retry\"}")
            .expect(1)
            .create_async()
            .await;

        let options = HttpOptions {
            retry_on_rate_limit: true,
            default_retry_after_secs: 1,
            ..HttpOptions::default()
        };

        let mut client =
            HttpClient::with_api_token_and_options("test-token".to_string(), options);
        client.set_base_url(server.url());

        let body = client.get("test").await.unwrap();
        assert_eq!(body, "{\"message\": \"success after retry\"}");

        mock_rate_limit.assert_async().await;
        mock_success.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_max_retries_exceeded() {
        let mut server = Server::new_async().await;

        // Mock that always returns 429
        let mock_rate_limit = server
            .mock("GET", "/v4/test")
            .with_status(429)
            .with_header("retry-after", "1")
            .with_body("{\"success\":false,\"errors\":[{\"code\":971,\"message\":\"Rate limited\"}]}")
            .expect(2) // Expect initial request + 1 retry
            .create_async()
            .await;

        let options = HttpOptions {
            retry_on_rate_limit: true,
            max_retries: 1,
            default_retry_after_secs: 1,
            ..HttpOptions::default()
        };

        let mut client =
            HttpClient::with_api_token_and_options("test-token".to_string(), options);
        client.set_base_url(server.url());

        let result = client.get("test").await;
        assert!(matches!(
            result,
            Err(Error::RateLimit {
                retry_after_secs: 1
            })
        ));

        mock_rate_limit.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_key_headers_applied() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/v4/test")
            .match_header("x-auth-key", "test-key")
            .match_header("x-auth-email", "user@example.com")
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let mut client =
            HttpClient::with_api_key("test-key".to_string(), "user@example.com".to_string());
        client.set_base_url(server.url());

        client.get("test").await.unwrap();

        mock_server.assert_async().await;
    }
}
