//! Client implementation for the Strato crate
//!
//! This module provides the main client interface for interacting with the
//! Strato API.

use crate::cache_variants::CacheVariantsService;
use crate::http::HttpClient;
use crate::types::HttpOptions;

/// Client for the Strato API
///
/// This is the main entry point for interacting with the Strato API.
/// It owns the shared HTTP transport and hands out per-resource services.
#[derive(Clone)]
pub struct Client {
    http_client: HttpClient,
}

impl Client {
    /// Create a new client authenticating with an API token
    pub fn with_api_token(token: impl Into<String>) -> Self {
        let http_client = HttpClient::with_api_token(token.into());
        Self { http_client }
    }

    /// Create a new client with an API token and custom HTTP options
    pub fn with_api_token_and_options(token: impl Into<String>, options: HttpOptions) -> Self {
        let http_client = HttpClient::with_api_token_and_options(token.into(), options);
        Self { http_client }
    }

    /// Create a new client authenticating with a legacy API key and email
    pub fn with_api_key(key: impl Into<String>, email: impl Into<String>) -> Self {
        let http_client = HttpClient::with_api_key(key.into(), email.into());
        Self { http_client }
    }

    /// Create a new client with a legacy API key and custom HTTP options
    pub fn with_api_key_and_options(
        key: impl Into<String>,
        email: impl Into<String>,
        options: HttpOptions,
    ) -> Self {
        let http_client = HttpClient::with_api_key_and_options(key.into(), email.into(), options);
        Self { http_client }
    }

    /// Access the cache variants service
    pub fn cache_variants(&self) -> CacheVariantsService {
        CacheVariantsService::new(self.http_client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_with_api_token() {
        let client = Client::with_api_token("test-token");
        let _service = client.cache_variants();
    }

    #[test]
    fn test_client_creation_with_api_key() {
        let client = Client::with_api_key("test-key", "user@example.com");
        let _service = client.cache_variants();
    }
}
