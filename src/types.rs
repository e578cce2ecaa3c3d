//! Type definitions for the Strato crate
//!
//! This module contains the uniform response envelope returned by every
//! Strato API endpoint, along with the HTTP client configuration options.

use crate::error::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::error;

/// An error or informational entry carried in a response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    /// Service-assigned code for this entry
    pub code: i32,

    /// Human-readable message
    pub message: String,
}

/// The uniform wrapper the Strato API puts around every response
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request was processed successfully
    pub success: bool,

    /// Errors reported by the service
    #[serde(default)]
    pub errors: Vec<ApiMessage>,

    /// Informational messages reported by the service
    #[serde(default)]
    pub messages: Vec<ApiMessage>,

    /// The typed result payload, absent on failures
    pub result: Option<T>,
}

/// Decode a response body into the envelope and extract its result.
///
/// `context` names the resource being decoded so parse failures can be
/// attributed to the operation that produced them.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    body: &str,
    context: &'static str,
) -> Result<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse {} response: {}", context, e);
        Error::Decode { context, source: e }
    })?;

    if !envelope.success {
        let (code, message) = envelope
            .errors
            .first()
            .map(|e| (e.code, e.message.clone()))
            .unwrap_or((0, "request was not successful".to_string()));
        return Err(Error::Service { code, message });
    }

    envelope.result.ok_or_else(|| Error::Decode {
        context,
        source: serde::de::Error::missing_field("result"),
    })
}

/// HTTP options for client configuration
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// API version
    pub api_version: String,

    /// Additional HTTP headers applied to every request
    pub headers: HashMap<String, String>,

    /// Whether to automatically retry requests when rate limited
    pub retry_on_rate_limit: bool,

    /// Maximum number of retry attempts for rate-limited requests
    pub max_retries: u32,

    /// Default retry delay in seconds if no Retry-After header is provided
    pub default_retry_after_secs: u64,

    /// Whether to enable client-side rate limiting
    pub enable_client_side_rate_limiting: bool,

    /// Maximum number of requests allowed per minute
    pub requests_per_minute: u32,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            api_version: "v4".to_string(),
            headers: HashMap::new(),
            retry_on_rate_limit: false,
            max_retries: 3,
            default_retry_after_secs: 60,
            enable_client_side_rate_limiting: false,
            requests_per_minute: 300,
        }
    }
}
