//! Cache variants service for the Strato crate
//!
//! This module provides functionality for managing a zone's cache variants
//! configuration: the alternate cached representations served for a resource,
//! keyed by content type.

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::decode_envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Decode context for cache variants responses
const DECODE_CONTEXT: &str = "cache variants";

/// Mapping from a content type to the variant URLs served for it
pub type VariantsValues = HashMap<String, Vec<String>>;

/// A zone's cache variants configuration as reported by the API
#[derive(Debug, Clone, Deserialize)]
pub struct CacheVariants {
    /// When the configuration was last modified, assigned by the service
    pub modified_on: DateTime<Utc>,

    /// Variant lists keyed by content type
    pub value: VariantsValues,
}

/// Request for updating cache variants
#[derive(Debug, Serialize)]
struct UpdateCacheVariantsRequest {
    /// The variants map to set
    value: VariantsValues,
}

/// Service for managing a zone's cache variants
#[derive(Clone)]
pub struct CacheVariantsService {
    /// HTTP client for making API requests
    http_client: HttpClient,
}

impl CacheVariantsService {
    /// Create a new cache variants service
    pub(crate) fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Fetch the current cache variants configuration for a zone
    ///
    /// The zone ID is forwarded to the service as given; the service is the
    /// sole validator.
    #[instrument(skip(self), level = "debug")]
    pub async fn get(
        &self,
        zone_id: impl Into<String> + std::fmt::Debug,
    ) -> Result<CacheVariants> {
        let zone_id = zone_id.into();

        debug!("Fetching cache variants for zone {}", zone_id);
        let body = self
            .http_client
            .get(&format!("zones/{}/cache/variants", zone_id))
            .await?;
        decode_envelope(&body, DECODE_CONTEXT)
    }

    /// Set the cache variants configuration for a zone
    ///
    /// Whether the service merges or fully replaces the existing map is the
    /// service's contract; the returned snapshot is authoritative.
    #[instrument(skip(self, variants), level = "debug")]
    pub async fn update(
        &self,
        zone_id: impl Into<String> + std::fmt::Debug,
        variants: VariantsValues,
    ) -> Result<CacheVariants> {
        let zone_id = zone_id.into();

        let request = UpdateCacheVariantsRequest { value: variants };

        debug!("Updating cache variants for zone {}", zone_id);
        let body = self
            .http_client
            .patch(&format!("zones/{}/cache/variants", zone_id), &request)
            .await?;
        decode_envelope(&body, DECODE_CONTEXT)
    }

    /// Delete the cache variants configuration for a zone
    ///
    /// The response body is discarded; only transport-level failures surface.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete(&self, zone_id: impl Into<String> + std::fmt::Debug) -> Result<()> {
        let zone_id = zone_id.into();

        debug!("Deleting cache variants for zone {}", zone_id);
        self.http_client
            .delete(&format!("zones/{}/cache/variants", zone_id))
            .await?;
        Ok(())
    }
}
