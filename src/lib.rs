//! # Strato - Edge Platform API Client for Rust
//!
//! This crate provides an idiomatic async Rust interface to the Strato edge
//! platform's zone management API. Each resource is exposed as a typed
//! service over a shared HTTP transport that handles authentication, the
//! uniform response envelope, and rate limiting.
//!
//! ## Features
//!
//! - API token and legacy key authentication
//! - Shared HTTP transport with optional retry and client-side pacing for
//!   rate-limited responses
//! - Typed per-resource services over the uniform response envelope
//! - Async API with Tokio
//! - Robust error handling and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use strato::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::with_api_token("your-api-token");
//!
//!     let variants = client
//!         .cache_variants()
//!         .update(
//!             "023e105f4ecef8ad9ca31a8372d0c353",
//!             HashMap::from([("image/jpeg".to_string(), vec!["variant-a".to_string()])]),
//!         )
//!         .await?;
//!
//!     println!("cache variants modified on {}", variants.modified_on);
//!     Ok(())
//! }
//! ```

pub mod cache_variants;
mod client;
mod error;
pub mod http;
mod telemetry;
pub mod types;

pub use client::Client;
pub use error::Error;
pub use telemetry::init_tracing;

/// Re-export of commonly used types for public use
pub mod prelude {
    pub use crate::cache_variants::{CacheVariants, VariantsValues};
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::types::HttpOptions;
}
