//! Tracing setup for applications embedding the Strato client
//!
//! Library code logs through `tracing`; call [`init_tracing`] once at startup
//! to install a formatted subscriber filtered by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Install a formatting subscriber filtered by `RUST_LOG` (defaults to `info`)
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
