//! Tracing setup for the service binary.
//!
//! Library code only emits `tracing` events; the subscriber is installed once
//! by the binary so tests and embedders can inject their own.

use tracing_subscriber::EnvFilter;

/// Install the JSON subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();
}
