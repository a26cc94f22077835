//! # Telemetry
//!
//! Structured logging bootstrap. Log lines carry the standard `tracing`
//! fields; the filter comes from `RUST_LOG` with a caller-supplied
//! fallback.

use tracing_subscriber::EnvFilter;

/// Initialize the fmt subscriber. Safe to call more than once; later calls
/// are no-ops (relevant under test harnesses).
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
