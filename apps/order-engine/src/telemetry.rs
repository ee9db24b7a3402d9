//! Tracing setup.
//!
//! Console subscriber with `RUST_LOG`-style filtering. Call once from
//! the binary before any other work.

use tracing_subscriber::EnvFilter;

/// Initialize console tracing with an env-derived filter.
///
/// Defaults to `info` when `RUST_LOG` is unset. Safe to call only
/// once per process.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}
