pub mod analytics;
pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod models;
#[cfg(test)]
pub mod test_helpers;

use tracing_subscriber::{fmt, EnvFilter};

/// Shared subscriber setup for the binaries.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();
}
