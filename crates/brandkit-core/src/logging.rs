//! Logging and tracing initialization.
//!
//! The log level is read from `RUST_LOG` and defaults to `info`:
//!
//! ```bash
//! RUST_LOG=debug brandkit serve
//! RUST_LOG=brandkit_core=debug,tower_http=debug,sqlx=warn brandkit serve
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize plain formatted logging to stdout.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging() {
    init_logging_with_level("info");
}

/// Initialize logging with a specific default level, still overridable by `RUST_LOG`.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging_with_level(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize pretty-formatted logging (development).
pub fn init_logging_pretty() {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_line_number(true)
                .with_target(true),
        )
        .init();
}

/// Initialize JSON-formatted logging (production log aggregation).
pub fn init_logging_json() {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}
