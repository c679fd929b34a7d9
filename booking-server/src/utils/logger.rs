//! Logging Infrastructure
//!
//! Structured logging setup via tracing-subscriber with env-filter.

/// Initialize the logger
///
/// `RUST_LOG` overrides the default filter.
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_server=info,http_access=info".into()),
        )
        .with_target(false)
        .init();
}
