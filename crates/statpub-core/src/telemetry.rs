//! Tracing initialization shared by binaries and integration tests.

/// Initialize tracing with an env-filter (RUST_LOG), defaulting to info.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
