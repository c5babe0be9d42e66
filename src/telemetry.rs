use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info`. Returns `false` when a
/// subscriber was already installed.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).try_init().is_ok()
}
