#![forbid(unsafe_code)]

//! Logging glue.
//!
//! With `tracing-json` a host that has no subscriber of its own can install
//! a JSON one filtered by `RUST_LOG`.

/// Install a global JSON subscriber honoring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
