//! Logging initialization.
//!
//! Logs go to stderr so that stdout carries only the balance CSV.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
///
/// `RUST_LOG` takes precedence over `default_filter`. Safe to call multiple
/// times; later calls are no-ops.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
