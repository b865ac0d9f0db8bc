//! Subscriber setup for the helper binaries.

use crate::config::log_filter;
use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber filtered by `STOREFRONT_LOG`.
///
/// Stdout carries JSON for callers, so logs never go there. Calling this
/// twice is harmless; the second install is silently skipped.
pub fn init_logging() {
    let filter = EnvFilter::try_new(log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
