//! Structured logging to stderr.
//!
//! Stdout belongs to the host protocol (command output or JSON-RPC), so all
//! diagnostics go to stderr.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn filter_from_config(config: &Config) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install the global `tracing` subscriber.
///
/// The first call wins; later calls are ignored so that tests and embedding
/// hosts may initialise logging freely.
pub fn init_logging(config: &Config) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    // A subscriber may already be installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
