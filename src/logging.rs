use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Env var overriding the configured log filter, e.g.
/// `SOCIAL_SYNC_LOG=social_sync=debug`.
pub const LOG_ENV: &str = "SOCIAL_SYNC_LOG";

/// Initialize tracing to stderr. Stdout stays free for command output.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
