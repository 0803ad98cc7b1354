//! Bootstrap utilities for wunderpass binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV_VAR: &str = "WUNDERPASS_LOG_FORMAT";

/// Initialize tracing with the WUNDERPASS_LOG environment variable.
///
/// Defaults to "info" level if WUNDERPASS_LOG is not set. Setting
/// WUNDERPASS_LOG_FORMAT=json switches to one JSON object per line.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json_requested(std::env::var(LOG_FORMAT_ENV_VAR).ok().as_deref()) {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn json_requested(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.eq_ignore_ascii_case("json"))
}
