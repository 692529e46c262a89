//! Diagnostic logging via `tracing-subscriber`.
//!
//! Logs go to stderr, filtered by `PORTAL_LOG` (same syntax as `RUST_LOG`).
//! The default level is `warn` so a normal session shows nothing.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "PORTAL_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Build the filter from a `PORTAL_LOG` value, falling back to the default
/// when it is unset or unparsable.
pub fn filter_from(value: Option<&str>) -> EnvFilter {
    value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(ansi: bool) {
    let value = std::env::var(LOG_ENV_VAR).ok();
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from(value.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
