//! Environment variable overrides.
//!
//! `PORTAL_*` variables win over every file source.

use crate::error::ConfigError;

use super::paths::expand_home;
use super::Config;

pub(super) const ENV_SERVER_URL: &str = "PORTAL_SERVER_URL";
pub(super) const ENV_ADMIN_USER: &str = "PORTAL_ADMIN_USER";
pub(super) const ENV_ADMIN_PASSWORD: &str = "PORTAL_ADMIN_PASSWORD";
pub(super) const ENV_TIMEOUT_SECS: &str = "PORTAL_TIMEOUT_SECS";
pub(super) const ENV_HISTORY_FILE: &str = "PORTAL_HISTORY_FILE";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup(ENV_SERVER_URL)) {
        config.server.url = url;
    }
    if let Some(user) = non_empty(env_lookup(ENV_ADMIN_USER)) {
        config.server.admin_user = user;
    }
    // An empty password is a legitimate value, so it is not filtered.
    if let Some(password) = env_lookup(ENV_ADMIN_PASSWORD) {
        config.server.admin_password = password;
    }
    if let Some(timeout) = non_empty(env_lookup(ENV_TIMEOUT_SECS)) {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_TIMEOUT_SECS} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.server.timeout_secs = parsed.max(1);
    }
    if let Some(history) = env_lookup(ENV_HISTORY_FILE) {
        // Empty disables persistent history.
        config.console.history_file = if history.trim().is_empty() {
            None
        } else {
            Some(expand_home(history.trim()))
        };
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
