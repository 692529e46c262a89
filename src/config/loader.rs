//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::env::apply_runtime_env_overrides;
use super::paths::{config_root_dir, expand_home};
use super::sources::read_config_text_with_sources;
use super::types::{FileConfig, LoadedConfig};
use super::Config;

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    tracing::debug!(%source, "loading console configuration");
    let parsed: FileConfig = toml::from_str(&config_text)?;
    let mut config = resolve_file_config(parsed);
    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    validate_config(&config)?;
    Ok(LoadedConfig { config, source })
}

/// Overlay file values on the built-in defaults.
fn resolve_file_config(parsed: FileConfig) -> Config {
    let mut config = Config::default();
    let server = parsed.server;
    let console = parsed.console;

    if let Some(url) = server.url {
        config.server.url = url.trim().to_string();
    }
    if let Some(user) = server.admin_user {
        config.server.admin_user = user;
    }
    if let Some(password) = server.admin_password {
        config.server.admin_password = password;
    }
    if let Some(timeout) = server.timeout_secs {
        config.server.timeout_secs = timeout.max(1);
    }

    if let Some(name) = console.app_name {
        config.console.app_name = name.trim().to_string();
    }
    if let Some(echo) = console.echo_results {
        config.console.echo_results = echo;
    }
    if let Some(suppress) = console.suppress_startup_output {
        config.console.suppress_startup_output = suppress;
    }
    if let Some(force) = console.force_simple_prompt {
        config.console.force_simple_prompt = force;
    }
    if let Some(history) = console.history_file {
        config.console.history_file = if history.trim().is_empty() {
            None
        } else {
            Some(expand_home(history.trim()))
        };
    }
    if let Some(size) = console.history_size {
        config.console.history_size = size;
    }
    if let Some(rc) = console.rc_file {
        config.console.rc_file = (!rc.trim().is_empty()).then(|| expand_home(rc.trim()));
    }
    config
}

/// Reject configurations the console cannot start with.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.url.trim().is_empty() {
        return Err(ConfigError::Invalid("server.url must not be empty".into()));
    }
    if config.server.admin_user.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "server.admin_user must not be empty".into(),
        ));
    }
    if config.console.app_name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "console.app_name must not be empty".into(),
        ));
    }
    if config.console.history_size == 0 {
        return Err(ConfigError::Invalid(
            "console.history_size must be at least 1".into(),
        ));
    }
    Ok(())
}
