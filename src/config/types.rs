//! Configuration data model.
//!
//! `FileConfig` mirrors the TOML file with every field optional; resolution
//! into `Config` (defaults, env and validation) happens in `loader`.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USER, DEFAULT_APP_NAME, DEFAULT_HISTORY_SIZE,
    DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS,
};
use super::sources::ConfigSource;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub console: ConsoleConfig,
}

/// Connection settings for the session handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL of the Sling server.
    pub url: String,
    pub admin_user: String,
    pub admin_password: String,
    /// Per-request timeout, at least one second.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Interactive console settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub app_name: String,
    pub echo_results: bool,
    pub suppress_startup_output: bool,
    pub force_simple_prompt: bool,
    /// Line-editor history file. `None` disables persistent history.
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    /// Lines evaluated once before the first prompt.
    pub rc_file: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            echo_results: false,
            suppress_startup_output: true,
            force_simple_prompt: true,
            history_file: super::paths::default_history_path(),
            history_size: DEFAULT_HISTORY_SIZE,
            rc_file: None,
        }
    }
}

/// Config plus where it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileConfig {
    pub(super) server: FileServerConfig,
    pub(super) console: FileConsoleConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileServerConfig {
    #[serde(alias = "base_url")]
    pub(super) url: Option<String>,
    pub(super) admin_user: Option<String>,
    pub(super) admin_password: Option<String>,
    pub(super) timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileConsoleConfig {
    pub(super) app_name: Option<String>,
    pub(super) echo_results: Option<bool>,
    pub(super) suppress_startup_output: Option<bool>,
    pub(super) force_simple_prompt: Option<bool>,
    pub(super) history_file: Option<String>,
    pub(super) history_size: Option<usize>,
    pub(super) rc_file: Option<String>,
}
