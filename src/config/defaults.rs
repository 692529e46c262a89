//! Default configuration constants.

/// Sling server used when nothing else is configured.
pub(super) const DEFAULT_SERVER_URL: &str = "http://localhost:8080/";
/// Default administrator account on a fresh Sling instance.
pub(super) const DEFAULT_ADMIN_USER: &str = "admin";
pub(super) const DEFAULT_ADMIN_PASSWORD: &str = "admin";
/// Default timeout for one HTTP request.
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Console identity shown in the prompt and banner.
pub(super) const DEFAULT_APP_NAME: &str = "portal";
/// Maximum number of history entries kept by the line editor.
pub(super) const DEFAULT_HISTORY_SIZE: usize = 1000;
/// Config file name looked up locally and under the config root.
pub(super) const CONFIG_FILE_NAME: &str = "portal.toml";
/// Directory under the platform config/data roots.
pub(super) const APP_DIR_NAME: &str = "portal";
