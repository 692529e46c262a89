//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`PORTAL_SERVER_URL`, `PORTAL_ADMIN_USER`,
//!    `PORTAL_ADMIN_PASSWORD`, `PORTAL_TIMEOUT_SECS`, `PORTAL_HISTORY_FILE`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./portal.toml in the current directory
//! 4. $XDG_CONFIG_HOME/portal/portal.toml (or ~/.config/portal/portal.toml)
//! 5. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.

mod defaults;
mod env;
mod loader;
mod paths;
mod sources;
mod types;

pub use loader::{load_config, validate_config};
pub use paths::default_history_path;
pub use sources::ConfigSource;
pub use types::{Config, ConsoleConfig, LoadedConfig, ServerConfig};
