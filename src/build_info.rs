//! Compile-time build metadata shown in the banner and `--version`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("PORTAL_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("PORTAL_BUILD_TIMESTAMP");

/// Banner line printed by the console during initialization.
pub fn banner_line(app_name: &str) -> String {
    format!("{app_name} {VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}

/// Long version text used by `portal --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("PORTAL_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("PORTAL_BUILD_TIMESTAMP")
);
