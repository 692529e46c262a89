//! Config-file source discovery.
//!
//! Source order: explicit path > `./portal.toml` > global file > built-in defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{APP_DIR_NAME, CONFIG_FILE_NAME};

/// Where the active configuration text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Config loaded from explicit `--config` path.
    Explicit(PathBuf),
    /// Config loaded from `./portal.toml`.
    Local,
    /// Config loaded from the per-user config directory.
    Global(PathBuf),
    /// No file found; runtime defaults were used.
    BuiltInDefaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Global(path) => write!(f, "{}", path.display()),
            Self::Local => write!(f, "./{CONFIG_FILE_NAME}"),
            Self::BuiltInDefaults => write!(f, "built-in defaults"),
        }
    }
}

/// Read config text from the highest-precedence available source.
pub(super) fn read_config_text_with_sources<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // An explicit path must exist; a missing file is an error, not a fallback.
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    if let Ok(text) = read_file(Path::new(CONFIG_FILE_NAME)) {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(dir) = config_root() {
        let global = dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}
