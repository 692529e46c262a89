//! Platform path helpers.

use std::path::PathBuf;

use super::defaults::APP_DIR_NAME;

/// Platform config root (`$XDG_CONFIG_HOME` or `~/.config` on Linux).
pub(super) fn config_root_dir() -> Option<PathBuf> {
    dirs::config_dir()
}

/// Default line-editor history path (`~/.local/share/portal/history`).
pub fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join("history"))
}

/// Expand a leading `~/` against the home directory.
pub(super) fn expand_home(raw: &str) -> PathBuf {
    expand_home_with(raw, dirs::home_dir())
}

pub(super) fn expand_home_with(raw: &str, home: Option<PathBuf>) -> PathBuf {
    if raw == "~" {
        if let Some(home) = home {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = home {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_tilde_prefix() {
        let home = Some(PathBuf::from("/home/dev"));
        assert_eq!(
            expand_home_with("~/.portalrc", home.clone()),
            PathBuf::from("/home/dev/.portalrc")
        );
        assert_eq!(expand_home_with("~", home.clone()), PathBuf::from("/home/dev"));
        assert_eq!(
            expand_home_with("/etc/portal", home),
            PathBuf::from("/etc/portal")
        );
    }

    #[test]
    fn leaves_tilde_when_home_is_unknown() {
        assert_eq!(expand_home_with("~/x", None), PathBuf::from("~/x"));
    }
}
