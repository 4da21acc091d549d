//! Default paths for the inventory tools
//!
//! Provides centralized path defaults. Paths are user-writable (no root required):
//! - Store: `~/projects/inventory-manager/inventory.csv`
//! - Config: `$XDG_CONFIG_HOME/inventory/config.toml` or `~/.config/inventory/config.toml`
//!
//! Nothing here is cached; callers resolve a path once and hand it to the store.

use std::path::{Path, PathBuf};

/// Store filename
const STORE_FILENAME: &str = "inventory.csv";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Application subdirectory name
const APP_DIR: &str = "inventory";

/// Get the default store path: `~/projects/inventory-manager/inventory.csv`.
///
/// The `$INVENTORY_STORE` override is applied by the CLI before falling back
/// to this.
pub fn default_store_path() -> PathBuf {
    match home_dir() {
        Some(home) => home
            .join("projects")
            .join("inventory-manager")
            .join(STORE_FILENAME),
        // Last resort
        None => PathBuf::from("/tmp").join(APP_DIR).join(STORE_FILENAME),
    }
}

/// Get the default configuration file path.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/inventory/config.toml` (if XDG_CONFIG_HOME is set)
/// 2. `~/.config/inventory/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    match home_dir() {
        Some(home) => home.join(".config").join(APP_DIR).join(CONFIG_FILENAME),
        None => PathBuf::from("/tmp").join(APP_DIR).join(CONFIG_FILENAME),
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Only `~` and `~/...` are expanded; `~user/...` is returned unchanged.
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
