//! Validated settings

use crate::schema::RawConfig;
use inventory_util::{IdPolicy, expand_tilde};
use std::path::PathBuf;

/// Validated settings ready for use by the CLI
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub store: StoreSettings,

    /// Default log filter. None leaves the choice to the caller.
    pub log_level: Option<String>,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            store: StoreSettings {
                path: raw.store.path.map(expand_tilde),
                id_policy: raw.store.id_policy.unwrap_or_default(),
                lock: raw.store.lock.unwrap_or(true),
            },
            log_level: raw.logging.level.map(|l| l.to_ascii_lowercase()),
        }
    }
}

/// Store settings
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Configured store path. None means use the default path.
    pub path: Option<PathBuf>,
    pub id_policy: IdPolicy,
    pub lock: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: None,
            id_policy: IdPolicy::Sequential,
            lock: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_sections_missing() {
        let raw: RawConfig = toml::from_str("config_version = 1").unwrap();
        let settings = Settings::from_raw(raw);
        assert!(settings.store.path.is_none());
        assert_eq!(settings.store.id_policy, IdPolicy::Sequential);
        assert!(settings.store.lock);
        assert!(settings.log_level.is_none());
    }

    #[test]
    fn absolute_path_is_kept() {
        let raw: RawConfig = toml::from_str(
            r#"
            config_version = 1
            [store]
            path = "/srv/cellar.csv"
            "#,
        )
        .unwrap();
        let settings = Settings::from_raw(raw);
        assert_eq!(settings.store.path, Some(PathBuf::from("/srv/cellar.csv")));
    }

    #[test]
    fn level_is_lowercased() {
        let raw: RawConfig = toml::from_str(
            r#"
            config_version = 1
            [logging]
            level = "Info"
            "#,
        )
        .unwrap();
        assert_eq!(Settings::from_raw(raw).log_level.as_deref(), Some("info"));
    }
}
