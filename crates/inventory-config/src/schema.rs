//! Raw configuration schema (as parsed from TOML)

use inventory_util::IdPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Store settings
    #[serde(default)]
    pub store: RawStoreConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: RawLoggingConfig,
}

/// Store-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStoreConfig {
    /// Store file path; `~` is expanded
    pub path: Option<PathBuf>,

    /// Id assignment policy: "sequential" or "random"
    pub id_policy: Option<IdPolicy>,

    /// Take advisory locks around store access (default: true)
    pub lock: Option<bool>,
}

/// Logging settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLoggingConfig {
    /// Default level filter, overridden by RUST_LOG
    pub level: Option<String>,
}
