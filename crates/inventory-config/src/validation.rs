//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Level names accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("store.path cannot be empty")]
    EmptyStorePath,

    #[error("store.path '{0}' names a directory, expected a file")]
    StorePathIsDirectory(String),

    #[error("Unknown log level '{0}' (expected one of: trace, debug, info, warn, error, off)")]
    UnknownLogLevel(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(path) = &config.store.path {
        let text = path.to_string_lossy();
        if text.trim().is_empty() {
            errors.push(ValidationError::EmptyStorePath);
        } else if text.ends_with('/') || text == "~" {
            errors.push(ValidationError::StorePathIsDirectory(text.into_owned()));
        }
    }

    if let Some(level) = &config.logging.level
        && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
    {
        errors.push(ValidationError::UnknownLogLevel(level.clone()));
    }

    errors
}
