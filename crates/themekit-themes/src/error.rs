//! Error types for the themes module

use themekit_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    /// No custom palette or reserved name matches
    #[error("Theme '{0}' not found. Are you sure you registered it in the theme registry?")]
    NotFound(String),

    /// Observer access outside a provider scope
    #[error("use_current_theme must be called within a ThemeProvider scope")]
    NotInitialized,

    #[error("Invalid theme registry: {0}")]
    InvalidRegistry(String),

    #[error("Invalid theme format: {0}")]
    InvalidFormat(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ThemeError {
    /// Whether this error means the requested theme is not registered
    pub fn is_not_found(&self) -> bool {
        matches!(self, ThemeError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ThemeError>;
