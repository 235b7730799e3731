//! Storage location resolution

use std::path::PathBuf;

use crate::error::{StorageError, StorageResult};

/// Environment variable that overrides the themekit home directory
pub const HOME_ENV_VAR: &str = "THEMEKIT_HOME";

/// Resolve the themekit home directory
///
/// Resolution order:
/// 1. `THEMEKIT_HOME` environment variable
/// 2. `<config_dir>/themekit`
/// 3. `~/.themekit`
pub fn resolve_home() -> StorageResult<PathBuf> {
    if let Ok(home_override) = std::env::var(HOME_ENV_VAR) {
        if !home_override.is_empty() {
            return Ok(PathBuf::from(home_override));
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("themekit"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        return Ok(home_dir.join(".themekit"));
    }

    Err(StorageError::path_resolution_error(
        "Could not determine home directory",
    ))
}

/// Default location of the preference file
pub fn default_preferences_path() -> StorageResult<PathBuf> {
    Ok(resolve_home()?.join("preferences.json"))
}

/// Default location of the theme registry file
pub fn default_registry_path() -> StorageResult<PathBuf> {
    Ok(resolve_home()?.join("themes.yaml"))
}
