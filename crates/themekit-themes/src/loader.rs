//! Registry loading from YAML, TOML or JSON files
//!
//! ```yaml
//! default_theme: system
//! dark:
//!   backgroundColor: "#000000"
//!   textColor: "#ffffff"
//! light:
//!   backgroundColor: "#ffffff"
//!   textColor: "#000000"
//! custom:
//!   - name: ocean
//!     palette:
//!       backgroundColor: "#003366"
//! ```

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ThemeError},
    registry::ThemeRegistry,
    types::{NamedPalette, Palette, BACKGROUND_COLOR, STROKE_COLOR, TEXT_COLOR},
};

/// Serialized registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
    pub dark: Palette,
    pub light: Palette,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<NamedPalette>,
}

impl RegistryFile {
    /// Convert into a registry, custom palettes become a fixed list
    pub fn into_registry(self) -> ThemeRegistry {
        let mut registry = ThemeRegistry::new(self.dark, self.light);
        if let Some(name) = self.default_theme {
            registry = registry.with_default_theme(name);
        }
        if !self.custom.is_empty() {
            registry = registry.with_custom_list(self.custom);
        }
        registry
    }
}

/// Supported registry file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    Yaml,
    Toml,
    Json,
}

impl RegistryFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(RegistryFormat::Yaml),
            "toml" => Some(RegistryFormat::Toml),
            "json" => Some(RegistryFormat::Json),
            _ => None,
        }
    }
}

/// Registry file loader
pub struct RegistryLoader;

impl RegistryLoader {
    /// Parse and validate registry content
    pub fn load_from_str(content: &str, format: RegistryFormat) -> Result<ThemeRegistry> {
        let file: RegistryFile = match format {
            RegistryFormat::Yaml => serde_yaml::from_str(content)?,
            RegistryFormat::Toml => toml::from_str(content)?,
            RegistryFormat::Json => serde_json::from_str(content)?,
        };

        Self::validate(&file)?;
        Ok(file.into_registry())
    }

    /// Load a registry from a file, format chosen by extension
    pub fn load_from_file(path: &Path) -> Result<ThemeRegistry> {
        if !path.exists() {
            return Err(ThemeError::InvalidRegistry(format!(
                "Registry file not found: {}",
                path.display()
            )));
        }

        let format = RegistryFormat::from_path(path).ok_or_else(|| {
            ThemeError::InvalidFormat(format!(
                "Registry file must be YAML, TOML or JSON: {}",
                path.display()
            ))
        })?;

        let content = fs::read_to_string(path)?;
        let registry = Self::load_from_str(&content, format)?;
        tracing::info!("Loaded theme registry from {}", path.display());
        Ok(registry)
    }

    /// Load a registry from a file, or the built-in registry when it does not exist
    pub fn load_or_builtin(path: &Path) -> Result<ThemeRegistry> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(
                "No registry file at {}, using built-in palettes",
                path.display()
            );
            Ok(Self::builtin())
        }
    }

    /// Save a registry description to a file, format chosen by extension
    pub fn save_to_file(file: &RegistryFile, path: &Path) -> Result<()> {
        let format = RegistryFormat::from_path(path).ok_or_else(|| {
            ThemeError::InvalidFormat(format!(
                "Registry file must be YAML, TOML or JSON: {}",
                path.display()
            ))
        })?;

        let content = match format {
            RegistryFormat::Yaml => serde_yaml::to_string(file)?,
            RegistryFormat::Toml => toml::to_string_pretty(file)
                .map_err(|e| ThemeError::InvalidFormat(e.to_string()))?,
            RegistryFormat::Json => serde_json::to_string_pretty(file)?,
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Built-in dark and light palettes, default theme `system`
    pub fn builtin() -> ThemeRegistry {
        Self::builtin_file().into_registry()
    }

    pub fn builtin_file() -> RegistryFile {
        RegistryFile {
            default_theme: Some("system".to_string()),
            dark: Palette::new()
                .with(BACKGROUND_COLOR, "#121212")
                .with(TEXT_COLOR, "#ffffff")
                .with(STROKE_COLOR, "#3a5f37"),
            light: Palette::new()
                .with(BACKGROUND_COLOR, "#ffffff")
                .with(TEXT_COLOR, "#000000")
                .with(STROKE_COLOR, "#c0e6ba"),
            custom: Vec::new(),
        }
    }

    fn validate(file: &RegistryFile) -> Result<()> {
        if file.dark.is_empty() {
            return Err(ThemeError::InvalidRegistry(
                "dark palette cannot be empty".to_string(),
            ));
        }
        if file.light.is_empty() {
            return Err(ThemeError::InvalidRegistry(
                "light palette cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &file.custom {
            if entry.name.is_empty() {
                return Err(ThemeError::InvalidRegistry(
                    "custom palette name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                tracing::warn!(
                    "Duplicate custom palette '{}', the first definition wins",
                    entry.name
                );
            }
        }

        if let Some(default) = &file.default_theme {
            if default.is_empty() {
                return Err(ThemeError::InvalidRegistry(
                    "default_theme cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
