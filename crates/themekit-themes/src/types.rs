//! Core theme types and data structures

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// Conventional palette key for the background color
pub const BACKGROUND_COLOR: &str = "backgroundColor";
/// Conventional palette key for the text color
pub const TEXT_COLOR: &str = "textColor";
/// Conventional palette key for borders and separators
pub const STROKE_COLOR: &str = "strokeColor";

/// A set of style values for one theme variant
///
/// Keys are free-form; consumers agree on them by convention (see
/// [`BACKGROUND_COLOR`], [`TEXT_COLOR`], [`STROKE_COLOR`]). Values are
/// usually CSS-style colors such as `#ff0000`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(BTreeMap<String, String>);

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add an entry, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Background color, if the palette defines one
    pub fn background_color(&self) -> Option<&str> {
        self.get(BACKGROUND_COLOR)
    }

    /// Text color, if the palette defines one
    pub fn text_color(&self) -> Option<&str> {
        self.get(TEXT_COLOR)
    }

    /// Stroke color, if the palette defines one
    pub fn stroke_color(&self) -> Option<&str> {
        self.get(STROKE_COLOR)
    }
}

impl<K, V> FromIterator<(K, V)> for Palette
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for Palette {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// A palette registered under a custom name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPalette {
    pub name: String,
    pub palette: Palette,
}

impl NamedPalette {
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
        }
    }
}

/// Reserved theme names that always resolve against a valid registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    Dark,
    Light,
    /// Follows the host's dark-mode preference at resolution time
    System,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Dark, ThemeMode::Light, ThemeMode::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
            ThemeMode::System => "system",
        }
    }

    /// Parse a reserved name; exact, case-sensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ThemeError::NotFound(s.to_string()))
    }
}
