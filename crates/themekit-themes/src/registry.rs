//! Theme registry and name resolution
//!
//! A registry bundles the dark and light palettes, an optional default theme
//! name and an optional producer of custom named palettes. Names resolve in
//! this order:
//! 1. Custom palettes (exact, case-sensitive; first match in sequence order)
//! 2. Reserved names `dark`, `light` and `system`
//!
//! Registering a custom palette named `dark` therefore overrides the built-in
//! dark palette.

use std::{fmt, sync::Arc};

use crate::{
    error::{Result, ThemeError},
    types::{NamedPalette, Palette, ThemeMode},
};

/// Producer of custom palettes, invoked on every resolution
///
/// Keep it cheap or cache inside the closure; it is not memoized here.
pub type CustomPalettes = Arc<dyn Fn() -> Vec<NamedPalette> + Send + Sync>;

/// Theme configuration supplied by the application
#[derive(Clone)]
pub struct ThemeRegistry {
    default_theme: Option<String>,
    dark: Palette,
    light: Palette,
    custom: Option<CustomPalettes>,
}

impl ThemeRegistry {
    /// Create a registry with only the reserved palettes
    pub fn new(dark: Palette, light: Palette) -> Self {
        Self {
            default_theme: None,
            dark,
            light,
            custom: None,
        }
    }

    /// Set the default theme name
    pub fn with_default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = Some(name.into());
        self
    }

    /// Replace the custom palettes with a fixed list
    pub fn with_custom_list(mut self, palettes: Vec<NamedPalette>) -> Self {
        self.custom = Some(Arc::new(move || palettes.clone()));
        self
    }

    pub fn builder() -> ThemeRegistryBuilder {
        ThemeRegistryBuilder::default()
    }

    /// Name used when nothing has been persisted
    pub fn default_theme(&self) -> Option<&str> {
        self.default_theme.as_deref()
    }

    pub fn dark(&self) -> &Palette {
        &self.dark
    }

    pub fn light(&self) -> &Palette {
        &self.light
    }

    pub fn has_custom_palettes(&self) -> bool {
        self.custom.is_some()
    }

    /// Invoke the custom palette producer, empty when none is configured
    pub fn custom_palettes(&self) -> Vec<NamedPalette> {
        self.custom.as_ref().map(|produce| produce()).unwrap_or_default()
    }

    /// Resolve a theme name to a palette
    ///
    /// `system_is_dark` is only consulted for the reserved `system` name.
    pub fn resolve(&self, name: &str, system_is_dark: bool) -> Result<Palette> {
        if let Some(produce) = &self.custom {
            if let Some(found) = produce().into_iter().find(|entry| entry.name == name) {
                tracing::debug!("Resolved '{}' to a custom palette", name);
                return Ok(found.palette);
            }
        }

        match ThemeMode::from_name(name) {
            Some(ThemeMode::Dark) => Ok(self.dark.clone()),
            Some(ThemeMode::Light) => Ok(self.light.clone()),
            Some(ThemeMode::System) => {
                tracing::debug!("Resolving 'system' with system_is_dark={}", system_is_dark);
                if system_is_dark {
                    Ok(self.dark.clone())
                } else {
                    Ok(self.light.clone())
                }
            }
            None => Err(ThemeError::NotFound(name.to_string())),
        }
    }

    /// Whether `name` would resolve
    pub fn contains(&self, name: &str) -> bool {
        ThemeMode::from_name(name).is_some()
            || self.custom_palettes().iter().any(|entry| entry.name == name)
    }

    /// All selectable names: reserved names first, then custom names in
    /// producer order with duplicates removed
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = ThemeMode::ALL
            .iter()
            .map(|mode| mode.as_str().to_string())
            .collect();
        for entry in self.custom_palettes() {
            if !names.contains(&entry.name) {
                names.push(entry.name);
            }
        }
        names
    }
}

impl fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("default_theme", &self.default_theme)
            .field("dark", &self.dark)
            .field("light", &self.light)
            .field("has_custom_palettes", &self.custom.is_some())
            .finish()
    }
}

/// Identity pass-through for a fully built registry
pub fn create_theme_registry(registry: ThemeRegistry) -> ThemeRegistry {
    registry
}

/// Builder validating registry shape at construction
#[derive(Default)]
pub struct ThemeRegistryBuilder {
    default_theme: Option<String>,
    dark: Option<Palette>,
    light: Option<Palette>,
    custom: Option<CustomPalettes>,
}

impl ThemeRegistryBuilder {
    pub fn default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = Some(name.into());
        self
    }

    pub fn dark(mut self, palette: Palette) -> Self {
        self.dark = Some(palette);
        self
    }

    pub fn light(mut self, palette: Palette) -> Self {
        self.light = Some(palette);
        self
    }

    /// Set a producer invoked on each resolution
    pub fn custom_palettes<F>(mut self, produce: F) -> Self
    where
        F: Fn() -> Vec<NamedPalette> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(produce));
        self
    }

    /// Register a fixed list of custom palettes
    pub fn custom_list(self, palettes: Vec<NamedPalette>) -> Self {
        self.custom_palettes(move || palettes.clone())
    }

    pub fn build(self) -> Result<ThemeRegistry> {
        let dark = self
            .dark
            .ok_or_else(|| ThemeError::InvalidRegistry("dark palette is required".to_string()))?;
        let light = self
            .light
            .ok_or_else(|| ThemeError::InvalidRegistry("light palette is required".to_string()))?;

        Ok(ThemeRegistry {
            default_theme: self.default_theme,
            dark,
            light,
            custom: self.custom,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::types::BACKGROUND_COLOR;

    fn palette(bg: &str) -> Palette {
        Palette::new().with(BACKGROUND_COLOR, bg)
    }

    fn registry() -> ThemeRegistry {
        ThemeRegistry::builder()
            .dark(palette("black"))
            .light(palette("white"))
            .custom_list(vec![
                NamedPalette::new("blue", palette("#0000ff")),
                NamedPalette::new("red", palette("#ff0000")),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_reserved_names() {
        let registry = registry();
        for system_is_dark in [true, false] {
            assert_eq!(registry.resolve("dark", system_is_dark).unwrap(), palette("black"));
            assert_eq!(registry.resolve("light", system_is_dark).unwrap(), palette("white"));
        }
    }

    #[test]
    fn test_resolve_system_follows_flag() {
        let registry = registry();
        assert_eq!(registry.resolve("system", true).unwrap(), palette("black"));
        assert_eq!(registry.resolve("system", false).unwrap(), palette("white"));
    }

    #[test]
    fn test_resolve_custom_palette() {
        let registry = registry();
        assert_eq!(registry.resolve("red", false).unwrap(), palette("#ff0000"));
    }

    #[test]
    fn test_custom_palette_overrides_reserved_name() {
        let registry = ThemeRegistry::builder()
            .dark(palette("black"))
            .light(palette("white"))
            .custom_list(vec![NamedPalette::new("dark", palette("#101010"))])
            .build()
            .unwrap();

        assert_eq!(registry.resolve("dark", false).unwrap(), palette("#101010"));
        // system still points at the registry's dark palette
        assert_eq!(registry.resolve("system", true).unwrap(), palette("black"));
    }

    #[test]
    fn test_duplicate_custom_names_resolve_to_first() {
        let registry = ThemeRegistry::builder()
            .dark(palette("black"))
            .light(palette("white"))
            .custom_list(vec![
                NamedPalette::new("ocean", palette("first")),
                NamedPalette::new("ocean", palette("second")),
            ])
            .build()
            .unwrap();

        assert_eq!(registry.resolve("ocean", false).unwrap(), palette("first"));
        assert_eq!(registry.names(), vec!["dark", "light", "system", "ocean"]);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = registry().resolve("teal", true).unwrap_err();
        assert!(matches!(err, ThemeError::NotFound(ref name) if name == "teal"));
        let message = err.to_string();
        assert!(message.contains("'teal'"));
        assert!(message.contains("registered"));
    }

    #[test]
    fn test_resolution_is_case_sensitive() {
        assert!(registry().resolve("Dark", true).is_err());
        assert!(registry().resolve("BLUE", true).is_err());
    }

    #[test]
    fn test_custom_producer_invoked_per_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let registry = ThemeRegistry::builder()
            .dark(palette("black"))
            .light(palette("white"))
            .custom_palettes(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                vec![NamedPalette::new("green", palette("#00ff00"))]
            })
            .build()
            .unwrap();

        registry.resolve("green", false).unwrap();
        registry.resolve("light", false).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_builder_requires_dark_and_light() {
        let missing_dark = ThemeRegistry::builder().light(palette("white")).build();
        assert!(matches!(missing_dark, Err(ThemeError::InvalidRegistry(_))));

        let missing_light = ThemeRegistry::builder().dark(palette("black")).build();
        assert!(matches!(missing_light, Err(ThemeError::InvalidRegistry(_))));
    }

    #[test]
    fn test_contains_and_names() {
        let registry = registry();
        assert!(registry.contains("system"));
        assert!(registry.contains("blue"));
        assert!(!registry.contains("teal"));
        assert_eq!(
            registry.names(),
            vec!["dark", "light", "system", "blue", "red"]
        );
    }

    #[test]
    fn test_registry_without_custom_palettes() {
        let registry = ThemeRegistry::new(palette("black"), palette("white"));
        assert!(!registry.has_custom_palettes());
        assert!(registry.custom_palettes().is_empty());
        assert!(registry.default_theme().is_none());
        assert!(registry.resolve("blue", false).is_err());
    }

    #[test]
    fn test_create_theme_registry_is_identity() {
        let registry = create_theme_registry(
            ThemeRegistry::builder()
                .default_theme("light")
                .dark(palette("black"))
                .light(palette("white"))
                .build()
                .unwrap(),
        );
        assert_eq!(registry.default_theme(), Some("light"));
    }
}
