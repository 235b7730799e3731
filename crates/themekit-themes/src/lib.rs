//! themekit theme management
//!
//! Named color themes with light, dark and system variants plus custom
//! palettes, a store that publishes the active palette and persists the
//! user's selection, scoped access for consumers and a picker dialog.

pub mod appearance;
pub mod context;
pub mod dialog;
pub mod error;
pub mod loader;
pub mod registry;
pub mod store;
pub mod types;

pub use appearance::{EnvAppearance, FixedAppearance, SharedAppearance, SystemAppearance};
pub use context::{use_current_theme, ProviderGuard, ThemeHandle, ThemeProvider};
pub use dialog::{DialogAction, DialogColors, ThemeDialog, ThemeOption, THEME_OPTIONS};
pub use error::{Result, ThemeError};
pub use loader::{RegistryFile, RegistryFormat, RegistryLoader};
pub use registry::{create_theme_registry, CustomPalettes, ThemeRegistry, ThemeRegistryBuilder};
pub use store::{ActivePalette, ThemeStore};
pub use types::{NamedPalette, Palette, ThemeMode};
