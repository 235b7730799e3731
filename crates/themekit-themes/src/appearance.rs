//! System appearance queries
//!
//! The store asks the host whether the OS is in dark mode every time it
//! resolves `system`. Changes are not observed between resolutions.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Environment variable read by [`EnvAppearance`]
pub const APPEARANCE_ENV_VAR: &str = "THEMEKIT_APPEARANCE";

/// Host-supplied dark-mode query
pub trait SystemAppearance: Send + Sync {
    fn is_dark(&self) -> bool;
}

impl<F> SystemAppearance for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_dark(&self) -> bool {
        self()
    }
}

/// Appearance that never changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAppearance(pub bool);

impl FixedAppearance {
    pub const DARK: FixedAppearance = FixedAppearance(true);
    pub const LIGHT: FixedAppearance = FixedAppearance(false);
}

impl SystemAppearance for FixedAppearance {
    fn is_dark(&self) -> bool {
        self.0
    }
}

/// Appearance flag the host flips when the OS setting changes
#[derive(Debug, Clone, Default)]
pub struct SharedAppearance {
    dark: Arc<AtomicBool>,
}

impl SharedAppearance {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Arc::new(AtomicBool::new(dark)),
        }
    }

    pub fn set_dark(&self, dark: bool) {
        self.dark.store(dark, Ordering::Relaxed);
    }
}

impl SystemAppearance for SharedAppearance {
    fn is_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }
}

/// Reads `THEMEKIT_APPEARANCE` (`dark` or `light`) on every query
///
/// Anything else, including an unset variable, counts as light.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvAppearance;

impl SystemAppearance for EnvAppearance {
    fn is_dark(&self) -> bool {
        std::env::var(APPEARANCE_ENV_VAR)
            .map(|value| value.trim().eq_ignore_ascii_case("dark"))
            .unwrap_or(false)
    }
}
