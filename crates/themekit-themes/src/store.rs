//! Runtime theme store
//!
//! Holds the active palette, resolves names against the registry, restores
//! the persisted selection on activation and persists new selections in the
//! background.
//!
//! Concurrent [`ThemeStore::set_theme`] calls publish in call order, so the
//! last resolved name wins in memory. Every selection gets a generation
//! number; storage writes are serialized and a write older than one that has
//! already landed is dropped, so storage converges on the latest selection.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use parking_lot::{Mutex, RwLock};
use themekit_storage::{KeyValueStore, StorageResult, THEME_KEY};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    appearance::SystemAppearance,
    error::{Result, ThemeError},
    registry::ThemeRegistry,
    types::Palette,
};

/// Currently published palette, `None` until something is selected
pub type ActivePalette = Option<Arc<Palette>>;

type ThemeListener = Arc<dyn Fn(&Arc<Palette>) + Send + Sync>;

/// Type alias for theme listeners
type ThemeListeners = Arc<Mutex<Vec<ThemeListener>>>;

/// Theme store shared by everything that renders with the active palette
#[derive(Clone)]
pub struct ThemeStore {
    registry: Arc<RwLock<Arc<ThemeRegistry>>>,
    storage: Arc<dyn KeyValueStore>,
    appearance: Arc<dyn SystemAppearance>,
    key: Arc<str>,
    active: Arc<watch::Sender<ActivePalette>>,
    listeners: ThemeListeners,
    activated: Arc<AtomicBool>,
    /// Name of the most recent selection; locked while publishing so
    /// generations follow publication order
    selection: Arc<Mutex<Option<String>>>,
    /// Generation of the most recent selection
    generation: Arc<AtomicU64>,
    /// Generation of the most recent selection written to storage
    persisted: Arc<tokio::sync::Mutex<u64>>,
    /// Stored name the last restore could not resolve
    unresolved: Arc<Mutex<Option<String>>>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("key", &self.key)
            .field("active", &*self.active.borrow())
            .field("activated", &self.activated.load(Ordering::Relaxed))
            .finish()
    }
}

impl ThemeStore {
    /// Create a store; nothing is published until [`activate`](Self::activate)
    /// or [`restore`](Self::restore) runs
    pub fn new<S, A>(registry: ThemeRegistry, storage: S, appearance: A) -> Self
    where
        S: KeyValueStore + 'static,
        A: SystemAppearance + 'static,
    {
        let (active, _) = watch::channel(None);
        Self {
            registry: Arc::new(RwLock::new(Arc::new(registry))),
            storage: Arc::new(storage),
            appearance: Arc::new(appearance),
            key: Arc::from(THEME_KEY),
            active: Arc::new(active),
            listeners: Arc::new(Mutex::new(Vec::new())),
            activated: Arc::new(AtomicBool::new(false)),
            selection: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            persisted: Arc::new(tokio::sync::Mutex::new(0)),
            unresolved: Arc::new(Mutex::new(None)),
        }
    }

    /// Use a different storage key, e.g. to namespace several applications
    /// sharing one backend
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = Arc::from(key.into());
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The registry currently attached
    pub fn registry(&self) -> Arc<ThemeRegistry> {
        self.registry.read().clone()
    }

    /// The active palette
    pub fn current(&self) -> ActivePalette {
        self.active.borrow().clone()
    }

    /// Receiver that observes every published palette
    pub fn subscribe(&self) -> watch::Receiver<ActivePalette> {
        self.active.subscribe()
    }

    /// Register a listener called with each newly published palette
    ///
    /// Listeners run after the palette is published and may call back into
    /// the store.
    pub fn on_theme_changed<F>(&self, listener: F)
    where
        F: Fn(&Arc<Palette>) + Send + Sync + 'static,
    {
        self.listeners.lock().push(Arc::new(listener));
    }

    /// Resolve a name against the attached registry and the current
    /// system appearance
    pub fn resolve(&self, name: &str) -> Result<Palette> {
        self.registry().resolve(name, self.appearance.is_dark())
    }

    /// Stored name the most recent restore failed to resolve, as
    /// [`ThemeError::NotFound`]; cleared by reading it or by a successful restore
    pub fn take_restore_error(&self) -> Option<ThemeError> {
        self.unresolved.lock().take().map(ThemeError::NotFound)
    }

    /// Publish a palette and assign it the next generation; `selection` must
    /// be the held selection lock
    fn publish_locked(
        &self,
        selection: &mut Option<String>,
        name: &str,
        palette: Palette,
    ) -> (Arc<Palette>, u64) {
        let palette = Arc::new(palette);
        self.active.send_replace(Some(palette.clone()));
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *selection = Some(name.to_string());
        (palette, generation)
    }

    /// Call listeners with a snapshot taken outside the listener lock
    fn notify(&self, palette: &Arc<Palette>) {
        let listeners: Vec<ThemeListener> = self.listeners.lock().clone();
        for listener in &listeners {
            listener(palette);
        }
    }

    /// Publish a palette the caller explicitly selected
    fn select(&self, name: &str, palette: Palette) -> (Arc<Palette>, u64) {
        let (palette, generation) = {
            let mut selection = self.selection.lock();
            self.publish_locked(&mut selection, name, palette)
        };
        self.notify(&palette);
        (palette, generation)
    }

    /// Restore the persisted selection
    ///
    /// Falls back to the registry default when nothing is stored or the
    /// storage read fails. A selection whose write has not landed yet is
    /// re-resolved instead of the stored name. A stored name that no longer
    /// resolves is returned as [`ThemeError::NotFound`] and leaves the active
    /// palette untouched. A selection made while the read is in flight takes
    /// precedence over the restored one.
    pub async fn restore(&self) -> Result<ActivePalette> {
        let mut persisted = self.persisted.lock().await;
        let started_at = self.generation.load(Ordering::SeqCst);
        let pending = started_at > *persisted;

        let name = if pending {
            let selected = self.selection.lock().clone();
            match selected {
                Some(name) => {
                    tracing::debug!("Re-resolving unsaved selection '{}'", name);
                    name
                }
                None => return Ok(self.current()),
            }
        } else {
            let stored = match self.storage.get(&self.key).await {
                Ok(value) => value.filter(|name| !name.is_empty()),
                Err(e) => {
                    tracing::warn!("Failed to read stored theme, using default: {}", e);
                    None
                }
            };

            match stored {
                Some(name) => {
                    tracing::debug!("Restoring stored theme '{}'", name);
                    name
                }
                None => match self.registry().default_theme() {
                    Some(default) => {
                        tracing::debug!("No stored theme, using default '{}'", default);
                        default.to_string()
                    }
                    None => {
                        tracing::info!("No stored theme and no default configured");
                        return Ok(self.current());
                    }
                },
            }
        };

        let palette = match self.resolve(&name) {
            Ok(palette) => palette,
            Err(e) => {
                tracing::error!("Cannot restore theme '{}': {}", name, e);
                *self.unresolved.lock() = Some(name);
                return Err(e);
            }
        };

        let (palette, generation) = {
            let mut selection = self.selection.lock();
            if self.generation.load(Ordering::SeqCst) != started_at {
                tracing::debug!("Theme changed during restore, keeping the newer selection");
                return Ok(self.current());
            }
            self.publish_locked(&mut selection, &name, palette)
        };
        if !pending {
            // storage already agrees with this selection
            *persisted = generation;
        }
        drop(persisted);

        self.unresolved.lock().take();
        self.notify(&palette);
        tracing::info!("Restored theme '{}'", name);
        Ok(Some(palette))
    }

    /// Start restoring in the background, once per activation
    ///
    /// Returns `None` when the store is already active. Must be called from
    /// within a Tokio runtime. The handle yields the restore outcome, so hosts
    /// can surface an unresolvable stored name; hosts that drop the handle can
    /// use [`take_restore_error`](Self::take_restore_error) instead.
    pub fn activate(&self) -> Option<JoinHandle<Result<ActivePalette>>> {
        if self.activated.swap(true, Ordering::SeqCst) {
            return None;
        }

        let store = self.clone();
        Some(tokio::spawn(async move { store.restore().await }))
    }

    pub fn is_activated(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }

    /// Attach a new registry and re-run restoration against it
    pub async fn replace_registry(&self, registry: ThemeRegistry) -> Result<ActivePalette> {
        *self.registry.write() = Arc::new(registry);
        self.activated.store(true, Ordering::SeqCst);
        self.restore().await
    }

    /// Switch to a theme by name
    ///
    /// Publishes immediately and writes the name to storage in a detached
    /// task. A failed write is logged and does not undo the switch. Outside a
    /// Tokio runtime the selection is published but not persisted.
    pub fn set_theme(&self, name: &str) -> Result<Arc<Palette>> {
        let (palette, generation) = self.select(name, self.resolve(name)?);
        tracing::debug!("Switched to theme '{}'", name);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let store = self.clone();
                let name = name.to_string();
                handle.spawn(async move {
                    if let Err(e) = store.persist(&name, generation).await {
                        tracing::warn!("Failed to persist theme '{}': {}", name, e);
                    }
                });
            }
            Err(_) => {
                tracing::warn!("No async runtime available, theme '{}' not persisted", name);
            }
        }

        Ok(palette)
    }

    /// Switch to a theme and wait for the storage write
    ///
    /// The palette is published before the write; a write error is returned
    /// but the switch stands.
    pub async fn set_theme_persisted(&self, name: &str) -> Result<Arc<Palette>> {
        let (palette, generation) = self.select(name, self.resolve(name)?);
        self.persist(name, generation).await?;
        Ok(palette)
    }

    /// Forget the stored selection; the active palette is kept for this session
    pub async fn clear_selection(&self) -> StorageResult<()> {
        let generation = {
            let _selection = self.selection.lock();
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        let mut persisted = self.persisted.lock().await;
        self.storage.remove(&self.key).await?;
        *persisted = generation;
        tracing::info!("Cleared stored theme selection");
        Ok(())
    }

    /// Write `name` unless a newer selection has already been written
    async fn persist(&self, name: &str, generation: u64) -> StorageResult<bool> {
        let mut persisted = self.persisted.lock().await;
        if *persisted > generation {
            tracing::debug!("Skipping stale write of theme '{}'", name);
            return Ok(false);
        }

        self.storage.set(&self.key, name).await?;
        *persisted = generation;
        tracing::debug!("Persisted theme '{}'", name);
        Ok(true)
    }
}
