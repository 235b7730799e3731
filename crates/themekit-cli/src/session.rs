// Registry, storage and store wiring shared by every command

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use themekit_storage::{paths, FileStore, KeyValueStore};
use themekit_themes::{RegistryLoader, ThemeRegistry, ThemeStore};

use crate::{error::CliResult, router::AppearanceArg, router::Cli};

/// A theme store backed by the preferences file
pub struct ThemeSession {
    store: ThemeStore,
    storage: Arc<FileStore>,
}

impl ThemeSession {
    pub fn open(cli: &Cli) -> CliResult<Self> {
        Self::from_paths(cli.registry.as_deref(), cli.store.clone(), cli.appearance)
    }

    /// An explicit registry path must exist; the default one falls back to
    /// the built-in palettes
    pub fn from_paths(
        registry: Option<&Path>,
        store: Option<PathBuf>,
        appearance: AppearanceArg,
    ) -> CliResult<Self> {
        let registry = match registry {
            Some(path) => RegistryLoader::load_from_file(path)?,
            None => RegistryLoader::load_or_builtin(&paths::default_registry_path()?)?,
        };
        let storage = match store {
            Some(path) => FileStore::new(path),
            None => FileStore::with_default_path()?,
        };

        Ok(Self::new(registry, storage, appearance))
    }

    pub fn new(registry: ThemeRegistry, storage: FileStore, appearance: AppearanceArg) -> Self {
        let storage = Arc::new(storage);
        let store = ThemeStore::new(registry, storage.clone(), appearance);
        Self { store, storage }
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    pub fn storage_path(&self) -> &Path {
        self.storage.path()
    }

    /// Name currently written to storage, if any
    pub async fn stored_name(&self) -> CliResult<Option<String>> {
        let name = self.storage.get(self.store.storage_key()).await?;
        Ok(name.filter(|name| !name.is_empty()))
    }
}
