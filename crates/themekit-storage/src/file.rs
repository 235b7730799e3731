//! File-backed key-value store
//!
//! Entries are kept in a single JSON document:
//!
//! ```json
//! { "app-theme": { "value": "dark", "updated_at": "2024-01-01T00:00:00+00:00" } }
//! ```

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};

use crate::{
    error::{IoOperation, StorageError, StorageResult},
    kv::KeyValueStore,
    paths,
};

/// A single stored value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredEntry {
    /// Stored value
    pub value: String,
    /// Last updated timestamp in RFC3339 format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

type Entries = BTreeMap<String, StoredEntry>;

/// Key-value store persisted as a JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by the file at `path`
    ///
    /// The file and its parent directory are created on first write; the file
    /// is deleted once its last entry is removed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store at the default preference location
    pub fn with_default_path() -> StorageResult<Self> {
        Ok(Self::new(paths::default_preferences_path()?))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StorageResult<Entries> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(StorageError::io_error(
                    self.path.clone(),
                    IoOperation::Read,
                    e,
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            StorageError::parse_error(
                self.path.clone(),
                "json",
                format!("Failed to parse preferences: {}", e),
            )
        })
    }

    async fn save(&self, entries: &Entries) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    StorageError::io_error(parent.to_path_buf(), IoOperation::Write, e)
                })?;
            }
        }

        let content = serde_json::to_string_pretty(entries).map_err(|e| {
            StorageError::parse_error(
                self.path.clone(),
                "json",
                format!("Serialization failed: {}", e),
            )
        })?;

        // readers never see a partially written file
        let staging = self.staging_path();
        fs::write(&staging, content)
            .await
            .map_err(|e| StorageError::io_error(staging.clone(), IoOperation::Write, e))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StorageError::io_error(self.path.clone(), IoOperation::Write, e))
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn delete(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io_error(
                self.path.clone(),
                IoOperation::Delete,
                e,
            )),
        }
    }

    /// Read the full entry, including its timestamp
    pub async fn entry(&self, key: &str) -> StorageResult<Option<StoredEntry>> {
        Ok(self.load().await?.remove(key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entry(key).await?.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                updated_at: Some(chrono::Local::now().to_rfc3339()),
            },
        );
        self.save(&entries).await?;
        tracing::debug!("Stored '{}' in {}", key, self.path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }

        if entries.is_empty() {
            self.delete().await?;
        } else {
            self.save(&entries).await?;
        }
        tracing::debug!("Removed '{}' from {}", key, self.path.display());
        Ok(())
    }
}
