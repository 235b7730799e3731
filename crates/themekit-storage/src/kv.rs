//! Asynchronous key-value contract used to persist theme selections

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageResult;

/// Key under which the selected theme name is stored.
///
/// Changing this value makes previously stored selections unreadable.
pub const THEME_KEY: &str = "app-theme";

/// String key-value store with fallible async access
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value stored under `key`; absent keys are not an error
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key).await
    }
}
