//! themekit storage
//!
//! Persistence primitives for theme selections: an async key-value contract
//! ([`KeyValueStore`]) with an in-memory backend and a JSON file backend.

pub mod error;
pub mod file;
pub mod kv;
pub mod memory;
pub mod paths;

pub use error::{IoOperation, StorageError, StorageResult};
pub use file::{FileStore, StoredEntry};
pub use kv::{KeyValueStore, THEME_KEY};
pub use memory::MemoryStore;
