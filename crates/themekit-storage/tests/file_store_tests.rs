use std::sync::Mutex;

use tempfile::TempDir;
use themekit_storage::{paths, FileStore, KeyValueStore, StorageError, THEME_KEY};

// Mutex to ensure test isolation when modifying environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("preferences.json"));

    assert!(store.get(THEME_KEY).await.unwrap().is_none());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_set_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("preferences.json");
    let store = FileStore::new(&path);

    store.set(THEME_KEY, "dark").await.unwrap();

    assert!(path.exists());
    assert_eq!(store.get(THEME_KEY).await.unwrap().as_deref(), Some("dark"));
}

#[tokio::test]
async fn test_value_survives_new_instance() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.json");

    FileStore::new(&path).set(THEME_KEY, "blue").await.unwrap();

    let reopened = FileStore::new(&path);
    let entry = reopened.entry(THEME_KEY).await.unwrap().unwrap();
    assert_eq!(entry.value, "blue");
    assert!(entry.updated_at.is_some());
}

#[tokio::test]
async fn test_other_keys_are_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("preferences.json"));

    store.set("other", "kept").await.unwrap();
    store.set(THEME_KEY, "light").await.unwrap();
    store.remove(THEME_KEY).await.unwrap();

    assert!(store.get(THEME_KEY).await.unwrap().is_none());
    assert_eq!(store.get("other").await.unwrap().as_deref(), Some("kept"));
}

#[tokio::test]
async fn test_corrupt_file_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileStore::new(&path);
    let err = store.get(THEME_KEY).await.unwrap_err();
    assert!(matches!(err, StorageError::ParseError { .. }));
}

#[tokio::test]
async fn test_empty_file_reads_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.json");
    std::fs::write(&path, "").unwrap();

    let store = FileStore::new(&path);
    assert!(store.get(THEME_KEY).await.unwrap().is_none());
}

#[test]
fn test_home_override_from_environment() {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let old_home = std::env::var(paths::HOME_ENV_VAR).ok();
    std::env::set_var(paths::HOME_ENV_VAR, temp_dir.path());

    assert_eq!(paths::resolve_home().unwrap(), temp_dir.path());
    assert_eq!(
        paths::default_preferences_path().unwrap(),
        temp_dir.path().join("preferences.json")
    );
    assert_eq!(
        paths::default_registry_path().unwrap(),
        temp_dir.path().join("themes.yaml")
    );

    let store = FileStore::with_default_path().unwrap();
    tokio_test::block_on(store.set(THEME_KEY, "system")).unwrap();
    assert!(temp_dir.path().join("preferences.json").exists());

    match old_home {
        Some(home) => std::env::set_var(paths::HOME_ENV_VAR, home),
        None => std::env::remove_var(paths::HOME_ENV_VAR),
    }
}

#[tokio::test]
async fn test_removing_last_entry_deletes_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.json");
    let store = FileStore::new(&path);

    store.set(THEME_KEY, "dark").await.unwrap();
    store.remove(THEME_KEY).await.unwrap();

    assert!(!path.exists());
    assert!(store.get(THEME_KEY).await.unwrap().is_none());
    // removing again is a no-op
    store.remove(THEME_KEY).await.unwrap();
}

#[tokio::test]
async fn test_writes_leave_no_staging_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("preferences.json"));

    store.set(THEME_KEY, "dark").await.unwrap();

    let names: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("preferences.json")]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_during_writes_never_see_partial_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = std::sync::Arc::new(FileStore::new(temp_dir.path().join("preferences.json")));
    store.set(THEME_KEY, "dark").await.unwrap();

    let writer = {
        let store = store.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                let value = if i % 2 == 0 { "light" } else { "dark" };
                store.set(THEME_KEY, value).await.unwrap();
            }
        })
    };
    let reader = {
        let store = store.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                let value = store.get(THEME_KEY).await.unwrap();
                assert!(matches!(value.as_deref(), Some("dark") | Some("light")));
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
}
