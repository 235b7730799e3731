//! End-to-end theme workflow
//!
//! Registry file on disk, file-backed preferences, provider scope and the
//! picker dialog, across a simulated restart.

use std::{fs, sync::Arc};

use tempfile::TempDir;
use themekit_storage::{FileStore, THEME_KEY};
use themekit_themes::{
    use_current_theme, FixedAppearance, RegistryLoader, ThemeDialog, ThemeProvider, ThemeStore,
};

const REGISTRY: &str = r##"
default_theme: light
dark:
  backgroundColor: "#121212"
  textColor: "#ffffff"
  strokeColor: "#3a5f37"
light:
  backgroundColor: "#ffffff"
  textColor: "#000000"
  strokeColor: "#c0e6ba"
custom:
  - name: ocean
    palette:
      backgroundColor: "#003366"
      textColor: "#e0f0ff"
"##;

fn open_store(dir: &TempDir, dark: bool) -> ThemeStore {
    let registry = RegistryLoader::load_from_file(&dir.path().join("themes.yaml")).unwrap();
    let storage = FileStore::new(dir.path().join("preferences.json"));
    ThemeStore::new(registry, storage, FixedAppearance(dark))
}

async fn wait_for_change(store: &ThemeStore) {
    let mut receiver = store.subscribe();
    if receiver.borrow().is_none() {
        receiver.changed().await.unwrap();
    }
}

#[tokio::test]
async fn test_dialog_choice_survives_restart() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("themes.yaml"), REGISTRY).unwrap();

    {
        let store = open_store(&dir, true);
        let _guard = ThemeProvider::enter(&store);
        wait_for_change(&store).await;

        let theme = use_current_theme().unwrap();
        assert_eq!(theme.palette().unwrap().background_color(), Some("#ffffff"));

        let mut dialog = ThemeDialog::new().with_palette(theme.palette().unwrap());
        dialog.show();
        let mut closed = false;
        let chosen = dialog
            .choose(2, |name| theme.set_theme(name), || closed = true)
            .unwrap()
            .unwrap();

        assert!(closed);
        assert!(!dialog.is_visible());
        // system under a dark appearance
        assert_eq!(chosen.background_color(), Some("#121212"));

        store.set_theme_persisted("system").await.unwrap();
    }

    let prefs: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("preferences.json")).unwrap())
            .unwrap();
    assert_eq!(prefs[THEME_KEY]["value"], "system");

    let restarted = open_store(&dir, false);
    let restored = restarted.restore().await.unwrap().unwrap();
    assert_eq!(restored.background_color(), Some("#ffffff"));
}

#[tokio::test]
async fn test_custom_theme_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("themes.yaml"), REGISTRY).unwrap();

    let store = open_store(&dir, false);
    let selected = store.set_theme_persisted("ocean").await.unwrap();

    let restarted = open_store(&dir, false);
    let restored = restarted.restore().await.unwrap().unwrap();
    assert_eq!(*restored, *selected);
}

#[tokio::test]
async fn test_shared_storage_between_stores() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("themes.yaml"), REGISTRY).unwrap();
    let registry = RegistryLoader::load_from_file(&dir.path().join("themes.yaml")).unwrap();
    let storage = Arc::new(FileStore::new(dir.path().join("preferences.json")));

    let first = ThemeStore::new(registry.clone(), storage.clone(), FixedAppearance::LIGHT);
    let second = ThemeStore::new(registry, storage.clone(), FixedAppearance::LIGHT);

    first.set_theme_persisted("dark").await.unwrap();
    let restored = second.restore().await.unwrap().unwrap();

    assert_eq!(restored.background_color(), Some("#121212"));
    assert_eq!(
        storage.entry(THEME_KEY).await.unwrap().unwrap().value,
        "dark"
    );
}
