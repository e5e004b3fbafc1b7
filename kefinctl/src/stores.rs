//! File-backed implementations of the core's storage ports.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use kefin_core::StoreError;
use kefin_core::ports::{ConfigPersistence, DisplayPreferenceStore};
use kefin_model::prelude::{DisplayPreferences, HomeScreenConfig};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Writes to a sibling temp file and renames it over `path`.
fn write_json_atomically<T: Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|error| StoreError::Io(error.error))?;
    debug!(path = %path.display(), "document written");
    Ok(())
}

/// The administrator configuration as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<HomeScreenConfig>, StoreError> {
        read_json(&self.path)
    }
}

#[async_trait]
impl ConfigPersistence for JsonFileConfigStore {
    async fn save_config(&self, config: &HomeScreenConfig) -> Result<(), StoreError> {
        write_json_atomically(&self.path, config)
    }
}

/// One user's display-preferences document. A missing file reads as an
/// empty document.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DisplayPreferenceStore for JsonFilePreferenceStore {
    async fn get_user_display_preferences(
        &self,
    ) -> Result<DisplayPreferences, StoreError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    async fn update_display_preferences(
        &self,
        preferences: &DisplayPreferences,
    ) -> Result<bool, StoreError> {
        write_json_atomically(&self.path, preferences)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kefin_core::DefaultCatalog;
    use serde_json::json;

    #[tokio::test]
    async fn config_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileConfigStore::new(dir.path().join("nested/config.json"));
        assert_eq!(store.load().unwrap(), None);

        let config = DefaultCatalog::builtin().snapshot();
        store.save_config(&config).await.unwrap();
        assert_eq!(store.load().unwrap(), Some(config));
    }

    #[tokio::test]
    async fn preference_document_keeps_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(
            &path,
            json!({
                "Id": "abc",
                "ScrollDirection": "Horizontal",
                "CustomPrefs": {"homesection0": "resume", "landing-livetv": null}
            })
            .to_string(),
        )
        .unwrap();
        let store = JsonFilePreferenceStore::new(&path);

        let mut document = store.get_user_display_preferences().await.unwrap();
        document.set_custom_pref("homesection1", "nextup");
        assert!(store.update_display_preferences(&document).await.unwrap());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["ScrollDirection"], "Horizontal");
        assert_eq!(written["CustomPrefs"]["homesection1"], "nextup");
        assert!(written["CustomPrefs"].as_object().unwrap()["landing-livetv"].is_null());
    }

    #[tokio::test]
    async fn missing_preference_file_is_an_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::new(dir.path().join("none.json"));
        let document = store.get_user_display_preferences().await.unwrap();
        assert_eq!(document, DisplayPreferences::default());
    }

    #[test]
    fn corrupt_config_is_a_payload_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let error = JsonFileConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(error, StoreError::Payload(_)));
    }
}
