use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use kefin_core::ports::{ConfigPersistence, DisplayPreferenceStore};
use kefin_core::StoreError;
use kefin_model::{DisplayPreferences, HomeScreenConfig};

/// Display-preference store holding one user's document in memory.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    document: Mutex<DisplayPreferences>,
    writes: AtomicUsize,
}

#[allow(dead_code)]
impl InMemoryPreferenceStore {
    pub fn with_document(document: DisplayPreferences) -> Arc<Self> {
        Arc::new(Self {
            document: Mutex::new(document),
            writes: AtomicUsize::new(0),
        })
    }

    pub async fn document(&self) -> DisplayPreferences {
        self.document.lock().await.clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DisplayPreferenceStore for InMemoryPreferenceStore {
    async fn get_user_display_preferences(
        &self,
    ) -> Result<DisplayPreferences, StoreError> {
        Ok(self.document.lock().await.clone())
    }

    async fn update_display_preferences(
        &self,
        preferences: &DisplayPreferences,
    ) -> Result<bool, StoreError> {
        *self.document.lock().await = preferences.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// Configuration store that records every saved document.
#[derive(Debug, Default)]
pub struct RecordingConfigStore {
    saved: Mutex<Vec<HomeScreenConfig>>,
    fail: bool,
}

#[allow(dead_code)]
impl RecordingConfigStore {
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            saved: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub async fn saved(&self) -> Vec<HomeScreenConfig> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl ConfigPersistence for RecordingConfigStore {
    async fn save_config(&self, config: &HomeScreenConfig) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Rejected("read-only store".into()));
        }
        self.saved.lock().await.push(config.clone());
        Ok(())
    }
}
