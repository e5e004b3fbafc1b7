//! Collaborator interfaces this crate consumes but does not implement.
//!
//! Production adapters talk to the media server over HTTP; `kefinctl` ships
//! file-backed adapters and the tests use mocks.

use async_trait::async_trait;
use kefin_model::{DisplayPreferences, HomeScreenConfig, ItemQuery, MediaItem};

use crate::error::{QueryError, StoreError};

/// Resolves query descriptors to media items. Filtering, sorting and limits
/// are applied server-side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemQueryService: Send + Sync {
    async fn query(&self, query: &ItemQuery) -> Result<Vec<MediaItem>, QueryError>;
}

/// The current user's display-preferences document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DisplayPreferenceStore: Send + Sync {
    async fn get_user_display_preferences(
        &self,
    ) -> Result<DisplayPreferences, StoreError>;

    /// Replaces the whole document. `Ok(false)` means the server refused the
    /// write without an error payload.
    async fn update_display_preferences(
        &self,
        preferences: &DisplayPreferences,
    ) -> Result<bool, StoreError>;
}

/// Durable storage for the administrator-level configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigPersistence: Send + Sync {
    async fn save_config(&self, config: &HomeScreenConfig) -> Result<(), StoreError>;
}
