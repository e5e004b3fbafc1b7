use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use kefin_model::{DisplayPreferences, HomeScreenConfig};

use super::candidates::editor_candidates;
use super::mapper::{ResolvedSection, merge_user_preferences};
use super::slots::save_user_preferences;
use crate::error::PreferenceError;
use crate::ports::DisplayPreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Another save was in flight; this request was dropped and the caller
    /// must re-trigger it if the change still matters.
    Coalesced,
    /// Nothing was written: no store is wired up, or the store refused the
    /// document.
    NotPersisted,
}

/// Loads and saves one user's section order.
///
/// Saves are whole-document read-modify-writes. Overlapping saves from the
/// same client are coalesced by the `saving` flag rather than queued.
pub struct PreferenceService {
    store: Option<Arc<dyn DisplayPreferenceStore>>,
    saving: AtomicBool,
}

impl fmt::Debug for PreferenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceService")
            .field("has_store", &self.store.is_some())
            .field("saving", &self.saving.load(Ordering::Relaxed))
            .finish()
    }
}

/// Clears the flag on every exit path, so a failed save cannot wedge it.
struct SavingGuard<'a>(&'a AtomicBool);

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PreferenceService {
    pub fn new(store: Option<Arc<dyn DisplayPreferenceStore>>) -> Self {
        Self {
            store,
            saving: AtomicBool::new(false),
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// Every editor candidate of `config` resolved against the stored
    /// preferences, unsorted. Without a store the list is empty; a failed
    /// read falls back to the configuration defaults.
    pub async fn load(&self, config: &HomeScreenConfig) -> Vec<ResolvedSection> {
        let Some(store) = &self.store else {
            warn!("no display-preference store; nothing to load");
            return Vec::new();
        };

        let document = match store.get_user_display_preferences().await {
            Ok(document) => document,
            Err(error) => {
                warn!(%error, "failed to read display preferences; using defaults");
                DisplayPreferences::default()
            }
        };

        let candidates = editor_candidates(config);
        merge_user_preferences(
            &candidates,
            &document.preference_record(),
            &document.native_slots(),
        )
    }

    /// Writes `sections` back as the preference record and native slots.
    pub async fn save(
        &self,
        sections: &[ResolvedSection],
    ) -> Result<SaveOutcome, PreferenceError> {
        let Some(store) = &self.store else {
            warn!("no display-preference store; preferences not saved");
            return Ok(SaveOutcome::NotPersisted);
        };

        if self
            .saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("save already in progress; request coalesced");
            return Ok(SaveOutcome::Coalesced);
        }
        let _guard = SavingGuard(&self.saving);

        let mut document = store.get_user_display_preferences().await?;
        save_user_preferences(sections, &mut document);

        if store.update_display_preferences(&document).await? {
            info!(sections = sections.len(), "home-screen preferences saved");
            Ok(SaveOutcome::Saved)
        } else {
            warn!("display-preference store refused the update");
            Ok(SaveOutcome::NotPersisted)
        }
    }
}
