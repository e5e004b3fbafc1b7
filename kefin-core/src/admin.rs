//! Administrator overrides layered onto the base configuration.
//!
//! Administrators edit whole JSON blobs, so the merge works at group and
//! settings-block granularity: an override group replaces the base group
//! with the same id, and a settings block replaces the base block outright.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use kefin_model::{
    DiscoveryGroup, DiscoverySettings, HomeScreenConfig, LegacyConfig,
    SeasonalThemeSettings, SectionGroup,
};

use crate::catalog::DefaultCatalog;
use crate::error::Result;
use crate::migration::{LegacyMigrator, MigrationOutcome};

/// The administrator's override document. Absent keys leave the base value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminOverrides {
    #[serde(rename = "HOME_SECTION_GROUPS", skip_serializing_if = "Option::is_none")]
    pub home: Option<Vec<SectionGroup>>,
    #[serde(
        rename = "SEASONAL_SECTION_GROUPS",
        skip_serializing_if = "Option::is_none"
    )]
    pub seasonal: Option<Vec<SectionGroup>>,
    #[serde(
        rename = "DISCOVERY_SECTION_GROUPS",
        skip_serializing_if = "Option::is_none"
    )]
    pub discovery: Option<Vec<DiscoveryGroup>>,
    #[serde(
        rename = "CUSTOM_SECTION_GROUPS",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom: Option<Vec<SectionGroup>>,
    #[serde(rename = "DISCOVERY_SETTINGS", skip_serializing_if = "Option::is_none")]
    pub discovery_settings: Option<DiscoverySettings>,
    #[serde(
        rename = "SEASONAL_THEME_SETTINGS",
        skip_serializing_if = "Option::is_none"
    )]
    pub seasonal_theme: Option<SeasonalThemeSettings>,
    #[serde(
        rename = "REMOVE_CONFLICTING_SECTIONS",
        skip_serializing_if = "Option::is_none"
    )]
    pub remove_conflicting_sections: Option<bool>,
    #[serde(rename = "MERGE_NEXT_UP", skip_serializing_if = "Option::is_none")]
    pub merge_next_up: Option<bool>,
}

impl AdminOverrides {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Replaces groups by id and appends groups the base does not have.
fn merge_groups<G, F>(base: &[G], overrides: &[G], id: F) -> Vec<G>
where
    G: Clone,
    F: Fn(&G) -> &str,
{
    let mut merged = base.to_vec();
    for group in overrides {
        match merged.iter_mut().find(|existing| id(existing) == id(group)) {
            Some(existing) => *existing = group.clone(),
            None => merged.push(group.clone()),
        }
    }
    merged
}

/// Default ∪ override composition. `base` is never modified.
pub fn merge_admin_overrides(
    base: &HomeScreenConfig,
    overrides: &AdminOverrides,
) -> HomeScreenConfig {
    let mut merged = base.clone();

    if let Some(home) = &overrides.home {
        merged.home = merge_groups(&base.home, home, |g| g.id.as_str());
    }
    if let Some(seasonal) = &overrides.seasonal {
        merged.seasonal = merge_groups(&base.seasonal, seasonal, |g| g.id.as_str());
    }
    if let Some(discovery) = &overrides.discovery {
        merged.discovery =
            merge_groups(&base.discovery, discovery, |g| g.id.as_str());
    }
    if let Some(custom) = &overrides.custom {
        merged.custom = merge_groups(&base.custom, custom, |g| g.id.as_str());
    }
    if let Some(settings) = &overrides.discovery_settings {
        merged.discovery_settings = settings.clone();
    }
    if let Some(theme) = &overrides.seasonal_theme {
        merged.seasonal_theme = theme.clone();
    }
    if let Some(remove) = overrides.remove_conflicting_sections {
        merged.remove_conflicting_sections = remove;
    }
    if let Some(merge) = overrides.merge_next_up {
        merged.merge_next_up = merge;
    }

    let duplicates = merged.duplicate_ids();
    if !duplicates.is_empty() {
        debug!(?duplicates, "admin overrides introduced duplicate section ids");
    }
    merged
}

/// Owner of the effective configuration.
///
/// Readers get an `Arc` snapshot; every change builds a new configuration
/// and swaps it in, so a snapshot never changes under its holder.
pub struct ConfigService {
    base: RwLock<Arc<HomeScreenConfig>>,
    overrides: RwLock<AdminOverrides>,
    effective: RwLock<Arc<HomeScreenConfig>>,
}

impl fmt::Debug for ConfigService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigService")
            .field("version", &self.effective.read().version)
            .field("has_overrides", &!self.overrides.read().is_empty())
            .finish()
    }
}

impl ConfigService {
    pub fn new(base: HomeScreenConfig) -> Self {
        let base = Arc::new(base);
        Self {
            effective: RwLock::new(Arc::clone(&base)),
            base: RwLock::new(base),
            overrides: RwLock::new(AdminOverrides::default()),
        }
    }

    /// Picks the base configuration (stored, freshly migrated, or the
    /// catalog) and layers `overrides` on top.
    pub async fn bootstrap(
        catalog: &DefaultCatalog,
        migrator: &LegacyMigrator,
        stored: Option<HomeScreenConfig>,
        legacy: Option<&LegacyConfig>,
        overrides: Option<&AdminOverrides>,
    ) -> (Self, MigrationOutcome) {
        let outcome = migrator.run(stored.as_ref(), legacy).await;
        let base = match (stored, &outcome) {
            (Some(stored), _) => stored,
            (None, MigrationOutcome::Migrated { report, .. }) => {
                report.config.clone()
            }
            (None, MigrationOutcome::Skipped(_)) => catalog.snapshot(),
        };

        let service = Self::new(base);
        if let Some(overrides) = overrides {
            service.apply_admin_overrides(overrides.clone());
        }
        (service, outcome)
    }

    pub fn get_config(&self) -> Arc<HomeScreenConfig> {
        Arc::clone(&self.effective.read())
    }

    pub fn base(&self) -> Arc<HomeScreenConfig> {
        Arc::clone(&self.base.read())
    }

    /// Stores `overrides` and rebuilds the effective configuration.
    pub fn apply_admin_overrides(
        &self,
        overrides: AdminOverrides,
    ) -> Arc<HomeScreenConfig> {
        let base = self.base();
        let effective = Arc::new(merge_admin_overrides(&base, &overrides));
        *self.overrides.write() = overrides;
        *self.effective.write() = Arc::clone(&effective);
        info!("admin overrides applied");
        effective
    }

    /// Swaps the base configuration, keeping the current overrides.
    pub fn replace(&self, base: HomeScreenConfig) -> Arc<HomeScreenConfig> {
        let base = Arc::new(base);
        let effective =
            Arc::new(merge_admin_overrides(&base, &self.overrides.read()));
        *self.base.write() = base;
        *self.effective.write() = Arc::clone(&effective);
        debug!("base configuration replaced");
        effective
    }
}
