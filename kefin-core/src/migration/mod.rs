//! One-shot conversion of the flat legacy configuration.
//!
//! [`migrate_legacy`] is pure: it deep-copies the default catalog and
//! overlays every legacy value the document actually carries. Each step runs
//! on its own; a failing step is logged, recorded in
//! [`MigrationReport::failed_steps`], and the remaining steps still run, so a
//! partially migrated configuration is always returned together with an
//! explicit account of what was lost.
//!
//! [`LegacyMigrator`] adds the run-at-most-once rules and persistence.

mod discovery;
mod home;
pub mod overlay;
pub mod seasonal;
pub mod synthesis;

use std::fmt::{self, Display};
use std::sync::Arc;

use tracing::{info, warn};

use kefin_model::{
    HomeScreenConfig, LegacyConfig, LegacyDiscovery, LegacySeasonal,
    LegacySourcedSection, Section, SectionCategory,
};

use crate::catalog::{CUSTOM_GROUP_ID, CUSTOM_GROUP_NAME, DefaultCatalog};
use crate::error::MigrationError;
use crate::ports::ConfigPersistence;

pub use seasonal::MatchRule;
pub use synthesis::{is_item_id, synthesize_section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationStep {
    Settings,
    HomeSections,
    RecentlyAdded,
    Seasonal,
    Discovery,
    CustomSections,
    Validate,
}

impl Display for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MigrationStep::Settings => "settings",
            MigrationStep::HomeSections => "home-sections",
            MigrationStep::RecentlyAdded => "recently-added",
            MigrationStep::Seasonal => "seasonal",
            MigrationStep::Discovery => "discovery",
            MigrationStep::CustomSections => "custom-sections",
            MigrationStep::Validate => "validate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: MigrationStep,
    pub error: MigrationError,
}

/// The migrated configuration plus what happened on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    pub config: HomeScreenConfig,
    pub failed_steps: Vec<StepFailure>,
    /// Default sections that received legacy values.
    pub overlaid: usize,
    /// New sections built from per-library or free-standing entries.
    pub synthesized: usize,
    /// Seasonal entries with no default counterpart.
    pub converted_to_custom: usize,
    /// Legacy keys that were logged and discarded.
    pub dropped: Vec<String>,
}

impl MigrationReport {
    pub fn is_complete(&self) -> bool {
        self.failed_steps.is_empty()
    }
}

/// Converts `legacy` against `catalog`. Never fails as a whole.
pub fn migrate_legacy(
    legacy: &LegacyConfig,
    catalog: &DefaultCatalog,
) -> MigrationReport {
    let mut report = MigrationReport {
        config: copy_defaults(catalog),
        ..MigrationReport::default()
    };

    run_step(&mut report, MigrationStep::Settings, |config, _| {
        migrate_settings(config, legacy);
        Ok(())
    });
    run_step(&mut report, MigrationStep::HomeSections, |config, report| {
        home::migrate_home_sections(config, legacy, report)
    });
    if let Some(recently_added) = &legacy.recently_added_in_library {
        run_step(&mut report, MigrationStep::RecentlyAdded, |config, report| {
            home::migrate_recently_added(config, recently_added, report)
        });
    }
    if let Some(seasonal) = &legacy.seasonal {
        run_step(&mut report, MigrationStep::Seasonal, |config, report| {
            seasonal::migrate_seasons(config, seasonal, report)
        });
    }
    if let Some(discovery) = &legacy.discovery {
        run_step(&mut report, MigrationStep::Discovery, |config, report| {
            discovery::migrate_discovery_sections(config, discovery, report)
        });
    }
    run_step(&mut report, MigrationStep::CustomSections, |config, report| {
        migrate_custom_sections(config, &legacy.custom_sections, report)
    });
    run_step(&mut report, MigrationStep::Validate, |config, _| {
        let duplicates = config.duplicate_ids();
        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(MigrationError::DuplicateIds(duplicates.into_iter().collect()))
        }
    });

    info!(
        overlaid = report.overlaid,
        synthesized = report.synthesized,
        converted_to_custom = report.converted_to_custom,
        dropped = report.dropped.len(),
        failed_steps = report.failed_steps.len(),
        "legacy configuration migrated"
    );
    report
}

/// Home, seasonal and discovery groups from the catalog; custom starts
/// empty.
fn copy_defaults(catalog: &DefaultCatalog) -> HomeScreenConfig {
    let defaults = catalog.config();
    HomeScreenConfig {
        version: catalog.version(),
        home: defaults.home.clone(),
        seasonal: defaults.seasonal.clone(),
        discovery: defaults.discovery.clone(),
        custom: Vec::new(),
        discovery_settings: defaults.discovery_settings.clone(),
        seasonal_theme: defaults.seasonal_theme.clone(),
        remove_conflicting_sections: defaults.remove_conflicting_sections,
        merge_next_up: defaults.merge_next_up,
    }
}

/// Runs one step against a scratch copy so a failing step leaves the
/// configuration as the previous step produced it.
fn run_step<F>(report: &mut MigrationReport, step: MigrationStep, apply: F)
where
    F: FnOnce(
        &mut HomeScreenConfig,
        &mut MigrationReport,
    ) -> Result<(), MigrationError>,
{
    let mut config = report.config.clone();
    let mut scratch = MigrationReport::default();
    match apply(&mut config, &mut scratch) {
        Ok(()) => {
            report.config = config;
            report.overlaid += scratch.overlaid;
            report.synthesized += scratch.synthesized;
            report.converted_to_custom += scratch.converted_to_custom;
            report.dropped.extend(scratch.dropped);
        }
        Err(error) => {
            warn!(%step, %error, "migration step failed; continuing");
            report.failed_steps.push(StepFailure { step, error });
        }
    }
}

fn migrate_settings(config: &mut HomeScreenConfig, legacy: &LegacyConfig) {
    if let Some(discovery) = &legacy.discovery {
        overlay_discovery_settings(config, discovery);
    }
    if let Some(seasonal) = &legacy.seasonal {
        overlay_seasonal_theme(config, seasonal);
    }
    if let Some(remove) = legacy.remove_conflicting_sections {
        config.remove_conflicting_sections = remove;
    }
    if let Some(merge) = legacy.merge_next_up {
        config.merge_next_up = merge;
    }
}

fn overlay_discovery_settings(
    config: &mut HomeScreenConfig,
    legacy: &LegacyDiscovery,
) {
    let settings = &mut config.discovery_settings;
    if let Some(enabled) = legacy.enabled {
        settings.enabled = enabled;
    }
    if let Some(infinite_scroll) = legacy.infinite_scroll {
        settings.infinite_scroll = infinite_scroll;
    }
    if let Some(min) = legacy.min_people_appearances {
        settings.min_people_appearances = min;
    }
    if let Some(min) = legacy.min_genre_movie_count {
        settings.min_genre_movie_count = min;
    }
    if let Some(min) = legacy.minimum_shows_for_network {
        settings.minimum_shows_for_network = min;
    }
    if let Some(limit) = legacy.default_item_limit {
        settings.default_item_limit = limit;
    }
    if let Some(sort) = &legacy.default_sort_order {
        settings.default_sort_order = sort.clone();
    }
    if let Some(card_format) = legacy.default_card_format {
        settings.default_card_format = card_format;
    }
}

fn overlay_seasonal_theme(config: &mut HomeScreenConfig, legacy: &LegacySeasonal) {
    let theme = &mut config.seasonal_theme;
    if let Some(enabled) = legacy.enabled {
        theme.enabled = enabled;
    }
    if let Some(animations) = legacy.enable_seasonal_animations {
        theme.enable_seasonal_animations = animations;
    }
    if let Some(background) = legacy.enable_seasonal_background {
        theme.enable_seasonal_background = background;
    }
}

fn migrate_custom_sections(
    config: &mut HomeScreenConfig,
    sections: &[LegacySourcedSection],
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    for (position, legacy) in sections.iter().enumerate() {
        let hint = legacy
            .id
            .clone()
            .unwrap_or_else(|| (position + 1).to_string());
        let id = config.unique_id(&format!("custom.{hint}"));
        let section = synthesize_section(id, legacy);
        push_custom_section(config, section, legacy.fields.order.is_some())?;
        report.synthesized += 1;
    }
    Ok(())
}

/// Appends to the catch-all custom group, creating it on first use. Sections
/// without a legacy order are placed after the existing ones.
pub(crate) fn push_custom_section(
    config: &mut HomeScreenConfig,
    mut section: Section,
    has_order: bool,
) -> Result<(), MigrationError> {
    let group = config
        .ensure_group(SectionCategory::Custom, CUSTOM_GROUP_ID, CUSTOM_GROUP_NAME)
        .ok_or_else(|| MigrationError::MissingGroup(CUSTOM_GROUP_ID.to_string()))?;
    if !has_order {
        section.order = (group.sections.len() as i64 + 1) * 10;
    }
    group.sections.push(section);
    Ok(())
}

/// Why [`LegacyMigrator::run`] did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A configuration in the current shape is already stored.
    AlreadyMigrated,
    NoLegacyConfig,
    CatalogUnavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    Skipped(SkipReason),
    /// `persisted` is false when saving failed or no persistence is wired;
    /// the report's configuration is still the one to use this session.
    Migrated {
        report: Box<MigrationReport>,
        persisted: bool,
    },
}

impl MigrationOutcome {
    pub fn config(&self) -> Option<&HomeScreenConfig> {
        match self {
            MigrationOutcome::Migrated { report, .. } => Some(&report.config),
            MigrationOutcome::Skipped(_) => None,
        }
    }
}

/// Runs the migration at most once per installation and persists the
/// result.
#[derive(Clone)]
pub struct LegacyMigrator {
    catalog: Option<Arc<DefaultCatalog>>,
    persistence: Option<Arc<dyn ConfigPersistence>>,
}

impl fmt::Debug for LegacyMigrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyMigrator")
            .field("has_catalog", &self.catalog.is_some())
            .field("has_persistence", &self.persistence.is_some())
            .finish()
    }
}

impl LegacyMigrator {
    pub fn new(
        catalog: Option<Arc<DefaultCatalog>>,
        persistence: Option<Arc<dyn ConfigPersistence>>,
    ) -> Self {
        Self {
            catalog,
            persistence,
        }
    }

    /// Migrator over the built-in catalog.
    pub fn with_builtin(persistence: Option<Arc<dyn ConfigPersistence>>) -> Self {
        Self::new(Some(Arc::new(DefaultCatalog::builtin().clone())), persistence)
    }

    pub async fn run(
        &self,
        stored: Option<&HomeScreenConfig>,
        legacy: Option<&LegacyConfig>,
    ) -> MigrationOutcome {
        if stored.is_some() {
            info!("home-screen configuration already present; migration skipped");
            return MigrationOutcome::Skipped(SkipReason::AlreadyMigrated);
        }
        let Some(legacy) = legacy else {
            return MigrationOutcome::Skipped(SkipReason::NoLegacyConfig);
        };
        let Some(catalog) = &self.catalog else {
            warn!("default catalog unavailable; legacy configuration not migrated");
            return MigrationOutcome::Skipped(SkipReason::CatalogUnavailable);
        };

        let report = migrate_legacy(legacy, catalog);
        let persisted = self.persist(&report.config).await;
        MigrationOutcome::Migrated {
            report: Box::new(report),
            persisted,
        }
    }

    async fn persist(&self, config: &HomeScreenConfig) -> bool {
        let Some(persistence) = &self.persistence else {
            warn!("no configuration store; migrated configuration kept in memory only");
            return false;
        };
        match persistence.save_config(config).await {
            Ok(()) => {
                info!("migrated configuration saved");
                true
            }
            Err(error) => {
                warn!(%error, "failed to save migrated configuration; using it for this session only");
                false
            }
        }
    }
}
