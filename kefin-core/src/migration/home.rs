use tracing::{debug, warn};

use kefin_model::query::{LIMIT, PARENT_ID, SORT_BY, SORT_ORDER};
use kefin_model::{
    HomeScreenConfig, LegacyConfig, LegacyRecentlyAdded, LegacySectionConfig,
    QueryOptions, Section, SectionCategory, SectionQuery,
};

use super::MigrationReport;
use super::overlay::overlay_section;
use crate::catalog::{
    DEFAULT_ITEM_LIMIT, HOME_GROUP_ID, RECENTLY_ADDED_GROUP_ID,
    RECENTLY_ADDED_GROUP_NAME, RECENTLY_ADDED_PREFIX, RECENTLY_RELEASED_EPISODES,
    RECENTLY_RELEASED_MOVIES,
};
use crate::error::MigrationError;

/// Orders of synthesized recently-added sections start after the built-in
/// home sections.
const RECENTLY_ADDED_BASE_ORDER: i64 = 100;

/// Overlays the fixed HOME entries onto the default sections with the same
/// id. An entry without a default counterpart is logged and skipped.
pub(crate) fn migrate_home_sections(
    config: &mut HomeScreenConfig,
    legacy: &LegacyConfig,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    let mut entries: Vec<(&str, &str, &LegacySectionConfig, Option<bool>)> =
        Vec::new();

    if let Some(released) = &legacy.recently_released {
        if let Some(movies) = &released.movies {
            entries.push((
                "recentlyReleased.movies",
                RECENTLY_RELEASED_MOVIES,
                movies,
                released.enabled,
            ));
        }
        if let Some(episodes) = &released.episodes {
            entries.push((
                "recentlyReleased.episodes",
                RECENTLY_RELEASED_EPISODES,
                episodes,
                released.enabled,
            ));
        }
    }
    for (key, id, entry) in legacy.renamed_home_sections() {
        if let Some(entry) = entry {
            entries.push((key, id, entry, None));
        }
    }

    if entries.is_empty() {
        return Ok(());
    }
    if config.home.is_empty() {
        return Err(MigrationError::MissingGroup(HOME_GROUP_ID.to_string()));
    }

    for (key, id, entry, parent_enabled) in entries {
        let Some(section) = config.section_mut(SectionCategory::Home, id) else {
            warn!(legacy_key = key, section_id = id, "no default section; skipped");
            report.dropped.push(key.to_string());
            continue;
        };
        *section = overlay_section(section, entry, parent_enabled);
        debug!(legacy_key = key, section_id = id, "legacy home section merged");
        report.overlaid += 1;
    }
    Ok(())
}

/// One synthesized section per library in `recentlyAddedInLibrary`, placed in
/// the `recently-added` group.
pub(crate) fn migrate_recently_added(
    config: &mut HomeScreenConfig,
    recently_added: &LegacyRecentlyAdded,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    let mut synthesized = Vec::new();

    for (index, (library_id, entry)) in
        recently_added.libraries.iter().enumerate()
    {
        if library_id.trim().is_empty() {
            warn!(legacy_key = %library_id, "recently-added entry without a library id; skipped");
            report
                .dropped
                .push(format!("recentlyAddedInLibrary.{library_id}"));
            continue;
        }
        let id = config.unique_id(&format!("{RECENTLY_ADDED_PREFIX}{library_id}"));
        let base = recently_added_section(id, library_id, index);
        let section = overlay_section(&base, entry, recently_added.enabled);
        debug!(
            library_id = %library_id,
            section_id = %section.id,
            "recently-added section synthesized"
        );
        synthesized.push(section);
    }

    if !synthesized.is_empty() {
        report.synthesized += synthesized.len();
        let group = config
            .ensure_group(
                SectionCategory::Home,
                RECENTLY_ADDED_GROUP_ID,
                RECENTLY_ADDED_GROUP_NAME,
            )
            .ok_or_else(|| {
                MigrationError::MissingGroup(RECENTLY_ADDED_GROUP_ID.to_string())
            })?;
        group.sections.extend(synthesized);
    }

    Ok(())
}

fn recently_added_section(id: String, library_id: &str, index: usize) -> Section {
    let options = QueryOptions::new()
        .with(PARENT_ID, library_id)
        .with(SORT_BY, "DateCreated")
        .with(SORT_ORDER, "Descending")
        .with(LIMIT, DEFAULT_ITEM_LIMIT);
    let order = RECENTLY_ADDED_BASE_ORDER + 10 * index as i64;
    Section::new(id, "Recently Added")
        .with_order(order)
        .with_query(SectionQuery::from_options(options))
}
