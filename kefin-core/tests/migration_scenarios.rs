use std::sync::Arc;

use serde_json::json;

use kefin_core::admin::{AdminOverrides, ConfigService};
use kefin_core::catalog::{CUSTOM_GROUP_ID, DefaultCatalog, RECENTLY_RELEASED_MOVIES};
use kefin_core::migration::{LegacyMigrator, MigrationOutcome, SkipReason};
use kefin_model::query::{GENRE_IDS, GENRES, TAGS};
use kefin_model::{HomeScreenConfig, LegacyConfig, SectionRef};

#[path = "support/mod.rs"]
mod support;

use support::stores::RecordingConfigStore;

fn legacy_document() -> LegacyConfig {
    serde_json::from_value(json!({
        "recentlyReleased": {
            "enabled": true,
            "movies": {"enabled": false, "itemLimit": 10},
            "episodes": {"order": 45}
        },
        "recentlyAddedInLibrary": {
            "enabled": true,
            "f137a2dd21bbc1b99aa5c0f6bf02a805": {"itemLimit": 20}
        },
        "watchAgain": {"enabled": false},
        "seasonal": {
            "enabled": true,
            "seasons": [{
                "id": "halloween",
                "sections": [
                    {"id": "horror", "itemLimit": 30},
                    {"id": "witches", "name": "Witches", "type": "Tag", "source": "witch"}
                ]
            }, {
                "id": "summer",
                "startDate": "06-01",
                "endDate": "08-31",
                "sections": [{"type": "Genre", "source": "Comedy, Drama"}]
            }]
        },
        "discovery": {
            "defaultItemLimit": 12,
            "sectionTypes": {"because-you-watched": {"enabled": false}}
        },
        "customSections": [
            {"id": "anime", "name": "Anime", "type": "Genre", "source": "a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4"}
        ],
        "mergeNextUp": true
    }))
    .expect("legacy fixture parses")
}

fn standard<'a>(config: &'a HomeScreenConfig, id: &str) -> &'a kefin_model::Section {
    match config.find_section(id) {
        Some(SectionRef::Standard { section, .. }) => section,
        other => panic!("{id}: {other:?}"),
    }
}

#[tokio::test]
async fn full_legacy_document_migrates_and_persists() {
    let store = Arc::new(RecordingConfigStore::default());
    let migrator = LegacyMigrator::with_builtin(Some(store.clone()));

    let outcome = migrator.run(None, Some(&legacy_document())).await;
    let MigrationOutcome::Migrated { report, persisted } = outcome else {
        panic!("expected a migration");
    };
    assert!(persisted);
    assert!(report.is_complete(), "failed: {:?}", report.failed_steps);
    let config = &report.config;

    let movies = standard(config, RECENTLY_RELEASED_MOVIES);
    assert!(!movies.enabled);
    assert_eq!(movies.first_query().unwrap().options().limit(), Some(10));
    assert_eq!(standard(config, "recentlyReleased.episodes").order, 45);
    assert!(!standard(config, "watch-again").enabled);

    let library = standard(config, "recently-added-f137a2dd21bbc1b99aa5c0f6bf02a805");
    assert_eq!(library.first_query().unwrap().options().limit(), Some(20));

    let horror = standard(config, "seasonal.halloween.horror");
    assert_eq!(horror.first_query().unwrap().options().limit(), Some(30));

    let custom = &config.custom;
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0].id, CUSTOM_GROUP_ID);
    let ids: Vec<&str> = custom[0].sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["custom.halloween.witches", "custom.summer.1", "custom.anime"]
    );
    let witches = &custom[0].sections[0];
    assert_eq!(witches.first_query().unwrap().options().get_str(TAGS), Some("witch"));
    let summer = &custom[0].sections[1];
    assert_eq!(
        summer.first_query().unwrap().options().get_str(GENRES),
        Some("Comedy, Drama")
    );
    assert_eq!(summer.start_date.map(|d| d.to_string()).as_deref(), Some("06-01"));
    let anime = &custom[0].sections[2];
    assert_eq!(
        anime.first_query().unwrap().options().get_str(GENRE_IDS),
        Some("a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4")
    );

    assert_eq!(config.discovery_settings.default_item_limit, 12);
    assert!(
        !config
            .discovery_sections()
            .find(|s| s.id == "because-you-watched")
            .unwrap()
            .enabled
    );
    assert!(config.merge_next_up);
    assert!(config.duplicate_ids().is_empty());

    assert_eq!(store.saved().await, vec![config.clone()]);
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let store = Arc::new(RecordingConfigStore::default());
    let migrator = LegacyMigrator::with_builtin(Some(store.clone()));
    let legacy = legacy_document();

    let first = migrator.run(None, Some(&legacy)).await;
    let stored = first.config().cloned().expect("first run migrates");

    let second = migrator.run(Some(&stored), Some(&legacy)).await;
    assert_eq!(second, MigrationOutcome::Skipped(SkipReason::AlreadyMigrated));
    assert_eq!(store.saved().await.len(), 1);
}

#[tokio::test]
async fn unsaved_migration_is_still_used() {
    let migrator = LegacyMigrator::with_builtin(Some(RecordingConfigStore::failing()));
    let overrides: AdminOverrides =
        serde_json::from_value(json!({"REMOVE_CONFLICTING_SECTIONS": true})).unwrap();

    let (service, outcome) = ConfigService::bootstrap(
        DefaultCatalog::builtin(),
        &migrator,
        None,
        Some(&legacy_document()),
        Some(&overrides),
    )
    .await;

    assert!(matches!(
        outcome,
        MigrationOutcome::Migrated { persisted: false, .. }
    ));
    let effective = service.get_config();
    assert!(effective.merge_next_up);
    assert!(effective.remove_conflicting_sections);
    assert!(!effective.custom.is_empty());
}
