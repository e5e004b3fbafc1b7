use std::collections::HashMap;

use kefin_core::catalog::{CONTINUE_WATCHING_NEXT_UP, DefaultCatalog};
use kefin_core::preferences::{
    PreferenceService, ResolvedSection, SaveOutcome, editor_list, move_section,
    toggle_section, visible_sections,
};
use kefin_model::{DisplayPreferences, NativeToken, PREFERENCE_KEY};

#[path = "support/mod.rs"]
mod support;

use support::stores::InMemoryPreferenceStore;

fn by_id(sections: &[ResolvedSection]) -> HashMap<&str, (i64, bool)> {
    sections
        .iter()
        .map(|s| (s.id.as_str(), (s.order, s.enabled)))
        .collect()
}

#[tokio::test]
async fn save_then_load_reproduces_order_and_visibility() {
    let config = DefaultCatalog::builtin().snapshot();
    let store = InMemoryPreferenceStore::with_document(DisplayPreferences::default());
    let service = PreferenceService::new(Some(store.clone()));

    let mut list = editor_list(&service.load(&config).await);
    assert!(!list.is_empty());

    // Natives and their configured equivalents are kept in agreement so the
    // slot state does not override the record.
    for section in list.iter_mut() {
        section.enabled = match section.id.as_str() {
            "latestmedia" | "smalllibrarytiles" | "watchlist" | "upcoming" => true,
            "resume" | "nextup" | "continue-watching" | "next-up" => false,
            _ => section.enabled,
        };
    }
    let last = list.len() - 1;
    assert!(move_section(&mut list, last, 0));
    assert!(toggle_section(&mut list, "upcoming", false));

    assert_eq!(service.save(&list).await.unwrap(), SaveOutcome::Saved);
    assert_eq!(store.writes(), 1);

    let reloaded = service.load(&config).await;
    assert_eq!(by_id(&reloaded), by_id(&list));

    let visible: Vec<String> =
        visible_sections(&reloaded).into_iter().map(|s| s.id).collect();
    let expected: Vec<String> = list
        .iter()
        .filter(|s| s.enabled)
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(visible, expected);
}

#[tokio::test]
async fn merged_section_and_native_resume_share_one_slot() {
    let mut config = DefaultCatalog::builtin().snapshot();
    config.merge_next_up = true;
    let store = InMemoryPreferenceStore::with_document(DisplayPreferences::default());
    let service = PreferenceService::new(Some(store.clone()));

    let sections = vec![
        ResolvedSection::new("resume", 0, true),
        ResolvedSection::new(CONTINUE_WATCHING_NEXT_UP, 10, true),
        ResolvedSection::new("watchlist", 20, true),
    ];
    service.save(&sections).await.unwrap();

    let document = store.document().await;
    let slots = document.native_slots();
    let resume = slots
        .tokens()
        .iter()
        .filter(|token| **token == NativeToken::Resume)
        .count();
    assert_eq!(resume, 1);
    assert_eq!(slots.get(0), Some(NativeToken::Resume));
    assert_eq!(slots.get(1), Some(NativeToken::NextUp));
    assert_eq!(slots.get(2), Some(NativeToken::None));
    assert!(document.custom_prefs.contains_key(PREFERENCE_KEY));

    let reloaded = service.load(&config).await;
    let merged = reloaded
        .iter()
        .find(|s| s.id == CONTINUE_WATCHING_NEXT_UP)
        .unwrap();
    assert!(merged.enabled);
}

#[tokio::test]
async fn malformed_stored_record_reads_as_defaults() {
    let config = DefaultCatalog::builtin().snapshot();
    let mut document = DisplayPreferences::default();
    document.set_custom_pref(PREFERENCE_KEY, "{broken");
    document.set_custom_pref("homesection0", "resume");
    let service = PreferenceService::new(Some(InMemoryPreferenceStore::with_document(
        document,
    )));

    let resolved = service.load(&config).await;
    let resume = resolved.iter().find(|s| s.id == "resume").unwrap();
    assert!(resume.enabled);
    assert_eq!(resume.order, 0);
    let watchlist = resolved.iter().find(|s| s.id == "watchlist").unwrap();
    assert!(watchlist.enabled);
    assert_eq!(watchlist.order, 60);
}

#[tokio::test]
async fn save_preserves_unrelated_custom_prefs() {
    let document: DisplayPreferences = serde_json::from_value(serde_json::json!({
        "CustomPrefs": {"landing-livetv": null, "homesection0": "resume", "x": 5}
    }))
    .unwrap();
    let store = InMemoryPreferenceStore::with_document(document);
    let service = PreferenceService::new(Some(store.clone()));

    let sections = vec![ResolvedSection::new("watchlist", 0, true)];
    assert_eq!(service.save(&sections).await.unwrap(), SaveOutcome::Saved);

    let written = store.document().await;
    assert_eq!(
        written.custom_prefs.get("landing-livetv"),
        Some(&serde_json::Value::Null)
    );
    assert_eq!(written.custom_prefs.get("x"), Some(&serde_json::json!(5)));
    assert!(written.custom_pref(PREFERENCE_KEY).is_some());
}
