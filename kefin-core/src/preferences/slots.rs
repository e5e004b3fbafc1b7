//! Write path: edited list back into the record and the native slots.

use std::collections::HashSet;

use kefin_model::{DisplayPreferences, NativeSlots, NativeToken, PreferenceRecord};
use tracing::debug;

use super::mapper::ResolvedSection;

/// Slot assignment for `sections`, recomputed from scratch.
///
/// Every enabled section with a native token contributes `(token, order)`;
/// the combined continue-watching/next-up section contributes both of its
/// tokens. The first contribution of a token wins, the survivors are stably
/// sorted by order and assigned to slots from index 0.
pub fn compute_native_slots(sections: &[ResolvedSection]) -> NativeSlots {
    let mut seen = HashSet::new();
    let mut contributions: Vec<(NativeToken, i64)> = sections
        .iter()
        .filter(|section| section.enabled)
        .flat_map(|section| {
            section
                .native_tokens()
                .into_iter()
                .map(move |token| (token, section.order))
        })
        .filter(|(token, _)| seen.insert(*token))
        .collect();
    contributions.sort_by_key(|(_, order)| *order);
    NativeSlots::from_tokens(contributions.into_iter().map(|(token, _)| token))
}

/// Rewrites the preference record (the whole list, disabled entries
/// included) and the slot assignments in `document`.
pub fn save_user_preferences(
    sections: &[ResolvedSection],
    document: &mut DisplayPreferences,
) -> NativeSlots {
    let record: PreferenceRecord =
        sections.iter().map(ResolvedSection::to_entry).collect();
    let slots = compute_native_slots(sections);
    document.set_preference_record(&record);
    document.set_native_slots(&slots);
    debug!(
        entries = record.len(),
        native_slots = slots.occupied().len(),
        "user preferences written"
    );
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CONTINUE_WATCHING_NEXT_UP, RECENTLY_ADDED_PREFIX};
    use kefin_model::PREFERENCE_KEY;

    #[test]
    fn resume_is_assigned_once() {
        let sections = vec![
            ResolvedSection::new("resume", 20, true),
            ResolvedSection::new(CONTINUE_WATCHING_NEXT_UP, 10, true),
        ];
        let slots = compute_native_slots(&sections);
        let resume_slots = slots
            .tokens()
            .iter()
            .filter(|token| **token == NativeToken::Resume)
            .count();
        assert_eq!(resume_slots, 1);
        assert_eq!(slots.get(0), Some(NativeToken::NextUp));
        assert_eq!(slots.get(1), Some(NativeToken::Resume));
    }

    #[test]
    fn only_enabled_sections_claim_slots() {
        let sections = vec![
            ResolvedSection::new("latestmedia", 10, false),
            ResolvedSection::new("watchlist", 0, true),
            ResolvedSection::new(format!("{RECENTLY_ADDED_PREFIX}abc"), 30, true),
        ];
        let slots = compute_native_slots(&sections);
        assert_eq!(slots.get(0), Some(NativeToken::LatestMedia));
        assert_eq!(slots.occupied().len(), 1);
    }

    #[test]
    fn record_keeps_every_section_in_list_order() {
        let sections = vec![
            ResolvedSection::new("watchlist", 30, false),
            ResolvedSection::new("nextup", 10, true),
        ];
        let mut document = DisplayPreferences::default();
        save_user_preferences(&sections, &mut document);
        assert_eq!(
            document.custom_pref(PREFERENCE_KEY),
            Some(r#"[{"id":"watchlist","order":30,"enabled":false},{"id":"nextup","order":10,"enabled":true}]"#)
        );
        assert_eq!(document.custom_pref("homesection0"), Some("nextup"));
        assert_eq!(document.custom_pref("homesection9"), Some("none"));
    }
}
