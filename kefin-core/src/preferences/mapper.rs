//! Read path: candidates + preference record + native slots.

use std::collections::HashMap;

use kefin_model::{NativeSlots, NativeToken, PreferenceEntry, PreferenceRecord};

use super::candidates::{CandidateSection, SectionSource};
use crate::catalog::{native_token_of, native_tokens_for};

/// A candidate with its effective position and visibility for this user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSection {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub order: i64,
    pub native: bool,
}

impl ResolvedSection {
    pub fn new(id: impl Into<String>, order: i64, enabled: bool) -> Self {
        let id = id.into();
        Self {
            native: native_token_of(&id).is_some(),
            name: id.clone(),
            id,
            enabled,
            order,
        }
    }

    /// Slot tokens this section occupies when enabled: its own token for a
    /// native section, the superseded tokens for a mapped one.
    pub fn native_tokens(&self) -> Vec<NativeToken> {
        match native_token_of(&self.id) {
            Some(token) if self.native => vec![token],
            _ => native_tokens_for(&self.id).to_vec(),
        }
    }

    pub fn to_entry(&self) -> PreferenceEntry {
        PreferenceEntry::new(self.id.as_str(), self.order, self.enabled)
    }
}

/// Resolves every candidate against the user's stored state.
///
/// Native sections are enabled exactly when their token occupies a slot.
/// A configured section whose native equivalent occupies a slot is forced
/// on; otherwise the record decides, then the configuration default.
/// Order comes from the record, then the default (a native section's slot
/// position), then 0. The result is neither sorted nor filtered.
pub fn merge_user_preferences(
    candidates: &[CandidateSection],
    record: &PreferenceRecord,
    slots: &NativeSlots,
) -> Vec<ResolvedSection> {
    let mut stored: HashMap<&str, &PreferenceEntry> = HashMap::new();
    for entry in record.entries() {
        stored.entry(entry.id.as_str()).or_insert(entry);
    }
    let occupied = slots.occupied();

    candidates
        .iter()
        .map(|candidate| {
            let entry = stored.get(candidate.id.as_str());
            let (enabled, default_order) = match candidate.source {
                SectionSource::Native(token) => (
                    occupied.contains(&token),
                    slots.position(token).map(|slot| slot as i64 * 10),
                ),
                SectionSource::Configured(_) => {
                    let forced = native_tokens_for(&candidate.id)
                        .iter()
                        .any(|token| occupied.contains(token));
                    let enabled = forced
                        || entry
                            .map(|entry| entry.enabled)
                            .unwrap_or(candidate.default_enabled);
                    (enabled, candidate.default_order)
                }
            };
            let order = entry
                .map(|entry| entry.order)
                .or(default_order)
                .unwrap_or(0);

            ResolvedSection {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                enabled,
                order,
                native: candidate.is_native(),
            }
        })
        .collect()
}

/// Enabled sections, sorted by order; ties keep their input order.
pub fn visible_sections(resolved: &[ResolvedSection]) -> Vec<ResolvedSection> {
    let mut visible: Vec<(usize, &ResolvedSection)> = resolved
        .iter()
        .enumerate()
        .filter(|(_, section)| section.enabled)
        .collect();
    visible.sort_by_key(|(index, section)| (section.order, *index));
    visible.into_iter().map(|(_, section)| section.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kefin_model::SectionCategory;

    fn native(token: NativeToken) -> CandidateSection {
        CandidateSection {
            id: token.as_str().to_string(),
            name: token.as_str().to_string(),
            source: SectionSource::Native(token),
            default_enabled: false,
            default_order: None,
        }
    }

    fn configured(id: &str, enabled: bool, order: i64) -> CandidateSection {
        CandidateSection {
            id: id.to_string(),
            name: id.to_string(),
            source: SectionSource::Configured(SectionCategory::Home),
            default_enabled: enabled,
            default_order: Some(order),
        }
    }

    #[test]
    fn slots_are_authoritative_for_native_sections() {
        let candidates = vec![native(NativeToken::Resume), native(NativeToken::LiveTv)];
        let record: PreferenceRecord =
            [PreferenceEntry::new("livetv", 5, true)].into_iter().collect();
        let slots = NativeSlots::from_tokens([NativeToken::LatestMedia, NativeToken::Resume]);

        let resolved = merge_user_preferences(&candidates, &record, &slots);
        assert!(resolved[0].enabled);
        assert_eq!(resolved[0].order, 10);
        assert!(!resolved[1].enabled, "record cannot enable an empty slot");
        assert_eq!(resolved[1].order, 5);
    }

    #[test]
    fn occupied_equivalent_forces_configured_section_on() {
        let candidates = vec![
            configured("recently-added-f137a2dd", false, 100),
            configured("watchlist", true, 60),
        ];
        let record: PreferenceRecord = [
            PreferenceEntry::new("recently-added-f137a2dd", 3, false),
            PreferenceEntry::new("watchlist", 7, false),
            PreferenceEntry::new("gone", 1, true),
        ]
        .into_iter()
        .collect();
        let slots = NativeSlots::from_tokens([NativeToken::LatestMedia]);

        let resolved = merge_user_preferences(&candidates, &record, &slots);
        assert_eq!(resolved.len(), 2);
        assert!(resolved[0].enabled);
        assert_eq!(resolved[0].order, 3);
        assert!(!resolved[1].enabled);
        assert_eq!(resolved[1].order, 7);
    }

    #[test]
    fn defaults_apply_without_a_record_entry() {
        let candidates = vec![configured("upcoming", false, 70)];
        let resolved = merge_user_preferences(
            &candidates,
            &PreferenceRecord::default(),
            &NativeSlots::empty(),
        );
        assert_eq!(resolved[0], ResolvedSection {
            id: "upcoming".into(),
            name: "upcoming".into(),
            enabled: false,
            order: 70,
            native: false,
        });
    }

    #[test]
    fn visible_sections_sort_stably() {
        let resolved = vec![
            ResolvedSection::new("b", 20, true),
            ResolvedSection::new("a", 10, true),
            ResolvedSection::new("hidden", 0, false),
            ResolvedSection::new("c", 10, true),
        ];
        let visible: Vec<String> =
            visible_sections(&resolved).into_iter().map(|s| s.id).collect();
        assert_eq!(visible, vec!["a", "c", "b"]);
    }
}
