use std::collections::HashSet;

use kefin_model::{HomeScreenConfig, NativeToken, SectionCategory};

use crate::catalog::{
    CONTINUE_WATCHING, CONTINUE_WATCHING_NEXT_UP, NEXT_UP, native_sections,
    native_tokens_for,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSource {
    /// Rendered by the host from a `homesection*` slot.
    Native(NativeToken),
    Configured(SectionCategory),
}

/// A section the user can place in the order editor, before preferences
/// are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSection {
    pub id: String,
    pub name: String,
    pub source: SectionSource,
    pub default_enabled: bool,
    /// `None` for native sections, which take their default position from
    /// the slot they occupy.
    pub default_order: Option<i64>,
}

impl CandidateSection {
    pub fn is_native(&self) -> bool {
        matches!(self.source, SectionSource::Native(_))
    }
}

/// Native sections followed by the non-hidden HOME and CUSTOM sections of
/// `config`.
///
/// With `MERGE_NEXT_UP` the combined continue-watching/next-up section is
/// offered instead of the two separate ones, and the other way round.
/// With `REMOVE_CONFLICTING_SECTIONS` a native section is left out when an
/// enabled configured section renders the same content.
pub fn editor_candidates(config: &HomeScreenConfig) -> Vec<CandidateSection> {
    let superseded = |id: &str| {
        if config.merge_next_up {
            id == CONTINUE_WATCHING || id == NEXT_UP
        } else {
            id == CONTINUE_WATCHING_NEXT_UP
        }
    };

    let configured: Vec<CandidateSection> = [
        SectionCategory::Home,
        SectionCategory::Custom,
    ]
    .into_iter()
    .flat_map(|category| {
        config
            .sections(category)
            .filter(|section| !section.hidden && !superseded(&section.id))
            .map(move |section| CandidateSection {
                id: section.id.clone(),
                name: section.name.clone(),
                source: SectionSource::Configured(category),
                default_enabled: section.enabled,
                default_order: Some(section.order),
            })
    })
    .collect();

    let conflicting: HashSet<NativeToken> = if config.remove_conflicting_sections {
        configured
            .iter()
            .filter(|candidate| candidate.default_enabled)
            .flat_map(|candidate| native_tokens_for(&candidate.id).iter().copied())
            .collect()
    } else {
        HashSet::new()
    };

    native_sections()
        .iter()
        .filter(|native| !conflicting.contains(&native.token))
        .map(|native| CandidateSection {
            id: native.token.as_str().to_string(),
            name: native.name.to_string(),
            source: SectionSource::Native(native.token),
            default_enabled: false,
            default_order: None,
        })
        .chain(configured)
        .collect()
}
