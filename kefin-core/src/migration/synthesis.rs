//! Builds free-standing sections from a legacy `type`/`source` pair.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use kefin_model::query::{GENRE_IDS, GENRES, LIMIT, PARENT_ID, TAGS};
use kefin_model::{
    LegacySourceType, LegacySourcedSection, ParentItemType, QueryOptions,
    Section, SectionQuery,
};

use super::overlay::overlay_section;
use crate::catalog::DEFAULT_ITEM_LIMIT;

static ITEM_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{32}$").expect("item id pattern is valid")
});

/// Whether `source` is a bare 32-hex item id rather than a name list.
pub fn is_item_id(source: &str) -> bool {
    ITEM_ID.is_match(source.trim())
}

/// Option key a legacy source type filters on. Genre sources may be names or
/// ids; the 32-hex form selects `GenreIds`.
pub fn filter_key(source_type: LegacySourceType, source: &str) -> &'static str {
    match source_type {
        LegacySourceType::Genre if is_item_id(source) => GENRE_IDS,
        LegacySourceType::Genre => GENRES,
        LegacySourceType::Tag => TAGS,
        LegacySourceType::Parent
        | LegacySourceType::Playlist
        | LegacySourceType::Collection => PARENT_ID,
    }
}

pub fn parent_item_type(source_type: LegacySourceType) -> Option<ParentItemType> {
    match source_type {
        LegacySourceType::Playlist => Some(ParentItemType::Playlist),
        LegacySourceType::Collection => Some(ParentItemType::Collection),
        LegacySourceType::Parent => Some(ParentItemType::GenericParent),
        LegacySourceType::Genre | LegacySourceType::Tag => None,
    }
}

/// Query options for a `type`/`source` pair.
pub fn synthesize_options(
    source_type: LegacySourceType,
    source: &str,
) -> QueryOptions {
    QueryOptions::new()
        .with(filter_key(source_type, source), source)
        .with(LIMIT, DEFAULT_ITEM_LIMIT)
}

/// Converts a legacy sourced entry into a new section with the given id.
///
/// The synthesized filter is built first, then the entry's own fields are
/// overlaid, so `additionalQueryOptions` still land last.
pub fn synthesize_section(id: String, legacy: &LegacySourcedSection) -> Section {
    let name = legacy
        .fields
        .name
        .clone()
        .or_else(|| legacy.source.clone())
        .unwrap_or_else(|| id.clone());
    let mut base = Section::new(id, name);

    match (legacy.source_type, legacy.source.as_deref()) {
        (Some(source_type), Some(source)) if !source.trim().is_empty() => {
            base.queries.push(SectionQuery::from_options(synthesize_options(
                source_type,
                source,
            )));
            base.parent_item_type = parent_item_type(source_type);
        }
        (source_type, source) => {
            warn!(
                section_id = %base.id,
                ?source_type,
                ?source,
                "legacy section has no usable type/source; created without a filter"
            );
        }
    }

    overlay_section(&base, &legacy.fields, None)
}
