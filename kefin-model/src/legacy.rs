//! The flat, pre-groups configuration schema.
//!
//! These types exist only to be read once and converted. They are kept
//! apart from [`crate::section::Section`] so the migrator converts between
//! two explicit shapes instead of probing one object for both. Every field
//! is optional and tolerant of wrong JSON types; see [`crate::lenient`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lenient;
use crate::schedule::MonthDay;
use crate::section::{CardFormat, RenderMode};

/// `includeItemTypes` was written either as a list or a comma string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemTypes {
    List(Vec<String>),
    Csv(String),
}

impl ItemTypes {
    /// Trimmed, non-empty type names.
    pub fn normalized(&self) -> Vec<String> {
        let parts: Vec<&str> = match self {
            ItemTypes::List(items) => items.iter().map(String::as_str).collect(),
            ItemTypes::Csv(raw) => raw.split(',').collect(),
        };
        parts
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One `{key, value}` raw query option override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOptionOverride {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

/// Fields shared by every legacy section-like entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacySectionConfig {
    #[serde(deserialize_with = "lenient::option")]
    pub enabled: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub order: Option<i64>,
    #[serde(deserialize_with = "lenient::option")]
    pub card_format: Option<CardFormat>,
    #[serde(deserialize_with = "lenient::option")]
    pub start_date: Option<MonthDay>,
    #[serde(deserialize_with = "lenient::option")]
    pub end_date: Option<MonthDay>,
    #[serde(deserialize_with = "lenient::option")]
    pub discovery_enabled: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub render_mode: Option<RenderMode>,
    #[serde(deserialize_with = "lenient::option")]
    pub spotlight: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub item_limit: Option<u32>,
    #[serde(deserialize_with = "lenient::option")]
    pub sort_order: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub sort_order_direction: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub search_term: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub include_item_types: Option<ItemTypes>,
    /// Tri-state: `None` means "no filter".
    #[serde(deserialize_with = "lenient::option")]
    pub is_played: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub min_age_in_days: Option<u32>,
    #[serde(deserialize_with = "lenient::option")]
    pub max_age_in_days: Option<u32>,
    #[serde(deserialize_with = "lenient::vec")]
    pub additional_query_options: Vec<QueryOptionOverride>,
}

/// Kind of source a legacy seasonal or custom section pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegacySourceType {
    Genre,
    Tag,
    Parent,
    Playlist,
    Collection,
}

/// A seasonal or free-standing custom section: the common fields plus a
/// `type`/`source` pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacySourcedSection {
    #[serde(deserialize_with = "lenient::option")]
    pub id: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::option")]
    pub source_type: Option<LegacySourceType>,
    #[serde(deserialize_with = "lenient::option")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub fields: LegacySectionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyRecentlyReleased {
    #[serde(deserialize_with = "lenient::option")]
    pub enabled: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub movies: Option<LegacySectionConfig>,
    #[serde(deserialize_with = "lenient::option")]
    pub episodes: Option<LegacySectionConfig>,
}

/// `recentlyAddedInLibrary`: a parent toggle plus one entry per library id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegacyRecentlyAdded {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub libraries: BTreeMap<String, LegacySectionConfig>,
}

impl<'de> Deserialize<'de> for LegacyRecentlyAdded {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(entries) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };

        let mut parsed = Self::default();
        for (key, value) in entries {
            if key == "enabled" {
                parsed.enabled = value.as_bool();
            } else if let Ok(entry) = serde_json::from_value(value) {
                parsed.libraries.insert(key, entry);
            }
        }
        Ok(parsed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacySeason {
    #[serde(deserialize_with = "lenient::option")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub enabled: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub start_date: Option<MonthDay>,
    #[serde(deserialize_with = "lenient::option")]
    pub end_date: Option<MonthDay>,
    #[serde(deserialize_with = "lenient::vec")]
    pub sections: Vec<LegacySourcedSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacySeasonal {
    #[serde(deserialize_with = "lenient::option")]
    pub enabled: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub enable_seasonal_animations: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub enable_seasonal_background: Option<bool>,
    #[serde(deserialize_with = "lenient::vec")]
    pub seasons: Vec<LegacySeason>,
}

/// A legacy discovery section entry; flat fields only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyDiscoverySection {
    #[serde(deserialize_with = "lenient::option")]
    pub enabled: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub order: Option<i64>,
    #[serde(deserialize_with = "lenient::option")]
    pub item_limit: Option<u32>,
    #[serde(deserialize_with = "lenient::option")]
    pub sort_order: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub sort_order_direction: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub card_format: Option<CardFormat>,
    #[serde(deserialize_with = "lenient::option")]
    pub spotlight: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub minimum_items: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyDiscovery {
    #[serde(deserialize_with = "lenient::option")]
    pub enabled: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub infinite_scroll: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub min_people_appearances: Option<u32>,
    #[serde(deserialize_with = "lenient::option")]
    pub min_genre_movie_count: Option<u32>,
    #[serde(deserialize_with = "lenient::option")]
    pub minimum_shows_for_network: Option<u32>,
    #[serde(deserialize_with = "lenient::option")]
    pub default_item_limit: Option<u32>,
    #[serde(deserialize_with = "lenient::option")]
    pub default_sort_order: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub default_card_format: Option<CardFormat>,
    #[serde(deserialize_with = "lenient::map")]
    pub section_types: BTreeMap<String, LegacyDiscoverySection>,
}

/// The whole legacy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyConfig {
    #[serde(deserialize_with = "lenient::option")]
    pub recently_released: Option<LegacyRecentlyReleased>,
    #[serde(deserialize_with = "lenient::option")]
    pub recently_added_in_library: Option<LegacyRecentlyAdded>,
    #[serde(deserialize_with = "lenient::option")]
    pub watch_again: Option<LegacySectionConfig>,
    #[serde(deserialize_with = "lenient::option")]
    pub watchlist: Option<LegacySectionConfig>,
    #[serde(deserialize_with = "lenient::option")]
    pub upcoming: Option<LegacySectionConfig>,
    #[serde(rename = "imdbTop250", deserialize_with = "lenient::option")]
    pub imdb_top_250: Option<LegacySectionConfig>,
    #[serde(rename = "popularTVNetworks", deserialize_with = "lenient::option")]
    pub popular_tv_networks: Option<LegacySectionConfig>,
    #[serde(deserialize_with = "lenient::option")]
    pub seasonal: Option<LegacySeasonal>,
    #[serde(deserialize_with = "lenient::option")]
    pub discovery: Option<LegacyDiscovery>,
    #[serde(deserialize_with = "lenient::vec")]
    pub custom_sections: Vec<LegacySourcedSection>,
    #[serde(deserialize_with = "lenient::option")]
    pub remove_conflicting_sections: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub merge_next_up: Option<bool>,
}

impl LegacyConfig {
    /// The fixed home sections addressed by simple renames:
    /// `(legacy key, default section id, legacy entry)`.
    pub fn renamed_home_sections(
        &self,
    ) -> [(&'static str, &'static str, Option<&LegacySectionConfig>); 5] {
        [
            ("watchAgain", "watch-again", self.watch_again.as_ref()),
            ("watchlist", "watchlist", self.watchlist.as_ref()),
            ("upcoming", "upcoming", self.upcoming.as_ref()),
            ("imdbTop250", "imdb-top-250", self.imdb_top_250.as_ref()),
            (
                "popularTVNetworks",
                "popular-tv-networks",
                self.popular_tv_networks.as_ref(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tolerates_wrongly_typed_fields() {
        let legacy: LegacyConfig = serde_json::from_value(json!({
            "recentlyReleased": {
                "enabled": "yes",
                "movies": {"enabled": false, "itemLimit": "ten", "order": 5}
            },
            "watchlist": 42,
            "customSections": [{"type": "Tag", "source": "xmas"}, "junk"]
        }))
        .unwrap();

        let released = legacy.recently_released.unwrap();
        assert_eq!(released.enabled, None);
        let movies = released.movies.unwrap();
        assert_eq!(movies.enabled, Some(false));
        assert_eq!(movies.item_limit, None);
        assert_eq!(movies.order, Some(5));
        assert!(legacy.watchlist.is_none());
        assert_eq!(legacy.custom_sections.len(), 1);
        assert_eq!(
            legacy.custom_sections[0].source_type,
            Some(LegacySourceType::Tag)
        );
    }

    #[test]
    fn item_types_accept_both_spellings() {
        let csv = ItemTypes::Csv(" Movie, ,Series ".into());
        assert_eq!(csv.normalized(), vec!["Movie", "Series"]);
        let list = ItemTypes::List(vec!["Episode".into(), " ".into()]);
        assert_eq!(list.normalized(), vec!["Episode"]);
    }

    #[test]
    fn recently_added_collects_library_entries() {
        let legacy: LegacyConfig = serde_json::from_value(json!({
            "recentlyAddedInLibrary": {
                "enabled": true,
                "f137a2dd21bbc1b99aa5c0f6bf02a805": {"enabled": true, "itemLimit": 12},
                "broken": "nope"
            }
        }))
        .unwrap();
        let added = legacy.recently_added_in_library.unwrap();
        assert_eq!(added.enabled, Some(true));
        assert_eq!(added.libraries.len(), 1);
        assert_eq!(
            added.libraries["f137a2dd21bbc1b99aa5c0f6bf02a805"].item_limit,
            Some(12)
        );
    }
}
