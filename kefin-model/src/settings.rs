use serde::{Deserialize, Serialize};

use crate::section::CardFormat;

/// Knobs for the randomized discovery rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoverySettings {
    pub enabled: bool,
    /// Load further discovery sections as the user scrolls.
    pub infinite_scroll: bool,
    /// Minimum number of credited appearances before a person qualifies for
    /// a spotlight.
    pub min_people_appearances: u32,
    pub min_genre_movie_count: u32,
    pub minimum_shows_for_network: u32,
    pub default_item_limit: u32,
    pub default_sort_order: String,
    pub default_card_format: CardFormat,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            infinite_scroll: true,
            min_people_appearances: 10,
            min_genre_movie_count: 50,
            minimum_shows_for_network: 5,
            default_item_limit: 16,
            default_sort_order: "Random".to_string(),
            default_card_format: CardFormat::Poster,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonalThemeSettings {
    pub enabled: bool,
    pub enable_seasonal_animations: bool,
    pub enable_seasonal_background: bool,
}

impl Default for SeasonalThemeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_seasonal_animations: true,
            enable_seasonal_background: true,
        }
    }
}
