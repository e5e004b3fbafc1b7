//! The built-in, versioned default configuration.
//!
//! The catalog is the base layer every effective configuration starts from:
//! legacy migration overlays onto a copy of it and administrator overrides
//! replace whole groups of it. It is process-wide and never mutated; callers
//! take [`DefaultCatalog::snapshot`] and work on the copy.

mod discovery;
mod home;
mod native;
mod seasonal;
mod ttl;

use once_cell::sync::Lazy;

use kefin_model::{CONFIG_VERSION, HomeScreenConfig};

pub use discovery::DISCOVERY_GROUP_ID;
pub use home::{
    CONTINUE_WATCHING, CONTINUE_WATCHING_NEXT_UP, CUSTOM_GROUP_ID,
    CUSTOM_GROUP_NAME, DEFAULT_ITEM_LIMIT, HOME_GROUP_ID, IMDB_TOP_250, NEXT_UP,
    POPULAR_TV_NETWORKS, RECENTLY_ADDED_GROUP_ID, RECENTLY_ADDED_GROUP_NAME,
    RECENTLY_ADDED_PREFIX, RECENTLY_RELEASED_EPISODES, RECENTLY_RELEASED_MOVIES,
    UPCOMING, WATCH_AGAIN, WATCHLIST,
};
pub use native::{
    NativeSection, native_sections, native_token_of, native_tokens_for,
};
pub use ttl::{
    DEFAULT_TTL, DISCOVERY_TTL, RECENTLY_ADDED_TTL, SEASONAL_TTL, TtlPolicy,
};

static BUILTIN: Lazy<DefaultCatalog> = Lazy::new(DefaultCatalog::build);

#[derive(Debug, Clone)]
pub struct DefaultCatalog {
    version: u32,
    config: HomeScreenConfig,
    ttl: TtlPolicy,
}

impl DefaultCatalog {
    /// The catalog shipped with this crate.
    pub fn builtin() -> &'static DefaultCatalog {
        &BUILTIN
    }

    /// A catalog over a caller-supplied base, mainly for tests and for
    /// deployments that pin an older default set.
    pub fn new(config: HomeScreenConfig, ttl: TtlPolicy) -> Self {
        Self {
            version: config.version,
            config,
            ttl,
        }
    }

    fn build() -> Self {
        let config = HomeScreenConfig {
            version: CONFIG_VERSION,
            home: home::home_groups(),
            seasonal: seasonal::seasonal_groups(),
            discovery: discovery::discovery_groups(),
            custom: Vec::new(),
            ..HomeScreenConfig::default()
        };
        debug_assert!(config.duplicate_ids().is_empty());
        Self::new(config, TtlPolicy::default())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn config(&self) -> &HomeScreenConfig {
        &self.config
    }

    pub fn ttl(&self) -> &TtlPolicy {
        &self.ttl
    }

    /// Deep copy of the default configuration.
    pub fn snapshot(&self) -> HomeScreenConfig {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kefin_model::SectionCategory;

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = DefaultCatalog::builtin();
        assert!(catalog.config().duplicate_ids().is_empty());
        assert_eq!(catalog.version(), CONFIG_VERSION);
    }

    #[test]
    fn builtin_has_every_category_but_custom() {
        let config = DefaultCatalog::builtin().config();
        assert!(config.find_section(RECENTLY_RELEASED_MOVIES).is_some());
        assert!(config.sections(SectionCategory::Seasonal).count() >= 4);
        assert!(config.discovery_sections().count() >= 5);
        assert!(config.custom.is_empty());
    }

    #[test]
    fn new_year_window_wraps() {
        let config = DefaultCatalog::builtin().config();
        let group = config
            .seasonal
            .iter()
            .find(|group| group.id == "new-year")
            .unwrap();
        assert!(group.schedule().unwrap().wraps_year_end());
    }

    #[test]
    fn snapshot_is_independent() {
        let catalog = DefaultCatalog::builtin();
        let mut copy = catalog.snapshot();
        copy.home.clear();
        assert!(!catalog.config().home.is_empty());
    }
}
