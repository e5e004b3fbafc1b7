//! Data model for Kefin home-screen sections, configuration documents and
//! per-user preferences.
//!
//! Everything here is plain data with serde shapes matching the persisted
//! JSON. Merge, migration and preference logic live in `kefin-core`.
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod group;
pub mod item;
pub mod legacy;
pub mod lenient;
pub mod native;
pub mod preferences;
pub mod prelude;
pub mod query;
pub mod schedule;
pub mod section;
pub mod settings;

pub use config::{CONFIG_VERSION, HomeScreenConfig, SectionCategory, SectionRef};
pub use error::{ModelError, Result as ModelResult};
pub use group::{DiscoveryGroup, DiscoverySection, SectionGroup};
pub use item::MediaItem;
pub use legacy::{
    ItemTypes, LegacyConfig, LegacyDiscovery, LegacyDiscoverySection,
    LegacyRecentlyAdded, LegacyRecentlyReleased, LegacySeason, LegacySeasonal,
    LegacySectionConfig, LegacySourceType, LegacySourcedSection,
    QueryOptionOverride,
};
pub use native::{NATIVE_SLOT_COUNT, NativeSlots, NativeToken};
pub use preferences::{
    DisplayPreferences, PREFERENCE_KEY, PreferenceEntry, PreferenceRecord,
};
pub use query::{
    DataSourceQuery, ItemQuery, QueryOptions, SectionQuery, StaticQuery,
};
pub use schedule::{MonthDay, Schedule};
pub use section::{CardFormat, ParentItemType, RenderMode, Section};
pub use settings::{DiscoverySettings, SeasonalThemeSettings};
