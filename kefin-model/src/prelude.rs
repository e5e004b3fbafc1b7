//! Snapshot of the types most consumers need.
//! Prefer importing from this module when wiring services together.

pub use super::config::{HomeScreenConfig, SectionCategory};
pub use super::group::{DiscoveryGroup, DiscoverySection, SectionGroup};
pub use super::item::MediaItem;
pub use super::legacy::LegacyConfig;
pub use super::native::{NativeSlots, NativeToken};
pub use super::preferences::{
    DisplayPreferences, PreferenceEntry, PreferenceRecord,
};
pub use super::query::{ItemQuery, QueryOptions, SectionQuery};
pub use super::schedule::{MonthDay, Schedule};
pub use super::section::{CardFormat, RenderMode, Section};
