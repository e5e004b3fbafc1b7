//! # Kefin Core
//!
//! Configuration core for Kefin home-screen sections: the built-in default
//! catalog, the one-shot legacy migration, the administrator override layer
//! and the per-user mapping onto the host's native home-section slots.
//!
//! ## Overview
//!
//! The effective configuration is built in layers:
//!
//! - **Default catalog**: the versioned built-in sections and settings
//! - **Legacy migration**: run once when only the old flat document exists
//! - **Admin overrides**: whole groups and settings blocks replaced by id
//! - **User preferences**: per-user order and visibility, mirrored into the
//!   host's `homesection0..9` slots
//!
//! ## Architecture
//!
//! - [`catalog`]: built-in defaults, TTL policy and native-token mapping
//! - [`migration`]: legacy document conversion and the run-once migrator
//! - [`admin`]: override merge and the [`admin::ConfigService`] accessor
//! - [`preferences`]: read/write paths, editor operations and the
//!   [`preferences::PreferenceService`]
//! - [`items`]: section item resolution with a TTL cache
//! - [`ports`]: collaborator traits implemented outside this crate
//!
//! ## Examples
//!
//! ```no_run
//! use kefin_core::catalog::DefaultCatalog;
//! use kefin_core::migration::migrate_legacy;
//! use kefin_core::preferences::{
//!     editor_candidates, merge_user_preferences, visible_sections,
//! };
//! use kefin_model::{DisplayPreferences, LegacyConfig};
//!
//! let legacy: LegacyConfig =
//!     serde_json::from_str(r#"{"mergeNextUp": true}"#).unwrap();
//! let report = migrate_legacy(&legacy, DefaultCatalog::builtin());
//!
//! let prefs = DisplayPreferences::default();
//! let resolved = merge_user_preferences(
//!     &editor_candidates(&report.config),
//!     &prefs.preference_record(),
//!     &prefs.native_slots(),
//! );
//! for section in visible_sections(&resolved) {
//!     println!("{} {}", section.order, section.name);
//! }
//! ```
#![allow(missing_docs)]

pub mod admin;
pub mod catalog;
pub mod error;
pub mod items;
pub mod migration;
pub mod ports;
pub mod preferences;

pub use admin::{AdminOverrides, ConfigService, merge_admin_overrides};
pub use catalog::{DefaultCatalog, TtlPolicy};
pub use error::{
    KefinError, MigrationError, PreferenceError, QueryError, Result, StoreError,
};
pub use items::{SectionItemCache, active_sections};
pub use migration::{
    LegacyMigrator, MigrationOutcome, MigrationReport, migrate_legacy,
};
pub use preferences::{PreferenceService, ResolvedSection, SaveOutcome};
