//! Reconciles the effective configuration, the user's preference record
//! and the host's native slots into the list the order editor shows, and
//! writes edits back.

pub mod candidates;
pub mod editor;
pub mod mapper;
pub mod service;
pub mod slots;

pub use candidates::{CandidateSection, SectionSource, editor_candidates};
pub use editor::{
    editor_list, move_down, move_section, move_up, renumber, toggle_section,
};
pub use mapper::{ResolvedSection, merge_user_preferences, visible_sections};
pub use service::{PreferenceService, SaveOutcome};
pub use slots::{compute_native_slots, save_user_preferences};
