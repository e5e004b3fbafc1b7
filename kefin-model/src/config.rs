//! The effective home-screen configuration document.

use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::group::{DiscoveryGroup, DiscoverySection, SectionGroup};
use crate::section::Section;
use crate::settings::{DiscoverySettings, SeasonalThemeSettings};

/// Schema version written by this crate.
pub const CONFIG_VERSION: u32 = 2;

/// The four group categories of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionCategory {
    Home,
    Seasonal,
    Discovery,
    Custom,
}

impl Display for SectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionCategory::Home => write!(f, "home"),
            SectionCategory::Seasonal => write!(f, "seasonal"),
            SectionCategory::Discovery => write!(f, "discovery"),
            SectionCategory::Custom => write!(f, "custom"),
        }
    }
}

/// Borrowed result of an id lookup across all categories.
#[derive(Debug, Clone, Copy)]
pub enum SectionRef<'a> {
    Standard {
        category: SectionCategory,
        group_id: &'a str,
        section: &'a Section,
    },
    Discovery {
        group_id: &'a str,
        section: &'a DiscoverySection,
    },
}

impl SectionRef<'_> {
    pub fn category(&self) -> SectionCategory {
        match self {
            SectionRef::Standard { category, .. } => *category,
            SectionRef::Discovery { .. } => SectionCategory::Discovery,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            SectionRef::Standard { section, .. } => section.enabled,
            SectionRef::Discovery { section, .. } => section.enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeScreenConfig {
    #[serde(rename = "configVersion")]
    pub version: u32,
    #[serde(rename = "HOME_SECTION_GROUPS")]
    pub home: Vec<SectionGroup>,
    #[serde(rename = "SEASONAL_SECTION_GROUPS")]
    pub seasonal: Vec<SectionGroup>,
    #[serde(rename = "DISCOVERY_SECTION_GROUPS")]
    pub discovery: Vec<DiscoveryGroup>,
    #[serde(rename = "CUSTOM_SECTION_GROUPS")]
    pub custom: Vec<SectionGroup>,
    #[serde(rename = "DISCOVERY_SETTINGS")]
    pub discovery_settings: DiscoverySettings,
    #[serde(rename = "SEASONAL_THEME_SETTINGS")]
    pub seasonal_theme: SeasonalThemeSettings,
    /// Hide native sections that a custom section supersedes.
    #[serde(rename = "REMOVE_CONFLICTING_SECTIONS")]
    pub remove_conflicting_sections: bool,
    /// Show continue-watching and next-up as one combined section.
    #[serde(rename = "MERGE_NEXT_UP")]
    pub merge_next_up: bool,
}

impl Default for HomeScreenConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            home: Vec::new(),
            seasonal: Vec::new(),
            discovery: Vec::new(),
            custom: Vec::new(),
            discovery_settings: DiscoverySettings::default(),
            seasonal_theme: SeasonalThemeSettings::default(),
            remove_conflicting_sections: false,
            merge_next_up: false,
        }
    }
}

impl HomeScreenConfig {
    /// Standard-shaped groups of a category. Discovery groups have their own
    /// shape and are reached through [`HomeScreenConfig::discovery`].
    pub fn groups(&self, category: SectionCategory) -> &[SectionGroup] {
        match category {
            SectionCategory::Home => &self.home,
            SectionCategory::Seasonal => &self.seasonal,
            SectionCategory::Custom => &self.custom,
            SectionCategory::Discovery => &[],
        }
    }

    pub fn groups_mut(
        &mut self,
        category: SectionCategory,
    ) -> Option<&mut Vec<SectionGroup>> {
        match category {
            SectionCategory::Home => Some(&mut self.home),
            SectionCategory::Seasonal => Some(&mut self.seasonal),
            SectionCategory::Custom => Some(&mut self.custom),
            SectionCategory::Discovery => None,
        }
    }

    /// Flattened sections of a standard category, in group order.
    pub fn sections(
        &self,
        category: SectionCategory,
    ) -> impl Iterator<Item = &Section> {
        self.groups(category)
            .iter()
            .flat_map(|group| group.sections.iter())
    }

    pub fn discovery_sections(&self) -> impl Iterator<Item = &DiscoverySection> {
        self.discovery.iter().flat_map(|group| group.sections.iter())
    }

    /// Looks a section up by id across all four categories.
    pub fn find_section(&self, id: &str) -> Option<SectionRef<'_>> {
        for category in [
            SectionCategory::Home,
            SectionCategory::Seasonal,
            SectionCategory::Custom,
        ] {
            for group in self.groups(category) {
                if let Some(section) = group.section(id) {
                    return Some(SectionRef::Standard {
                        category,
                        group_id: &group.id,
                        section,
                    });
                }
            }
        }

        self.discovery.iter().find_map(|group| {
            group
                .sections
                .iter()
                .find(|section| section.id == id)
                .map(|section| SectionRef::Discovery {
                    group_id: &group.id,
                    section,
                })
        })
    }

    /// Mutable lookup restricted to one standard category.
    pub fn section_mut(
        &mut self,
        category: SectionCategory,
        id: &str,
    ) -> Option<&mut Section> {
        self.groups_mut(category)?
            .iter_mut()
            .flat_map(|group| group.sections.iter_mut())
            .find(|section| section.id == id)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        [
            SectionCategory::Home,
            SectionCategory::Seasonal,
            SectionCategory::Custom,
        ]
        .into_iter()
        .flat_map(|category| self.sections(category))
        .map(|section| section.id.as_str())
        .chain(self.discovery_sections().map(|section| section.id.as_str()))
    }

    /// Ids that occur more than once across the configuration.
    pub fn duplicate_ids(&self) -> BTreeSet<String> {
        let mut seen = HashSet::new();
        self.section_ids()
            .filter(|id| !seen.insert(*id))
            .map(str::to_string)
            .collect()
    }

    /// `base` if unused, otherwise the first free `base-N`.
    pub fn unique_id(&self, base: &str) -> String {
        let taken: HashSet<&str> = self.section_ids().collect();
        if !taken.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_else(|| base.to_string())
    }

    /// Group of a standard category, created (appended) on first use.
    pub fn ensure_group(
        &mut self,
        category: SectionCategory,
        id: &str,
        name: &str,
    ) -> Option<&mut SectionGroup> {
        let groups = self.groups_mut(category)?;
        let index = match groups.iter().position(|group| group.id == id) {
            Some(index) => index,
            None => {
                groups.push(SectionGroup::new(id, name));
                groups.len() - 1
            }
        };
        groups.get_mut(index)
    }
}
