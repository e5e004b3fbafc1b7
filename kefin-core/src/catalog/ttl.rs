use std::time::Duration;

use kefin_model::{DiscoverySection, Section, SectionCategory};

use super::home::RECENTLY_ADDED_PREFIX;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const SEASONAL_TTL: Duration = Duration::from_secs(60 * 60);
pub const DISCOVERY_TTL: Duration = Duration::from_secs(30 * 60);
pub const RECENTLY_ADDED_TTL: Duration = Duration::from_secs(2 * 60);

/// How long a section's resolved item list may be served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub default: Duration,
    pub seasonal: Duration,
    pub discovery: Duration,
    pub recently_added: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            default: DEFAULT_TTL,
            seasonal: SEASONAL_TTL,
            discovery: DISCOVERY_TTL,
            recently_added: RECENTLY_ADDED_TTL,
        }
    }
}

impl TtlPolicy {
    /// A section's own `ttl` wins over the category policy.
    pub fn ttl_for(&self, section: &Section, category: SectionCategory) -> Duration {
        if let Some(ms) = section.ttl {
            return Duration::from_millis(ms);
        }
        if section.id.starts_with(RECENTLY_ADDED_PREFIX) {
            return self.recently_added;
        }
        match category {
            SectionCategory::Seasonal => self.seasonal,
            SectionCategory::Discovery => self.discovery,
            SectionCategory::Home | SectionCategory::Custom => self.default,
        }
    }

    pub fn ttl_for_discovery(&self, section: &DiscoverySection) -> Duration {
        section
            .ttl
            .map(Duration::from_millis)
            .unwrap_or(self.discovery)
    }
}
