//! Resolved item lists per section, cached for the section's TTL.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use kefin_model::query::{MAX_PREMIERE_DATE, MIN_PREMIERE_DATE};
use kefin_model::{
    HomeScreenConfig, ItemQuery, MediaItem, Section, SectionCategory,
    SectionQuery,
};

use crate::catalog::TtlPolicy;
use crate::error::{KefinError, QueryError, Result};
use crate::ports::ItemQueryService;

/// Enabled sections whose window (the section's own, else its group's)
/// covers `today`. Sections without any window are always active.
pub fn active_sections(
    config: &HomeScreenConfig,
    today: NaiveDate,
) -> Vec<(SectionCategory, &Section)> {
    [
        SectionCategory::Home,
        SectionCategory::Seasonal,
        SectionCategory::Custom,
    ]
    .into_iter()
    .flat_map(|category| {
        config.groups(category).iter().flat_map(move |group| {
            let group_schedule = group.schedule();
            group
                .sections
                .iter()
                .filter(move |section| {
                    section.enabled
                        && section
                            .schedule()
                            .or(group_schedule)
                            .is_none_or(|schedule| schedule.is_active_on(today))
                })
                .map(move |section| (category, section))
        })
    })
    .collect()
}

fn days_before(today: NaiveDate, days: u32) -> String {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
        .format("%Y-%m-%d")
        .to_string()
}

/// Query descriptors for a section. Age windows in days become premiere
/// date bounds relative to `today`.
pub fn item_queries(section: &Section, today: NaiveDate) -> Vec<ItemQuery> {
    section
        .queries
        .iter()
        .map(|query| match query {
            SectionQuery::Static(fixed) => {
                let mut options = fixed.query_options.clone();
                if let Some(max_age) = fixed.max_age {
                    options.set(MIN_PREMIERE_DATE, days_before(today, max_age));
                }
                if let Some(min_age) = fixed.min_age {
                    options.set(MAX_PREMIERE_DATE, days_before(today, min_age));
                }
                ItemQuery::Static { options }
            }
            SectionQuery::DataSource(source) => ItemQuery::DataSource {
                name: source.data_source.clone(),
                options: source.query_options.clone(),
            },
        })
        .collect()
}

#[derive(Debug)]
struct CachedItems {
    items: Arc<Vec<MediaItem>>,
    expires_at: Instant,
}

/// Owns the per-section item cache. Build one per process and share it.
pub struct SectionItemCache {
    service: Arc<dyn ItemQueryService>,
    ttl: TtlPolicy,
    entries: Mutex<HashMap<String, CachedItems>>,
}

impl fmt::Debug for SectionItemCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionItemCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SectionItemCache {
    pub fn new(service: Arc<dyn ItemQueryService>, ttl: TtlPolicy) -> Self {
        Self {
            service,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Warms the cache for every active section. Failures are logged; the
    /// count of sections loaded is returned.
    pub async fn init(&self, config: &HomeScreenConfig, today: NaiveDate) -> usize {
        let mut loaded = 0;
        for (category, section) in active_sections(config, today) {
            match self.get(section, category, today).await {
                Ok(_) => loaded += 1,
                Err(error) => {
                    warn!(section_id = %section.id, %error, "section items not preloaded");
                }
            }
        }
        debug!(loaded, "section item cache initialized");
        loaded
    }

    /// Items for `section`, concatenated across its queries in order.
    pub async fn get(
        &self,
        section: &Section,
        category: SectionCategory,
        today: NaiveDate,
    ) -> std::result::Result<Arc<Vec<MediaItem>>, QueryError> {
        let now = Instant::now();
        {
            let entries = self.entries.lock().await;
            if let Some(cached) = entries.get(&section.id)
                && cached.expires_at > now
            {
                return Ok(Arc::clone(&cached.items));
            }
        }

        let mut items = Vec::new();
        for query in item_queries(section, today) {
            items.extend(self.service.query(&query).await?);
        }
        let items = Arc::new(items);
        let ttl = self.ttl.ttl_for(section, category);

        self.entries.lock().await.insert(
            section.id.clone(),
            CachedItems {
                items: Arc::clone(&items),
                expires_at: now + ttl,
            },
        );
        debug!(section_id = %section.id, count = items.len(), ?ttl, "section items cached");
        Ok(items)
    }

    /// Looks the section up in `config` first.
    pub async fn get_by_id(
        &self,
        config: &HomeScreenConfig,
        id: &str,
        today: NaiveDate,
    ) -> Result<Arc<Vec<MediaItem>>> {
        let (category, section) = [
            SectionCategory::Home,
            SectionCategory::Seasonal,
            SectionCategory::Custom,
        ]
        .into_iter()
        .find_map(|category| {
            config
                .sections(category)
                .find(|section| section.id == id)
                .map(|section| (category, section))
        })
        .ok_or_else(|| KefinError::NotFound(id.to_string()))?;
        Ok(self.get(section, category, today).await?)
    }

    pub async fn invalidate(&self, id: &str) -> bool {
        self.entries.lock().await.remove(id).is_some()
    }

    pub async fn invalidate_all(&self) {
        self.entries.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DefaultCatalog, RECENTLY_RELEASED_MOVIES};
    use crate::ports::MockItemQueryService;
    use kefin_model::{MonthDay, QueryOptions, SectionGroup, StaticQuery};
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_window_becomes_premiere_bounds() {
        let section = Section::new("s", "S").with_query(SectionQuery::Static(
            StaticQuery {
                query_options: QueryOptions::new(),
                min_age: Some(1),
                max_age: Some(30),
            },
        ));
        let queries = item_queries(&section, date(2024, 3, 31));
        let options = queries[0].options();
        assert_eq!(options.get_str(MIN_PREMIERE_DATE), Some("2024-03-01"));
        assert_eq!(options.get_str(MAX_PREMIERE_DATE), Some("2024-03-30"));
    }

    #[test]
    fn seasonal_sections_follow_group_window() {
        let config = DefaultCatalog::builtin().snapshot();
        let october: Vec<&str> = active_sections(&config, date(2024, 10, 15))
            .into_iter()
            .map(|(_, section)| section.id.as_str())
            .collect();
        assert!(october.contains(&"seasonal.halloween.horror"));
        assert!(!october.contains(&"seasonal.christmas.christmas"));
        assert!(!october.contains(&"imdb-top-250"), "disabled by default");

        let new_year = active_sections(&config, date(2025, 1, 2));
        assert!(
            new_year
                .iter()
                .any(|(_, section)| section.id == "seasonal.new-year.new-year")
        );
    }

    #[test]
    fn section_window_overrides_group_window() {
        let mut config = HomeScreenConfig::default();
        let day = |m, d| MonthDay::new(m, d).unwrap();
        config.seasonal.push(
            SectionGroup::new("winter", "Winter")
                .with_window(day(12, 1), day(12, 31))
                .with_sections(vec![
                    Section::new("early", "Early").with_window(day(11, 1), day(11, 30)),
                ]),
        );
        assert_eq!(active_sections(&config, date(2024, 11, 10)).len(), 1);
        assert!(active_sections(&config, date(2024, 12, 10)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cached_until_ttl_expires() {
        let mut service = MockItemQueryService::new();
        service
            .expect_query()
            .times(2)
            .returning(|_| Ok(vec![MediaItem::new("1", "Heat")]));
        let cache = SectionItemCache::new(Arc::new(service), TtlPolicy::default());

        let config = DefaultCatalog::builtin().snapshot();
        let today = date(2024, 5, 1);
        let first = cache
            .get_by_id(&config, RECENTLY_RELEASED_MOVIES, today)
            .await
            .unwrap();
        let again = cache
            .get_by_id(&config, RECENTLY_RELEASED_MOVIES, today)
            .await
            .unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        tokio::time::advance(Duration::from_secs(6 * 60)).await;
        cache
            .get_by_id(&config, RECENTLY_RELEASED_MOVIES, today)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_section_is_not_found() {
        let cache = SectionItemCache::new(
            Arc::new(MockItemQueryService::new()),
            TtlPolicy::default(),
        );
        let config = DefaultCatalog::builtin().snapshot();
        let error = cache
            .get_by_id(&config, "nope", date(2024, 5, 1))
            .await
            .unwrap_err();
        assert!(matches!(error, KefinError::NotFound(_)));
        assert!(!cache.invalidate("nope").await);
    }
}
