//! Built-in HOME sections.

use kefin_model::query::{
    INCLUDE_ITEM_TYPES, IS_UNPLAYED, LIMIT, SORT_BY, SORT_ORDER,
};
use kefin_model::{
    CardFormat, QueryOptions, Section, SectionGroup, SectionQuery, StaticQuery,
};

pub const HOME_GROUP_ID: &str = "home";
pub const RECENTLY_RELEASED_MOVIES: &str = "recentlyReleased.movies";
pub const RECENTLY_RELEASED_EPISODES: &str = "recentlyReleased.episodes";
pub const WATCH_AGAIN: &str = "watch-again";
pub const WATCHLIST: &str = "watchlist";
pub const UPCOMING: &str = "upcoming";
pub const IMDB_TOP_250: &str = "imdb-top-250";
pub const POPULAR_TV_NETWORKS: &str = "popular-tv-networks";
pub const CONTINUE_WATCHING: &str = "continue-watching";
pub const NEXT_UP: &str = "next-up";
/// Continue-watching and next-up rendered as one section.
pub const CONTINUE_WATCHING_NEXT_UP: &str = "continue-watching-next-up";

pub const RECENTLY_ADDED_GROUP_ID: &str = "recently-added";
pub const RECENTLY_ADDED_GROUP_NAME: &str = "Recently Added";
pub const RECENTLY_ADDED_PREFIX: &str = "recently-added-";

pub const CUSTOM_GROUP_ID: &str = "custom";
pub const CUSTOM_GROUP_NAME: &str = "Custom Sections";

pub const DEFAULT_ITEM_LIMIT: u32 = 16;

fn recently_released(item_type: &str) -> SectionQuery {
    let mut options = QueryOptions::new()
        .with(SORT_BY, "PremiereDate")
        .with(SORT_ORDER, "Descending")
        .with(LIMIT, DEFAULT_ITEM_LIMIT);
    options.set_include_item_types([item_type]);
    SectionQuery::Static(StaticQuery {
        query_options: options,
        min_age: None,
        max_age: Some(30),
    })
}

pub(crate) fn home_groups() -> Vec<SectionGroup> {
    let watch_again = QueryOptions::new()
        .with(IS_UNPLAYED, false)
        .with(SORT_BY, "DatePlayed")
        .with(SORT_ORDER, "Descending")
        .with(INCLUDE_ITEM_TYPES, serde_json::json!(["Movie", "Series"]))
        .with(LIMIT, DEFAULT_ITEM_LIMIT);

    let sections = vec![
        Section::new(CONTINUE_WATCHING, "Continue Watching")
            .with_order(10)
            .with_card_format(CardFormat::Thumb)
            .with_query(SectionQuery::data_source("resume")),
        Section::new(NEXT_UP, "Next Up")
            .with_order(20)
            .with_card_format(CardFormat::Thumb)
            .with_query(SectionQuery::data_source("next-up")),
        Section::new(CONTINUE_WATCHING_NEXT_UP, "Continue Watching & Next Up")
            .with_order(10)
            .with_card_format(CardFormat::Thumb)
            .with_query(SectionQuery::data_source("resume-next-up")),
        Section::new(RECENTLY_RELEASED_MOVIES, "Recently Released Movies")
            .with_order(30)
            .with_query(recently_released("Movie")),
        Section::new(RECENTLY_RELEASED_EPISODES, "Recently Released Episodes")
            .with_order(40)
            .with_card_format(CardFormat::Thumb)
            .with_query(recently_released("Episode")),
        Section::new(WATCH_AGAIN, "Watch Again")
            .with_order(50)
            .with_query(SectionQuery::from_options(watch_again)),
        Section::new(WATCHLIST, "Watchlist")
            .with_order(60)
            .with_query(SectionQuery::data_source("watchlist")),
        Section::new(UPCOMING, "Upcoming")
            .with_order(70)
            .with_card_format(CardFormat::Thumb)
            .with_query(SectionQuery::data_source("upcoming")),
        Section::new(IMDB_TOP_250, "IMDb Top 250")
            .with_order(80)
            .with_query(SectionQuery::data_source("imdb-top-250"))
            .disabled(),
        Section::new(POPULAR_TV_NETWORKS, "Popular TV Networks")
            .with_order(90)
            .with_card_format(CardFormat::Thumb)
            .with_query(SectionQuery::data_source("popular-tv-networks"))
            .disabled(),
    ];

    vec![SectionGroup::new(HOME_GROUP_ID, "Home").with_sections(sections)]
}
