//! Built-in SEASONAL groups. Each group carries its active window; sections
//! inherit it unless they set their own.

use kefin_model::query::{GENRES, LIMIT, SORT_BY, TAGS};
use kefin_model::{
    CardFormat, MonthDay, QueryOptions, Section, SectionGroup, SectionQuery,
};

use super::home::DEFAULT_ITEM_LIMIT;

fn day(month: u8, day: u8) -> MonthDay {
    MonthDay::new(month, day).expect("catalog dates are valid calendar days")
}

fn seasonal_id(group: &str, slug: &str) -> String {
    format!("seasonal.{group}.{slug}")
}

fn filtered(key: &str, value: &str) -> SectionQuery {
    SectionQuery::from_options(
        QueryOptions::new()
            .with(key, value)
            .with(SORT_BY, "Random")
            .with(LIMIT, DEFAULT_ITEM_LIMIT),
    )
}

pub(crate) fn seasonal_groups() -> Vec<SectionGroup> {
    vec![
        SectionGroup::new("halloween", "Halloween")
            .with_window(day(10, 1), day(10, 31))
            .with_sections(vec![
                Section::new(seasonal_id("halloween", "horror"), "Horror Night")
                    .with_order(10)
                    .with_query(filtered(GENRES, "Horror")),
                Section::new(
                    seasonal_id("halloween", "halloween"),
                    "Halloween Favorites",
                )
                .with_order(20)
                .with_query(filtered(TAGS, "halloween")),
            ]),
        SectionGroup::new("christmas", "Christmas")
            .with_window(day(12, 1), day(12, 26))
            .with_sections(vec![
                Section::new(
                    seasonal_id("christmas", "christmas"),
                    "Christmas Classics",
                )
                .with_order(10)
                .with_query(filtered(TAGS, "christmas")),
                Section::new(seasonal_id("christmas", "holiday"), "Holiday Movies")
                    .with_order(20)
                    .with_card_format(CardFormat::Thumb)
                    .with_query(filtered(GENRES, "Holiday")),
            ]),
        SectionGroup::new("valentines", "Valentine's Day")
            .with_window(day(2, 1), day(2, 14))
            .with_sections(vec![
                Section::new(seasonal_id("valentines", "romance"), "Romance")
                    .with_order(10)
                    .with_query(filtered(GENRES, "Romance")),
            ]),
        SectionGroup::new("new-year", "New Year")
            .with_window(day(12, 27), day(1, 5))
            .with_sections(vec![
                Section::new(
                    seasonal_id("new-year", "new-year"),
                    "Ring In The New Year",
                )
                .with_order(10)
                .with_query(filtered(TAGS, "new year")),
            ]),
    ]
}
