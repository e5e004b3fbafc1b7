//! Built-in DISCOVERY sections. Names carry placeholders filled from the
//! data source's pick at render time.

use kefin_model::{CardFormat, DiscoveryGroup, DiscoverySection};

pub const DISCOVERY_GROUP_ID: &str = "discovery";

pub(crate) fn discovery_groups() -> Vec<DiscoveryGroup> {
    let section = |id: &str, name: &str, order: i64| {
        let mut section = DiscoverySection::new(id, name, id);
        section.order = Some(order);
        section
    };

    let mut directors = section("top-rated-directors", "Top Rated Directors", 70);
    directors.card_format = Some(CardFormat::Portrait);
    directors.minimum_items = Some(5);

    let mut networks = section("network-spotlight", "On {Network}", 50);
    networks.card_format = Some(CardFormat::Thumb);

    let mut genres = section("genre-spotlight", "Best of {Genre}", 10);
    genres.spotlight = Some(true);

    vec![DiscoveryGroup {
        id: DISCOVERY_GROUP_ID.to_string(),
        name: "Discovery".to_string(),
        sections: vec![
            genres,
            section("director-spotlight", "Directed by {Director}", 20),
            section("actor-spotlight", "Starring {Actor}", 30),
            section("studio-spotlight", "From {Studio}", 40),
            networks,
            section("because-you-watched", "Because You Watched {Title}", 60),
            directors,
        ],
    }]
}
