//! Legacy seasons onto the default seasonal groups.

use tracing::{debug, warn};

use kefin_model::query::{GENRE_IDS, GENRES, PARENT_ID, TAGS};
use kefin_model::{
    HomeScreenConfig, LegacySeason, LegacySeasonal, LegacySourceType,
    LegacySourcedSection, MonthDay, Section, SectionGroup,
};

use super::overlay::overlay_section;
use super::synthesis::synthesize_section;
use super::{MigrationReport, push_custom_section};
use crate::error::MigrationError;

type Window = (Option<MonthDay>, Option<MonthDay>);

/// Which rule paired a legacy seasonal section with a default one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Id,
    Name,
    Source,
}

pub(crate) fn migrate_seasons(
    config: &mut HomeScreenConfig,
    seasonal: &LegacySeasonal,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    for (index, season) in seasonal.seasons.iter().enumerate() {
        let season_key = season
            .id
            .clone()
            .or_else(|| season.name.clone())
            .unwrap_or_else(|| format!("season-{}", index + 1));

        match find_group(&config.seasonal, season) {
            Some(group_index) => {
                migrate_matched_season(
                    config,
                    group_index,
                    season,
                    &season_key,
                    report,
                )?;
            }
            None => {
                warn!(
                    season = %season_key,
                    sections = season.sections.len(),
                    "no default seasonal group matches; converting all sections to custom"
                );
                for (position, legacy) in season.sections.iter().enumerate() {
                    convert_to_custom(
                        config,
                        season,
                        None,
                        &season_key,
                        position,
                        legacy,
                        report,
                    )?;
                }
            }
        }
    }
    Ok(())
}

/// Group whose id is `<id>` or `seasonal.<id>`, else whose name matches.
fn find_group(groups: &[SectionGroup], season: &LegacySeason) -> Option<usize> {
    if let Some(id) = season.id.as_deref() {
        let prefixed = format!("seasonal.{id}");
        if let Some(index) = groups
            .iter()
            .position(|group| group.id == id || group.id == prefixed)
        {
            return Some(index);
        }
    }
    let name = season.name.as_deref()?;
    groups
        .iter()
        .position(|group| group.name.eq_ignore_ascii_case(name.trim()))
}

fn migrate_matched_season(
    config: &mut HomeScreenConfig,
    group_index: usize,
    season: &LegacySeason,
    season_key: &str,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    let group_id = config.seasonal[group_index].id.clone();
    let window = {
        let group = &mut config.seasonal[group_index];
        if let Some(start) = season.start_date {
            group.start_date = Some(start);
        }
        if let Some(end) = season.end_date {
            group.end_date = Some(end);
        }
        if let Some(enabled) = season.enabled {
            for section in &mut group.sections {
                section.enabled = enabled;
            }
        }
        (group.start_date, group.end_date)
    };

    for (position, legacy) in season.sections.iter().enumerate() {
        let group = &mut config.seasonal[group_index];
        match match_section(&group.sections, season_key, legacy) {
            Some((section_index, rule)) => {
                let merged =
                    overlay_section(&group.sections[section_index], &legacy.fields, None);
                debug!(
                    group_id = %group_id,
                    section_id = %merged.id,
                    ?rule,
                    "legacy seasonal section merged"
                );
                group.sections[section_index] = merged;
                report.overlaid += 1;
            }
            None => {
                convert_to_custom(
                    config,
                    season,
                    Some(window),
                    season_key,
                    position,
                    legacy,
                    report,
                )?;
            }
        }
    }
    Ok(())
}

/// First rule that pairs `legacy` with a default section wins.
pub fn match_section(
    sections: &[Section],
    season_key: &str,
    legacy: &LegacySourcedSection,
) -> Option<(usize, MatchRule)> {
    if let Some(legacy_id) = legacy.id.as_deref() {
        let expected = format!("seasonal.{season_key}.{legacy_id}");
        let suffix = format!(".{legacy_id}");
        if let Some(index) = sections.iter().position(|section| {
            section.id == expected || section.id.ends_with(&suffix)
        }) {
            return Some((index, MatchRule::Id));
        }
    }

    if let Some(name) = legacy.fields.name.as_deref()
        && let Some(index) =
            sections.iter().position(|section| section.name == name)
    {
        return Some((index, MatchRule::Name));
    }

    let (Some(source_type), Some(source)) =
        (legacy.source_type, legacy.source.as_deref())
    else {
        return None;
    };
    sections
        .iter()
        .position(|section| source_matches(section, source_type, source))
        .map(|index| (index, MatchRule::Source))
}

fn source_matches(
    section: &Section,
    source_type: LegacySourceType,
    source: &str,
) -> bool {
    let Some(query) = section.first_query() else {
        return false;
    };
    let options = query.options();
    match source_type {
        LegacySourceType::Tag => options.matches_str(TAGS, source),
        LegacySourceType::Genre => {
            options.matches_str(GENRES, source)
                || options.matches_str(GENRE_IDS, source)
        }
        LegacySourceType::Parent
        | LegacySourceType::Playlist
        | LegacySourceType::Collection => options.matches_str(PARENT_ID, source),
    }
}

fn convert_to_custom(
    config: &mut HomeScreenConfig,
    season: &LegacySeason,
    group_window: Option<Window>,
    season_key: &str,
    position: usize,
    legacy: &LegacySourcedSection,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    let hint = match legacy.id.as_deref() {
        Some(id) => format!("{season_key}.{id}"),
        None => format!("{season_key}.{}", position + 1),
    };
    let id = config.unique_id(&format!("custom.{hint}"));
    let mut section = synthesize_section(id, legacy);

    let (group_start, group_end) = group_window.unwrap_or((None, None));
    if legacy.fields.start_date.is_none() {
        section.start_date = season.start_date.or(group_start);
    }
    if legacy.fields.end_date.is_none() {
        section.end_date = season.end_date.or(group_end);
    }
    if legacy.fields.enabled.is_none()
        && let Some(enabled) = season.enabled
    {
        section.enabled = enabled;
    }

    warn!(
        season = %season_key,
        section_id = %section.id,
        "legacy seasonal section matched no default; converted to a custom section"
    );
    push_custom_section(config, section, legacy.fields.order.is_some())?;
    report.converted_to_custom += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kefin_model::{LegacySectionConfig, QueryOptions, SectionQuery};

    fn defaults() -> Vec<Section> {
        vec![
            Section::new("seasonal.halloween.horror", "Horror Night").with_query(
                SectionQuery::from_options(QueryOptions::new().with(GENRES, "Horror")),
            ),
            Section::new("seasonal.halloween.halloween", "Halloween Favorites")
                .with_query(SectionQuery::from_options(
                    QueryOptions::new().with(TAGS, "halloween"),
                )),
        ]
    }

    fn legacy(
        id: Option<&str>,
        name: Option<&str>,
        source: Option<(LegacySourceType, &str)>,
    ) -> LegacySourcedSection {
        LegacySourcedSection {
            id: id.map(str::to_string),
            source_type: source.map(|(kind, _)| kind),
            source: source.map(|(_, value)| value.to_string()),
            fields: LegacySectionConfig {
                name: name.map(str::to_string),
                ..LegacySectionConfig::default()
            },
        }
    }

    #[test]
    fn id_rule_wins_before_name() {
        let found = match_section(
            &defaults(),
            "halloween",
            &legacy(Some("halloween"), Some("Horror Night"), None),
        );
        assert_eq!(found, Some((1, MatchRule::Id)));
    }

    #[test]
    fn falls_back_to_name_then_source() {
        let by_name = match_section(
            &defaults(),
            "halloween",
            &legacy(Some("zzz"), Some("Horror Night"), None),
        );
        assert_eq!(by_name, Some((0, MatchRule::Name)));

        let by_source = match_section(
            &defaults(),
            "halloween",
            &legacy(None, None, Some((LegacySourceType::Tag, "halloween"))),
        );
        assert_eq!(by_source, Some((1, MatchRule::Source)));

        let genre = match_section(
            &defaults(),
            "halloween",
            &legacy(None, Some("Spooky"), Some((LegacySourceType::Genre, "Horror"))),
        );
        assert_eq!(genre, Some((0, MatchRule::Source)));
    }

    #[test]
    fn nothing_matches_unrelated_sources() {
        let none = match_section(
            &defaults(),
            "halloween",
            &legacy(None, Some("Ghosts"), Some((LegacySourceType::Tag, "ghosts"))),
        );
        assert_eq!(none, None);
    }

    #[test]
    fn groups_match_by_prefixed_id_or_name() {
        let groups = vec![
            SectionGroup::new("seasonal.christmas", "Christmas"),
            SectionGroup::new("halloween", "Halloween"),
        ];
        let by_prefixed_id = LegacySeason {
            id: Some("christmas".into()),
            ..LegacySeason::default()
        };
        assert_eq!(find_group(&groups, &by_prefixed_id), Some(0));
        let by_name = LegacySeason {
            id: Some("spooky".into()),
            name: Some("halloween".into()),
            ..LegacySeason::default()
        };
        assert_eq!(find_group(&groups, &by_name), Some(1));
        assert_eq!(find_group(&groups, &LegacySeason::default()), None);
    }
}
