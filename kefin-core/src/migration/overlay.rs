//! Field-by-field overlay of a legacy entry onto a default section.
//!
//! Only fields the legacy entry actually carries are written; everything
//! else keeps the default's value.

use kefin_model::query::{IS_UNPLAYED, SEARCH_TERM, SORT_BY, SORT_ORDER};
use kefin_model::{
    DiscoverySection, LegacyDiscoverySection, LegacySectionConfig, RenderMode,
    Section, SectionQuery, StaticQuery,
};
use tracing::debug;

/// Returns `default` with the legacy fields laid over it.
///
/// `parent_enabled` is the toggle of an enclosing legacy block (for example
/// `recentlyReleased.enabled`). It only applies when the entry has no
/// `enabled` of its own.
pub fn overlay_section(
    default: &Section,
    legacy: &LegacySectionConfig,
    parent_enabled: Option<bool>,
) -> Section {
    let mut section = default.clone();

    if let Some(enabled) = legacy.enabled.or(parent_enabled) {
        section.enabled = enabled;
    }
    if let Some(name) = &legacy.name {
        section.name = name.clone();
    }
    if let Some(order) = legacy.order {
        section.order = order;
    }
    if let Some(card_format) = legacy.card_format {
        section.card_format = card_format;
    }
    if let Some(start) = legacy.start_date {
        section.start_date = Some(start);
    }
    if let Some(end) = legacy.end_date {
        section.end_date = Some(end);
    }
    if let Some(discovery_enabled) = legacy.discovery_enabled {
        section.discovery_enabled = discovery_enabled;
    }

    if let Some(mode) = legacy.render_mode {
        section.render_mode = mode;
    } else if legacy.spotlight == Some(true) {
        section.render_mode = RenderMode::Spotlight;
    }

    if has_query_fields(legacy) {
        if section.queries.is_empty() {
            section
                .queries
                .push(SectionQuery::Static(StaticQuery::default()));
        }
        if let Some(query) = section.queries.first_mut() {
            overlay_query(query, legacy, &section.id);
        }
    }

    section
}

fn has_query_fields(legacy: &LegacySectionConfig) -> bool {
    legacy.item_limit.is_some()
        || legacy.sort_order.is_some()
        || legacy.sort_order_direction.is_some()
        || legacy
            .search_term
            .as_deref()
            .is_some_and(|term| !term.is_empty())
        || legacy.include_item_types.is_some()
        || legacy.is_played.is_some()
        || legacy.min_age_in_days.is_some()
        || legacy.max_age_in_days.is_some()
        || !legacy.additional_query_options.is_empty()
}

fn overlay_query(
    query: &mut SectionQuery,
    legacy: &LegacySectionConfig,
    section_id: &str,
) {
    let options = query.options_mut();

    if let Some(limit) = legacy.item_limit {
        options.set_limit(limit);
    }
    if let Some(sort_by) = &legacy.sort_order {
        options.set(SORT_BY, sort_by.as_str());
    }
    if let Some(direction) = &legacy.sort_order_direction {
        options.set(SORT_ORDER, direction.as_str());
    }
    if let Some(term) = legacy.search_term.as_deref()
        && !term.is_empty()
    {
        options.set(SEARCH_TERM, term);
    }
    if let Some(types) = &legacy.include_item_types {
        let types = types.normalized();
        if !types.is_empty() {
            options.set_include_item_types(types);
        }
    }
    if let Some(is_played) = legacy.is_played {
        options.set(IS_UNPLAYED, !is_played);
    }

    match query {
        SectionQuery::Static(fixed) => {
            if let Some(min_age) = legacy.min_age_in_days {
                fixed.min_age = Some(min_age);
            }
            if let Some(max_age) = legacy.max_age_in_days {
                fixed.max_age = Some(max_age);
            }
        }
        SectionQuery::DataSource(_) => {
            if legacy.min_age_in_days.is_some()
                || legacy.max_age_in_days.is_some()
            {
                debug!(
                    section_id,
                    "age window ignored on a data-source query"
                );
            }
        }
    }

    let options = query.options_mut();
    for raw in &legacy.additional_query_options {
        if raw.key.is_empty() {
            continue;
        }
        options.set(raw.key.as_str(), raw.value.clone());
    }
}

/// Discovery sections keep their flat shape; present fields are copied
/// straight across.
pub fn overlay_discovery(
    default: &DiscoverySection,
    legacy: &LegacyDiscoverySection,
) -> DiscoverySection {
    let mut section = default.clone();
    if let Some(enabled) = legacy.enabled {
        section.enabled = enabled;
    }
    if let Some(name) = &legacy.name {
        section.name = name.clone();
    }
    if legacy.order.is_some() {
        section.order = legacy.order;
    }
    if legacy.item_limit.is_some() {
        section.item_limit = legacy.item_limit;
    }
    if legacy.sort_order.is_some() {
        section.sort_order = legacy.sort_order.clone();
    }
    if legacy.sort_order_direction.is_some() {
        section.sort_order_direction = legacy.sort_order_direction.clone();
    }
    if legacy.card_format.is_some() {
        section.card_format = legacy.card_format;
    }
    if legacy.spotlight.is_some() {
        section.spotlight = legacy.spotlight;
    }
    if legacy.minimum_items.is_some() {
        section.minimum_items = legacy.minimum_items;
    }
    section
}
