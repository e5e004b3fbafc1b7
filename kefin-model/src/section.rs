//! The section: one configurable, independently renderable home-screen block.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::query::SectionQuery;
use crate::schedule::{MonthDay, Schedule};

/// Card shape used when rendering a section's items.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum CardFormat {
    #[default]
    #[serde(alias = "poster")]
    Poster,
    #[serde(alias = "portrait")]
    Portrait,
    #[serde(alias = "thumb")]
    Thumb,
    #[serde(alias = "backdrop")]
    Backdrop,
    #[serde(alias = "square")]
    Square,
    #[serde(alias = "banner")]
    Banner,
}

impl Display for CardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFormat::Poster => write!(f, "Poster"),
            CardFormat::Portrait => write!(f, "Portrait"),
            CardFormat::Thumb => write!(f, "Thumb"),
            CardFormat::Backdrop => write!(f, "Backdrop"),
            CardFormat::Square => write!(f, "Square"),
            CardFormat::Banner => write!(f, "Banner"),
        }
    }
}

impl FromStr for CardFormat {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "poster" => Ok(CardFormat::Poster),
            "portrait" => Ok(CardFormat::Portrait),
            "thumb" => Ok(CardFormat::Thumb),
            "backdrop" => Ok(CardFormat::Backdrop),
            "square" => Ok(CardFormat::Square),
            "banner" => Ok(CardFormat::Banner),
            _ => Err(ModelError::InvalidCardFormat(raw.to_string())),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum RenderMode {
    #[default]
    #[serde(alias = "normal")]
    Normal,
    /// Full-width carousel presentation.
    #[serde(alias = "spotlight")]
    Spotlight,
}

/// Conceptual parent entity of a section synthesized from a legacy
/// type/source pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentItemType {
    Playlist,
    Collection,
    #[serde(rename = "Parent")]
    GenericParent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub order: i64,
    pub card_format: CardFormat,
    pub render_mode: RenderMode,
    pub queries: Vec<SectionQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<MonthDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthDay>,
    pub discovery_enabled: bool,
    /// Cache lifetime of the resolved item list, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    pub hidden: bool,
    #[serde(
        rename = "_parentItemType",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_item_type: Option<ParentItemType>,
}

impl Default for Section {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            enabled: true,
            order: 0,
            card_format: CardFormat::default(),
            render_mode: RenderMode::default(),
            queries: Vec::new(),
            start_date: None,
            end_date: None,
            discovery_enabled: false,
            ttl: None,
            hidden: false,
            parent_item_type: None,
        }
    }
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_query(mut self, query: SectionQuery) -> Self {
        self.queries.push(query);
        self
    }

    pub fn with_card_format(mut self, card_format: CardFormat) -> Self {
        self.card_format = card_format;
        self
    }

    pub fn with_window(mut self, start: MonthDay, end: MonthDay) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Active window, present only when both ends are set.
    pub fn schedule(&self) -> Option<Schedule> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(Schedule::new(start, end)),
            _ => None,
        }
    }

    pub fn first_query(&self) -> Option<&SectionQuery> {
        self.queries.first()
    }

    /// Substitutes `{Placeholder}` tokens in the name. Unknown placeholders
    /// are left as written.
    pub fn display_name(&self, values: &HashMap<String, String>) -> String {
        let mut rendered = String::with_capacity(self.name.len());
        let mut rest = self.name.as_str();
        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let tail = &rest[open..];
            match tail.find('}') {
                Some(close) => {
                    let key = &tail[1..close];
                    match values.get(key) {
                        Some(value) => rendered.push_str(value),
                        None => rendered.push_str(&tail[..=close]),
                    }
                    rest = &tail[close + 1..];
                }
                None => {
                    rendered.push_str(tail);
                    rest = "";
                }
            }
        }
        rendered.push_str(rest);
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_take_defaults() {
        let section: Section =
            serde_json::from_value(json!({"id": "watchlist", "order": 40}))
                .unwrap();
        assert!(section.enabled);
        assert_eq!(section.order, 40);
        assert_eq!(section.card_format, CardFormat::Poster);
        assert_eq!(section.render_mode, RenderMode::Normal);
        assert!(section.schedule().is_none());
    }

    #[test]
    fn wire_names_match_persisted_shape() {
        let mut section = Section::new("custom.1", "Holiday");
        section.parent_item_type = Some(ParentItemType::Playlist);
        section.card_format = CardFormat::Thumb;
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["_parentItemType"], "Playlist");
        assert_eq!(value["cardFormat"], "Thumb");
        assert_eq!(value["renderMode"], "Normal");
        assert!(value.get("startDate").is_none());
    }

    #[test]
    fn lower_case_card_formats_are_accepted() {
        let section: Section =
            serde_json::from_value(json!({"cardFormat": "backdrop"})).unwrap();
        assert_eq!(section.card_format, CardFormat::Backdrop);
        assert_eq!("THUMB".parse::<CardFormat>().unwrap(), CardFormat::Thumb);
    }

    #[test]
    fn display_name_substitutes_known_placeholders() {
        let section = Section::new("x", "Because you liked {Genre} {Unknown");
        let values =
            HashMap::from([("Genre".to_string(), "Comedy".to_string())]);
        assert_eq!(
            section.display_name(&values),
            "Because you liked Comedy {Unknown"
        );

        let other = Section::new("y", "{Director} picks {Year}");
        let values =
            HashMap::from([("Director".to_string(), "Varda".to_string())]);
        assert_eq!(other.display_name(&values), "Varda picks {Year}");
    }
}
