//! Section groups.
//!
//! Groups are organizational only. Merge and lookup operate on the
//! flattened section list of a category.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schedule::{MonthDay, Schedule};
use crate::section::{CardFormat, Section};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionGroup {
    pub id: String,
    pub name: String,
    /// Group-wide window, used by seasonal groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<MonthDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthDay>,
    pub sections: Vec<Section>,
}

impl SectionGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_window(mut self, start: MonthDay, end: MonthDay) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn schedule(&self) -> Option<Schedule> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(Schedule::new(start, end)),
            _ => None,
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Discovery sections keep the flat, pre-`queries` shape. Their content is
/// produced by a named data source at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoverySection {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_format: Option<CardFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotlight: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// Keys this model does not know about, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DiscoverySection {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        data_source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            data_source: Some(data_source.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryGroup {
    pub id: String,
    pub name: String,
    pub sections: Vec<DiscoverySection>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn discovery_sections_keep_unknown_keys() {
        let section: DiscoverySection = serde_json::from_value(json!({
            "id": "genre-spotlight",
            "enabled": true,
            "itemLimit": 12,
            "rotationWeight": 3
        }))
        .unwrap();
        assert_eq!(section.item_limit, Some(12));
        assert_eq!(section.extra.get("rotationWeight"), Some(&json!(3)));

        let back = serde_json::to_value(&section).unwrap();
        assert_eq!(back["rotationWeight"], 3);
        assert!(back.get("sortOrder").is_none());
    }
}
