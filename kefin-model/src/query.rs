//! Query descriptors attached to sections.
//!
//! Query options are kept as a string-keyed JSON object because the item
//! endpoint accepts an open-ended parameter set and administrators may add
//! arbitrary keys through `additionalQueryOptions`. Typed setters cover the
//! keys the migrator and synthesizer write.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const LIMIT: &str = "Limit";
pub const SORT_BY: &str = "SortBy";
pub const SORT_ORDER: &str = "SortOrder";
pub const SEARCH_TERM: &str = "SearchTerm";
pub const INCLUDE_ITEM_TYPES: &str = "IncludeItemTypes";
pub const IS_UNPLAYED: &str = "IsUnplayed";
pub const PARENT_ID: &str = "ParentId";
pub const GENRES: &str = "Genres";
pub const GENRE_IDS: &str = "GenreIds";
pub const TAGS: &str = "Tags";
pub const MIN_PREMIERE_DATE: &str = "MinPremiereDate";
pub const MAX_PREMIERE_DATE: &str = "MaxPremiereDate";

/// Filter options forwarded to the item query endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryOptions(Map<String, Value>);

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn limit(&self) -> Option<u64> {
        self.get_u64(LIMIT)
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.set(LIMIT, limit);
    }

    pub fn set_include_item_types<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let types: Vec<Value> =
            types.into_iter().map(|t| Value::String(t.into())).collect();
        self.set(INCLUDE_ITEM_TYPES, Value::Array(types));
    }

    /// Case-sensitive comparison of a string option, also matching any
    /// element when the option holds an array.
    pub fn matches_str(&self, key: &str, expected: &str) -> bool {
        match self.0.get(key) {
            Some(Value::String(value)) => value == expected,
            Some(Value::Array(values)) => values
                .iter()
                .any(|value| value.as_str() == Some(expected)),
            _ => false,
        }
    }
}

impl FromIterator<(String, Value)> for QueryOptions {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A query with explicit filter options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticQuery {
    #[serde(default)]
    pub query_options: QueryOptions,
    /// Minimum age in days of the items returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    /// Maximum age in days of the items returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
}

/// A query delegated to a named runtime data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceQuery {
    pub data_source: String,
    #[serde(default, skip_serializing_if = "QueryOptions::is_empty")]
    pub query_options: QueryOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionQuery {
    DataSource(DataSourceQuery),
    Static(StaticQuery),
}

impl SectionQuery {
    pub fn from_options(query_options: QueryOptions) -> Self {
        SectionQuery::Static(StaticQuery {
            query_options,
            ..StaticQuery::default()
        })
    }

    pub fn data_source(name: impl Into<String>) -> Self {
        SectionQuery::DataSource(DataSourceQuery {
            data_source: name.into(),
            query_options: QueryOptions::default(),
        })
    }

    pub fn options(&self) -> &QueryOptions {
        match self {
            SectionQuery::DataSource(query) => &query.query_options,
            SectionQuery::Static(query) => &query.query_options,
        }
    }

    pub fn options_mut(&mut self) -> &mut QueryOptions {
        match self {
            SectionQuery::DataSource(query) => &mut query.query_options,
            SectionQuery::Static(query) => &mut query.query_options,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, SectionQuery::DataSource(_))
    }
}

/// Descriptor handed to the item query service at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItemQuery {
    Static { options: QueryOptions },
    DataSource { name: String, options: QueryOptions },
}

impl ItemQuery {
    pub fn options(&self) -> &QueryOptions {
        match self {
            ItemQuery::Static { options } => options,
            ItemQuery::DataSource { options, .. } => options,
        }
    }
}
