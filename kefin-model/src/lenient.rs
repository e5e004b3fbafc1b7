//! Deserializers that treat wrongly-typed values as absent.
//!
//! Legacy documents were written by hand and by several generations of the
//! settings UI, so a field that should be a number is sometimes a string and
//! a list is sometimes `null`. One malformed field must not reject the whole
//! document; these helpers degrade it to "not specified" instead.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `Option<T>` that becomes `None` on a type mismatch.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// `Vec<T>` that skips malformed elements and reads non-arrays as empty.
pub fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// String-keyed map that skips malformed entries and reads non-objects as
/// empty.
pub fn map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(entries) => entries
            .into_iter()
            .filter_map(|(key, item)| {
                serde_json::from_value(item).ok().map(|parsed| (key, parsed))
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}
