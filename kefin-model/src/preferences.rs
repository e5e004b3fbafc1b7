//! Per-user preference storage shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::native::NativeSlots;

/// `CustomPrefs` key holding the serialized preference record.
pub const PREFERENCE_KEY: &str = "kefinHomeScreen";

/// One user override of a section's position and visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub id: String,
    pub order: i64,
    pub enabled: bool,
}

impl PreferenceEntry {
    pub fn new(id: impl Into<String>, order: i64, enabled: bool) -> Self {
        Self {
            id: id.into(),
            order,
            enabled,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = object.get("id")?.as_str()?.to_string();
        let order = object.get("order").and_then(|order| {
            order
                .as_i64()
                .or_else(|| order.as_f64().map(|float| float.round() as i64))
        })?;
        let enabled = object.get("enabled")?.as_bool()?;
        Some(Self { id, order, enabled })
    }
}

/// Ordered list of overrides, one per section the user has touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceRecord(pub Vec<PreferenceEntry>);

impl PreferenceRecord {
    /// Parses the stored JSON string. Unparsable input reads as an empty
    /// record and malformed entries are skipped.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => {
                Self(items.iter().filter_map(PreferenceEntry::from_value).collect())
            }
            _ => Self::default(),
        }
    }

    pub fn to_json(&self) -> String {
        // A Vec of plain structs always serializes.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// First entry for `id`.
    pub fn get(&self, id: &str) -> Option<&PreferenceEntry> {
        self.0.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[PreferenceEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PreferenceEntry> for PreferenceRecord {
    fn from_iter<T: IntoIterator<Item = PreferenceEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The user's display-preferences document as returned by the server.
/// Only the `kefinHomeScreen` and `homesectionN` entries of `CustomPrefs`
/// are interpreted; every other value, `null` included, is carried through a
/// read-modify-write untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    #[serde(
        rename = "CustomPrefs",
        default,
        deserialize_with = "crate::lenient::map"
    )]
    pub custom_prefs: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl DisplayPreferences {
    /// String value of a `CustomPrefs` entry; `None` when absent or not a
    /// string.
    pub fn custom_pref(&self, key: &str) -> Option<&str> {
        self.custom_prefs.get(key).and_then(Value::as_str)
    }

    pub fn set_custom_pref(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom_prefs
            .insert(key.into(), Value::String(value.into()));
    }

    pub fn preference_record(&self) -> PreferenceRecord {
        self.custom_pref(PREFERENCE_KEY)
            .map(PreferenceRecord::parse)
            .unwrap_or_default()
    }

    pub fn set_preference_record(&mut self, record: &PreferenceRecord) {
        self.set_custom_pref(PREFERENCE_KEY, record.to_json());
    }

    pub fn native_slots(&self) -> NativeSlots {
        NativeSlots::from_raw(|key| self.custom_pref(key).map(str::to_string))
    }

    pub fn set_native_slots(&mut self, slots: &NativeSlots) {
        for (key, token) in slots.entries() {
            self.set_custom_pref(key, token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::NativeToken;
    use serde_json::json;

    #[test]
    fn malformed_record_reads_as_empty() {
        assert!(PreferenceRecord::parse("not json").is_empty());
        assert!(PreferenceRecord::parse("{\"id\":1}").is_empty());
        let record = PreferenceRecord::parse(
            r#"[{"id":"a","order":1,"enabled":true},{"id":2},{"id":"b","order":2.0,"enabled":false}]"#,
        );
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("b"), Some(&PreferenceEntry::new("b", 2, false)));
    }

    #[test]
    fn record_serializes_to_the_persisted_shape() {
        let record: PreferenceRecord =
            [PreferenceEntry::new("watchlist", 10, true)].into_iter().collect();
        assert_eq!(
            record.to_json(),
            r#"[{"id":"watchlist","order":10,"enabled":true}]"#
        );
    }

    #[test]
    fn document_keeps_unknown_keys() {
        let mut prefs: DisplayPreferences = serde_json::from_value(json!({
            "Id": "usersettings",
            "SortBy": "SortName",
            "CustomPrefs": {
                "homesection0": "resume",
                "chromecastVersion": "stable",
                "landing-livetv": null
            }
        }))
        .unwrap();
        assert_eq!(prefs.native_slots().get(0), Some(NativeToken::Resume));

        prefs.set_native_slots(&NativeSlots::from_tokens([NativeToken::NextUp]));
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["Id"], "usersettings");
        assert_eq!(value["CustomPrefs"]["homesection0"], "nextup");
        assert_eq!(value["CustomPrefs"]["homesection1"], "none");
        assert_eq!(value["CustomPrefs"]["chromecastVersion"], "stable");
        let custom = value["CustomPrefs"].as_object().unwrap();
        assert_eq!(custom.get("landing-livetv"), Some(&Value::Null));
    }

    #[test]
    fn non_string_custom_prefs_survive_a_rewrite() {
        let mut prefs: DisplayPreferences = serde_json::from_value(json!({
            "CustomPrefs": {"homesection0": "resume", "landing-livetv": null, "x": 5}
        }))
        .unwrap();
        assert_eq!(prefs.custom_pref("x"), None);

        prefs.set_preference_record(&PreferenceRecord::default());
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(
            value["CustomPrefs"],
            json!({
                "homesection0": "resume",
                "landing-livetv": null,
                "x": 5,
                "kefinHomeScreen": "[]"
            })
        );
    }
}
