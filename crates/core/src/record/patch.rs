//! Helpers for turning typed drafts and patches into store rows.
//!
//! Patches use `Option<Option<T>>` for nullable columns: an absent key
//! leaves the column alone, an explicit `null` clears it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A JSON object keyed by column name.
pub type Row = Map<String, Value>;

/// Deserialize a present key (even `null`) as `Some(..)`. Combine with
/// `#[serde(default)]` so an absent key stays `None`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Serialize a draft or patch into a column map.
pub fn to_row<T: Serialize>(value: &T) -> Result<Row, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected an object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Sample {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(
            default,
            deserialize_with = "double_option",
            skip_serializing_if = "Option::is_none"
        )]
        note: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.note, None);

        let cleared: Sample = serde_json::from_value(json!({ "note": null })).unwrap();
        assert_eq!(cleared.note, Some(None));

        let set: Sample = serde_json::from_value(json!({ "note": "x" })).unwrap();
        assert_eq!(set.note, Some(Some("x".to_string())));
    }

    #[test]
    fn to_row_keeps_only_supplied_keys() {
        let patch = Sample {
            name: None,
            note: Some(None),
        };
        let row = to_row(&patch).unwrap();
        assert_eq!(Value::Object(row), json!({ "note": null }));
    }
}
