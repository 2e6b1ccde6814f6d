//! Flat attribute list codec.
//!
//! Mobiledoc stores element attributes as a flat `[key, value, key, value, ...]`
//! list. A trailing key without a value is allowed and maps to an empty string.
//!
//! Markup attributes are validated strings. Section attributes are stored as
//! received and decoded leniently by [`raw_mapping`].

use std::collections::BTreeMap;

use serde_json::Value;

/// Convert a flat alternating key/value list into a mapping.
///
/// `None` and empty lists produce an empty mapping. A repeated key keeps the
/// last value.
///
/// # Example
///
/// ```
/// use mobiledoc_model::attributes::to_mapping;
///
/// let flat = vec!["href".to_owned(), "/".to_owned(), "rel".to_owned()];
/// let mapping = to_mapping(Some(flat.as_slice()));
/// assert_eq!(mapping.get("href").map(String::as_str), Some("/"));
/// assert_eq!(mapping.get("rel").map(String::as_str), Some(""));
/// ```
#[must_use]
pub fn to_mapping(flat: Option<&[String]>) -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();

    for pair in flat.unwrap_or_default().chunks(2) {
        match pair {
            [key, value] => {
                mapping.insert(key.clone(), value.clone());
            }
            [key] => {
                mapping.insert(key.clone(), String::new());
            }
            _ => {}
        }
    }

    mapping
}

/// Shorthand for [`to_mapping`] on a list that is always present.
#[must_use]
pub fn attribute_map(flat: &[String]) -> BTreeMap<String, String> {
    to_mapping(Some(flat))
}

/// Decode an attribute list stored without validation.
///
/// Anything other than an array decodes to an empty mapping. Entries are
/// stringified the way JavaScript object keys are (`1` becomes `"1"`), and a
/// `null` value maps to an empty string.
///
/// # Example
///
/// ```
/// use mobiledoc_model::attributes::raw_mapping;
/// use serde_json::json;
///
/// let mapping = raw_mapping(Some(&json!(["colspan", 2, "hidden"])));
/// assert_eq!(mapping.get("colspan").map(String::as_str), Some("2"));
/// assert_eq!(mapping.get("hidden").map(String::as_str), Some(""));
/// ```
#[must_use]
pub fn raw_mapping(raw: Option<&Value>) -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();
    let Some(Value::Array(items)) = raw else {
        return mapping;
    };

    for pair in items.chunks(2) {
        match pair {
            [key, Value::Null] | [key] => {
                mapping.insert(js_string(key), String::new());
            }
            [key, value] => {
                mapping.insert(js_string(key), js_string(value));
            }
            _ => {}
        }
    }

    mapping
}

/// `String(value)` semantics for JSON values.
fn js_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string()))
            .or_else(|| n.as_f64().map(|f| f.to_string()))
            .unwrap_or_default(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_none_is_empty() {
        assert!(to_mapping(None).is_empty());
    }

    #[test]
    fn test_empty_list_is_empty() {
        let flat: Vec<String> = Vec::new();
        assert!(to_mapping(Some(flat.as_slice())).is_empty());
    }

    #[test]
    fn test_single_pair() {
        let flat = strings(&["key", "value"]);
        assert_eq!(attribute_map(&flat), mapping(&[("key", "value")]));
    }

    #[test]
    fn test_lone_key_maps_to_empty_string() {
        let flat = strings(&["key"]);
        assert_eq!(attribute_map(&flat), mapping(&[("key", "")]));
    }

    #[test]
    fn test_odd_length_trailing_key() {
        let flat = strings(&["k1", "v1", "k2"]);
        assert_eq!(attribute_map(&flat), mapping(&[("k1", "v1"), ("k2", "")]));
    }

    #[test]
    fn test_multiple_pairs() {
        let flat = strings(&["key1", "value1", "key2", "value2", "key3", "value3"]);
        assert_eq!(
            attribute_map(&flat),
            mapping(&[("key1", "value1"), ("key2", "value2"), ("key3", "value3")])
        );
    }

    #[test]
    fn test_values_stay_strings() {
        let flat = strings(&["number", "1", "boolean", "true"]);
        assert_eq!(
            attribute_map(&flat),
            mapping(&[("number", "1"), ("boolean", "true")])
        );
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let flat = strings(&["class", "a", "class", "b"]);
        assert_eq!(attribute_map(&flat), mapping(&[("class", "b")]));
    }

    #[test]
    fn test_raw_mapping_strings() {
        assert_eq!(
            raw_mapping(Some(&json!(["align", "center", "rel"]))),
            mapping(&[("align", "center"), ("rel", "")])
        );
    }

    #[test]
    fn test_raw_mapping_stringifies_entries() {
        assert_eq!(
            raw_mapping(Some(&json!([1, 2, true, null, "n", 1.5, "whole", 3.0]))),
            mapping(&[("1", "2"), ("true", ""), ("n", "1.5"), ("whole", "3")])
        );
        assert_eq!(
            raw_mapping(Some(&json!([null, {}, "list", [1, null, "a"]]))),
            mapping(&[("null", "[object Object]"), ("list", "1,,a")])
        );
    }

    #[test]
    fn test_raw_mapping_non_array_is_empty() {
        assert!(raw_mapping(None).is_empty());
        assert!(raw_mapping(Some(&json!(null))).is_empty());
        assert!(raw_mapping(Some(&json!({ "a": 1 }))).is_empty());
        assert!(raw_mapping(Some(&json!("align"))).is_empty());
    }
}
