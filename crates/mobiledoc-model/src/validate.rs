//! Validation and normalization of raw Mobiledoc collections.
//!
//! Each function makes a single order-preserving pass and stops at the first
//! violation.

use serde_json::{Map, Value};

use crate::document::{Atom, Card, Markup};
use crate::error::ValidationError;
use crate::section::{
    ATOM_MARKER, CARD_SECTION, IMAGE_SECTION, LIST_SECTION, ListTag, MARKUP_SECTION, Marker,
    Section, TEXT_MARKER,
};

/// Render a raw value for an error message. Missing positions read `undefined`.
pub(crate) fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_owned(), Value::to_string)
}

/// Missing and `null` are both treated as "not provided".
fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Read an integer the way `Number.isInteger` would: whole floats count.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };

    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect()
}

fn integer_list(value: &Value) -> Option<Vec<i64>> {
    value.as_array()?.iter().map(as_integer).collect()
}

/// Fetch a top-level collection, defaulting to empty when absent.
pub(crate) fn collection<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a [Value], ValidationError> {
    let items: &[Value] = match fields.get(field) {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ValidationError::Collection {
                field,
                received: describe(Some(other)),
            });
        }
    };

    Ok(items)
}

/// Versions are opaque and kept as received; `null` counts as absent.
pub(crate) fn version(value: Option<&Value>) -> Option<Value> {
    value.filter(|value| !value.is_null()).cloned()
}

fn payload(value: Option<&Value>) -> Option<Map<String, Value>> {
    match value {
        None | Some(Value::Null) => Some(Map::new()),
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => None,
    }
}

pub(crate) fn atoms(raw: &[Value]) -> Result<Vec<Atom>, ValidationError> {
    raw.iter()
        .enumerate()
        .map(|(position, entry)| {
            let invalid = || ValidationError::InvalidAtom {
                position,
                received: describe(Some(entry)),
            };
            let items = entry.as_array().ok_or_else(invalid)?;
            let name = items.first().and_then(Value::as_str).ok_or_else(invalid)?;
            let text = items.get(1).and_then(Value::as_str).ok_or_else(invalid)?;
            let payload = payload(items.get(2)).ok_or_else(invalid)?;

            Ok(Atom {
                name: name.to_owned(),
                text: text.to_owned(),
                payload,
            })
        })
        .collect()
}

pub(crate) fn cards(raw: &[Value]) -> Result<Vec<Card>, ValidationError> {
    raw.iter()
        .enumerate()
        .map(|(position, entry)| {
            let invalid = || ValidationError::InvalidCard {
                position,
                received: describe(Some(entry)),
            };
            let items = entry.as_array().ok_or_else(invalid)?;
            let name = items.first().and_then(Value::as_str).ok_or_else(invalid)?;
            let payload = payload(items.get(1)).ok_or_else(invalid)?;

            Ok(Card {
                name: name.to_owned(),
                payload,
            })
        })
        .collect()
}

pub(crate) fn markups(raw: &[Value]) -> Result<Vec<Markup>, ValidationError> {
    raw.iter()
        .enumerate()
        .map(|(position, entry)| {
            let items = entry
                .as_array()
                .ok_or_else(|| ValidationError::InvalidMarkup {
                    position,
                    received: describe(Some(entry)),
                })?;

            let tag_name = items.first().and_then(Value::as_str).ok_or_else(|| {
                ValidationError::MarkupTagName {
                    received: describe(items.first()),
                }
            })?;

            let attributes = match items.get(1) {
                None | Some(Value::Null) => Vec::new(),
                Some(value) => {
                    string_list(value).ok_or_else(|| ValidationError::MarkupAttributes {
                        received: describe(Some(value)),
                    })?
                }
            };

            Ok(Markup {
                tag_name: tag_name.to_owned(),
                attributes,
            })
        })
        .collect()
}

/// Validate sections. Cards must already be collected so card references can
/// be bounds-checked.
pub(crate) fn sections(raw: &[Value], card_count: usize) -> Result<Vec<Section>, ValidationError> {
    raw.iter()
        .enumerate()
        .map(|(position, entry)| section(position, entry, card_count))
        .collect()
}

fn section(position: usize, entry: &Value, card_count: usize) -> Result<Section, ValidationError> {
    let items = entry
        .as_array()
        .ok_or_else(|| ValidationError::InvalidSection {
            position,
            received: describe(Some(entry)),
        })?;
    let discriminator = items.first();

    match discriminator.and_then(as_integer) {
        Some(MARKUP_SECTION) => {
            let tag_name = items.get(1).and_then(Value::as_str).ok_or_else(|| {
                ValidationError::SectionTagName {
                    received: describe(items.get(1)),
                }
            })?;

            Ok(Section::Markup {
                tag_name: tag_name.to_owned(),
                markers: markers(items.get(2))?,
                attributes: section_attributes(items.get(3)),
            })
        }
        Some(IMAGE_SECTION) => {
            let src = items.get(1).and_then(Value::as_str).ok_or_else(|| {
                ValidationError::ImageSource {
                    received: describe(items.get(1)),
                }
            })?;

            Ok(Section::Image {
                src: src.to_owned(),
            })
        }
        Some(LIST_SECTION) => {
            let tag = items
                .get(1)
                .and_then(Value::as_str)
                .and_then(ListTag::parse)
                .ok_or_else(|| ValidationError::ListTagName {
                    received: describe(items.get(1)),
                })?;

            let list_items = match items.get(2) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(groups)) => groups
                    .iter()
                    .map(|group| markers(Some(group)))
                    .collect::<Result<_, _>>()?,
                Some(other) => {
                    return Err(ValidationError::ListItems {
                        received: describe(Some(other)),
                    });
                }
            };

            Ok(Section::List {
                tag,
                items: list_items,
                attributes: section_attributes(items.get(3)),
            })
        }
        Some(CARD_SECTION) => {
            let index = items
                .get(1)
                .and_then(as_integer)
                .and_then(|index| usize::try_from(index).ok())
                .filter(|index| *index < card_count)
                .ok_or_else(|| ValidationError::CardIndex {
                    received: describe(items.get(1)),
                })?;

            Ok(Section::Card { index })
        }
        _ => Err(ValidationError::UnknownSectionType {
            received: describe(discriminator),
        }),
    }
}

/// Section attributes are kept as received; absent and `null` become `None`.
fn section_attributes(value: Option<&Value>) -> Option<Value> {
    value.filter(|value| !value.is_null()).cloned()
}

/// Validate a marker list shared by markup sections and list items.
pub(crate) fn markers(value: Option<&Value>) -> Result<Vec<Marker>, ValidationError> {
    if is_absent(value) {
        return Ok(Vec::new());
    }

    let Some(Value::Array(raw)) = value else {
        return Err(ValidationError::Markers {
            received: describe(value),
        });
    };

    raw.iter()
        .enumerate()
        .map(|(position, entry)| marker(position, entry))
        .collect()
}

fn marker(position: usize, entry: &Value) -> Result<Marker, ValidationError> {
    let items = entry
        .as_array()
        .ok_or_else(|| ValidationError::InvalidMarker {
            position,
            received: describe(Some(entry)),
        })?;

    let open_markups = items.get(1).and_then(integer_list).ok_or_else(|| {
        ValidationError::OpenMarkups {
            position,
            received: describe(items.get(1)),
        }
    })?;

    let close_count = items.get(2).and_then(as_integer).ok_or_else(|| {
        ValidationError::CloseCount {
            position,
            received: describe(items.get(2)),
        }
    })?;

    let value = items.get(3);
    match items.first().and_then(as_integer) {
        Some(TEXT_MARKER) => {
            let value = value.and_then(Value::as_str).ok_or_else(|| {
                ValidationError::TextValue {
                    position,
                    received: describe(value),
                }
            })?;

            Ok(Marker::Text {
                open_markups,
                close_count,
                value: value.to_owned(),
            })
        }
        Some(ATOM_MARKER) => {
            let atom_index = value.and_then(as_integer).ok_or_else(|| {
                ValidationError::AtomValue {
                    position,
                    received: describe(value),
                }
            })?;

            Ok(Marker::Atom {
                open_markups,
                close_count,
                atom_index,
            })
        }
        _ => Err(ValidationError::UnknownMarkerType {
            position,
            received: describe(items.first()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_as_integer_accepts_whole_numbers() {
        assert_eq!(as_integer(&json!(3)), Some(3));
        assert_eq!(as_integer(&json!(-2)), Some(-2));
        assert_eq!(as_integer(&json!(4.0)), Some(4));
    }

    #[test]
    fn test_as_integer_rejects_non_integers() {
        assert_eq!(as_integer(&json!(1.5)), None);
        assert_eq!(as_integer(&json!("1")), None);
        assert_eq!(as_integer(&json!(null)), None);
        assert_eq!(as_integer(&json!(true)), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(None), "undefined");
        assert_eq!(describe(Some(&json!("dl"))), r#""dl""#);
        assert_eq!(describe(Some(&json!(["href", 1]))), r#"["href",1]"#);
    }

    #[test]
    fn test_markers_absent_is_empty() {
        assert!(markers(None).unwrap().is_empty());
        assert!(markers(Some(&json!(null))).unwrap().is_empty());
    }

    #[test]
    fn test_markers_non_array_fails() {
        let err = markers(Some(&json!(0))).unwrap_err();
        assert!(matches!(err, ValidationError::Markers { .. }));
    }

    #[test]
    fn test_marker_error_reports_position() {
        let raw = json!([[0, [], 0, "ok"], [0, [], 0, 5]]);
        let err = markers(Some(&raw)).unwrap_err();

        assert!(matches!(err, ValidationError::TextValue { position: 1, .. }));
        assert_eq!(
            err.to_string(),
            "Expected to receive string value for text marker index 1 but received: 5"
        );
    }

    #[test]
    fn test_open_markups_checked_before_discriminator() {
        let err = markers(Some(&json!([[2, "nope", 0, 0]]))).unwrap_err();
        assert!(matches!(err, ValidationError::OpenMarkups { .. }));
    }

    #[test]
    fn test_section_attributes_kept_as_received() {
        assert_eq!(section_attributes(None), None);
        assert_eq!(section_attributes(Some(&json!(null))), None);
        assert_eq!(section_attributes(Some(&json!([]))), Some(json!([])));
        assert_eq!(section_attributes(Some(&json!([1, 2]))), Some(json!([1, 2])));
        assert_eq!(
            section_attributes(Some(&json!({ "a": 1 }))),
            Some(json!({ "a": 1 }))
        );
    }

    #[test]
    fn test_version_kept_as_received() {
        assert_eq!(version(None), None);
        assert_eq!(version(Some(&json!(null))), None);
        assert_eq!(version(Some(&json!("0.3.2"))), Some(json!("0.3.2")));
        assert_eq!(version(Some(&json!(3))), Some(json!(3)));
    }

    #[test]
    fn test_collection_defaults_to_empty() {
        let fields = Map::new();
        assert!(collection(&fields, "sections").unwrap().is_empty());
    }

    #[test]
    fn test_collection_rejects_object() {
        let Value::Object(fields) = json!({ "sections": {} }) else {
            unreachable!()
        };
        let err = collection(&fields, "sections").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected sections to be an array but received: {}"
        );
    }

    #[test]
    fn test_atom_payload_defaults_to_empty_map() {
        let atoms = atoms(&[json!(["mention", "@alice"])]).unwrap();
        assert!(atoms[0].payload.is_empty());
    }

    #[test]
    fn test_atom_shape_rejected() {
        let err = atoms(&[json!(["mention", 1, {}])]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAtom { position: 0, .. }));
    }

    #[test]
    fn test_card_payload_must_be_object() {
        let err = cards(&[json!(["bookmark", "url"])]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCard { position: 0, .. }));
    }
}
