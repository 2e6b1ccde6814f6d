//! Section and marker variants.
//!
//! Both enums are closed: an unknown wire discriminator is rejected while the
//! document is built, so renderers can match exhaustively.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

/// Wire discriminator of a markup (text block) section.
pub const MARKUP_SECTION: i64 = 1;
/// Wire discriminator of an image section.
pub const IMAGE_SECTION: i64 = 2;
/// Wire discriminator of a list section.
pub const LIST_SECTION: i64 = 3;
/// Wire discriminator of a card section.
pub const CARD_SECTION: i64 = 10;

/// Wire discriminator of a text marker.
pub const TEXT_MARKER: i64 = 0;
/// Wire discriminator of an atom marker.
pub const ATOM_MARKER: i64 = 1;

/// Top-level block of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Section {
    /// Text block such as `p`, `h2` or `blockquote`. The tag is not restricted.
    Markup {
        tag_name: String,
        markers: Vec<Marker>,
        /// Attribute list exactly as received; decode it with
        /// [`raw_mapping`](crate::attributes::raw_mapping). `None` when
        /// omitted on the wire, which is kept distinct from an explicitly
        /// empty list.
        attributes: Option<Value>,
    },
    /// Image with a source URL.
    Image { src: String },
    /// Ordered or unordered list; each item is its own marker sequence.
    List {
        tag: ListTag,
        items: Vec<Vec<Marker>>,
        attributes: Option<Value>,
    },
    /// Reference into the document's card list, bounds-checked on construction.
    Card { index: usize },
}

impl Section {
    /// Wire discriminator for this section.
    #[must_use]
    pub fn type_identifier(&self) -> i64 {
        match self {
            Self::Markup { .. } => MARKUP_SECTION,
            Self::Image { .. } => IMAGE_SECTION,
            Self::List { .. } => LIST_SECTION,
            Self::Card { .. } => CARD_SECTION,
        }
    }
}

/// Tag of a list section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListTag {
    Ul,
    Ol,
}

impl ListTag {
    /// Parse a list tag, accepting exactly `"ul"` and `"ol"`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "ul" => Some(Self::Ul),
            "ol" => Some(Self::Ol),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ul => "ul",
            Self::Ol => "ol",
        }
    }
}

/// Inline run within a markup section or list item.
///
/// Open markup indexes and atom indexes are only known to be integers; they
/// are resolved against the document when rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    /// Literal text, optionally wrapped by the markups it opens.
    Text {
        open_markups: Vec<i64>,
        close_count: i64,
        value: String,
    },
    /// Reference into the document's atom list.
    Atom {
        open_markups: Vec<i64>,
        close_count: i64,
        atom_index: i64,
    },
}

impl Marker {
    /// Markup indexes opened by this marker.
    #[must_use]
    pub fn open_markups(&self) -> &[i64] {
        match self {
            Self::Text { open_markups, .. } | Self::Atom { open_markups, .. } => open_markups,
        }
    }

    /// Number of markups closed after this marker.
    #[must_use]
    pub fn close_count(&self) -> i64 {
        match self {
            Self::Text { close_count, .. } | Self::Atom { close_count, .. } => *close_count,
        }
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Markup {
                tag_name,
                markers,
                attributes,
            } => {
                let mut seq = serializer.serialize_seq(Some(3 + usize::from(attributes.is_some())))?;
                seq.serialize_element(&MARKUP_SECTION)?;
                seq.serialize_element(tag_name)?;
                seq.serialize_element(markers)?;
                if let Some(attributes) = attributes {
                    seq.serialize_element(attributes)?;
                }
                seq.end()
            }
            Self::Image { src } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&IMAGE_SECTION)?;
                seq.serialize_element(src)?;
                seq.end()
            }
            Self::List {
                tag,
                items,
                attributes,
            } => {
                let mut seq = serializer.serialize_seq(Some(3 + usize::from(attributes.is_some())))?;
                seq.serialize_element(&LIST_SECTION)?;
                seq.serialize_element(tag.as_str())?;
                seq.serialize_element(items)?;
                if let Some(attributes) = attributes {
                    seq.serialize_element(attributes)?;
                }
                seq.end()
            }
            Self::Card { index } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&CARD_SECTION)?;
                seq.serialize_element(index)?;
                seq.end()
            }
        }
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(4))?;
        match self {
            Self::Text {
                open_markups,
                close_count,
                value,
            } => {
                seq.serialize_element(&TEXT_MARKER)?;
                seq.serialize_element(open_markups)?;
                seq.serialize_element(close_count)?;
                seq.serialize_element(value)?;
            }
            Self::Atom {
                open_markups,
                close_count,
                atom_index,
            } => {
                seq.serialize_element(&ATOM_MARKER)?;
                seq.serialize_element(open_markups)?;
                seq.serialize_element(close_count)?;
                seq.serialize_element(atom_index)?;
            }
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_list_tag_parse() {
        assert_eq!(ListTag::parse("ul"), Some(ListTag::Ul));
        assert_eq!(ListTag::parse("ol"), Some(ListTag::Ol));
        assert_eq!(ListTag::parse("dl"), None);
        assert_eq!(ListTag::parse("UL"), None);
    }

    #[test]
    fn test_markup_section_without_attributes_serializes_three_elements() {
        let section = Section::Markup {
            tag_name: "p".to_owned(),
            markers: vec![Marker::Text {
                open_markups: vec![],
                close_count: 0,
                value: "Hi".to_owned(),
            }],
            attributes: None,
        };

        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!([1, "p", [[0, [], 0, "Hi"]]])
        );
    }

    #[test]
    fn test_markup_section_keeps_empty_attributes() {
        let section = Section::Markup {
            tag_name: "p".to_owned(),
            markers: vec![],
            attributes: Some(json!([])),
        };

        assert_eq!(serde_json::to_value(&section).unwrap(), json!([1, "p", [], []]));
    }

    #[test]
    fn test_section_attributes_serialize_as_received() {
        let section = Section::List {
            tag: ListTag::Ul,
            items: vec![],
            attributes: Some(json!([1, 2])),
        };

        assert_eq!(serde_json::to_value(&section).unwrap(), json!([3, "ul", [], [1, 2]]));
    }

    #[test]
    fn test_card_and_image_serialize() {
        assert_eq!(
            serde_json::to_value(Section::Card { index: 3 }).unwrap(),
            json!([10, 3])
        );
        assert_eq!(
            serde_json::to_value(Section::Image {
                src: "/a.png".to_owned()
            })
            .unwrap(),
            json!([2, "/a.png"])
        );
    }

    #[test]
    fn test_atom_marker_serializes() {
        let marker = Marker::Atom {
            open_markups: vec![1],
            close_count: 1,
            atom_index: 0,
        };
        assert_eq!(serde_json::to_value(&marker).unwrap(), json!([1, [1], 1, 0]));
        assert_eq!(marker.open_markups(), &[1]);
        assert_eq!(marker.close_count(), 1);
    }

    #[test]
    fn test_type_identifier() {
        assert_eq!(Section::Card { index: 0 }.type_identifier(), CARD_SECTION);
        assert_eq!(
            Section::List {
                tag: ListTag::Ol,
                items: vec![],
                attributes: None
            }
            .type_identifier(),
            LIST_SECTION
        );
    }
}
