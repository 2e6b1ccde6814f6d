//! Validated Mobiledoc document.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::section::Section;
use crate::validate;

/// Opaque payload attached to atoms and cards.
pub type Payload = Map<String, Value>;

/// Inline tag definition referenced by index from text markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markup {
    pub tag_name: String,
    /// Flat attribute list; may have odd length.
    pub attributes: Vec<String>,
}

/// Named inline extension point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Atom {
    pub name: String,
    /// Text the atom displays (e.g. `@alice` for a mention).
    pub text: String,
    pub payload: Payload,
}

/// Named block-level extension point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub payload: Payload,
}

/// Validated, normalized Mobiledoc document.
///
/// Construction is the only place validation happens; the document is
/// read-only afterwards. Card references are bounds-checked eagerly while atom
/// and markup references are resolved lazily by the accessors.
///
/// # Example
///
/// ```
/// use mobiledoc_model::{Document, Section};
/// use serde_json::json;
///
/// let doc = Document::from_value(&json!({
///     "version": "0.3.2",
///     "sections": [[1, "p", [[0, [], 0, "Hello world"]]]],
/// }))
/// .unwrap();
///
/// assert_eq!(doc.version(), Some("0.3.2"));
/// assert!(matches!(doc.sections()[0], Section::Markup { .. }));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<Value>,
    atoms: Vec<Atom>,
    cards: Vec<Card>,
    markups: Vec<Markup>,
    sections: Vec<Section>,
}

impl Document {
    /// Validate a raw payload and build a document.
    ///
    /// `null` is accepted as the empty document. Collections default to empty
    /// when missing. Atoms and cards are collected before sections so card
    /// references can be checked.
    pub fn from_value(input: &Value) -> Result<Self, ValidationError> {
        let fields = match input {
            Value::Null => return Ok(Self::default()),
            Value::Object(fields) => fields,
            other => {
                return Err(ValidationError::InvalidDocument {
                    received: validate::describe(Some(other)),
                });
            }
        };

        let version = validate::version(fields.get("version"));
        let atoms = validate::atoms(validate::collection(fields, "atoms")?)?;
        let cards = validate::cards(validate::collection(fields, "cards")?)?;
        let markups = validate::markups(validate::collection(fields, "markups")?)?;
        let sections = validate::sections(validate::collection(fields, "sections")?, cards.len())?;

        tracing::debug!(
            version = version.as_ref().and_then(serde_json::Value::as_str).unwrap_or("-"),
            atoms = atoms.len(),
            cards = cards.len(),
            markups = markups.len(),
            sections = sections.len(),
            "Validated mobiledoc"
        );

        Ok(Self {
            version,
            atoms,
            cards,
            markups,
            sections,
        })
    }

    /// Parse JSON text and validate it.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Serialize back to the positional wire format.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Version string, if the document declares one as a string.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_ref().and_then(Value::as_str)
    }

    /// Version exactly as received. It is opaque and never checked.
    #[must_use]
    pub fn raw_version(&self) -> Option<&Value> {
        self.version.as_ref()
    }

    #[must_use]
    pub fn markups(&self) -> &[Markup] {
        &self.markups
    }

    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Atom at `index`, or `None` when out of range.
    #[must_use]
    pub fn get_atom(&self, index: i64) -> Option<&Atom> {
        lookup(&self.atoms, index)
    }

    /// Card at `index`, or `None` when out of range.
    #[must_use]
    pub fn get_card(&self, index: i64) -> Option<&Card> {
        lookup(&self.cards, index)
    }

    /// Markup at `index`, or `None` when out of range.
    #[must_use]
    pub fn get_markup(&self, index: i64) -> Option<&Markup> {
        lookup(&self.markups, index)
    }
}

fn lookup<T>(items: &[T], index: i64) -> Option<&T> {
    usize::try_from(index).ok().and_then(|index| items.get(index))
}

impl TryFrom<Value> for Document {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl std::str::FromStr for Document {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(de::Error::custom)
    }
}

impl Serialize for Markup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.tag_name)?;
        tuple.serialize_element(&self.attributes)?;
        tuple.end()
    }
}

impl Serialize for Atom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.name)?;
        tuple.serialize_element(&self.text)?;
        tuple.serialize_element(&self.payload)?;
        tuple.end()
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.name)?;
        tuple.serialize_element(&self.payload)?;
        tuple.end()
    }
}
