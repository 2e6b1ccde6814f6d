//! Mobiledoc document model.
//!
//! Validates raw Mobiledoc payloads (the positional JSON format used by
//! Mobiledoc-based editors) and exposes them as a typed, read-only
//! [`Document`].
//!
//! # Quick Start
//!
//! ```
//! use mobiledoc_model::Document;
//!
//! let doc = Document::from_json(
//!     r#"{"cards": [["bookmark", {"url": "/"}]], "sections": [[10, 0]]}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(doc.get_card(0).map(|card| card.name.as_str()), Some("bookmark"));
//! ```
//!
//! Invalid input is rejected on construction with a [`ValidationError`]
//! describing the first violation found.

pub mod attributes;
mod document;
mod error;
mod section;
mod validate;

pub use document::{Atom, Card, Document, Markup, Payload};
pub use error::ValidationError;
pub use section::{
    ATOM_MARKER, CARD_SECTION, IMAGE_SECTION, LIST_SECTION, ListTag, MARKUP_SECTION, Marker,
    Section, TEXT_MARKER,
};
