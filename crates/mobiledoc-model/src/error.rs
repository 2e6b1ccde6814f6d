//! Validation error raised while constructing a [`Document`](crate::Document).

/// Error raised when a raw payload does not match the Mobiledoc grammar.
///
/// Construction is fail-fast: the first violation aborts the whole document,
/// so a single error is ever reported. Every variant carries the offending
/// value rendered as compact JSON (`undefined` when the position is missing).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// Input text is not valid JSON.
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// Root payload is neither an object nor `null`.
    #[error("Expected document to be an object but received: {received}")]
    InvalidDocument {
        /// Received value.
        received: String,
    },

    /// A top-level collection (`atoms`, `cards`, `markups`, `sections`) is not an array.
    #[error("Expected {field} to be an array but received: {received}")]
    Collection {
        /// Name of the collection.
        field: &'static str,
        /// Received value.
        received: String,
    },

    /// Atom entry is not a `[name, text, payload]` tuple.
    #[error("Invalid atom at index {position}: {received}")]
    InvalidAtom {
        /// Position in the atom list.
        position: usize,
        /// Received value.
        received: String,
    },

    /// Card entry is not a `[name, payload]` tuple.
    #[error("Invalid card at index {position}: {received}")]
    InvalidCard {
        /// Position in the card list.
        position: usize,
        /// Received value.
        received: String,
    },

    /// Markup entry is not an array.
    #[error("Expected markup at index {position} to be an array but received: {received}")]
    InvalidMarkup {
        /// Position in the markup list.
        position: usize,
        /// Received value.
        received: String,
    },

    #[error("Expected markup tag name to be a string but received: {received}")]
    MarkupTagName {
        /// Received value.
        received: String,
    },

    #[error("Invalid markup attributes found: {received}")]
    MarkupAttributes {
        /// Received value.
        received: String,
    },

    /// Section entry is not an array.
    #[error("Expected section at index {position} to be an array but received: {received}")]
    InvalidSection {
        /// Position in the section list.
        position: usize,
        /// Received value.
        received: String,
    },

    #[error("Unrecognized section type identifier: {received}")]
    UnknownSectionType {
        /// Received discriminator.
        received: String,
    },

    #[error("Expected markup section tag name to be a string but received: {received}")]
    SectionTagName {
        /// Received value.
        received: String,
    },

    #[error("Found image section and expected src but found: {received}")]
    ImageSource {
        /// Received value.
        received: String,
    },

    #[error("Expected list section tag name to be one of [ol,ul] but received: {received}")]
    ListTagName {
        /// Received value.
        received: String,
    },

    #[error("Expected array of markers for list section but received: {received}")]
    ListItems {
        /// Received value.
        received: String,
    },

    /// Card section index is not an integer or has no card entry.
    #[error("Unrecognized card index: {received}")]
    CardIndex {
        /// Received value.
        received: String,
    },

    #[error("Expected an array of markers but received: {received}")]
    Markers {
        /// Received value.
        received: String,
    },

    #[error("Expected marker index {position} to be an array but received: {received}")]
    InvalidMarker {
        /// Position in the parent marker list.
        position: usize,
        /// Received value.
        received: String,
    },

    #[error(
        "Expected array of open markup indexes for marker index {position} but received: {received}"
    )]
    OpenMarkups {
        /// Position in the parent marker list.
        position: usize,
        /// Received value.
        received: String,
    },

    #[error("Expected number of closed markups for marker index {position} but received: {received}")]
    CloseCount {
        /// Position in the parent marker list.
        position: usize,
        /// Received value.
        received: String,
    },

    #[error("Expected to receive string value for text marker index {position} but received: {received}")]
    TextValue {
        /// Position in the parent marker list.
        position: usize,
        /// Received value.
        received: String,
    },

    #[error("Expected to receive integer value for atom marker index {position} but received: {received}")]
    AtomValue {
        /// Position in the parent marker list.
        position: usize,
        /// Received value.
        received: String,
    },

    #[error("Unrecognized marker type identifier {received} for marker index {position}")]
    UnknownMarkerType {
        /// Position in the parent marker list.
        position: usize,
        /// Received discriminator.
        received: String,
    },
}
