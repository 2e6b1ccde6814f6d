//! Renderer errors.

use mobiledoc_model::ValidationError;

/// Error raised while walking a document.
///
/// Display strings double as the messages handed to the error handler when
/// errors are suppressed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RendererError {
    /// Card section points past the card list.
    #[error("Could not locate card with index: {index}")]
    MissingCard {
        /// Referenced card index.
        index: usize,
    },

    /// Neither a named nor an unknown-card handler is registered.
    #[error("No card handler specified for: {name}")]
    MissingCardHandler {
        /// Card name.
        name: String,
    },

    /// Atom marker points outside the atom list.
    #[error("Could not locate atom with index: {index}")]
    MissingAtom {
        /// Referenced atom index.
        index: i64,
    },

    /// Neither a named nor an unknown-atom handler is registered.
    #[error("No atom handler specified for: {name}")]
    MissingAtomHandler {
        /// Atom name.
        name: String,
    },

    /// Text marker opens a markup that does not exist.
    #[error("Invalid markup reference: {index}")]
    InvalidMarkup {
        /// Referenced markup index.
        index: i64,
    },

    /// Operation is not supported by this renderer.
    #[error("{0}")]
    Unsupported(String),

    /// Raw input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
