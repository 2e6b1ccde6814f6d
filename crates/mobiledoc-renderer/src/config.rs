//! Renderer configuration loaded from TOML.
//!
//! ```toml
//! suppress_errors = true
//!
//! [card_options]
//! theme = "dark"
//!
//! [atom_options]
//! locale = "en"
//! ```
//!
//! Options tables are handed to card and atom handlers as JSON objects.

use std::path::Path;

use mobiledoc_model::Payload;
use serde::Deserialize;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Declarative renderer settings.
///
/// Handlers and plugins are code and are registered on the
/// [`Renderer`](crate::Renderer) directly.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Collect render problems instead of failing.
    pub suppress_errors: bool,
    /// Options bag passed to every card handler.
    pub card_options: Payload,
    /// Options bag passed to every atom handler.
    pub atom_options: Payload,
}

impl RendererConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded renderer config");
        Ok(config)
    }
}
