//! Document walker.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use mobiledoc_model::attributes::{attribute_map, raw_mapping};
use mobiledoc_model::{Document, Marker, Payload, Section};
use serde_json::Value;

use crate::config::RendererConfig;
use crate::error::RendererError;
use crate::handler::{AtomEnv, AtomHandler, CardEnv, CardHandler};
use crate::node::Node;
use crate::plugin::{
    MarkupPayload, Plugin, PluginContext, SectionOutput, run_markup_plugins, run_section_plugins,
};

/// Type alias for the error handler callback.
pub type ErrorHandlerFn = dyn Fn(&str) + Send + Sync;

const TEARDOWN_UNSUPPORTED: &str = "Teardown is not supported";

/// Error policy applied to every render problem.
#[derive(Clone, Default)]
pub struct RendererOptions {
    /// Collect problems and drop the failing branch instead of aborting.
    pub suppress_errors: bool,
    /// Called with each message when errors are suppressed.
    pub error_handler: Option<Arc<ErrorHandlerFn>>,
}

impl RendererOptions {
    /// Route a problem through the policy. Returns the error back when it
    /// must abort the render.
    fn report(&self, error: RendererError) -> Result<String, RendererError> {
        let message = error.to_string();
        tracing::warn!(
            error = %message,
            suppressed = self.suppress_errors,
            "Render error"
        );

        if !self.suppress_errors {
            return Err(error);
        }

        if let Some(handler) = &self.error_handler {
            handler(&message);
        }
        Ok(message)
    }
}

impl fmt::Debug for RendererOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererOptions")
            .field("suppress_errors", &self.suppress_errors)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Root fragment with one child per rendered section, in document order.
    pub result: Node,
    /// Messages suppressed during the render.
    pub errors: Vec<String>,
    options: RendererOptions,
}

impl RenderResult {
    /// Release resources held by the render.
    ///
    /// Nothing is ever held, so this always reports that teardown is not
    /// supported through the renderer's error policy.
    pub fn teardown(&self) -> Result<(), RendererError> {
        self.options
            .report(RendererError::Unsupported(TEARDOWN_UNSUPPORTED.to_owned()))
            .map(|_| ())
    }
}

/// Mobiledoc renderer with pluggable cards, atoms and plugins.
///
/// Registrations are read-only while rendering, so a single renderer can be
/// shared across threads and reused for any number of documents.
///
/// # Example
///
/// ```
/// use mobiledoc_renderer::Renderer;
///
/// let renderer = Renderer::new();
/// let rendered = renderer
///     .render_json(r#"{"markups": [["strong"]], "sections": [[1, "p", [[0, [0], 1, "Hi"]]]]}"#)
///     .unwrap();
///
/// assert_eq!(rendered.result.to_html(), "<p><strong>Hi</strong></p>");
/// assert!(rendered.errors.is_empty());
/// ```
pub struct Renderer {
    cards: HashMap<String, Box<dyn CardHandler>>,
    atoms: HashMap<String, Box<dyn AtomHandler>>,
    unknown_card: Option<Box<dyn CardHandler>>,
    unknown_atom: Option<Box<dyn AtomHandler>>,
    card_options: Payload,
    atom_options: Payload,
    plugins: Vec<Box<dyn Plugin>>,
    options: RendererOptions,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with no handlers and no plugins.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: HashMap::new(),
            atoms: HashMap::new(),
            unknown_card: None,
            unknown_atom: None,
            card_options: Payload::new(),
            atom_options: Payload::new(),
            plugins: Vec::new(),
            options: RendererOptions::default(),
        }
    }

    /// Create a renderer from declarative settings.
    #[must_use]
    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new()
            .with_suppress_errors(config.suppress_errors)
            .with_card_options(config.card_options.clone())
            .with_atom_options(config.atom_options.clone())
    }

    /// Register a card handler by name.
    #[must_use]
    pub fn with_card(mut self, name: impl Into<String>, handler: impl CardHandler + 'static) -> Self {
        self.cards.insert(name.into(), Box::new(handler));
        self
    }

    /// Register an atom handler by name.
    #[must_use]
    pub fn with_atom(mut self, name: impl Into<String>, handler: impl AtomHandler + 'static) -> Self {
        self.atoms.insert(name.into(), Box::new(handler));
        self
    }

    /// Handler used for cards with no registered handler.
    #[must_use]
    pub fn with_unknown_card(mut self, handler: impl CardHandler + 'static) -> Self {
        self.unknown_card = Some(Box::new(handler));
        self
    }

    /// Handler used for atoms with no registered handler.
    #[must_use]
    pub fn with_unknown_atom(mut self, handler: impl AtomHandler + 'static) -> Self {
        self.unknown_atom = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn with_card_options(mut self, options: Payload) -> Self {
        self.card_options = options;
        self
    }

    #[must_use]
    pub fn with_atom_options(mut self, options: Payload) -> Self {
        self.atom_options = options;
        self
    }

    /// Add a plugin. Plugins are consulted in registration order.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RendererOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_suppress_errors(mut self, suppress: bool) -> Self {
        self.options.suppress_errors = suppress;
        self
    }

    /// Set the callback invoked with each suppressed message.
    #[must_use]
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.options.error_handler = Some(Arc::new(handler));
        self
    }

    /// Registered card handler for `name`, ignoring the unknown-card fallback.
    #[must_use]
    pub fn card_handler(&self, name: &str) -> Option<&dyn CardHandler> {
        self.cards.get(name).map(Box::as_ref)
    }

    /// Registered atom handler for `name`, ignoring the unknown-atom fallback.
    #[must_use]
    pub fn atom_handler(&self, name: &str) -> Option<&dyn AtomHandler> {
        self.atoms.get(name).map(Box::as_ref)
    }

    /// Render a validated document.
    pub fn render(&self, document: &Document) -> Result<RenderResult, RendererError> {
        let (children, errors) = self.render_sections(document)?;

        Ok(RenderResult {
            result: Node::fragment(children),
            errors,
            options: self.options.clone(),
        })
    }

    /// Validate a raw payload and render it.
    pub fn render_value(&self, input: &Value) -> Result<RenderResult, RendererError> {
        let document = Document::from_value(input)?;
        self.render(&document)
    }

    /// Parse and validate JSON text, then render it.
    pub fn render_json(&self, input: &str) -> Result<RenderResult, RendererError> {
        let document = Document::from_json(input)?;
        self.render(&document)
    }

    #[cfg(not(feature = "parallel"))]
    fn render_sections(
        &self,
        document: &Document,
    ) -> Result<(Vec<Node>, Vec<String>), RendererError> {
        let mut walk = Walk::new(self, document);
        let mut children = Vec::with_capacity(document.sections().len());

        for section in document.sections() {
            children.extend(walk.section(section)?);
        }

        Ok((children, walk.errors))
    }

    /// Render sections on the rayon pool and reassemble them in order.
    #[cfg(feature = "parallel")]
    fn render_sections(
        &self,
        document: &Document,
    ) -> Result<(Vec<Node>, Vec<String>), RendererError> {
        use rayon::prelude::*;

        let results: Vec<Result<(Option<Node>, Vec<String>), RendererError>> = document
            .sections()
            .par_iter()
            .map(|section| -> Result<_, RendererError> {
                let mut walk = Walk::new(self, document);
                let node = walk.section(section)?;
                Ok((node, walk.errors))
            })
            .collect();

        let mut children = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for result in results {
            let (node, section_errors) = result?;
            children.extend(node);
            errors.extend(section_errors);
        }

        Ok((children, errors))
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cards: Vec<&str> = self.cards.keys().map(String::as_str).collect();
        let mut atoms: Vec<&str> = self.atoms.keys().map(String::as_str).collect();
        cards.sort_unstable();
        atoms.sort_unstable();
        let plugins: Vec<&str> = self.plugins.iter().map(|plugin| plugin.name()).collect();

        f.debug_struct("Renderer")
            .field("cards", &cards)
            .field("atoms", &atoms)
            .field("unknown_card", &self.unknown_card.is_some())
            .field("unknown_atom", &self.unknown_atom.is_some())
            .field("plugins", &plugins)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// State of one render pass: the document plus suppressed messages.
struct Walk<'a> {
    renderer: &'a Renderer,
    document: &'a Document,
    errors: Vec<String>,
}

impl<'a> Walk<'a> {
    fn new(renderer: &'a Renderer, document: &'a Document) -> Self {
        Self {
            renderer,
            document,
            errors: Vec::new(),
        }
    }

    fn context(&self) -> PluginContext<'a> {
        PluginContext {
            document: self.document,
        }
    }

    /// Report a problem and yield no node for the failing branch.
    fn fail(&mut self, error: RendererError) -> Result<Option<Node>, RendererError> {
        let message = self.renderer.options.report(error)?;
        self.errors.push(message);
        Ok(None)
    }

    fn section(&mut self, section: &Section) -> Result<Option<Node>, RendererError> {
        tracing::trace!(section_type = section.type_identifier(), "Rendering section");

        match section {
            Section::Markup {
                tag_name,
                markers,
                attributes,
            } => {
                let tag = match self.section_plugins(section) {
                    SectionOutput::Node(node) => return Ok(Some(node)),
                    SectionOutput::Tag(tag) => tag,
                    SectionOutput::Skip => tag_name.clone(),
                };

                Ok(Some(
                    Node::element(tag)
                        .with_attrs(raw_mapping(attributes.as_ref()))
                        .with_children(self.markers(markers)?),
                ))
            }
            Section::Image { src } => Ok(Some(Node::element("img").with_attr("src", src.as_str()))),
            Section::List {
                tag,
                items,
                attributes,
            } => {
                let tag = match self.section_plugins(section) {
                    SectionOutput::Node(node) => return Ok(Some(node)),
                    SectionOutput::Tag(tag) => tag,
                    SectionOutput::Skip => tag.as_str().to_owned(),
                };

                let mut children = Vec::with_capacity(items.len());
                for item in items {
                    children.push(Node::element("li").with_children(self.markers(item)?));
                }

                Ok(Some(
                    Node::element(tag)
                        .with_attrs(raw_mapping(attributes.as_ref()))
                        .with_children(children),
                ))
            }
            Section::Card { index } => {
                // Only a full replacement applies to cards; a tag has nothing to rename.
                if let SectionOutput::Node(node) = self.section_plugins(section) {
                    return Ok(Some(node));
                }
                self.card(*index)
            }
        }
    }

    fn section_plugins(&self, section: &Section) -> SectionOutput {
        run_section_plugins(&self.renderer.plugins, section, &self.context())
    }

    fn card(&mut self, index: usize) -> Result<Option<Node>, RendererError> {
        let (renderer, document) = (self.renderer, self.document);
        let Some(card) = document.cards().get(index) else {
            return self.fail(RendererError::MissingCard { index });
        };

        let handler = renderer
            .card_handler(&card.name)
            .or(renderer.unknown_card.as_deref());
        let Some(handler) = handler else {
            return self.fail(RendererError::MissingCardHandler {
                name: card.name.clone(),
            });
        };

        let env = CardEnv {
            name: &card.name,
            is_in_editor: false,
        };
        Ok(Some(handler.render(&env, &renderer.card_options, &card.payload)))
    }

    fn markers(&mut self, markers: &[Marker]) -> Result<Vec<Node>, RendererError> {
        let mut nodes = Vec::with_capacity(markers.len());
        for marker in markers {
            nodes.extend(self.marker(marker)?);
        }
        Ok(nodes)
    }

    fn marker(&mut self, marker: &Marker) -> Result<Option<Node>, RendererError> {
        match marker {
            Marker::Text {
                open_markups,
                value,
                ..
            } => match open_markups.first() {
                // Only the first open markup is applied.
                Some(&index) => self.markup(index, value),
                None => Ok(Some(Node::text(value.as_str()))),
            },
            Marker::Atom { atom_index, .. } => self.atom(*atom_index),
        }
    }

    fn markup(&mut self, index: i64, value: &str) -> Result<Option<Node>, RendererError> {
        let document = self.document;
        let Some(markup) = document.get_markup(index) else {
            return self.fail(RendererError::InvalidMarkup { index });
        };

        let payload = MarkupPayload {
            tag_name: &markup.tag_name,
            attributes: attribute_map(&markup.attributes),
            value,
        };
        let tag = run_markup_plugins(&self.renderer.plugins, &payload, &self.context())
            .unwrap_or_else(|| markup.tag_name.clone());

        Ok(Some(
            Node::element(tag)
                .with_attrs(payload.attributes)
                .with_child(Node::text(value)),
        ))
    }

    fn atom(&mut self, index: i64) -> Result<Option<Node>, RendererError> {
        let (renderer, document) = (self.renderer, self.document);
        let Some(atom) = document.get_atom(index) else {
            return self.fail(RendererError::MissingAtom { index });
        };

        let handler = renderer
            .atom_handler(&atom.name)
            .or(renderer.unknown_atom.as_deref());
        let Some(handler) = handler else {
            return self.fail(RendererError::MissingAtomHandler {
                name: atom.name.clone(),
            });
        };

        let env = AtomEnv::new(&atom.name, handler, &renderer.atom_options);
        Ok(Some(handler.render(
            &env,
            &renderer.atom_options,
            &atom.payload,
            &atom.text,
        )))
    }
}
