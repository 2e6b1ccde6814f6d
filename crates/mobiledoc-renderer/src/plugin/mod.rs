//! Plugin protocol.
//!
//! Plugins are consulted before the built-in renderer at two dispatch points:
//! once per markup or list section and once per applied inline markup. They
//! are tried in registration order and the first non-[`Skip`](SectionOutput::Skip)
//! answer wins.

mod custom_component;

use std::collections::BTreeMap;

use mobiledoc_model::{Document, Section};

use crate::node::Node;

pub use custom_component::CustomComponentPlugin;

/// Read-only context shared with plugins.
#[derive(Clone, Copy, Debug)]
pub struct PluginContext<'a> {
    /// Document being rendered.
    pub document: &'a Document,
}

/// Inline markup about to be applied to a text marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupPayload<'a> {
    pub tag_name: &'a str,
    /// Decoded markup attributes.
    pub attributes: BTreeMap<String, String>,
    /// Text the markup wraps.
    pub value: &'a str,
}

/// Answer of a section hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionOutput {
    /// Replace the built-in rendering of the section entirely.
    Node(Node),
    /// Keep the built-in rendering but use this tag or component name.
    Tag(String),
    /// Defer to the next plugin.
    Skip,
}

/// Answer of a markup hook. A markup can only be renamed, never replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupOutput {
    Tag(String),
    Skip,
}

/// Rendering hook supplied by the host.
///
/// Both hooks default to [`Skip`](SectionOutput::Skip), so a plugin only
/// implements the capabilities it needs.
///
/// # Example
///
/// ```
/// use mobiledoc_model::Section;
/// use mobiledoc_renderer::plugin::{Plugin, PluginContext, SectionOutput};
/// use mobiledoc_renderer::Node;
///
/// struct HideQuotes;
///
/// impl Plugin for HideQuotes {
///     fn name(&self) -> &str { "hide-quotes" }
///
///     fn on_render_section(&self, section: &Section, _ctx: &PluginContext<'_>) -> SectionOutput {
///         match section {
///             Section::Markup { tag_name, .. } if tag_name == "blockquote" => {
///                 SectionOutput::Node(Node::fragment(vec![]))
///             }
///             _ => SectionOutput::Skip,
///         }
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Plugin name, used in log events.
    fn name(&self) -> &str;

    /// Called once per markup, list or card section before it is rendered.
    fn on_render_section(&self, _section: &Section, _ctx: &PluginContext<'_>) -> SectionOutput {
        SectionOutput::Skip
    }

    /// Called once per applied markup before the inline element is built.
    fn on_render_markup(
        &self,
        _payload: &MarkupPayload<'_>,
        _ctx: &PluginContext<'_>,
    ) -> MarkupOutput {
        MarkupOutput::Skip
    }
}

/// Run the section hooks; the first non-skip answer wins.
pub(crate) fn run_section_plugins(
    plugins: &[Box<dyn Plugin>],
    section: &Section,
    ctx: &PluginContext<'_>,
) -> SectionOutput {
    for plugin in plugins {
        let output = plugin.on_render_section(section, ctx);
        match &output {
            SectionOutput::Skip => continue,
            SectionOutput::Node(_) => {
                tracing::debug!(plugin = plugin.name(), "Plugin replaced section");
            }
            SectionOutput::Tag(tag) => {
                tracing::debug!(plugin = plugin.name(), tag = %tag, "Plugin overrode section tag");
            }
        }
        return output;
    }
    SectionOutput::Skip
}

/// Run the markup hooks; the first non-skip answer wins.
pub(crate) fn run_markup_plugins(
    plugins: &[Box<dyn Plugin>],
    payload: &MarkupPayload<'_>,
    ctx: &PluginContext<'_>,
) -> Option<String> {
    plugins.iter().find_map(|plugin| match plugin.on_render_markup(payload, ctx) {
        MarkupOutput::Tag(tag) => {
            tracing::debug!(plugin = plugin.name(), tag = %tag, "Plugin overrode markup tag");
            Some(tag)
        }
        MarkupOutput::Skip => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fixed(&'static str, SectionOutput);

    impl Plugin for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn on_render_section(&self, _section: &Section, _ctx: &PluginContext<'_>) -> SectionOutput {
            self.1.clone()
        }
    }

    struct Rename(&'static str);

    impl Plugin for Rename {
        fn name(&self) -> &str {
            "rename"
        }

        fn on_render_markup(
            &self,
            _payload: &MarkupPayload<'_>,
            _ctx: &PluginContext<'_>,
        ) -> MarkupOutput {
            MarkupOutput::Tag(self.0.to_owned())
        }
    }

    struct Noop;

    impl Plugin for Noop {
        fn name(&self) -> &str {
            "noop"
        }
    }

    fn section() -> Section {
        Section::Markup {
            tag_name: "p".to_owned(),
            markers: vec![],
            attributes: None,
        }
    }

    #[test]
    fn test_default_hooks_skip() {
        let document = Document::default();
        let ctx = PluginContext {
            document: &document,
        };
        let payload = MarkupPayload {
            tag_name: "em",
            attributes: BTreeMap::new(),
            value: "x",
        };

        assert_eq!(Noop.on_render_section(&section(), &ctx), SectionOutput::Skip);
        assert_eq!(Noop.on_render_markup(&payload, &ctx), MarkupOutput::Skip);
    }

    #[test]
    fn test_first_non_skip_section_answer_wins() {
        let document = Document::default();
        let ctx = PluginContext {
            document: &document,
        };
        let plugins: Vec<Box<dyn Plugin>> = vec![
            Box::new(Noop),
            Box::new(Fixed("first", SectionOutput::Tag("Lead".to_owned()))),
            Box::new(Fixed("second", SectionOutput::Node(Node::text("never")))),
        ];

        assert_eq!(
            run_section_plugins(&plugins, &section(), &ctx),
            SectionOutput::Tag("Lead".to_owned())
        );
    }

    #[test]
    fn test_no_plugins_skip() {
        let document = Document::default();
        let ctx = PluginContext {
            document: &document,
        };

        assert_eq!(run_section_plugins(&[], &section(), &ctx), SectionOutput::Skip);
    }

    #[test]
    fn test_first_markup_override_wins() {
        let document = Document::default();
        let ctx = PluginContext {
            document: &document,
        };
        let payload = MarkupPayload {
            tag_name: "strong",
            attributes: BTreeMap::new(),
            value: "bold",
        };
        let plugins: Vec<Box<dyn Plugin>> =
            vec![Box::new(Noop), Box::new(Rename("B")), Box::new(Rename("C"))];

        assert_eq!(
            run_markup_plugins(&plugins, &payload, &ctx),
            Some("B".to_owned())
        );
    }
}
