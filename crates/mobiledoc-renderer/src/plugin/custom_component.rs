//! Tag-to-component mapping plugin.

use std::collections::HashMap;

use mobiledoc_model::Section;

use super::{MarkupOutput, MarkupPayload, Plugin, PluginContext, SectionOutput};

/// Swaps tags for host component names.
///
/// Markup tags are looked up in `markups`. Section tags are looked up in
/// `sections`, but only for markup sections; lists and cards are left alone.
///
/// # Example
///
/// ```
/// use mobiledoc_renderer::plugin::CustomComponentPlugin;
/// use mobiledoc_renderer::Renderer;
///
/// let plugin = CustomComponentPlugin::new()
///     .with_markup("a", "Link")
///     .with_section("h2", "Heading");
///
/// let renderer = Renderer::new().with_plugin(plugin);
/// let result = renderer
///     .render_json(r#"{"sections": [[1, "h2", [[0, [], 0, "Title"]]]]}"#)
///     .unwrap();
///
/// assert_eq!(result.result.to_html(), "<Heading>Title</Heading>");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CustomComponentPlugin {
    markups: HashMap<String, String>,
    sections: HashMap<String, String>,
}

impl CustomComponentPlugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from complete tag-to-component maps.
    #[must_use]
    pub fn from_maps(markups: HashMap<String, String>, sections: HashMap<String, String>) -> Self {
        Self { markups, sections }
    }

    /// Map an inline markup tag to a component.
    #[must_use]
    pub fn with_markup(mut self, tag: impl Into<String>, component: impl Into<String>) -> Self {
        self.markups.insert(tag.into(), component.into());
        self
    }

    /// Map a markup section tag to a component.
    #[must_use]
    pub fn with_section(mut self, tag: impl Into<String>, component: impl Into<String>) -> Self {
        self.sections.insert(tag.into(), component.into());
        self
    }
}

impl Plugin for CustomComponentPlugin {
    fn name(&self) -> &'static str {
        "custom-component"
    }

    fn on_render_section(&self, section: &Section, _ctx: &PluginContext<'_>) -> SectionOutput {
        let Section::Markup { tag_name, .. } = section else {
            return SectionOutput::Skip;
        };

        self.sections
            .get(tag_name)
            .map_or(SectionOutput::Skip, |component| {
                SectionOutput::Tag(component.clone())
            })
    }

    fn on_render_markup(&self, payload: &MarkupPayload<'_>, _ctx: &PluginContext<'_>) -> MarkupOutput {
        self.markups
            .get(payload.tag_name)
            .map_or(MarkupOutput::Skip, |component| {
                MarkupOutput::Tag(component.clone())
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use mobiledoc_model::{Document, ListTag};
    use pretty_assertions::assert_eq;

    fn plugin() -> CustomComponentPlugin {
        CustomComponentPlugin::new()
            .with_markup("a", "Link")
            .with_section("p", "Paragraph")
    }

    #[test]
    fn test_markup_mapped() {
        let document = Document::default();
        let ctx = PluginContext {
            document: &document,
        };
        let payload = MarkupPayload {
            tag_name: "a",
            attributes: BTreeMap::new(),
            value: "home",
        };

        assert_eq!(
            plugin().on_render_markup(&payload, &ctx),
            MarkupOutput::Tag("Link".to_owned())
        );
    }

    #[test]
    fn test_markup_unmapped_skips() {
        let document = Document::default();
        let ctx = PluginContext {
            document: &document,
        };
        let payload = MarkupPayload {
            tag_name: "em",
            attributes: BTreeMap::new(),
            value: "x",
        };

        assert_eq!(plugin().on_render_markup(&payload, &ctx), MarkupOutput::Skip);
    }

    #[test]
    fn test_markup_section_mapped() {
        let document = Document::default();
        let ctx = PluginContext {
            document: &document,
        };
        let section = Section::Markup {
            tag_name: "p".to_owned(),
            markers: vec![],
            attributes: None,
        };

        assert_eq!(
            plugin().on_render_section(&section, &ctx),
            SectionOutput::Tag("Paragraph".to_owned())
        );
    }

    #[test]
    fn test_other_sections_skip() {
        let document = Document::default();
        let ctx = PluginContext {
            document: &document,
        };
        let mut sections = HashMap::new();
        sections.insert("ul".to_owned(), "List".to_owned());
        let plugin = CustomComponentPlugin::from_maps(HashMap::new(), sections);

        let list = Section::List {
            tag: ListTag::Ul,
            items: vec![],
            attributes: None,
        };

        assert_eq!(plugin.on_render_section(&list, &ctx), SectionOutput::Skip);
        assert_eq!(
            plugin.on_render_section(&Section::Card { index: 0 }, &ctx),
            SectionOutput::Skip
        );
    }
}
