//! Host-supplied card and atom handlers.
//!
//! Handlers receive the extension's environment, the host's options bag and
//! the payload stored in the document, and return a single [`Node`] that the
//! renderer uses verbatim.

use mobiledoc_model::Payload;

use crate::node::Node;

/// Environment passed to card handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardEnv<'a> {
    /// Card name as stored in the document.
    pub name: &'a str,
    /// Always `false`: this renderer only produces read-only output.
    pub is_in_editor: bool,
}

/// Renders a block-level card.
///
/// Implemented for every `Fn(&CardEnv, &Payload, &Payload) -> Node`, so plain
/// closures can be registered directly. Closure parameters must be annotated
/// for the compiler to pick the higher-ranked signature.
///
/// # Example
///
/// ```
/// use mobiledoc_model::Payload;
/// use mobiledoc_renderer::{CardEnv, Node, Renderer};
///
/// let renderer = Renderer::new().with_card(
///     "bookmark",
///     |env: &CardEnv<'_>, _options: &Payload, payload: &Payload| {
///         let url = payload.get("url").and_then(|v| v.as_str()).unwrap_or("#");
///         Node::element("a").with_attr("href", url).with_child(Node::text(env.name))
///     },
/// );
///
/// assert!(renderer.card_handler("bookmark").is_some());
/// ```
pub trait CardHandler: Send + Sync {
    fn render(&self, env: &CardEnv<'_>, options: &Payload, payload: &Payload) -> Node;
}

impl<F> CardHandler for F
where
    F: Fn(&CardEnv<'_>, &Payload, &Payload) -> Node + Send + Sync,
{
    fn render(&self, env: &CardEnv<'_>, options: &Payload, payload: &Payload) -> Node {
        self(env, options, payload)
    }
}

/// Environment passed to atom handlers.
///
/// Besides the atom name it carries a [`save`](Self::save) callback that
/// re-invokes the same handler with a new value and payload.
pub struct AtomEnv<'a> {
    name: &'a str,
    handler: &'a dyn AtomHandler,
    options: &'a Payload,
}

impl<'a> AtomEnv<'a> {
    pub(crate) fn new(name: &'a str, handler: &'a dyn AtomHandler, options: &'a Payload) -> Self {
        Self {
            name,
            handler,
            options,
        }
    }

    /// Atom name as stored in the document.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    #[must_use]
    pub fn is_in_editor(&self) -> bool {
        false
    }

    /// Render the same atom again with a new value and payload.
    #[must_use]
    pub fn save(&self, value: &str, payload: &Payload) -> Node {
        self.handler.render(self, self.options, payload, value)
    }
}

impl std::fmt::Debug for AtomEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomEnv").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Renders an inline atom.
///
/// `value` is the text stored with the atom (for example `@alice`). As with
/// [`CardHandler`], closures with annotated parameters implement this trait.
pub trait AtomHandler: Send + Sync {
    fn render(&self, env: &AtomEnv<'_>, options: &Payload, payload: &Payload, value: &str) -> Node;
}

impl<F> AtomHandler for F
where
    F: Fn(&AtomEnv<'_>, &Payload, &Payload, &str) -> Node + Send + Sync,
{
    fn render(&self, env: &AtomEnv<'_>, options: &Payload, payload: &Payload, value: &str) -> Node {
        self(env, options, payload, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        match value {
            serde_json::Value::Object(map) => map,
            _ => Payload::new(),
        }
    }

    struct Mention;

    impl AtomHandler for Mention {
        fn render(
            &self,
            env: &AtomEnv<'_>,
            options: &Payload,
            payload: &Payload,
            value: &str,
        ) -> Node {
            let class = options
                .get("class")
                .and_then(|v| v.as_str())
                .unwrap_or("mention");
            let id = payload.get("id").map(ToString::to_string).unwrap_or_default();

            Node::element("span")
                .with_attr("class", class)
                .with_attr("data-atom", env.name())
                .with_attr("data-id", id)
                .with_child(Node::text(value))
        }
    }

    #[test]
    fn test_card_closure() {
        let handler = |env: &CardEnv<'_>, options: &Payload, payload: &Payload| {
            let theme = options.get("theme").and_then(|v| v.as_str()).unwrap_or("");
            let url = payload.get("url").and_then(|v| v.as_str()).unwrap_or("");
            Node::element("div")
                .with_attr("class", theme)
                .with_attr("data-card", env.name)
                .with_child(Node::text(url))
        };

        let env = CardEnv {
            name: "bookmark",
            is_in_editor: false,
        };
        let node = handler.render(
            &env,
            &payload(json!({ "theme": "dark" })),
            &payload(json!({ "url": "/" })),
        );

        assert_eq!(
            node.to_html(),
            r#"<div class="dark" data-card="bookmark">/</div>"#
        );
    }

    #[test]
    fn test_atom_env() {
        let options = Payload::new();
        let env = AtomEnv::new("mention", &Mention, &options);

        assert_eq!(env.name(), "mention");
        assert!(!env.is_in_editor());
    }

    #[test]
    fn test_atom_save_reinvokes_handler() {
        let options = payload(json!({ "class": "user" }));
        let env = AtomEnv::new("mention", &Mention, &options);

        let node = env.save("@bob", &payload(json!({ "id": 7 })));

        assert_eq!(
            node.to_html(),
            r#"<span class="user" data-atom="mention" data-id="7">@bob</span>"#
        );
    }

    #[test]
    fn test_atom_closure() {
        let handler = |env: &AtomEnv<'_>, _: &Payload, _: &Payload, value: &str| {
            Node::element("em").with_child(Node::text(format!("{}:{value}", env.name())))
        };
        let options = Payload::new();
        let env = AtomEnv::new("tag", &handler, &options);

        assert_eq!(env.save("x", &Payload::new()).to_html(), "<em>tag:x</em>");
    }
}
