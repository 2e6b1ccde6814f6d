//! Output node tree.
//!
//! The renderer never produces markup directly. It builds a tree of [`Node`]s
//! that a host materializes, either through [`Node::to_html`] or its own
//! component layer.

use std::collections::BTreeMap;

use serde::Serialize;

/// Node in a rendered document.
///
/// # Example
///
/// ```
/// use mobiledoc_renderer::Node;
///
/// let node = Node::element("a")
///     .with_attr("href", "/")
///     .with_child(Node::text("Home"));
///
/// assert_eq!(node.to_html(), r#"<a href="/">Home</a>"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Element or component with attributes and children.
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<Node>,
    },
    /// Plain text. Escaped when materialized.
    Text { value: String },
    /// Transparent group of nodes.
    Fragment { children: Vec<Node> },
}

impl Node {
    /// Create an element without attributes or children.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn fragment(children: Vec<Node>) -> Self {
        Self::Fragment { children }
    }

    /// Set one attribute. No-op on text nodes and fragments.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Merge a whole attribute mapping. No-op on text nodes and fragments.
    #[must_use]
    pub fn with_attrs(mut self, extra: BTreeMap<String, String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            attributes.extend(extra);
        }
        self
    }

    /// Append a child. No-op on text nodes.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
        self
    }

    /// Append several children. No-op on text nodes.
    #[must_use]
    pub fn with_children(mut self, extra: impl IntoIterator<Item = Node>) -> Self {
        if let Some(children) = self.children_mut() {
            children.extend(extra);
        }
        self
    }

    /// Tag name for elements.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text { .. } | Self::Fragment { .. } => None,
        }
    }

    /// Children of elements and fragments. Text nodes have none.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element { children, .. } | Self::Fragment { children } => children,
            Self::Text { .. } => &[],
        }
    }

    /// Concatenated text content of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text { value } => value.clone(),
            Self::Element { children, .. } | Self::Fragment { children } => {
                children.iter().map(Self::text_content).collect()
            }
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Element { children, .. } | Self::Fragment { children } => Some(children),
            Self::Text { .. } => None,
        }
    }
}
