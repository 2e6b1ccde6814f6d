//! Static HTML materializer for [`Node`] trees.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::node::Node;

/// Elements written as self-closing tags; their children are dropped.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

/// Append `s` to `out`, copying unescaped runs as whole slices.
fn push_escaped(out: &mut String, s: &str) {
    let mut start = 0;
    for (index, c) in s.char_indices() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&#x27;",
            _ => continue,
        };
        out.push_str(&s[start..index]);
        out.push_str(entity);
        start = index + c.len_utf8();
    }
    out.push_str(&s[start..]);
}

/// Tag names: an ASCII letter followed by letters, digits, `-`, `_`, `:` or `.`.
fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Attribute names: non-empty, without whitespace, controls, quotes, `<`, `>`, `/` or `=`.
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            !c.is_whitespace()
                && !c.is_control()
                && !matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

impl Node {
    /// Materialize this tree as static HTML.
    ///
    /// Fragments are transparent, attributes are written in key order and
    /// void elements such as `img` are self-closed. An element whose tag is
    /// not a valid name is written as its children only, and attributes with
    /// invalid names are skipped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text { value } => push_escaped(out, value),
        Node::Fragment { children } => {
            for child in children {
                write_node(out, child);
            }
        }
        Node::Element {
            tag,
            attributes,
            children,
        } if !is_tag_name(tag) => {
            tracing::debug!(tag = %tag, "Dropping element with invalid tag name");
            for child in children {
                write_node(out, child);
            }
        }
        Node::Element {
            tag,
            attributes,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            write_attributes(out, attributes);

            if VOID_ELEMENTS.contains(&tag.as_str()) {
                out.push_str("/>");
                return;
            }

            out.push('>');
            for child in children {
                write_node(out, child);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

fn write_attributes(out: &mut String, attributes: &BTreeMap<String, String>) {
    for (key, value) in attributes {
        if !is_attribute_name(key) {
            tracing::debug!(attribute = %key, "Skipping attribute with invalid name");
            continue;
        }
        let _ = write!(out, " {key}=\"");
        push_escaped(out, value);
        out.push('"');
    }
}
