//! Mobiledoc renderer with pluggable cards, atoms and plugins.
//!
//! Walks a validated [`Document`](mobiledoc_model::Document) and produces a
//! tree of [`Node`]s. Host applications supply the extension content:
//!
//! - [`CardHandler`]s for block-level cards
//! - [`AtomHandler`]s for inline atoms
//! - [`Plugin`](plugin::Plugin)s that replace sections or rename tags before
//!   the built-in renderer runs
//!
//! Render problems (missing cards, atoms, markups or handlers) either abort the
//! render or, with `suppress_errors`, are collected in
//! [`RenderResult::errors`] while the failing branch is dropped.
//!
//! # Example
//!
//! ```
//! use mobiledoc_model::Payload;
//! use mobiledoc_renderer::{CardEnv, Node, Renderer};
//!
//! fn hr(_env: &CardEnv<'_>, _options: &Payload, _payload: &Payload) -> Node {
//!     Node::element("hr")
//! }
//!
//! let renderer = Renderer::new().with_card("divider", hr);
//! let rendered = renderer
//!     .render_json(
//!         r#"{
//!             "cards": [["divider", {}]],
//!             "sections": [[1, "p", [[0, [], 0, "Above"]]], [10, 0], [2, "/cat.png"]]
//!         }"#,
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     rendered.result.to_html(),
//!     r#"<p>Above</p><hr/><img src="/cat.png"/>"#
//! );
//! ```
//!
//! # Features
//!
//! - `parallel`: render top-level sections on the rayon thread pool. Output
//!   and collected errors keep document order.

mod config;
mod error;
mod handler;
mod html;
mod node;
pub mod plugin;
mod renderer;

pub use config::{ConfigError, RendererConfig};
pub use error::RendererError;
pub use handler::{AtomEnv, AtomHandler, CardEnv, CardHandler};
pub use html::escape_html;
pub use node::Node;
pub use renderer::{ErrorHandlerFn, RenderResult, Renderer, RendererOptions};
