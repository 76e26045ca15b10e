//! # vellum
//!
//! A headless DOM and HTML serializer for server-side rendering.
//!
//! vellum emulates, outside a real browser, the minimal subset of the
//! document/element object model that UI components written against browser
//! APIs need to mount — tree mutation, namespaced attributes, event bubbling,
//! custom element lifecycle, shadow trees — and then flattens the resulting
//! tree into an HTML string.
//!
//! ## Core Systems
//!
//! - **[`dom`]** — Slotmap-backed node arena: structural mutation, attributes,
//!   class lists, HTML views, shadow trees, tree-walker queries
//! - **[`event`]** — Event value object, listener registration, bubbling
//!   dispatch with cooperative cancellation
//! - **[`registry`]** — Custom element definitions and the tag-name registry
//! - **[`html`]** — Fragment-parser collaborator: literal node trees, the
//!   parser trait, and the built-in logos-based implementation
//! - **[`css`]** — Stylesheet rule list for `<style>` elements
//! - **[`env`]** — Per-render environment: window listeners, ready state,
//!   history/location stand-ins
//! - **[`render`]** — Depth-first markup serialization
//!
//! ## Example
//!
//! ```
//! use vellum::env::Environment;
//! use vellum::render::render_to_string;
//!
//! let mut env = Environment::new();
//! let dom = env.dom_mut();
//!
//! let div = dom.create_element("div");
//! dom.set_attribute(div, "id", "x");
//! let text = dom.create_text_node("hi");
//! dom.append_child(div, text);
//!
//! assert_eq!(render_to_string(dom, div), "<div id=\"x\">hi</div>");
//! ```

pub mod css;
pub mod dom;
pub mod env;
pub mod error;
pub mod event;
pub mod html;
pub mod registry;
pub mod render;

mod document;

pub use dom::{Dom, NodeId, ShadowMode};
pub use env::Environment;
pub use error::DomError;
pub use event::{Event, Listener};
pub use registry::{CustomElement, CustomElementRegistry};
pub use render::{render_to_string, render_to_string_with};
