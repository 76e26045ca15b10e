//! Markup serialization: flatten a node tree into an HTML string.
//!
//! Depth-first emission. Text nodes yield their text verbatim, comments their
//! delimited form, document/fragment kinds only their children. Elements emit
//! an opening tag with attributes, a declarative `<template shadowroot>`
//! wrapper when an open shadow root is attached, the serialized children, and
//! the closing tag. Nothing is escaped — markup round-trips through the
//! fragment parser byte-for-byte.

use tracing::trace;

use crate::dom::node::{ElementData, NodeId, NodeKind, ShadowMode};
use crate::dom::tree::Dom;

/// Per-node hook invoked before a node is descended into; it may mutate the
/// tree (e.g. strip attributes that must not reach the client).
pub type Visitor<'a> = &'a mut dyn FnMut(&mut Dom, NodeId);

/// Serialize `root` to markup.
///
/// The root's connected callback is invoked before serialization and its
/// disconnected callback after — exactly once each, symmetric, regardless of
/// the node's current lifecycle flag.
pub fn render_to_string(dom: &mut Dom, root: NodeId) -> String {
    render(dom, root, &mut None)
}

/// Serialize with a per-node visitor.
pub fn render_to_string_with(dom: &mut Dom, root: NodeId, visitor: Visitor<'_>) -> String {
    render(dom, root, &mut Some(visitor))
}

fn render(dom: &mut Dom, root: NodeId, visitor: &mut Option<Visitor<'_>>) -> String {
    trace!(?root, "rendering node tree");

    dom.fire_connected(root);
    let markup = serialize(dom, root, visitor);
    dom.fire_disconnected(root);
    markup
}

fn serialize(dom: &mut Dom, id: NodeId, visitor: &mut Option<Visitor<'_>>) -> String {
    if let Some(visitor) = visitor.as_mut() {
        visitor(dom, id);
    }

    // The element pieces are gathered up front so the borrow is released
    // before recursing.
    let element = {
        let Some(node) = dom.get(id) else {
            return String::new();
        };
        match &node.kind {
            NodeKind::Text(text) => return text.clone(),
            NodeKind::Comment(text) => return format!("<!--{text}-->"),
            NodeKind::Document(_) | NodeKind::Fragment(_) => None,
            NodeKind::Element(data) => {
                Some((node.local_name(), serialize_attributes(data), data.shadow_root))
            }
        }
    };
    let children = dom.children(id).to_vec();

    match element {
        // Container kinds flatten to their children.
        None => children
            .into_iter()
            .map(|child| serialize(dom, child, visitor))
            .collect(),
        Some((local_name, attributes, shadow_root)) => {
            let mut markup = format!("<{local_name}{attributes}>");

            if let Some(shadow_root) = shadow_root {
                let mode = dom
                    .get(shadow_root)
                    .and_then(|node| node.element())
                    .and_then(|data| data.shadow_mode)
                    .unwrap_or(ShadowMode::Open);
                markup.push_str(&format!("<template shadowroot=\"{}\">", mode.as_str()));
                for child in dom.children(shadow_root).to_vec() {
                    markup.push_str(&serialize(dom, child, visitor));
                }
                markup.push_str("</template>");
            }

            for child in children {
                markup.push_str(&serialize(dom, child, visitor));
            }

            markup.push_str(&format!("</{local_name}>"));
            markup
        }
    }
}

fn serialize_attributes(data: &ElementData) -> String {
    data.attributes
        .iter()
        .map(|attribute| format!(" {}=\"{}\"", attribute.local_name, attribute.value))
        .collect()
}
