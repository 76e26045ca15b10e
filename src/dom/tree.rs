//! Tree operations: insert, remove, replace, clone, lifecycle.
//!
//! All nodes live in a single slotmap arena owned by [`Dom`]. Structural
//! mutation goes through the operations here, which maintain the single-parent
//! invariant (reparenting always detaches first) and fire connect/disconnect
//! lifecycle callbacks exactly once per state transition, tracked by an
//! explicit per-node flag.

use slotmap::SlotMap;
use std::collections::VecDeque;

use super::node::{ElementData, Node, NodeId, NodeKind};
use crate::registry::CustomElementRegistry;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The document tree, backed by a slotmap arena.
///
/// A `Dom` is constructed with the canonical skeleton already wired: a
/// document node owning `<html>`, which owns `<head>` and `<body>`. The arena
/// also owns the [`CustomElementRegistry`] that the factory methods consult —
/// nothing in this crate is process-global, so concurrent or repeated renders
/// each construct their own `Dom` (usually via
/// [`crate::env::Environment`]).
#[derive(Debug)]
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    document: NodeId,
    document_element: NodeId,
    head: NodeId,
    body: NodeId,
    custom_elements: CustomElementRegistry,
}

impl Dom {
    /// Create a tree holding the `<html><head><body>` skeleton.
    pub fn new() -> Self {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let document = nodes.insert(Node::new(NodeKind::Document(ElementData::new("#document"))));

        let mut dom = Self {
            nodes,
            document,
            document_element: NodeId::default(),
            head: NodeId::default(),
            body: NodeId::default(),
            custom_elements: CustomElementRegistry::new(),
        };

        dom.document_element = dom.create_element("html");
        dom.head = dom.create_element("head");
        dom.body = dom.create_element("body");

        dom.append_child(document, dom.document_element);
        dom.append_child(dom.document_element, dom.head);
        dom.append_child(dom.document_element, dom.body);

        dom
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The document node.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// The `<html>` element.
    pub fn document_element(&self) -> NodeId {
        self.document_element
    }

    /// The `<head>` element.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The registry consulted by [`Dom::create_element`].
    pub fn custom_elements(&self) -> &CustomElementRegistry {
        &self.custom_elements
    }

    /// Mutable access to the registry, for `define`/`when_defined`.
    pub fn custom_elements_mut(&mut self) -> &mut CustomElementRegistry {
        &mut self.custom_elements
    }

    /// Immutable access to a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable access to a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether the arena still holds a node with this id.
    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the arena (including detached ones).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty. Never true for a `Dom` built by `new`,
    /// which always holds the skeleton.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The numeric node type (1, 3, 8, 9, 11), or `None` for a stale id.
    pub fn node_type(&self, id: NodeId) -> Option<u8> {
        self.nodes.get(id).map(|node| node.kind.node_type())
    }

    /// The resolved node name (`DIV`, `#text`, ...).
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|node| node.node_name())
    }

    /// The lower-cased node name used in markup.
    pub fn local_name(&self, id: NodeId) -> Option<String> {
        self.nodes.get(id).map(|node| node.local_name())
    }

    /// Whether the node's connected lifecycle flag is set.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.connected)
    }

    // ── Derived structure ────────────────────────────────────────────

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// The children of a node. Empty for leaves and stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Whether the node has any children.
    pub fn has_child_nodes(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    /// First child, if any.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Last child, if any.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// The sibling immediately after this node, recomputed from the parent's
    /// child list (not stored).
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let position = siblings.iter().position(|&c| c == id)?;
        siblings.get(position + 1).copied()
    }

    /// The sibling immediately before this node.
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let position = siblings.iter().position(|&c| c == id)?;
        position.checked_sub(1).and_then(|i| siblings.get(i)).copied()
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            result.push(parent);
            current = parent;
        }
        result
    }

    /// Whether `node` is `ancestor` itself or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor == node {
            return self.nodes.contains_key(ancestor);
        }
        self.children(ancestor)
            .iter()
            .any(|&child| self.contains(child, node))
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` immediately before `reference` in `parent`'s child
    /// list, or append when `reference` is `None` (or not actually a child of
    /// `parent`).
    ///
    /// The child is first detached from any current parent with full
    /// `remove_child` semantics, so moving a connected node fires its
    /// disconnect callback before the connect callback fires again. A
    /// fragment child has its children spliced in instead, preserving their
    /// relative order; the fragment itself is left empty and is not retained
    /// in the tree.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> NodeId {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return child;
        }

        if matches!(self.nodes[child].kind, NodeKind::Fragment(_)) {
            while let Some(&first) = self.nodes[child].children.first() {
                self.insert_single(parent, first, reference);
            }
            return child;
        }

        self.insert_single(parent, child, reference);
        child
    }

    fn insert_single(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if let Some(old_parent) = self.nodes[child].parent {
            self.remove_child(old_parent, child);
        }

        self.nodes[child].parent = Some(parent);
        let position = reference
            .and_then(|r| self.nodes[parent].children.iter().position(|&c| c == r));
        match position {
            Some(index) => self.nodes[parent].children.insert(index, child),
            None => self.nodes[parent].children.push(child),
        }

        self.connect_node(child);
    }

    /// Remove `child` from `parent`'s child list.
    ///
    /// Returns `None` without firing any callback when `child` is not
    /// currently a child of `parent`. Otherwise the disconnect callback fires
    /// (once — mirror of connect) and the detached child is returned; it
    /// stays in the arena and can be re-inserted.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        if self.nodes.get(child)?.parent != Some(parent) {
            return None;
        }

        self.disconnect_node(child);

        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }

        Some(child)
    }

    /// Replace `old_child` with `new_child`, returning the removed node.
    ///
    /// Succeeds only when `old_child` is currently a child of `parent`;
    /// otherwise this silently no-ops and returns `None`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Option<NodeId> {
        if self.nodes.get(old_child)?.parent != Some(parent) {
            return None;
        }

        self.insert_before(parent, new_child, Some(old_child));
        self.detach(old_child);
        Some(old_child)
    }

    /// Remove this node from its parent, if it has one.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes.get(id).and_then(|node| node.parent) {
            self.remove_child(parent, id);
        }
    }

    /// Release a detached subtree's slots from the arena, including any cached
    /// template-content fragments.
    ///
    /// Calling this is optional — the arena frees everything when the `Dom`
    /// drops — but long-lived trees that churn nodes can use it to keep the
    /// arena small. Returns `None` for a stale id.
    pub fn prune(&mut self, id: NodeId) -> Option<()> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        self.detach(id);

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);

        while let Some(current) = to_remove.pop_front() {
            if let Some(node) = self.nodes.remove(current) {
                to_remove.extend(node.children);
                to_remove.extend(node.content);
            }
        }

        Some(())
    }

    /// Produce a detached copy of a node via the factory.
    ///
    /// Element copies carry the attribute records by value (no change
    /// callbacks fire); event listeners, shadow state, and the template
    /// content cache are not copied. Custom elements are re-instantiated
    /// through [`Dom::create_element`], so the copy carries the registered
    /// behavior. When `deep`, children are cloned recursively and appended in
    /// their original order. Document-kind nodes clone to a bare document
    /// node with no skeleton.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Option<NodeId> {
        let clone = match &self.nodes.get(id)?.kind {
            NodeKind::Text(text) => {
                let text = text.clone();
                self.create_text_node(text)
            }
            NodeKind::Comment(text) => {
                let text = text.clone();
                self.create_comment(text)
            }
            NodeKind::Fragment(_) => self.create_document_fragment(),
            NodeKind::Element(data) => {
                let name = data.node_name.clone();
                let attributes = data.attributes.clone();
                let element = self.create_element(&name);
                if let Some(data) = self.nodes[element].element_mut() {
                    data.attributes = attributes;
                }
                element
            }
            NodeKind::Document(data) => {
                let mut copy = ElementData::new(data.node_name.clone());
                copy.attributes = data.attributes.clone();
                self.alloc(NodeKind::Document(copy))
            }
        };

        if deep {
            let children = self.nodes[id].children.clone();
            for child in children {
                if let Some(child_clone) = self.clone_node(child, true) {
                    self.nodes[child_clone].parent = Some(clone);
                    self.nodes[clone].children.push(child_clone);
                }
            }
        }

        Some(clone)
    }

    // ── Text content ─────────────────────────────────────────────────

    /// The node's text: leaf kinds yield their payload, element-like kinds
    /// concatenate their descendants' text in tree order.
    pub fn text_content(&self, id: NodeId) -> String {
        match self.nodes.get(id).map(|node| &node.kind) {
            Some(NodeKind::Text(text) | NodeKind::Comment(text)) => text.clone(),
            Some(_) => self
                .children(id)
                .iter()
                .map(|&child| self.text_content(child))
                .collect(),
            None => String::new(),
        }
    }

    /// Set the node's text: leaf kinds replace their payload, element-like
    /// kinds drop all children (disconnect callbacks fire) and append one
    /// fresh text node — even for the empty string.
    pub fn set_text_content(&mut self, id: NodeId, value: impl Into<String>) {
        let value = value.into();

        if let Some(node) = self.nodes.get_mut(id) {
            if let NodeKind::Text(text) | NodeKind::Comment(text) = &mut node.kind {
                *text = value;
                return;
            }
        } else {
            return;
        }

        while let Some(&first) = self.children(id).first() {
            self.remove_child(id, first);
        }
        let text = self.create_text_node(value);
        self.append_child(id, text);
    }

    /// Template content: a lazily created fragment holding deep clones of
    /// this node's children, cached per node (clones never copy the cache).
    pub fn content(&mut self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if let Some(cached) = node.content {
            return Some(cached);
        }

        let children = node.children.clone();
        let fragment = self.create_document_fragment();
        for child in children {
            if let Some(clone) = self.clone_node(child, true) {
                self.nodes[clone].parent = Some(fragment);
                self.nodes[fragment].children.push(clone);
            }
        }

        self.nodes.get_mut(id)?.content = Some(fragment);
        Some(fragment)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Allocate a detached node. Factory methods in `document.rs` wrap this.
    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.insert(Node::new(kind))
    }

    /// Mark the node connected and fire its connected callback, once per
    /// transition.
    pub(crate) fn connect_node(&mut self, id: NodeId) {
        match self.nodes.get_mut(id) {
            Some(node) if !node.connected => node.connected = true,
            _ => return,
        }
        self.fire_connected(id);
    }

    /// Mark the node disconnected and fire its disconnected callback, once
    /// per transition.
    pub(crate) fn disconnect_node(&mut self, id: NodeId) {
        match self.nodes.get_mut(id) {
            Some(node) if node.connected => node.connected = false,
            _ => return,
        }
        self.fire_disconnected(id);
    }

    /// Invoke the connected callback unconditionally (no flag bookkeeping).
    pub(crate) fn fire_connected(&mut self, id: NodeId) {
        let behavior = self
            .nodes
            .get(id)
            .and_then(|node| node.element())
            .and_then(|data| data.behavior());
        if let Some(behavior) = behavior {
            behavior.connected(self, id);
        }
    }

    /// Invoke the disconnected callback unconditionally.
    pub(crate) fn fire_disconnected(&mut self, id: NodeId) {
        let behavior = self
            .nodes
            .get(id)
            .and_then(|node| node.element())
            .and_then(|data| data.behavior());
        if let Some(behavior) = behavior {
            behavior.disconnected(self, id);
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
