//! Node types: NodeId, NodeKind, ElementData.
//!
//! One tagged variant per node kind replaces the browser's inheritance chain:
//! the arena slot ([`Node`]) carries the structural links shared by every
//! kind, and the kind carries its payload — element data for element-like
//! kinds (elements, documents, fragments), text for the leaf kinds.

use std::rc::Rc;

use slotmap::new_key_type;

use crate::css::stylesheet::StyleSheet;
use crate::event::listener::ListenerMap;
use crate::registry::CustomElement;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// A namespaced attribute record.
///
/// Identity is the `(namespace, local_name)` pair, with the local name
/// compared case-insensitively; an element's attribute list never holds two
/// records with the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

impl Attribute {
    /// Whether this record is identified by the given pair.
    pub fn matches(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.namespace.as_deref() == namespace
            && self.local_name.eq_ignore_ascii_case(local_name)
    }
}

/// Shadow tree exposure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowMode {
    Open,
    Closed,
}

impl ShadowMode {
    /// The mode as it appears in a declarative `shadowroot` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            ShadowMode::Open => "open",
            ShadowMode::Closed => "closed",
        }
    }
}

/// Payload of element-like nodes (elements, documents, fragments).
#[derive(Default)]
pub struct ElementData {
    /// Stored node name: upper-cased tag for generic elements, the registered
    /// lower-case name for custom elements, `#document`/`#document-fragment`
    /// for the container kinds.
    pub node_name: String,
    /// Element namespace, tagged by `create_element_ns`.
    pub namespace: Option<String>,
    /// Ordered attribute records, unique by `(namespace, local_name)`.
    pub attributes: Vec<Attribute>,
    /// Registered event listeners, keyed by lower-cased type.
    pub(crate) listeners: ListenerMap,
    /// The shadow root, exposed only when attached with [`ShadowMode::Open`].
    pub shadow_root: Option<NodeId>,
    /// Set-once latch: a second `attach_shadow` on this host fails even when
    /// the first root is unexposed (closed).
    pub(crate) has_shadow: bool,
    /// On a shadow-root container: the element hosting it.
    pub host: Option<NodeId>,
    /// On a shadow-root container: the mode it was attached with.
    pub shadow_mode: Option<ShadowMode>,
    /// Custom element definition, when the tag was registered.
    pub(crate) behavior: Option<Rc<dyn CustomElement>>,
    /// Lazily created stylesheet for `<style>` elements.
    pub(crate) sheet: Option<StyleSheet>,
}

impl ElementData {
    /// Create element data with the given stored node name.
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            ..Self::default()
        }
    }

    /// The custom element definition attached at creation, if any.
    pub fn behavior(&self) -> Option<Rc<dyn CustomElement>> {
        self.behavior.clone()
    }
}

impl std::fmt::Debug for ElementData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementData")
            .field("node_name", &self.node_name)
            .field("namespace", &self.namespace)
            .field("attributes", &self.attributes)
            .field("listeners", &self.listeners)
            .field("shadow_root", &self.shadow_root)
            .field("custom", &self.behavior.is_some())
            .finish()
    }
}

/// The kind of a node, with its kind-specific payload.
#[derive(Debug)]
pub enum NodeKind {
    /// A tagged markup unit (nodeType 1).
    Element(ElementData),
    /// A text leaf (nodeType 3).
    Text(String),
    /// A comment leaf (nodeType 8).
    Comment(String),
    /// The document root (nodeType 9). Element-like: it carries attributes
    /// and listeners just as an element does.
    Document(ElementData),
    /// An unparented container whose children splice into a tree on insert
    /// (nodeType 11).
    Fragment(ElementData),
}

impl NodeKind {
    /// The numeric node type of this kind.
    pub fn node_type(&self) -> u8 {
        match self {
            NodeKind::Element(_) => 1,
            NodeKind::Text(_) => 3,
            NodeKind::Comment(_) => 8,
            NodeKind::Document(_) => 9,
            NodeKind::Fragment(_) => 11,
        }
    }

    /// Whether the kind carries element data (attributes, listeners).
    pub fn is_element_like(&self) -> bool {
        matches!(
            self,
            NodeKind::Element(_) | NodeKind::Document(_) | NodeKind::Fragment(_)
        )
    }
}

/// A single arena slot: structural links plus the kind payload.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// Back reference to the owning parent; not an ownership edge.
    pub(crate) parent: Option<NodeId>,
    /// Ordered children; a node appears in at most one parent's list.
    pub(crate) children: Vec<NodeId>,
    /// Explicit connect/disconnect lifecycle flag; hooks fire exactly once
    /// per transition.
    pub(crate) connected: bool,
    /// Cached template-content fragment; never copied by clone.
    pub(crate) content: Option<NodeId>,
}

impl Node {
    /// Create a detached node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            connected: false,
            content: None,
        }
    }

    /// The resolved node name: `#text`, `#comment`, or the stored element
    /// name.
    pub fn node_name(&self) -> &str {
        match &self.kind {
            NodeKind::Text(_) => "#text",
            NodeKind::Comment(_) => "#comment",
            NodeKind::Element(data) | NodeKind::Document(data) | NodeKind::Fragment(data) => {
                &data.node_name
            }
        }
    }

    /// Lower-cased node name, used in serialized markup.
    pub fn local_name(&self) -> String {
        self.node_name().to_ascii_lowercase()
    }

    /// Element data for element-like kinds, `None` for leaves.
    pub fn element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) | NodeKind::Document(data) | NodeKind::Fragment(data) => {
                Some(data)
            }
            NodeKind::Text(_) | NodeKind::Comment(_) => None,
        }
    }

    /// Mutable element data for element-like kinds.
    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) | NodeKind::Document(data) | NodeKind::Fragment(data) => {
                Some(data)
            }
            NodeKind::Text(_) | NodeKind::Comment(_) => None,
        }
    }
}
