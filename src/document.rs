//! Document factory: node creation, importing, and materialization of parsed
//! fragment literals.
//!
//! Every node enters the arena through one of these methods. `create_element`
//! consults the custom element registry, so components registered before a
//! subtree is built come up with their behavior attached.

use crate::dom::node::{ElementData, NodeId, NodeKind};
use crate::dom::tree::Dom;
use crate::html::FragmentNode;

impl Dom {
    /// Create a detached element.
    ///
    /// When the registry holds a definition for the (case-normalized) tag
    /// name, the element is created as that custom element: it keeps the
    /// registered lower-case name and carries the definition for lifecycle
    /// callbacks. Otherwise a generic element with the upper-cased tag name
    /// is produced.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let normalized = tag_name.to_ascii_lowercase();

        let data = match self.custom_elements().get(&normalized) {
            Some(behavior) => {
                let mut data = ElementData::new(normalized);
                data.behavior = Some(behavior);
                data
            }
            None => ElementData::new(tag_name.to_ascii_uppercase()),
        };

        self.alloc(NodeKind::Element(data))
    }

    /// Create a detached element tagged with a namespace.
    pub fn create_element_ns(&mut self, namespace: &str, tag_name: &str) -> NodeId {
        let element = self.create_element(tag_name);
        if let Some(data) = self.nodes[element].element_mut() {
            data.namespace = Some(namespace.to_owned());
        }
        element
    }

    /// Create a detached text node.
    pub fn create_text_node(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Comment(text.into()))
    }

    /// Create an empty document fragment.
    pub fn create_document_fragment(&mut self) -> NodeId {
        self.alloc(NodeKind::Fragment(ElementData::new("#document-fragment")))
    }

    /// Prepare an existing node for adoption: detach it from any parent
    /// (disconnect callbacks fire), and — when `deep` is false — strip all of
    /// its own children as well. The node itself is returned, not a copy.
    pub fn import_node(&mut self, id: NodeId, deep: bool) -> NodeId {
        self.detach(id);

        if !deep {
            while let Some(first) = self.first_child(id) {
                self.remove_child(id, first);
            }
        }

        id
    }

    /// Materialize a parsed fragment literal into real tree entities.
    ///
    /// Attributes go through [`Dom::set_attribute`], so observed-attribute
    /// callbacks fire for custom elements; children are appended through the
    /// normal insertion path. Fields of the literal that a node kind does not
    /// use are ignored.
    pub fn create_node_from_fragment(&mut self, literal: &FragmentNode) -> NodeId {
        let node = match literal.node_name.as_str() {
            "#comment" => {
                let data = literal.data.clone().unwrap_or_default();
                self.create_comment(data)
            }
            "#document-fragment" => self.create_document_fragment(),
            "#text" => {
                let value = literal.value.clone().unwrap_or_default();
                self.create_text_node(value)
            }
            tag => {
                let element = self.create_element(tag);
                for attribute in &literal.attrs {
                    self.set_attribute(element, &attribute.name, &attribute.value);
                }
                element
            }
        };

        for child in &literal.child_nodes {
            let materialized = self.create_node_from_fragment(child);
            self.append_child(node, materialized);
        }

        node
    }
}
