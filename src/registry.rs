//! Custom element definitions and the registry the document factory consults.
//!
//! A [`CustomElement`] is a shared, class-like definition: one `Rc` serves
//! every instance of the tag, and the lifecycle callbacks receive the arena
//! and the node id so per-instance state lives in the tree (attributes,
//! children), not in the definition.

use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::DomError;

/// Behavior attached to elements created for a registered tag name.
///
/// All methods have no-op defaults; implementors override what they need.
pub trait CustomElement {
    /// Attribute names whose changes should fire [`CustomElement::attribute_changed`].
    fn observed_attributes(&self) -> &[&str] {
        &[]
    }

    /// Called when the element is inserted into a parent and was not already
    /// connected.
    fn connected(&self, _dom: &mut Dom, _id: NodeId) {}

    /// Called when a connected element is removed from its parent.
    fn disconnected(&self, _dom: &mut Dom, _id: NodeId) {}

    /// Called after an observed attribute is written or removed.
    ///
    /// Fires on every write, even when the new value equals the old one —
    /// attribute-record semantics, not a diff.
    fn attribute_changed(
        &self,
        _dom: &mut Dom,
        _id: NodeId,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
    }
}

/// Callback stored by [`CustomElementRegistry::when_defined`].
type Completion = Box<dyn FnOnce()>;

/// Tag-name → definition mapping used by the document factory.
///
/// Uniqueness is enforced both by name and by definition identity. Pending
/// `when_defined` completions are held one per name and resolved exactly once,
/// when the name is registered.
#[derive(Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, Rc<dyn CustomElement>>,
    pending: HashMap<String, Completion>,
}

impl CustomElementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under a (case-normalized) tag name.
    ///
    /// Fails if the name is taken, or if the same definition instance is
    /// already registered under any name. On success, a pending
    /// `when_defined` completion for the name is resolved.
    pub fn define(
        &mut self,
        name: &str,
        definition: Rc<dyn CustomElement>,
    ) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();

        if self.definitions.contains_key(&name) {
            return Err(DomError::DuplicateName(name));
        }
        if self
            .definitions
            .values()
            .any(|existing| Rc::ptr_eq(existing, &definition))
        {
            return Err(DomError::DuplicateDefinition);
        }

        self.definitions.insert(name.clone(), definition);

        if let Some(completion) = self.pending.remove(&name) {
            completion();
        }

        Ok(())
    }

    /// Look up the definition for a tag name. Absent names yield `None`.
    pub fn get(&self, name: &str) -> Option<Rc<dyn CustomElement>> {
        self.definitions.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Whether a definition is registered under the name.
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(&name.to_ascii_lowercase())
    }

    /// Run `completion` once the name is defined — immediately if it already
    /// is, otherwise when `define` lands.
    ///
    /// At most one completion is held per name; a second call before the
    /// definition arrives replaces the first.
    pub fn when_defined(&mut self, name: &str, completion: impl FnOnce() + 'static) {
        let name = name.to_ascii_lowercase();
        if self.definitions.contains_key(&name) {
            completion();
        } else {
            self.pending.insert(name, Box::new(completion));
        }
    }
}

impl std::fmt::Debug for CustomElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomElementRegistry")
            .field("defined", &self.definitions.keys().collect::<Vec<_>>())
            .field("pending", &self.pending.keys().collect::<Vec<_>>())
            .finish()
    }
}
