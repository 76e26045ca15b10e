//! DOM queries: the tree walker and the selector/lookup family.
//!
//! Every lookup runs over one shared walk primitive. The walker's order is
//! deliberately the historical one: pop the front of a deque, then *prepend*
//! the popped node's element-like children ahead of everything not yet
//! visited — root first, then a depth-biased (not strictly level-order)
//! descent. Callers depend on the resulting visitation order, so it is
//! preserved exactly rather than corrected to textbook breadth-first.

use std::collections::VecDeque;

use super::node::NodeId;
use super::tree::Dom;

/// Cursor over the element-like nodes reachable from a root.
///
/// Obtained from [`Dom::create_tree_walker`]. Not restartable: once
/// exhausted, [`TreeWalker::next_node`] keeps returning `None`.
#[derive(Debug)]
pub struct TreeWalker {
    queue: VecDeque<NodeId>,
    current: Option<NodeId>,
}

impl TreeWalker {
    /// The node returned by the last `next_node` call.
    pub fn current_node(&self) -> Option<NodeId> {
        self.current
    }

    /// Advance the cursor and return the next node, or `None` once exhausted.
    pub fn next_node(&mut self, dom: &Dom) -> Option<NodeId> {
        self.current = self.queue.pop_front();

        if let Some(current) = self.current {
            // Prepend the element-like children ahead of the rest of the
            // queue, preserving their relative order.
            for &child in dom.children(current).iter().rev() {
                if dom.get(child).is_some_and(|node| node.kind.is_element_like()) {
                    self.queue.push_front(child);
                }
            }
        }

        self.current
    }
}

impl Dom {
    /// Create a walker starting at (and including) `root`.
    pub fn create_tree_walker(&self, root: NodeId) -> TreeWalker {
        TreeWalker {
            queue: VecDeque::from([root]),
            current: None,
        }
    }

    /// First node under (and including) `root` matching the predicate, in
    /// walker order.
    pub fn find_first(
        &self,
        root: NodeId,
        predicate: impl Fn(&Dom, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut walker = self.create_tree_walker(root);
        while let Some(node) = walker.next_node(self) {
            if predicate(self, node) {
                return Some(node);
            }
        }
        None
    }

    /// All nodes under (and including) `root` matching the predicate, in
    /// walker order.
    pub fn find_all(
        &self,
        root: NodeId,
        predicate: impl Fn(&Dom, NodeId) -> bool,
    ) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut walker = self.create_tree_walker(root);
        while let Some(node) = walker.next_node(self) {
            if predicate(self, node) {
                result.push(node);
            }
        }
        result
    }

    /// First descendant (or the receiver) matching a simple selector:
    /// `#id`, `.class` (substring match against the class attribute),
    /// `[attr]` presence, or an exact lower-case tag name.
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let matcher = selector_matcher(selector);
        self.find_first(root, matcher)
    }

    /// All matches for the same selector grammar, in walker order.
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let matcher = selector_matcher(selector);
        self.find_all(root, matcher)
    }

    /// First node whose `id` attribute equals the given string.
    pub fn get_element_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        self.find_first(root, move |dom, node| {
            dom.get_attribute(node, "id").as_deref() == Some(id)
        })
    }

    /// All nodes whose class attribute contains the given string.
    pub fn get_elements_by_class_name(&self, root: NodeId, class_name: &str) -> Vec<NodeId> {
        self.find_all(root, move |dom, node| {
            dom.get_attribute(node, "class")
                .is_some_and(|value| value.contains(class_name))
        })
    }

    /// All nodes whose lower-cased name equals the given tag name.
    pub fn get_elements_by_tag_name(&self, root: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.find_all(root, move |dom, node| {
            dom.local_name(node).as_deref() == Some(tag_name)
        })
    }
}

/// Build the predicate for one simple selector.
fn selector_matcher(selector: &str) -> impl Fn(&Dom, NodeId) -> bool {
    let selector = selector.to_owned();
    move |dom, node| {
        if let Some(id) = selector.strip_prefix('#') {
            dom.get_attribute(node, "id").as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            dom.get_attribute(node, "class")
                .is_some_and(|value| value.contains(class))
        } else if selector.starts_with('[') && selector.ends_with(']') && !selector.contains('=') {
            dom.has_attribute(node, &selector[1..selector.len() - 1])
        } else {
            dom.local_name(node).as_deref() == Some(selector.as_str())
        }
    }
}
