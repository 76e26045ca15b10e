//! Element operations: attributes, class list, HTML views, shadow trees,
//! slots.
//!
//! All of these are methods on [`Dom`] taking the element's id. They are
//! total over non-element nodes: setters no-op and lookups return
//! `None`/empty, except for the shadow/slot operations, whose misuse is an
//! invariant violation and fails fast.

use crate::css::stylesheet::StyleSheet;
use crate::dom::node::{Attribute, NodeId, NodeKind, ShadowMode};
use crate::dom::tree::Dom;
use crate::error::DomError;
use crate::event::listener::Listener;
use crate::html::FragmentParser;

impl Dom {
    // ── Attributes ───────────────────────────────────────────────────

    /// Set an attribute in the null namespace.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.set_attribute_ns(id, None, name, value);
    }

    /// Read an attribute from the null namespace. Absent yields `None`.
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.get_attribute_ns(id, None, name)
    }

    /// Whether the element carries the attribute in the null namespace.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.has_attribute_ns(id, None, name)
    }

    /// Remove an attribute from the null namespace.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        self.remove_attribute_ns(id, None, name);
    }

    /// Whether the element carries any attribute at all.
    pub fn has_attributes(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .and_then(|node| node.element())
            .is_some_and(|data| !data.attributes.is_empty())
    }

    /// Upsert the `(namespace, name)` attribute record.
    ///
    /// The stored value replaces any previous one for the same identity; the
    /// record order is otherwise preserved. When the element carries a custom
    /// definition that observes `name`, its `attribute_changed` callback
    /// fires — on every write, even when the value did not change. The old
    /// value reported to the callback is read through the namespace-less
    /// path, as the historical implementation did.
    pub fn set_attribute_ns(
        &mut self,
        id: NodeId,
        namespace: Option<&str>,
        name: &str,
        value: &str,
    ) {
        let old = self.get_attribute(id, name);

        let Some(data) = self.nodes.get_mut(id).and_then(|node| node.element_mut()) else {
            return;
        };
        match data
            .attributes
            .iter_mut()
            .find(|attribute| attribute.matches(namespace, name))
        {
            Some(attribute) => attribute.value = value.to_owned(),
            None => data.attributes.push(Attribute {
                namespace: namespace.map(str::to_owned),
                local_name: name.to_owned(),
                value: value.to_owned(),
            }),
        }

        self.fire_attribute_changed(id, name, old.as_deref(), Some(value), true);
    }

    /// Read the `(namespace, name)` attribute record. Total: absent yields
    /// `None`, never an error.
    pub fn get_attribute_ns(
        &self,
        id: NodeId,
        namespace: Option<&str>,
        name: &str,
    ) -> Option<String> {
        self.nodes
            .get(id)?
            .element()?
            .attributes
            .iter()
            .find(|attribute| attribute.matches(namespace, name))
            .map(|attribute| attribute.value.clone())
    }

    /// Whether the `(namespace, name)` record is present.
    pub fn has_attribute_ns(&self, id: NodeId, namespace: Option<&str>, name: &str) -> bool {
        self.get_attribute_ns(id, namespace, name).is_some()
    }

    /// Delete the `(namespace, name)` record if present; removing an absent
    /// attribute is a no-op.
    ///
    /// The `attribute_changed` callback fires with `new = None` whenever the
    /// element carries a custom definition — the removal path does not
    /// consult `observed_attributes` (historical asymmetry, kept).
    pub fn remove_attribute_ns(&mut self, id: NodeId, namespace: Option<&str>, name: &str) {
        let old = self.get_attribute(id, name);

        let Some(data) = self.nodes.get_mut(id).and_then(|node| node.element_mut()) else {
            return;
        };
        if let Some(index) = data
            .attributes
            .iter()
            .position(|attribute| attribute.matches(namespace, name))
        {
            data.attributes.remove(index);
        }

        self.fire_attribute_changed(id, name, old.as_deref(), None, false);
    }

    fn fire_attribute_changed(
        &mut self,
        id: NodeId,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
        check_observed: bool,
    ) {
        let Some(behavior) = self
            .nodes
            .get(id)
            .and_then(|node| node.element())
            .and_then(|data| data.behavior())
        else {
            return;
        };
        if check_observed
            && !behavior
                .observed_attributes()
                .iter()
                .any(|observed| *observed == name)
        {
            return;
        }
        behavior.attribute_changed(self, id, name, old, new);
    }

    // ── Attribute-backed accessors ───────────────────────────────────

    /// The `class` attribute.
    pub fn class_name(&self, id: NodeId) -> Option<String> {
        self.get_attribute(id, "class")
    }

    /// Write the `class` attribute.
    pub fn set_class_name(&mut self, id: NodeId, value: &str) {
        self.set_attribute(id, "class", value);
    }

    /// The `style` attribute.
    pub fn css_text(&self, id: NodeId) -> Option<String> {
        self.get_attribute(id, "style")
    }

    /// Write the `style` attribute.
    pub fn set_css_text(&mut self, id: NodeId, value: &str) {
        self.set_attribute(id, "style", value);
    }

    // ── Class list ───────────────────────────────────────────────────
    //
    // A derived view over the `class` attribute: split on whitespace, dedup
    // keeping first occurrence, mutate, re-join. No separate storage.

    fn class_set(&self, id: NodeId) -> Vec<String> {
        let mut classes: Vec<String> = Vec::new();
        if let Some(value) = self.get_attribute(id, "class") {
            for class in value.split_whitespace() {
                if !classes.iter().any(|c| c == class) {
                    classes.push(class.to_owned());
                }
            }
        }
        classes
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let mut classes = self.class_set(id);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
        self.set_class_name(id, &classes.join(" "));
    }

    /// Remove a class. The `class` attribute stays present (possibly empty).
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let mut classes = self.class_set(id);
        classes.retain(|c| c != class);
        self.set_class_name(id, &classes.join(" "));
    }

    /// Toggle a class: add if absent, remove if present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            self.remove_class(id, class);
        } else {
            self.add_class(id, class);
        }
    }

    /// Whether the element's class list contains the class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_set(id).iter().any(|c| c == class)
    }

    // ── Element children & siblings ──────────────────────────────────

    /// The element-kind children, in order.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.node_type(child) == Some(1))
            .collect()
    }

    /// The child count. Counts all child nodes, not just elements — the
    /// historical accessor did, and callers depend on it.
    pub fn child_element_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// The nearest following sibling of element kind.
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut sibling = self.next_sibling(id);
        while let Some(current) = sibling {
            if self.node_type(current) == Some(1) {
                return Some(current);
            }
            sibling = self.next_sibling(current);
        }
        None
    }

    /// The nearest preceding sibling of element kind.
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut sibling = self.previous_sibling(id);
        while let Some(current) = sibling {
            if self.node_type(current) == Some(1) {
                return Some(current);
            }
            sibling = self.previous_sibling(current);
        }
        None
    }

    // ── HTML views ───────────────────────────────────────────────────

    /// Re-serialize the node's children: comments as comment markup, text
    /// verbatim, element-like children via [`Dom::outer_html`].
    pub fn inner_html(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .map(|&child| match &self.nodes[child].kind {
                NodeKind::Comment(text) => format!("<!--{text}-->"),
                NodeKind::Text(text) => text.clone(),
                _ => self.outer_html(child),
            })
            .collect()
    }

    /// Replace the node's children from an HTML string.
    ///
    /// On a `<script>` element the assignment is redirected to raw text
    /// content — script bodies are never parsed. Otherwise all current
    /// children are removed, and a non-empty string is run through the
    /// fragment parser and materialized via the factory (connect callbacks
    /// fire through the normal append path).
    pub fn set_inner_html(&mut self, id: NodeId, value: &str, parser: &dyn FragmentParser) {
        if self.node_name(id) == Some("SCRIPT") {
            self.set_text_content(id, value);
            return;
        }
        if !self.nodes.get(id).is_some_and(|node| node.kind.is_element_like()) {
            return;
        }

        while let Some(first) = self.first_child(id) {
            self.remove_child(id, first);
        }

        if !value.is_empty() {
            let literal = parser.parse_fragment(value);
            let fragment = self.create_node_from_fragment(&literal);
            self.append_child(id, fragment);
        }
    }

    /// The node's own markup: comments delimited, text verbatim, elements as
    /// an opening tag with ` name="value"` attributes, the inner HTML, and a
    /// closing tag.
    pub fn outer_html(&self, id: NodeId) -> String {
        let Some(node) = self.nodes.get(id) else {
            return String::new();
        };
        match &node.kind {
            NodeKind::Comment(text) => format!("<!--{text}-->"),
            NodeKind::Text(text) => text.clone(),
            _ => {
                let local_name = node.local_name();
                let attributes: String = node
                    .element()
                    .map(|data| {
                        data.attributes
                            .iter()
                            .map(|a| format!(" {}=\"{}\"", a.local_name, a.value))
                            .collect()
                    })
                    .unwrap_or_default();
                format!(
                    "<{local_name}{attributes}>{}</{local_name}>",
                    self.inner_html(id)
                )
            }
        }
    }

    // ── Event listener registration ──────────────────────────────────

    /// Register a listener for the (lower-cased) event type. Appends — no
    /// dedup.
    pub fn add_event_listener(&mut self, id: NodeId, event_type: &str, listener: Listener) {
        if let Some(data) = self.nodes.get_mut(id).and_then(|node| node.element_mut()) {
            data.listeners.add(event_type, listener);
        }
    }

    /// Remove a previously registered listener by identity.
    pub fn remove_event_listener(&mut self, id: NodeId, event_type: &str, listener: &Listener) {
        if let Some(data) = self.nodes.get_mut(id).and_then(|node| node.element_mut()) {
            data.listeners.remove(event_type, listener);
        }
    }

    // ── Shadow trees & slots ─────────────────────────────────────────

    /// Attach a shadow tree to a host element.
    ///
    /// Fails with [`DomError::ShadowRootExists`] when the host already hosts
    /// one — including an unexposed (closed) one. The root is a detached
    /// `<template>` element tagged with its host and mode; only an
    /// [`ShadowMode::Open`] root is exposed through [`Dom::shadow_root`].
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowMode) -> Result<NodeId, DomError> {
        {
            let data = self
                .nodes
                .get(host)
                .and_then(|node| node.element())
                .ok_or(DomError::NotAnElement)?;
            if data.has_shadow {
                return Err(DomError::ShadowRootExists);
            }
        }

        let root = self.create_element("template");
        if let Some(data) = self.nodes[root].element_mut() {
            data.host = Some(host);
            data.shadow_mode = Some(mode);
        }
        if let Some(data) = self.nodes[host].element_mut() {
            data.has_shadow = true;
            if mode == ShadowMode::Open {
                data.shadow_root = Some(root);
            }
        }

        Ok(root)
    }

    /// The host's exposed shadow root: `Some` for open mode, `None` for
    /// closed or when none was attached.
    pub fn shadow_root(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.element()?.shadow_root
    }

    /// The nodes a `<slot>` would render: the nearest shadow host's direct
    /// children whose `slot` attribute matches this slot's `name`.
    ///
    /// A named slot collects elements with an equal `slot` attribute; an
    /// unnamed slot collects non-element children and elements whose `slot`
    /// attribute is absent or empty. Fails on anything that is not a
    /// `<slot>` element.
    pub fn assigned_nodes(&self, slot: NodeId) -> Result<Vec<NodeId>, DomError> {
        if self.node_name(slot) != Some("SLOT") {
            return Err(DomError::NotASlot);
        }

        let name = self.get_attribute(slot, "name").filter(|n| !n.is_empty());

        // Nearest shadow host: first ancestor that is a shadow-root container.
        let mut host = None;
        let mut current = slot;
        while let Some(parent) = self.parent(current) {
            if let Some(found) = self
                .nodes
                .get(parent)
                .and_then(|node| node.element())
                .and_then(|data| data.host)
            {
                host = Some(found);
                break;
            }
            current = parent;
        }
        let Some(host) = host else {
            return Ok(Vec::new());
        };

        Ok(self
            .children(host)
            .iter()
            .copied()
            .filter(|&child| {
                let slot_attribute = self.get_attribute(child, "slot");
                let is_element = self.nodes.get(child).is_some_and(|n| n.element().is_some());
                match &name {
                    Some(name) => is_element && slot_attribute.as_deref() == Some(name),
                    None => !is_element || slot_attribute.map_or(true, |v| v.is_empty()),
                }
            })
            .collect())
    }

    // ── Stylesheet association ───────────────────────────────────────

    /// The stylesheet of a `<style>` element, created lazily on first
    /// access. `None` for any other node.
    pub fn sheet(&mut self, id: NodeId) -> Option<&mut StyleSheet> {
        if self.node_name(id) != Some("STYLE") {
            return None;
        }
        let data = self.nodes.get_mut(id)?.element_mut()?;
        Some(data.sheet.get_or_insert_with(StyleSheet::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlParser;
    use crate::registry::CustomElement;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn attribute_round_trip() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");

        dom.set_attribute(element, "x", "1");
        assert_eq!(dom.get_attribute(element, "x").as_deref(), Some("1"));
        assert!(dom.has_attribute(element, "x"));
        assert!(dom.has_attributes(element));

        dom.remove_attribute(element, "x");
        assert!(!dom.has_attribute(element, "x"));
        assert_eq!(dom.get_attribute(element, "x"), None);
        assert!(!dom.has_attributes(element));
    }

    #[test]
    fn set_attribute_upserts_in_place() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");
        dom.set_attribute(element, "a", "1");
        dom.set_attribute(element, "b", "2");
        dom.set_attribute(element, "a", "3");

        let data = dom.get(element).unwrap().element().unwrap();
        assert_eq!(data.attributes.len(), 2);
        assert_eq!(data.attributes[0].local_name, "a");
        assert_eq!(data.attributes[0].value, "3");
    }

    #[test]
    fn attribute_name_is_case_insensitive() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");
        dom.set_attribute(element, "Data-X", "1");
        assert_eq!(dom.get_attribute(element, "data-x").as_deref(), Some("1"));
        dom.set_attribute(element, "data-x", "2");
        let data = dom.get(element).unwrap().element().unwrap();
        assert_eq!(data.attributes.len(), 1);
    }

    #[test]
    fn namespaced_attributes_are_distinct_records() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");
        dom.set_attribute(element, "href", "plain");
        dom.set_attribute_ns(element, Some("http://www.w3.org/1999/xlink"), "href", "linked");

        assert_eq!(dom.get_attribute(element, "href").as_deref(), Some("plain"));
        assert_eq!(
            dom.get_attribute_ns(element, Some("http://www.w3.org/1999/xlink"), "href")
                .as_deref(),
            Some("linked")
        );

        dom.remove_attribute_ns(element, Some("http://www.w3.org/1999/xlink"), "href");
        assert!(!dom.has_attribute_ns(element, Some("http://www.w3.org/1999/xlink"), "href"));
        assert!(dom.has_attribute(element, "href"));
    }

    #[test]
    fn remove_absent_attribute_is_noop() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");
        dom.remove_attribute(element, "missing");
        assert!(!dom.has_attribute(element, "missing"));
    }

    #[test]
    fn attribute_ops_on_leaf_are_total() {
        let mut dom = Dom::new();
        let text = dom.create_text_node("hi");
        dom.set_attribute(text, "x", "1");
        assert_eq!(dom.get_attribute(text, "x"), None);
        assert!(!dom.has_attribute(text, "x"));
    }

    struct Observer {
        calls: RefCell<Vec<(String, Option<String>, Option<String>)>>,
    }
    impl Observer {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                calls: RefCell::new(Vec::new()),
            })
        }
    }
    impl CustomElement for Observer {
        fn observed_attributes(&self) -> &[&str] {
            &["label"]
        }
        fn attribute_changed(
            &self,
            _dom: &mut Dom,
            _id: NodeId,
            name: &str,
            old: Option<&str>,
            new: Option<&str>,
        ) {
            self.calls.borrow_mut().push((
                name.to_owned(),
                old.map(str::to_owned),
                new.map(str::to_owned),
            ));
        }
    }

    #[test]
    fn observed_attribute_fires_even_when_value_unchanged() {
        let observer = Observer::new();
        let mut dom = Dom::new();
        dom.custom_elements_mut()
            .define("x-observed", observer.clone())
            .unwrap();
        let element = dom.create_element("x-observed");

        dom.set_attribute(element, "label", "a");
        dom.set_attribute(element, "label", "a");

        let calls = observer.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("label".into(), None, Some("a".into())));
        assert_eq!(calls[1], ("label".into(), Some("a".into()), Some("a".into())));
    }

    #[test]
    fn unobserved_attribute_does_not_fire_on_set() {
        let observer = Observer::new();
        let mut dom = Dom::new();
        dom.custom_elements_mut()
            .define("x-observed", observer.clone())
            .unwrap();
        let element = dom.create_element("x-observed");

        dom.set_attribute(element, "other", "1");
        assert!(observer.calls.borrow().is_empty());
    }

    #[test]
    fn remove_fires_with_none_regardless_of_observed() {
        let observer = Observer::new();
        let mut dom = Dom::new();
        dom.custom_elements_mut()
            .define("x-observed", observer.clone())
            .unwrap();
        let element = dom.create_element("x-observed");

        // Removal reports through the callback even for unobserved names.
        dom.remove_attribute(element, "other");
        let calls = observer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("other".into(), None, None));
    }

    #[test]
    fn class_list_derives_from_class_attribute() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");

        dom.add_class(element, "a");
        dom.add_class(element, "b");
        assert_eq!(dom.class_name(element).as_deref(), Some("a b"));
        assert!(dom.has_class(element, "a"));

        dom.remove_class(element, "a");
        assert_eq!(dom.class_name(element).as_deref(), Some("b"));
        assert!(!dom.has_class(element, "a"));
    }

    #[test]
    fn class_list_add_is_idempotent() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");
        dom.add_class(element, "a");
        dom.add_class(element, "a");
        assert_eq!(dom.class_name(element).as_deref(), Some("a"));
    }

    #[test]
    fn class_list_reads_existing_attribute() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");
        dom.set_class_name(element, "x  y");
        assert!(dom.has_class(element, "x"));
        assert!(dom.has_class(element, "y"));
        dom.toggle_class(element, "x");
        assert_eq!(dom.class_name(element).as_deref(), Some("y"));
        dom.toggle_class(element, "x");
        assert_eq!(dom.class_name(element).as_deref(), Some("y x"));
    }

    #[test]
    fn css_text_is_style_attribute() {
        let mut dom = Dom::new();
        let element = dom.create_element("div");
        dom.set_css_text(element, "color: red");
        assert_eq!(dom.get_attribute(element, "style").as_deref(), Some("color: red"));
        assert_eq!(dom.css_text(element).as_deref(), Some("color: red"));
    }

    #[test]
    fn element_children_filters_leaves() {
        let mut dom = Dom::new();
        let parent = dom.create_element("div");
        let text = dom.create_text_node("hi");
        let child = dom.create_element("em");
        dom.append_child(parent, text);
        dom.append_child(parent, child);

        assert_eq!(dom.element_children(parent), vec![child]);
        // Historical accessor counts every child node.
        assert_eq!(dom.child_element_count(parent), 2);
    }

    #[test]
    fn element_sibling_accessors_skip_leaves() {
        let mut dom = Dom::new();
        let parent = dom.create_element("div");
        let first = dom.create_element("em");
        let text = dom.create_text_node("between");
        let last = dom.create_element("strong");
        dom.append_child(parent, first);
        dom.append_child(parent, text);
        dom.append_child(parent, last);

        assert_eq!(dom.next_element_sibling(first), Some(last));
        assert_eq!(dom.previous_element_sibling(last), Some(first));
        assert_eq!(dom.next_element_sibling(last), None);
    }

    #[test]
    fn inner_and_outer_html() {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        dom.set_attribute(div, "id", "x");
        let em = dom.create_element("em");
        let text = dom.create_text_node("hi");
        let comment = dom.create_comment("note");
        dom.append_child(div, em);
        dom.append_child(em, text);
        dom.append_child(div, comment);

        assert_eq!(dom.inner_html(div), "<em>hi</em><!--note-->");
        assert_eq!(dom.outer_html(div), "<div id=\"x\"><em>hi</em><!--note--></div>");
    }

    #[test]
    fn set_inner_html_parses_and_materializes() {
        let mut dom = Dom::new();
        let parser = HtmlParser::new();
        let div = dom.create_element("div");
        let stale = dom.create_element("em");
        dom.append_child(div, stale);

        dom.set_inner_html(div, "<span class=\"a\">hi</span>", &parser);

        assert_eq!(dom.element_children(div).len(), 1);
        let span = dom.element_children(div)[0];
        assert_eq!(dom.node_name(span), Some("SPAN"));
        assert_eq!(dom.get_attribute(span, "class").as_deref(), Some("a"));
        assert_eq!(dom.text_content(span), "hi");
        assert_eq!(dom.parent(stale), None);
    }

    #[test]
    fn set_inner_html_empty_only_clears() {
        let mut dom = Dom::new();
        let parser = HtmlParser::new();
        let div = dom.create_element("div");
        let child = dom.create_element("em");
        dom.append_child(div, child);

        dom.set_inner_html(div, "", &parser);
        assert!(dom.children(div).is_empty());
    }

    #[test]
    fn set_inner_html_on_script_stores_raw_text() {
        let mut dom = Dom::new();
        let parser = HtmlParser::new();
        let script = dom.create_element("script");

        dom.set_inner_html(script, "let x = \"<div>\";", &parser);
        assert_eq!(dom.text_content(script), "let x = \"<div>\";");
        // One text child, nothing parsed.
        assert_eq!(dom.children(script).len(), 1);
        assert_eq!(dom.node_type(dom.first_child(script).unwrap()), Some(3));
    }

    #[test]
    fn listener_registration_round_trip() {
        let mut dom = Dom::new();
        let element = dom.create_element("button");
        let listener: Listener = Rc::new(|_| true);

        dom.add_event_listener(element, "Click", listener.clone());
        assert!(dom.get(element).unwrap().element().unwrap().listeners.has("click"));

        dom.remove_event_listener(element, "click", &listener);
        assert!(!dom.get(element).unwrap().element().unwrap().listeners.has("click"));
    }

    #[test]
    fn attach_shadow_open_is_exposed() {
        let mut dom = Dom::new();
        let host = dom.create_element("div");
        let root = dom.attach_shadow(host, ShadowMode::Open).unwrap();
        assert_eq!(dom.shadow_root(host), Some(root));

        let data = dom.get(root).unwrap().element().unwrap();
        assert_eq!(data.host, Some(host));
        assert_eq!(data.shadow_mode, Some(ShadowMode::Open));
        assert_eq!(dom.node_name(root), Some("TEMPLATE"));
    }

    #[test]
    fn attach_shadow_closed_is_unexposed() {
        let mut dom = Dom::new();
        let host = dom.create_element("div");
        let root = dom.attach_shadow(host, ShadowMode::Closed).unwrap();
        assert_eq!(dom.shadow_root(host), None);
        assert!(dom.exists(root));
    }

    #[test]
    fn attach_shadow_twice_fails() {
        let mut dom = Dom::new();
        let host = dom.create_element("div");
        dom.attach_shadow(host, ShadowMode::Closed).unwrap();
        let err = dom.attach_shadow(host, ShadowMode::Open).unwrap_err();
        assert!(matches!(err, DomError::ShadowRootExists));
    }

    #[test]
    fn attach_shadow_on_leaf_fails() {
        let mut dom = Dom::new();
        let text = dom.create_text_node("hi");
        assert!(matches!(
            dom.attach_shadow(text, ShadowMode::Open),
            Err(DomError::NotAnElement)
        ));
    }

    fn shadow_with_slot(dom: &mut Dom, slot_name: Option<&str>) -> (NodeId, NodeId) {
        let host = dom.create_element("div");
        let root = dom.attach_shadow(host, ShadowMode::Open).unwrap();
        let slot = dom.create_element("slot");
        if let Some(name) = slot_name {
            dom.set_attribute(slot, "name", name);
        }
        dom.append_child(root, slot);
        (host, slot)
    }

    #[test]
    fn assigned_nodes_named_slot() {
        let mut dom = Dom::new();
        let (host, slot) = shadow_with_slot(&mut dom, Some("title"));

        let titled = dom.create_element("h1");
        dom.set_attribute(titled, "slot", "title");
        let plain = dom.create_element("p");
        let text = dom.create_text_node("loose");
        dom.append_child(host, titled);
        dom.append_child(host, plain);
        dom.append_child(host, text);

        assert_eq!(dom.assigned_nodes(slot).unwrap(), vec![titled]);
    }

    #[test]
    fn assigned_nodes_unnamed_slot_collects_unslotted() {
        let mut dom = Dom::new();
        let (host, slot) = shadow_with_slot(&mut dom, None);

        let titled = dom.create_element("h1");
        dom.set_attribute(titled, "slot", "title");
        let plain = dom.create_element("p");
        let text = dom.create_text_node("loose");
        dom.append_child(host, titled);
        dom.append_child(host, plain);
        dom.append_child(host, text);

        assert_eq!(dom.assigned_nodes(slot).unwrap(), vec![plain, text]);
    }

    #[test]
    fn assigned_nodes_without_host_is_empty() {
        let mut dom = Dom::new();
        let slot = dom.create_element("slot");
        assert!(dom.assigned_nodes(slot).unwrap().is_empty());
    }

    #[test]
    fn assigned_nodes_on_non_slot_fails() {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        assert!(matches!(dom.assigned_nodes(div), Err(DomError::NotASlot)));
    }

    #[test]
    fn sheet_only_on_style_elements() {
        let mut dom = Dom::new();
        let style = dom.create_element("style");
        let div = dom.create_element("div");

        assert!(dom.sheet(div).is_none());

        let sheet = dom.sheet(style).unwrap();
        sheet.insert_rule("body { margin: 0 }", 0);
        // Cached across accesses.
        assert_eq!(dom.sheet(style).unwrap().len(), 1);
    }
}
