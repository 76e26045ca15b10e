//! Event dispatch: the bubbling algorithm.
//!
//! Dispatch walks from the target up through `parent` links. The same
//! per-level invocation (see [`crate::event::listener`]) is shared with the
//! window-level dispatch on [`crate::env::Environment`], so both targets obey
//! one contract.

use super::event::Event;
use super::listener::invoke_level;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

impl Dom {
    /// Dispatch an event at `target`.
    ///
    /// The target's own handlers for the event's (lower-cased) type always
    /// run, newest-registered first. When the event bubbles and propagation
    /// has not been stopped, the walk continues through the ancestors,
    /// setting `current_target` at each level and applying the same rules:
    /// a handler returning `false` (or raising the immediate-stop flag)
    /// latches `default_prevented` for cancelable events, and the stop flags
    /// end propagation cooperatively.
    ///
    /// Returns whether any handler was found anywhere along the path.
    pub fn dispatch_event(&self, target: NodeId, event: &mut Event) -> bool {
        event.target = Some(target);

        let event_type = event.event_type().to_ascii_lowercase();
        let mut found = false;
        let mut current = Some(target);

        while let Some(node) = current {
            event.current_target = Some(node);

            let listeners = self
                .get(node)
                .and_then(|n| n.element())
                .map(|data| data.listeners.get(&event_type))
                .unwrap_or_default();
            if !listeners.is_empty() {
                found = true;
            }
            invoke_level(&listeners, event);

            if !event.bubbles || event.propagation_stopped() {
                break;
            }
            current = self.parent(node);
        }

        found
    }
}
