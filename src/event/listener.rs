//! Listener storage: registration order, identity removal, reverse-order
//! invocation.
//!
//! Listeners are shared closures (`Rc<dyn Fn>`). Registration appends with no
//! dedup; removal matches by `Rc` identity and takes the most recently added
//! match. Invocation runs newest-first — a deliberate, reproducible contract
//! that server-side output depends on when several handlers mutate shared
//! state.

use std::collections::HashMap;
use std::rc::Rc;

use super::event::Event;

/// A registered event handler.
///
/// Returning `false` marks the event default-prevented, provided the event is
/// cancelable. Handlers that don't care should return `true`.
pub type Listener = Rc<dyn Fn(&mut Event) -> bool>;

/// Per-target listener table, keyed by lower-cased event type.
#[derive(Default)]
pub struct ListenerMap {
    handlers: HashMap<String, Vec<Listener>>,
}

impl ListenerMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for the given type. Duplicate registrations are kept.
    pub fn add(&mut self, event_type: &str, listener: Listener) {
        self.handlers
            .entry(event_type.to_ascii_lowercase())
            .or_default()
            .push(listener);
    }

    /// Remove the most recently added listener with the same identity.
    ///
    /// No-op if the listener was never registered for this type.
    pub fn remove(&mut self, event_type: &str, listener: &Listener) {
        if let Some(list) = self.handlers.get_mut(&event_type.to_ascii_lowercase()) {
            if let Some(i) = list.iter().rposition(|l| Rc::ptr_eq(l, listener)) {
                list.remove(i);
            }
        }
    }

    /// Snapshot of the listeners registered for a (lower-cased) type, in
    /// registration order.
    pub fn get(&self, event_type: &str) -> Vec<Listener> {
        self.handlers
            .get(&event_type.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Whether any listener is registered for the type.
    pub fn has(&self, event_type: &str) -> bool {
        self.handlers
            .get(&event_type.to_ascii_lowercase())
            .is_some_and(|list| !list.is_empty())
    }
}

impl std::fmt::Debug for ListenerMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (event_type, list) in &self.handlers {
            map.entry(event_type, &list.len());
        }
        map.finish()
    }
}

/// Run one level's listeners against the event, newest-registered first.
///
/// A listener returning `false`, or the immediate-stop flag being raised
/// during its run, latches `default_prevented` when the event is cancelable.
/// The immediate-stop flag also ends the level at once.
pub(crate) fn invoke_level(listeners: &[Listener], event: &mut Event) {
    for listener in listeners.iter().rev() {
        let kept_default = listener(event);
        if (!kept_default || event.immediate_propagation_stopped()) && event.cancelable {
            event.default_prevented = true;
        }
        if event.immediate_propagation_stopped() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn noop() -> Listener {
        Rc::new(|_| true)
    }

    #[test]
    fn add_and_get() {
        let mut map = ListenerMap::new();
        map.add("click", noop());
        assert_eq!(map.get("click").len(), 1);
        assert!(map.has("click"));
        assert!(!map.has("keydown"));
    }

    #[test]
    fn type_is_case_insensitive() {
        let mut map = ListenerMap::new();
        map.add("Click", noop());
        assert!(map.has("click"));
        assert!(map.has("CLICK"));
    }

    #[test]
    fn duplicate_registration_is_kept() {
        let mut map = ListenerMap::new();
        let listener = noop();
        map.add("click", listener.clone());
        map.add("click", listener);
        assert_eq!(map.get("click").len(), 2);
    }

    #[test]
    fn remove_by_identity() {
        let mut map = ListenerMap::new();
        let a = noop();
        let b = noop();
        map.add("click", a.clone());
        map.add("click", b.clone());
        map.remove("click", &a);
        let left = map.get("click");
        assert_eq!(left.len(), 1);
        assert!(Rc::ptr_eq(&left[0], &b));
    }

    #[test]
    fn remove_takes_newest_duplicate() {
        let mut map = ListenerMap::new();
        let listener = noop();
        map.add("click", listener.clone());
        map.add("click", listener.clone());
        map.remove("click", &listener);
        assert_eq!(map.get("click").len(), 1);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut map = ListenerMap::new();
        map.add("click", noop());
        map.remove("click", &noop());
        assert_eq!(map.get("click").len(), 1);
    }

    #[test]
    fn invoke_runs_newest_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut map = ListenerMap::new();
        for tag in ["first", "second"] {
            let order = order.clone();
            map.add(
                "click",
                Rc::new(move |_| {
                    order.borrow_mut().push(tag);
                    true
                }),
            );
        }

        let mut event = Event::new("click");
        invoke_level(&map.get("click"), &mut event);
        assert_eq!(*order.borrow(), vec!["second", "first"]);
    }

    #[test]
    fn false_return_prevents_default_when_cancelable() {
        let mut map = ListenerMap::new();
        map.add("click", Rc::new(|_| false));

        let mut event = Event::new("click").cancelable(true);
        invoke_level(&map.get("click"), &mut event);
        assert!(event.default_prevented);
    }

    #[test]
    fn false_return_ignored_when_not_cancelable() {
        let mut map = ListenerMap::new();
        map.add("click", Rc::new(|_| false));

        let mut event = Event::new("click");
        invoke_level(&map.get("click"), &mut event);
        assert!(!event.default_prevented);
    }

    #[test]
    fn immediate_stop_skips_remaining_listeners() {
        let calls = Rc::new(RefCell::new(0));
        let mut map = ListenerMap::new();
        {
            let calls = calls.clone();
            map.add(
                "click",
                Rc::new(move |_| {
                    *calls.borrow_mut() += 1;
                    true
                }),
            );
        }
        {
            let calls = calls.clone();
            // Registered last, so it runs first.
            map.add(
                "click",
                Rc::new(move |event: &mut Event| {
                    *calls.borrow_mut() += 1;
                    event.stop_immediate_propagation();
                    true
                }),
            );
        }

        let mut event = Event::new("click");
        invoke_level(&map.get("click"), &mut event);
        assert_eq!(*calls.borrow(), 1);
    }
}
