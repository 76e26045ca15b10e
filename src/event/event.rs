//! The event value object and its propagation flags.

use crate::dom::node::NodeId;

/// A dispatchable event.
///
/// An `Event` is a transient carrier of propagation state: it is created,
/// dispatched once via [`crate::dom::tree::Dom::dispatch_event`] (or the
/// window-level equivalent on [`crate::env::Environment`]), and then
/// discarded. The stop/prevent flags are one-way latches.
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    /// Whether the event propagates up through ancestors after the target.
    pub bubbles: bool,
    /// Whether handlers may mark the event as default-prevented.
    pub cancelable: bool,
    /// Optional payload, carried verbatim (the `CustomEvent` detail).
    pub detail: Option<String>,
    /// Set to the dispatch target by `dispatch_event`.
    pub target: Option<NodeId>,
    /// The node whose handlers are currently running.
    pub current_target: Option<NodeId>,
    /// Latched by a handler returning `false` (or by `prevent_default`) when
    /// the event is cancelable.
    pub default_prevented: bool,
    stopped: bool,
    stopped_immediate: bool,
}

impl Event {
    /// Create a non-bubbling, non-cancelable event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: false,
            cancelable: false,
            detail: None,
            target: None,
            current_target: None,
            default_prevented: false,
            stopped: false,
            stopped_immediate: false,
        }
    }

    /// Set whether the event bubbles (builder).
    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Set whether the event is cancelable (builder).
    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Attach a detail payload (builder).
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The event type as given at construction.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Stop propagation to further ancestors. Handlers already scheduled on
    /// the current node still run.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Stop propagation immediately: no further handlers run, on this node or
    /// any ancestor.
    pub fn stop_immediate_propagation(&mut self) {
        self.stopped = true;
        self.stopped_immediate = true;
    }

    /// Mark the event default-prevented.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether `stop_propagation` (or the immediate variant) was called.
    pub fn propagation_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether `stop_immediate_propagation` was called.
    pub fn immediate_propagation_stopped(&self) -> bool {
        self.stopped_immediate
    }
}
