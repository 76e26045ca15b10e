//! The rendering environment: the window stand-in.
//!
//! An [`Environment`] bundles everything the historical implementation kept
//! in process-wide globals: the document tree, the window-level event
//! listeners, the ready state, the fragment parser, and the history/location
//! stand-ins. Construct one per logical render — concurrent renders must not
//! share an environment, and with this shape they have no reason to.

pub mod history;
pub mod location;

pub use history::{History, HistoryEntry};
pub use location::Location;

use tracing::debug;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::listener::{invoke_level, Listener, ListenerMap};
use crate::event::Event;
use crate::html::{FragmentParser, HtmlParser};

/// Document readiness, advanced during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadyState::Loading => "loading",
            ReadyState::Interactive => "interactive",
            ReadyState::Complete => "complete",
        }
    }
}

/// A fully bootstrapped rendering environment.
pub struct Environment {
    dom: Dom,
    parser: Box<dyn FragmentParser>,
    listeners: ListenerMap,
    history: History,
    location: Location,
    ready_state: ReadyState,
}

impl Environment {
    /// Create an environment with the built-in fragment parser.
    pub fn new() -> Self {
        Self::with_parser(Box::new(HtmlParser::new()))
    }

    /// Create an environment with a caller-supplied fragment parser.
    ///
    /// Bootstrap runs the historical load sequence: ready state advances to
    /// interactive, `DOMContentLoaded` is dispatched on the document, ready
    /// state advances to complete, and `load` is dispatched on the window.
    /// Listeners registered later never see these events, exactly as in a
    /// real page load.
    pub fn with_parser(parser: Box<dyn FragmentParser>) -> Self {
        let mut env = Self {
            dom: Dom::new(),
            parser,
            listeners: ListenerMap::new(),
            history: History::new(),
            location: Location::default(),
            ready_state: ReadyState::Loading,
        };
        env.bootstrap();
        env
    }

    fn bootstrap(&mut self) {
        debug!("bootstrapping environment");

        self.ready_state = ReadyState::Interactive;
        let document = self.dom.document();
        let mut content_loaded = Event::new("DOMContentLoaded");
        self.dom.dispatch_event(document, &mut content_loaded);

        self.ready_state = ReadyState::Complete;
        let mut load = Event::new("load");
        self.dispatch_event(&mut load);
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The document tree.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access to the document tree.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// The document node id.
    pub fn document(&self) -> NodeId {
        self.dom.document()
    }

    /// Current readiness.
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// The current location.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The session history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The fragment parser in use.
    pub fn parser(&self) -> &dyn FragmentParser {
        self.parser.as_ref()
    }

    /// Replace an element's children from an HTML string using this
    /// environment's parser.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) {
        self.dom.set_inner_html(id, html, self.parser.as_ref());
    }

    // ── Window-level events ──────────────────────────────────────────
    //
    // The window implements the same per-level algorithm as an element; it
    // just has no ancestors to bubble to.

    /// Register a window-level listener.
    pub fn add_event_listener(&mut self, event_type: &str, listener: Listener) {
        self.listeners.add(event_type, listener);
    }

    /// Remove a window-level listener by identity.
    pub fn remove_event_listener(&mut self, event_type: &str, listener: &Listener) {
        self.listeners.remove(event_type, listener);
    }

    /// Dispatch an event on the window. Returns whether any handler was
    /// found.
    pub fn dispatch_event(&mut self, event: &mut Event) -> bool {
        let listeners = self.listeners.get(event.event_type());
        invoke_level(&listeners, event);
        !listeners.is_empty()
    }

    // ── History navigation ───────────────────────────────────────────

    /// Push a history entry and update the location. No `popstate` fires —
    /// only traversal dispatches it.
    pub fn push_state(&mut self, state: Option<String>, title: Option<String>, url: &str) {
        self.history.push(state, title, url);
        self.location.set_url(url);
    }

    /// Replace the current history entry and update the location.
    pub fn replace_state(&mut self, state: Option<String>, title: Option<String>, url: &str) {
        self.history.replace(state, title, url);
        self.location.set_url(url);
    }

    /// Traverse one entry back, syncing the location and dispatching
    /// `popstate` on the window.
    pub fn back(&mut self) {
        let moved = self.history.back().map(|entry| entry.url.clone());
        if let Some(url) = moved {
            self.after_traversal(&url);
        }
    }

    /// Traverse one entry forward, syncing the location and dispatching
    /// `popstate`.
    pub fn forward(&mut self) {
        let moved = self.history.forward().map(|entry| entry.url.clone());
        if let Some(url) = moved {
            self.after_traversal(&url);
        }
    }

    /// Traverse by a signed offset, clamped at either end. Dispatches
    /// `popstate` only when the cursor actually moved.
    pub fn go(&mut self, delta: i32) {
        let moved = self.history.go(delta).map(|entry| entry.url.clone());
        if let Some(url) = moved {
            self.after_traversal(&url);
        }
    }

    fn after_traversal(&mut self, url: &str) {
        self.location.set_url(url);
        let mut popstate = Event::new("popstate");
        if let Some(state) = self.history.state() {
            popstate.detail = Some(state.to_owned());
        }
        self.dispatch_event(&mut popstate);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("ready_state", &self.ready_state)
            .field("location", &self.location)
            .field("history_len", &self.history.len())
            .field("nodes", &self.dom.len())
            .finish()
    }
}
