//! Event system: the event value object, listener storage, bubbling dispatch.

pub mod dispatch;
pub mod event;
pub mod listener;

pub use event::Event;
pub use listener::{Listener, ListenerMap};
