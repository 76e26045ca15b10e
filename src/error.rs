//! Crate-wide error type.
//!
//! Only invariant violations surface as errors (see [`DomError`]); absent
//! lookups return `Option`/empty collections, and structural misuse of the
//! tree operations silently no-ops.

/// Errors raised by DOM operations that fail fast.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// `attach_shadow` was called on a host that already hosts a shadow tree.
    #[error("shadow root cannot be created on a host which already hosts a shadow tree")]
    ShadowRootExists,

    /// `assigned_nodes` was called on an element that is not a `<slot>`.
    #[error("assigned_nodes called on non-slot element")]
    NotASlot,

    /// An element-only operation was invoked on a text or comment node, or on
    /// a stale id.
    #[error("operation requires an element-like node")]
    NotAnElement,

    /// `define` was called with a name already present in the registry.
    #[error("the name `{0}` has already been used with this registry")]
    DuplicateName(String),

    /// `define` was called with a definition already registered under another
    /// name.
    #[error("this definition has already been used with this registry")]
    DuplicateDefinition,
}
