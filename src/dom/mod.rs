//! DOM arena: slotmap-backed node tree with element operations and queries.

pub mod element;
pub mod node;
pub mod query;
pub mod tree;

pub use node::{Attribute, ElementData, Node, NodeId, NodeKind, ShadowMode};
pub use query::TreeWalker;
pub use tree::Dom;
