//! Hydrate DOM - Virtual DOM for tests
//!
//! A small arena-based node tree with namespaced attributes, and a
//! deterministic HTML dump used to compare rendered output in tests.

mod attributes;
mod node;
mod serialize;
mod tree;

pub use attributes::{Attr, AttrValue, AttributeList};
pub use node::{ElementData, Node, NodeData};
pub use serialize::to_html;
pub use tree::DomTree;

/// SVG namespace
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// MathML namespace
pub const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";
/// XLink namespace
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// No node
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found")]
    NotFound,

    #[error("Hierarchy request error")]
    HierarchyRequest,
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;
