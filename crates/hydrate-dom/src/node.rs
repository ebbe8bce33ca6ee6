//! DOM Node

use crate::{AttributeList, NodeId};

/// DOM Node - links into the arena plus node-specific data
#[derive(Debug)]
pub struct Node {
    pub parent: NodeId,
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this node may have children
    pub fn is_container(&self) -> bool {
        matches!(self.data, NodeData::Element(_) | NodeData::Fragment)
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document fragment
    Fragment,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    pub tag_name: String,
    /// `None` for HTML elements
    pub namespace: Option<String>,
    pub attrs: AttributeList,
    /// Form control value (`textarea`)
    pub value: Option<String>,
}

impl ElementData {
    pub fn new(tag_name: &str, namespace: Option<&str>) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            attrs: AttributeList::new(),
            value: None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.has(name)
    }

    pub fn has_attribute_ns(&self, namespace: &str, local_name: &str) -> bool {
        self.attrs.has_ns(namespace, local_name)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }
}
