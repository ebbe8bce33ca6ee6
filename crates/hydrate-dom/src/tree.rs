//! DOM Tree (arena-based allocation)

use crate::{AttrValue, DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create an HTML element with attributes
    pub fn create_element<V: Into<AttrValue>>(
        &mut self,
        tag_name: &str,
        attrs: impl IntoIterator<Item = (&'static str, V)>,
    ) -> NodeId {
        self.create_element_ns("", tag_name, attrs)
    }

    /// Create an element in a namespace (`""` for HTML)
    pub fn create_element_ns<V: Into<AttrValue>>(
        &mut self,
        namespace: &str,
        tag_name: &str,
        attrs: impl IntoIterator<Item = (&'static str, V)>,
    ) -> NodeId {
        let mut element = ElementData::new(tag_name, Some(namespace));
        for (name, value) in attrs {
            element.attrs.set(name, value);
        }
        self.push(Node::new(NodeData::Element(element)))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Text(content.to_string())))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Comment(content.to_string())))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.push(Node::new(NodeData::Fragment))
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Get element data by ID
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if parent == child {
            return Err(DomError::HierarchyRequest);
        }
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        if !parent_node.is_container() {
            return Err(DomError::HierarchyRequest);
        }
        let prev_last = parent_node.last_child;
        let child_node = self.get_mut(child).ok_or(DomError::NotFound)?;
        if child_node.parent.is_valid() {
            return Err(DomError::HierarchyRequest);
        }
        child_node.parent = parent;

        if prev_last.is_valid() {
            if let Some(prev) = self.get_mut(prev_last) {
                prev.next_sibling = child;
            }
        }
        if let Some(parent_node) = self.get_mut(parent) {
            if !parent_node.first_child.is_valid() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
        Ok(())
    }

    /// Set an attribute on an element
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> DomResult<()> {
        let element = self.element_mut(id).ok_or(DomError::NotFound)?;
        element.attrs.set(name, value);
        Ok(())
    }

    /// Set a namespaced attribute on an element
    pub fn set_attribute_ns(
        &mut self,
        id: NodeId,
        namespace: &str,
        qualified_name: &str,
        value: impl Into<AttrValue>,
    ) -> DomResult<()> {
        let element = self.element_mut(id).ok_or(DomError::NotFound)?;
        element.attrs.set_ns(namespace, qualified_name, value);
        Ok(())
    }

    /// Set the value of a form control
    pub fn set_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        let element = self.element_mut(id).ok_or(DomError::NotFound)?;
        element.value = Some(value.to_string());
        Ok(())
    }

    /// Iterate over children of a node
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        let mut current = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::from_fn(move || {
            let node = self.get(current)?;
            let id = current;
            current = node.next_sibling;
            Some((id, node))
        })
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_iterate() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul", Vec::<(&str, &str)>::new());
        let a = tree.create_element("li", [("class", "a")]);
        let b = tree.create_text("b");
        tree.append_child(ul, a).unwrap();
        tree.append_child(ul, b).unwrap();

        let ids: Vec<_> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(ids, [a, b]);
    }

    #[test]
    fn test_text_cannot_have_children() {
        let mut tree = DomTree::new();
        let text = tree.create_text("x");
        let span = tree.create_element("span", Vec::<(&str, &str)>::new());
        assert_eq!(tree.append_child(text, span), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(span, span), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_child_appended_once() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div", Vec::<(&str, &str)>::new());
        let b = tree.create_element("div", Vec::<(&str, &str)>::new());
        let c = tree.create_element("span", Vec::<(&str, &str)>::new());
        tree.append_child(a, c).unwrap();
        assert_eq!(tree.append_child(b, c), Err(DomError::HierarchyRequest));
    }
}
