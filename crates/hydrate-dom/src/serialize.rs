//! Deterministic HTML dump
//!
//! One node per line, two-space indentation, sorted attributes and
//! JSON-quoted text. Not real HTML; meant for comparing trees in tests.

use serde_json::Value;

use crate::{DomTree, ElementData, NodeData, NodeId, MATHML_NS, SVG_NS, XLINK_NS};

/// Serialize `node` and its descendants.
///
/// A fragment passed in directly serializes its children at the top
/// level. A fragment found below that is not a valid child and is
/// written as `INVALID NODE TYPE 11`.
pub fn to_html(tree: &DomTree, node: NodeId) -> String {
    let mut html = String::new();
    match tree.get(node).map(|n| &n.data) {
        Some(NodeData::Fragment) => serialize_children(tree, node, "", &mut html),
        _ => serialize_node(tree, node, "", &mut html),
    }
    html
}

fn serialize_node(tree: &DomTree, id: NodeId, indent: &str, html: &mut String) {
    let Some(node) = tree.get(id) else {
        tracing::warn!("Invalid node id {:?} in to_html", id);
        return;
    };

    match &node.data {
        NodeData::Element(element) => serialize_element(tree, id, element, indent, html),
        NodeData::Text(text) => {
            html.push_str(indent);
            html.push_str(&json_quote(text));
            html.push('\n');
        }
        NodeData::Comment(comment) => {
            html.push_str(indent);
            html.push_str("<!--");
            html.push_str(&json_quote(comment));
            html.push_str("-->\n");
        }
        NodeData::Fragment => {
            tracing::warn!("Nested fragment {:?} in to_html", id);
            html.push_str(indent);
            html.push_str("INVALID NODE TYPE 11\n");
        }
    }
}

fn serialize_element(
    tree: &DomTree,
    id: NodeId,
    element: &ElementData,
    indent: &str,
    html: &mut String,
) {
    let prefix = match element.namespace.as_deref() {
        Some(SVG_NS) => "svg:",
        Some(MATHML_NS) => "math:",
        _ => "",
    };

    html.push_str(indent);
    html.push('<');
    html.push_str(prefix);
    html.push_str(&element.tag_name);

    let mut attrs: Vec<String> = element.attrs.iter()
        .map(|attr| {
            let name = match &attr.namespace {
                Some(ns) => format!("{}:{}", ns, attr.local_name),
                None if attr.name == "xlink:href" => format!("{}:href", XLINK_NS),
                None => attr.name.clone(),
            };
            format!(" {}=\"{}\"", name, attr.value)
        })
        .collect();
    attrs.sort();
    for attr in &attrs {
        html.push_str(attr);
    }
    html.push_str(">\n");

    let child_indent = format!("{}  ", indent);
    // The namespace prefix is part of the compared name, so `svg:textarea` has children
    if prefix.is_empty() && element.tag_name.eq_ignore_ascii_case("textarea") {
        html.push_str(&child_indent);
        html.push_str("VALUE: ");
        html.push_str(&json_quote(element.value.as_deref().unwrap_or("")));
        html.push('\n');
    } else {
        serialize_children(tree, id, &child_indent, html);
    }
}

fn serialize_children(tree: &DomTree, parent: NodeId, indent: &str, html: &mut String) {
    for (child, _) in tree.children(parent) {
        serialize_node(tree, child, indent, html);
    }
}

fn json_quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
