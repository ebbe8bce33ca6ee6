//! Debug serializer tests for hydrate-dom
//!
//! Covers namespaces, attribute normalization, fragments and the textarea
//! special case.

use hydrate_dom::{to_html, AttrValue, DomTree, MATHML_NS, SVG_NS, XLINK_NS};

// ============================================================================
// ATTRIBUTES
// ============================================================================

#[test]
fn test_empty_string_attribute_is_present() {
    let mut tree = DomTree::new();
    let option = tree.create_element("option", [("selected", "")]);

    let element = tree.element(option).unwrap();
    assert!(element.has_attribute("selected"));
    assert!(element.has_attribute_ns("", "selected"));
    assert_eq!(to_html(&tree, option), "<option selected=\"\">\n");
}

#[test]
fn test_boolean_attributes() {
    let mut tree = DomTree::new();
    let input = tree.create_element(
        "input",
        [("checked", AttrValue::Bool(true)), ("disabled", AttrValue::Bool(false))],
    );

    let element = tree.element(input).unwrap();
    assert!(element.has_attribute("checked"));
    assert!(!element.has_attribute("disabled"));
    assert_eq!(to_html(&tree, input), "<input checked=\"\">\n");
}

#[test]
fn test_xlink_href_without_namespace() {
    let mut tree = DomTree::new();
    let svg = tree.create_element_ns(SVG_NS, "svg", Vec::<(&str, &str)>::new());
    let using = tree.create_element_ns(SVG_NS, "use", [("xlink:href", "#a")]);
    tree.append_child(svg, using).unwrap();

    assert_eq!(
        to_html(&tree, svg),
        "<svg:svg>\n  <svg:use http://www.w3.org/1999/xlink:href=\"#a\">\n"
    );
}

#[test]
fn test_namespaced_attribute() {
    let mut tree = DomTree::new();
    let using = tree.create_element_ns(SVG_NS, "use", Vec::<(&str, &str)>::new());
    tree.set_attribute_ns(using, XLINK_NS, "xlink:href", "#b").unwrap();

    let element = tree.element(using).unwrap();
    assert!(element.has_attribute_ns(XLINK_NS, "href"));
    assert!(!element.has_attribute_ns("", "href"));
    assert_eq!(
        to_html(&tree, using),
        format!("<svg:use {}:href=\"#b\">\n", XLINK_NS)
    );
}

// ============================================================================
// NODE KINDS
// ============================================================================

#[test]
fn test_nested_tree() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div", [("id", "c1-root")]);
    let span = tree.create_element("span", Vec::<(&str, &str)>::new());
    let text = tree.create_text("Hello");
    let comment = tree.create_comment("marker");
    tree.append_child(div, span).unwrap();
    tree.append_child(span, text).unwrap();
    tree.append_child(div, comment).unwrap();

    assert_eq!(
        to_html(&tree, div),
        "<div id=\"c1-root\">\n  <span>\n    \"Hello\"\n  <!--\"marker\"-->\n"
    );
}

#[test]
fn test_math_prefix() {
    let mut tree = DomTree::new();
    let math = tree.create_element_ns(MATHML_NS, "math", Vec::<(&str, &str)>::new());
    assert_eq!(to_html(&tree, math), "<math:math>\n");
}

#[test]
fn test_textarea_prints_value() {
    let mut tree = DomTree::new();
    let textarea = tree.create_element("textarea", [("name", "bio")]);
    let ignored = tree.create_text("ignored");
    tree.append_child(textarea, ignored).unwrap();
    tree.set_value(textarea, "line1\nline2").unwrap();

    assert_eq!(
        to_html(&tree, textarea),
        "<textarea name=\"bio\">\n  VALUE: \"line1\\nline2\"\n"
    );
}

#[test]
fn test_fragment_children_at_top_level() {
    let mut tree = DomTree::new();
    let fragment = tree.create_fragment();
    let a = tree.create_element("a", Vec::<(&str, &str)>::new());
    let b = tree.create_text("b");
    tree.append_child(fragment, a).unwrap();
    tree.append_child(fragment, b).unwrap();

    assert_eq!(to_html(&tree, fragment), "<a>\n\"b\"\n");
}

#[test]
fn test_nested_fragment_is_invalid() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div", Vec::<(&str, &str)>::new());
    let fragment = tree.create_fragment();
    let lost = tree.create_text("lost");
    tree.append_child(fragment, lost).unwrap();
    tree.append_child(div, fragment).unwrap();

    assert_eq!(to_html(&tree, div), "<div>\n  INVALID NODE TYPE 11\n");
}

#[test]
fn test_svg_textarea_prints_children() {
    let mut tree = DomTree::new();
    let textarea = tree.create_element_ns(SVG_NS, "textArea", Vec::<(&str, &str)>::new());
    let text = tree.create_text("shown");
    tree.append_child(textarea, text).unwrap();
    tree.set_value(textarea, "hidden").unwrap();

    assert_eq!(to_html(&tree, textarea), "<svg:textArea>\n  \"shown\"\n");
}
