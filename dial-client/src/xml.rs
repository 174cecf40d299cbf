//! Namespace-agnostic lookups on parsed XML documents.
//!
//! DIAL servers are inconsistent about namespaces and nesting, so elements are
//! matched by local name anywhere in the tree, first match in document order.

use xmltree::{Element, XMLNode};

/// Find the first element named `name`, starting with `root` itself.
pub fn find_first<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    if root.name == name {
        return Some(root);
    }

    root.children.iter().find_map(|node| match node {
        XMLNode::Element(child) => find_first(child, name),
        _ => None,
    })
}

/// Text content of the first element named `name`, or an empty string when
/// the element is absent or has no text.
pub fn text_of(root: &Element, name: &str) -> String {
    find_first(root, name)
        .and_then(|element| element.get_text())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
