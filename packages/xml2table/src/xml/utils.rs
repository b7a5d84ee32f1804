//! XML utility functions for navigating DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml2table::xml::get_tag_name;
///
/// let xml = r#"<ns:root xmlns:ns="urn:x"><item/></ns:root>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "root");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the tag name in Clark notation (`{uri}local`), the form a
/// namespace prefix is written in.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml2table::xml::qualified_name;
///
/// let xml = r#"<root xmlns="urn:x"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(qualified_name(doc.root_element()), "{urn:x}root");
/// ```
pub fn qualified_name(node: Node<'_, '_>) -> String {
    let name = node.tag_name();
    match name.namespace() {
        Some(ns) => format!("{{{ns}}}{}", name.name()),
        None => name.name().to_string(),
    }
}

/// Get all element children of a node.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml2table::xml::element_children;
///
/// let xml = r#"<root>text<a/><!-- c --><b/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(element_children(doc.root_element()).count(), 2);
/// ```
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Check if a node is an element with the given local or Clark name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && (get_tag_name(node) == tag || qualified_name(node) == tag)
}

/// Render an indented outline of the element tree below `node`.
///
/// Each element is printed on its own line in Clark notation, indented by
/// four spaces per level. Elements deeper than `max_level` are left out.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml2table::xml::outline;
///
/// let doc = Document::parse("<a><b><c/></b><d/></a>").unwrap();
/// assert_eq!(outline(doc.root_element(), 2), "a\n    b\n    d\n");
/// ```
pub fn outline(node: Node<'_, '_>, max_level: usize) -> String {
    let mut out = String::new();
    write_outline(node, 0, max_level, &mut out);
    out
}

fn write_outline(node: Node<'_, '_>, indent: usize, remaining: usize, out: &mut String) {
    if remaining == 0 {
        return;
    }
    out.push_str(&" ".repeat(indent));
    out.push_str(&qualified_name(node));
    out.push('\n');
    for child in element_children(node) {
        write_outline(child, indent + 4, remaining - 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:root xmlns:ns="http://example.com"><ns:child/></ns:root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "root");
        assert_eq!(
            qualified_name(doc.root_element()),
            "{http://example.com}root"
        );
    }

    #[test]
    fn test_has_tag() {
        let xml = r#"<item xmlns="urn:shop"/>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert!(has_tag(root, "item"));
        assert!(has_tag(root, "{urn:shop}item"));
        assert!(!has_tag(root, "other"));
    }

    #[test]
    fn test_outline_levels() {
        let doc = Document::parse("<a><b><c/></b></a>").unwrap();
        assert_eq!(outline(doc.root_element(), 0), "");
        assert_eq!(outline(doc.root_element(), 1), "a\n");
        assert_eq!(
            outline(doc.root_element(), usize::MAX),
            "a\n    b\n        c\n"
        );
    }
}
