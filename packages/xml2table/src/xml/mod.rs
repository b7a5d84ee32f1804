//! XML navigation and path evaluation.

mod evaluator;
mod utils;

use roxmltree::{Document, Node};

pub use evaluator::{to_xpath, CompiledPath, MatchValue, PathEvaluator, XPathEvaluator};
pub use utils::{element_children, get_tag_name, has_tag, outline, qualified_name};

use crate::error::{Result, Xml2TableError};

/// Locate the element whose children become table rows.
///
/// An empty query selects the document's root element. Otherwise the query
/// is evaluated relative to the root element and the first matched element
/// is used.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml2table::xml::{resolve_data_root, XPathEvaluator};
///
/// let xml = "<export><meta/><records><r/><r/></records></export>";
/// let doc = Document::parse(xml).unwrap();
/// let evaluator = XPathEvaluator::new(&doc).unwrap();
/// let root = resolve_data_root(&doc, &evaluator, "records").unwrap();
/// assert_eq!(root.tag_name().name(), "records");
/// assert!(resolve_data_root(&doc, &evaluator, "missing").is_err());
/// ```
pub fn resolve_data_root<'a, 'input>(
    doc: &'a Document<'input>,
    evaluator: &XPathEvaluator,
    query: &str,
) -> Result<Node<'a, 'input>> {
    let root = doc.root_element();
    if query.trim().is_empty() {
        return Ok(root);
    }

    let compiled = evaluator.compile(query)?;
    evaluator
        .select_element(&compiled, root)?
        .ok_or_else(|| Xml2TableError::RootNotFound {
            query: query.to_string(),
        })
}
