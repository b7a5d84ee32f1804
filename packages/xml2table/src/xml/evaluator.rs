//! XPath evaluation against record elements.
//!
//! Records are walked with `roxmltree`; expressions run on a second,
//! `xee-xpath` view of the same text. The two trees are joined by element
//! position, which both parsers agree on.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use roxmltree::{Document, Node};
use xee_xpath::query::SequenceQuery;
use xee_xpath::{Documents, Item, Queries, Query};
use xot::{Value, Xot};

use super::utils::element_children;
use crate::error::{Result, Xml2TableError};

/// One value matched by a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchValue {
    /// A matched element and its leading text, if any.
    Element(Option<String>),

    /// A matched attribute value, text node or atomic value.
    String(String),

    /// A matched item that carries no cell value (comment, processing
    /// instruction, document root, function).
    Unsupported(String),
}

/// Capability to select values below a record element.
///
/// Expressions are compiled once per extraction and evaluated once per
/// record; compilation and evaluation failures are configuration errors.
pub trait PathEvaluator {
    /// Compiled form of an expression.
    type Compiled;

    /// Compile an expression.
    fn compile(&self, expression: &str) -> Result<Self::Compiled>;

    /// Evaluate a compiled expression relative to `node`.
    fn evaluate(&self, compiled: &Self::Compiled, node: Node<'_, '_>) -> Result<Vec<MatchValue>>;
}

// Clark names (`{uri}local`, `{*}local`) outside string literals
#[allow(clippy::expect_used)] // Static regex pattern that is guaranteed to be valid
static CLARK_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'[^']*'|"[^"]*"|(Q?)\{([^{}\s'"]*)\}([\p{L}_*])"#).expect("valid regex")
});

/// Rewrite ElementTree-style Clark names into XPath 3.1 names.
///
/// `{uri}item` becomes `Q{uri}item` and `{*}item` becomes `*:item`; string
/// literals and names already written as `Q{uri}item` are left alone.
///
/// # Examples
/// ```
/// use xml2table::xml::to_xpath;
///
/// assert_eq!(to_xpath("{urn:shop}item/@id"), "Q{urn:shop}item/@id");
/// assert_eq!(to_xpath("{*}item"), "*:item");
/// assert_eq!(to_xpath("name[.='{a}b']"), "name[.='{a}b']");
/// ```
pub fn to_xpath(expression: &str) -> Cow<'_, str> {
    CLARK_NAME.replace_all(expression, |caps: &Captures| {
        let (Some(uri), Some(next)) = (caps.get(2), caps.get(3)) else {
            return caps[0].to_string();
        };
        match (&caps[1], uri.as_str()) {
            ("Q", _) => caps[0].to_string(),
            (_, "*") => format!("*:{}", next.as_str()),
            (_, uri) => format!("Q{{{uri}}}{}", next.as_str()),
        }
    })
}

/// An expression compiled into an XPath query.
pub struct CompiledPath {
    expression: String,
    query: SequenceQuery,
}

impl fmt::Debug for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPath")
            .field("expression", &self.expression)
            .finish_non_exhaustive()
    }
}

/// XPath 3.1 evaluator over one loaded document.
///
/// Plain names match elements in no namespace only; namespaced elements are
/// selected with `{uri}name`, `{*}name` or the XPath forms `Q{uri}name` and
/// `*:name`.
pub struct XPathEvaluator {
    documents: RefCell<Documents>,
    root: xot::Node,
}

impl XPathEvaluator {
    /// Load a second view of `doc` for evaluating expressions.
    ///
    /// Only the text from the root element on is loaded; the prolog,
    /// including any DTD, is left out.
    pub fn new(doc: &Document<'_>) -> Result<Self> {
        let text = &doc.input_text()[doc.root_element().range().start..];
        let mut documents = Documents::new();
        #[allow(clippy::expect_used)] // Static URI that is guaranteed to be valid
        let handle = documents
            .add_string("file:///input.xml".try_into().expect("valid URI"), text)
            .map_err(|e| Xml2TableError::XmlLoad(e.to_string()))?;

        let query = Queries::default()
            .sequence("/*")
            .map_err(|e| Xml2TableError::XmlLoad(e.to_string()))?;
        let items = query
            .execute(&mut documents, handle)
            .map_err(|e| Xml2TableError::XmlLoad(e.to_string()))?;
        let root = items
            .iter()
            .find_map(|item| match item {
                Item::Node(node) => Some(node),
                _ => None,
            })
            .ok_or_else(|| Xml2TableError::XmlLoad("document has no root element".to_string()))?;

        Ok(Self {
            documents: RefCell::new(documents),
            root,
        })
    }

    /// First element selected by `compiled` relative to `node`.
    pub fn select_element<'a, 'input>(
        &self,
        compiled: &CompiledPath,
        node: Node<'a, 'input>,
    ) -> Result<Option<Node<'a, 'input>>> {
        let mut documents = self.documents.borrow_mut();
        let items = self.execute(&mut documents, compiled, node)?;
        let xot = documents.xot();

        let selected = items.into_iter().find_map(|item| match item {
            Item::Node(found) if xot.element(found).is_some() => Some(found),
            _ => None,
        });
        Ok(selected.and_then(|found| {
            locate_rox(node.document().root_element(), &xot_element_path(xot, found))
        }))
    }

    fn execute(
        &self,
        documents: &mut Documents,
        compiled: &CompiledPath,
        node: Node<'_, '_>,
    ) -> Result<Vec<Item>> {
        let context = locate_xot(documents.xot(), self.root, &rox_element_path(node))
            .ok_or_else(|| {
                Xml2TableError::invalid_path(
                    &compiled.expression,
                    "context node is not part of the loaded document",
                )
            })?;
        compiled
            .query
            .execute(documents, context)
            .map(|items| items.iter().collect())
            .map_err(|e| Xml2TableError::invalid_path(&compiled.expression, e.to_string()))
    }
}

impl PathEvaluator for XPathEvaluator {
    type Compiled = CompiledPath;

    fn compile(&self, expression: &str) -> Result<CompiledPath> {
        let query = Queries::default()
            .sequence(&to_xpath(expression))
            .map_err(|e| Xml2TableError::invalid_path(expression, e.to_string()))?;
        Ok(CompiledPath {
            expression: expression.to_string(),
            query,
        })
    }

    fn evaluate(&self, compiled: &CompiledPath, node: Node<'_, '_>) -> Result<Vec<MatchValue>> {
        let mut documents = self.documents.borrow_mut();
        let items = self.execute(&mut documents, compiled, node)?;
        let xot = documents.xot();
        Ok(items.into_iter().map(|item| match_value(xot, item)).collect())
    }
}

fn match_value(xot: &Xot, item: Item) -> MatchValue {
    match item {
        Item::Node(node) => node_value(xot, node),
        Item::Atomic(atomic) => MatchValue::String(atomic.to_string().unwrap_or_default()),
        Item::Function(_) => MatchValue::Unsupported("function".to_string()),
    }
}

fn node_value(xot: &Xot, node: xot::Node) -> MatchValue {
    match xot.value(node) {
        Value::Element(_) => MatchValue::Element(
            xot.children(node)
                .next()
                .and_then(|child| xot.text_str(child))
                .map(str::to_string),
        ),
        Value::Text(text) => MatchValue::String(text.get().to_string()),
        Value::Comment(_) => MatchValue::Unsupported("comment".to_string()),
        Value::ProcessingInstruction(_) => {
            MatchValue::Unsupported("processing instruction".to_string())
        }
        Value::Document => MatchValue::Unsupported("document root".to_string()),
        // Attribute and namespace nodes
        _ => MatchValue::String(xot.string_value(node)),
    }
}

/// Element positions from the root element down to `node`.
fn rox_element_path(node: Node<'_, '_>) -> Vec<usize> {
    let mut path: Vec<usize> = node
        .ancestors()
        .take_while(|n| n.parent_element().is_some())
        .map(|n| n.prev_siblings().skip(1).filter(Node::is_element).count())
        .collect();
    path.reverse();
    path
}

fn xot_element_path(xot: &Xot, node: xot::Node) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = node;
    while let Some(parent) = xot.parent(current).filter(|p| xot.element(*p).is_some()) {
        let position = xot
            .children(parent)
            .filter(|child| xot.element(*child).is_some())
            .position(|child| child == current)
            .unwrap_or_default();
        path.push(position);
        current = parent;
    }
    path.reverse();
    path
}

fn locate_rox<'a, 'input>(root: Node<'a, 'input>, path: &[usize]) -> Option<Node<'a, 'input>> {
    path.iter()
        .try_fold(root, |node, &index| element_children(node).nth(index))
}

fn locate_xot(xot: &Xot, root: xot::Node, path: &[usize]) -> Option<xot::Node> {
    path.iter().try_fold(root, |node, &index| {
        xot.children(node)
            .filter(|child| xot.element(*child).is_some())
            .nth(index)
    })
}
