//! Record extraction: rows, cell resolution, numeric coercion and progress
//! reporting.

mod coerce;
mod report;
mod resolver;
mod rows;
pub mod table;

use roxmltree::Node;

pub use coerce::{coerce, parse_number, Number};
pub use report::{
    missing_columns_message, CollectingSink, EventSink, ExtractionEvent, NullSink, Reporter,
    TracingSink,
};
pub use resolver::{resolve, CellResolver, Resolution};
pub use rows::{build_rows, compile_columns, record_nodes};
pub use table::{assemble, Column, ColumnData, ColumnKind, Table, Value};

use crate::config::ExtractOptions;
use crate::error::Result;
use crate::types::{ColumnSpec, MissingColumnSet};
use crate::xml::PathEvaluator;

/// Result of a completed extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub table: Table,
    /// Columns without a value on at least one row.
    pub missing: MissingColumnSet,
}

/// Extract a table from the record children of `root`.
///
/// Every column expression is compiled before the first record is
/// evaluated; an invalid expression aborts with no events emitted.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml2table::config::ExtractOptions;
/// use xml2table::extract::{extract, NullSink, Value};
/// use xml2table::types::ColumnSpec;
/// use xml2table::xml::XPathEvaluator;
///
/// let xml = "<people><p><id>1</id></p><p><id>2</id></p></people>";
/// let doc = Document::parse(xml).unwrap();
/// let spec = ColumnSpec::from_labeled_pairs([("id", "ID")]).unwrap();
/// let extraction = extract(
///     doc.root_element(),
///     &spec,
///     &XPathEvaluator::new(&doc).unwrap(),
///     &ExtractOptions::default(),
///     &mut NullSink,
/// )
/// .unwrap();
/// assert_eq!(extraction.table.value(1, "ID"), Some(Value::Integer(2)));
/// ```
pub fn extract<E: PathEvaluator>(
    root: Node<'_, '_>,
    spec: &ColumnSpec,
    evaluator: &E,
    options: &ExtractOptions,
    sink: &mut dyn EventSink,
) -> Result<Extraction> {
    let mut reporter = Reporter::new(sink, options.progress_interval);
    let (rows, missing) = build_rows(root, spec, evaluator, options, &mut reporter)?;
    let table = coerce(assemble(rows, spec));
    reporter.complete(table.row_count(), &missing);
    Ok(Extraction { table, missing })
}
