//! Row building: one row per record element under the data root.

use roxmltree::Node;

use super::report::Reporter;
use super::resolver::CellResolver;
use crate::config::ExtractOptions;
use crate::error::Result;
use crate::types::{ColumnSpec, MissingColumnSet, Row};
use crate::xml::{element_children, has_tag, PathEvaluator};

/// Compile every column's expression with the namespace prefix prepended.
///
/// Fails on the first expression that does not compile, before any record
/// is looked at.
pub fn compile_columns<E: PathEvaluator>(
    spec: &ColumnSpec,
    evaluator: &E,
    namespace: &str,
) -> Result<Vec<E::Compiled>> {
    spec.entries()
        .iter()
        .map(|entry| evaluator.compile(&format!("{namespace}{}", entry.path)))
        .collect()
}

/// Record elements of `root` in document order.
pub fn record_nodes<'a, 'input>(
    root: Node<'a, 'input>,
    row_element: Option<&str>,
) -> Vec<Node<'a, 'input>> {
    element_children(root)
        .filter(|node| row_element.is_none_or(|tag| has_tag(*node, tag)))
        .collect()
}

/// Build one row per record element of `root`.
///
/// Rows come out in document order. Every row holds a cell for every
/// column; unresolved columns are [`crate::types::Cell::Missing`] and are
/// recorded in the returned set. With no records at all, every column
/// counts as missing.
pub fn build_rows<E: PathEvaluator>(
    root: Node<'_, '_>,
    spec: &ColumnSpec,
    evaluator: &E,
    options: &ExtractOptions,
    reporter: &mut Reporter<'_>,
) -> Result<(Vec<Row>, MissingColumnSet)> {
    let compiled = compile_columns(spec, evaluator, &options.namespace)?;
    let records = record_nodes(root, options.row_element.as_deref());
    tracing::debug!(
        records = records.len(),
        columns = spec.len(),
        "Building rows"
    );

    reporter.start(records.len());
    let mut resolver = CellResolver::new(spec);
    let mut rows = Vec::with_capacity(records.len());

    for (index, node) in records.iter().enumerate() {
        let mut cells = Vec::with_capacity(spec.len());
        for (column, (entry, path)) in spec.entries().iter().zip(&compiled).enumerate() {
            let raw = evaluator.evaluate(path, *node)?;
            let resolution = resolver.resolve(column, &raw);
            for description in &resolution.skipped {
                reporter.unsupported(index, &entry.label, description);
            }
            cells.push(resolution.cell);
        }
        rows.push(Row::new(cells));
        reporter.record_done();
    }

    let mut missing = resolver.into_missing();
    if rows.is_empty() {
        missing.mark_all();
    }
    Ok((rows, missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Xml2TableError;
    use crate::extract::report::{CollectingSink, ExtractionEvent};
    use crate::types::Cell;
    use crate::xml::XPathEvaluator;
    use roxmltree::Document;

    fn build(
        xml: &str,
        spec: &ColumnSpec,
        options: &ExtractOptions,
    ) -> (Vec<Row>, MissingColumnSet, Vec<ExtractionEvent>) {
        let doc = Document::parse(xml).unwrap();
        let evaluator = XPathEvaluator::new(&doc).unwrap();
        let mut sink = CollectingSink::new();
        let (rows, missing) = {
            let mut reporter = Reporter::new(&mut sink, options.progress_interval);
            build_rows(
                doc.root_element(),
                spec,
                &evaluator,
                options,
                &mut reporter,
            )
            .unwrap()
        };
        (rows, missing, sink.events)
    }

    #[test]
    fn test_rows_in_document_order() {
        let xml = "<people><p><id>3</id></p><p><id>1</id></p><p><id>2</id></p></people>";
        let spec = ColumnSpec::from_bare_names(["id"]).unwrap();
        let (rows, missing, _) = build(xml, &spec, &ExtractOptions::default());

        let ids: Vec<_> = rows.iter().map(|r| r.cells()[0].clone()).collect();
        assert_eq!(ids, vec![Cell::text("3"), Cell::text("1"), Cell::text("2")]);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_text_and_comment_children_are_not_records() {
        let xml = "<people>\n  <!-- a --><p><id>1</id></p>  tail  <?pi x?><p><id>2</id></p></people>";
        let spec = ColumnSpec::from_bare_names(["id"]).unwrap();
        let (rows, _, _) = build(xml, &spec, &ExtractOptions::default());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_namespace_prefix_prepended() {
        let xml = r#"<people xmlns="urn:p"><p><id>1</id></p></people>"#;
        let spec = ColumnSpec::from_bare_names(["id"]).unwrap();

        let (rows, missing, _) = build(xml, &spec, &ExtractOptions::default());
        assert_eq!(rows[0].cells()[0], Cell::Missing);
        assert!(missing.contains("id"));

        let options = ExtractOptions::new().with_namespace("{urn:p}");
        let (rows, missing, _) = build(xml, &spec, &options);
        assert_eq!(rows[0].cells()[0], Cell::text("1"));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_row_element_filter() {
        let xml = "<export><meta><id>x</id></meta><item><id>1</id></item><item><id>2</id></item></export>";
        let spec = ColumnSpec::from_bare_names(["id"]).unwrap();
        let options = ExtractOptions::new().with_row_element("item");
        let (rows, _, _) = build(xml, &spec, &options);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells()[0], Cell::text("1"));
    }

    #[test]
    fn test_empty_root_marks_every_column_missing() {
        let spec = ColumnSpec::from_bare_names(["id", "name"]).unwrap();
        let (rows, missing, events) = build("<people/>", &spec, &ExtractOptions::default());
        assert!(rows.is_empty());
        assert_eq!(missing.iter().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(events, vec![ExtractionEvent::Started { total: 0 }]);
    }

    #[test]
    fn test_unsupported_match_reported_with_row_and_label() {
        let xml = "<people><p><!-- hidden --><id>1</id></p></people>";
        let spec = ColumnSpec::from_labeled_pairs([("node()", "All")]).unwrap();
        let (rows, _, events) = build(xml, &spec, &ExtractOptions::default());

        assert_eq!(rows[0].cells()[0], Cell::text("1"));
        assert!(events.contains(&ExtractionEvent::UnsupportedMatch {
            row: 0,
            label: "All".to_string(),
            description: "comment".to_string(),
        }));
    }

    #[test]
    fn test_invalid_path_aborts_before_rows() {
        let xml = "<people><p/></people>";
        let doc = Document::parse(xml).unwrap();
        let evaluator = XPathEvaluator::new(&doc).unwrap();
        let spec = ColumnSpec::from_bare_names(["id", "name["]).unwrap();
        let mut sink = CollectingSink::new();
        let mut reporter = Reporter::new(&mut sink, 10);

        let err = build_rows(
            doc.root_element(),
            &spec,
            &evaluator,
            &ExtractOptions::default(),
            &mut reporter,
        )
        .unwrap_err();
        assert!(matches!(err, Xml2TableError::InvalidPath { ref expression, .. } if expression == "name["));
        drop(reporter);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_invalid_path_reports_prefixed_expression() {
        let spec = ColumnSpec::from_bare_names(["id"]).unwrap();
        let doc = Document::parse("<r/>").unwrap();
        let evaluator = XPathEvaluator::new(&doc).unwrap();
        let err = compile_columns(&spec, &evaluator, "{urn:x").unwrap_err();
        assert!(matches!(err, Xml2TableError::InvalidPath { ref expression, .. } if expression == "{urn:xid"));
    }
}
