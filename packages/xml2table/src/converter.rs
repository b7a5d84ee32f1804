//! End-to-end conversion of an XML file into a table file.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, ParsingOptions};

use crate::config::ExtractOptions;
use crate::error::Result;
use crate::extract::{extract, EventSink, Table};
use crate::output::{derive_output_path, save_table, OutputFormat};
use crate::types::{ColumnSpec, MissingColumnSet};
use crate::xml::{outline, resolve_data_root, XPathEvaluator};

/// Everything needed to convert one file.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub columns: ColumnSpec,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    /// Data-root query; empty selects the document's root element.
    pub parent_element: String,
    pub options: ExtractOptions,
    /// Depth of the tag outline to render for the data root, if any.
    pub outline_level: Option<usize>,
}

impl ConversionRequest {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, columns: ColumnSpec) -> Self {
        Self {
            input: input.into(),
            columns,
            output: None,
            format: None,
            parent_element: String::new(),
            options: ExtractOptions::default(),
            outline_level: None,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_parent_element(mut self, query: impl Into<String>) -> Self {
        self.parent_element = query.into();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_outline(mut self, level: Option<usize>) -> Self {
        self.outline_level = level;
        self
    }

    /// Path the table will be written to.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        derive_output_path(&self.input, self.output.as_deref(), self.format)
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub table: Table,
    pub missing: MissingColumnSet,
    /// Rendered outline of the data root, when requested.
    pub outline: Option<String>,
}

impl ConversionSummary {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.table.row_count()
    }
}

/// Read an XML file into memory.
pub fn read_xml(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Parse XML text, accepting documents that carry a DTD.
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Ok(Document::parse_with_options(text, options)?)
}

/// Convert the file named by `request` and write the resulting table.
///
/// The output format is checked before the input is read, so an unsupported
/// extension fails without doing any work.
///
/// # Returns
/// A summary holding the written path, the table and its missing columns.
pub fn convert_file(request: &ConversionRequest, sink: &mut dyn EventSink) -> Result<ConversionSummary> {
    let output_path = request.output_path();
    OutputFormat::for_path(&output_path)?;

    tracing::debug!(input = %request.input.display(), "Reading document");
    let text = read_xml(&request.input)?;
    let doc = parse_document(&text)?;
    let evaluator = XPathEvaluator::new(&doc)?;
    let root = resolve_data_root(&doc, &evaluator, &request.parent_element)?;

    let outline = request.outline_level.map(|level| outline(root, level));

    let extraction = extract(
        root,
        &request.columns,
        &evaluator,
        &request.options,
        sink,
    )?;

    let output_path = save_table(&extraction.table, &output_path)?;

    Ok(ConversionSummary {
        output_path,
        table: extraction.table,
        missing: extraction.missing,
        outline,
    })
}
