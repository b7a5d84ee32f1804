//! xml2table - Extract tabular data from XML documents.
//!
//! Every first-level child of a chosen data root becomes one row; a fixed
//! list of path expressions selects the cell values of each row. The
//! resulting table can be written as xlsx, csv or json.
//!
//! # Example
//!
//! ```
//! use roxmltree::Document;
//! use xml2table::{extract, ColumnSpec, ExtractOptions, NullSink, Value, XPathEvaluator};
//!
//! let xml = "<people><p><id>7</id><name>Alice</name></p></people>";
//! let doc = Document::parse(xml).unwrap();
//! let spec = ColumnSpec::from_labeled_pairs([("id", "ID"), ("name", "Name")]).unwrap();
//!
//! let extraction = extract(
//!     doc.root_element(),
//!     &spec,
//!     &XPathEvaluator::new(&doc).unwrap(),
//!     &ExtractOptions::default(),
//!     &mut NullSink,
//! )
//! .unwrap();
//! assert_eq!(extraction.table.value(0, "ID"), Some(Value::Integer(7)));
//! assert!(extraction.missing.is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, extraction options and validation
//! - [`types`]: Column specification, cells, rows and the missing-column set
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XPath evaluation, data root lookup and tree helpers
//! - [`extract`]: Row building, cell resolution, coercion and progress events
//! - [`output`]: Table writers and output path handling
//! - [`converter`]: File-to-file conversion
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod extract;
pub mod output;
pub mod types;
pub mod xml;

// Re-export main functions
pub use converter::{convert_file, ConversionRequest, ConversionSummary};
pub use extract::{extract, Extraction};

// Re-export commonly used items
pub use config::ExtractOptions;
pub use error::{Result, Xml2TableError};
pub use extract::{EventSink, NullSink, Table, TracingSink, Value};
pub use output::{save_table, OutputFormat};
pub use types::{Cell, ColumnSpec, MissingColumnSet, Row};
pub use xml::{PathEvaluator, XPathEvaluator};
