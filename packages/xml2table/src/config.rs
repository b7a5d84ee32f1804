//! Configuration constants and validation functions for xml2table.

use crate::error::{Result, Xml2TableError};
use crate::output::OutputFormat;

/// Number of records between two progress events.
pub const PROGRESS_INTERVAL: usize = 1000;

/// Environment variable overriding [`PROGRESS_INTERVAL`].
pub const PROGRESS_INTERVAL_ENV: &str = "XML2TABLE_PROGRESS_INTERVAL";

/// Number of rows shown in the console preview after a conversion.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Output format used when neither an output file nor a format is given.
pub const DEFAULT_OUTPUT_FORMAT: OutputFormat = OutputFormat::Xlsx;

/// Options controlling a single extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Text prepended verbatim to every column's path expression.
    pub namespace: String,

    /// Emit a progress event after this many records.
    pub progress_interval: usize,

    /// Only first-level children with this tag become rows.
    pub row_element: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            progress_interval: PROGRESS_INTERVAL,
            row_element: None,
        }
    }
}

impl ExtractOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options with the progress interval taken from
    /// `XML2TABLE_PROGRESS_INTERVAL`, if it holds a positive number.
    #[must_use]
    pub fn from_env() -> Self {
        let progress_interval = std::env::var(PROGRESS_INTERVAL_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(PROGRESS_INTERVAL);

        Self {
            progress_interval,
            ..Self::default()
        }
    }

    /// Set the namespace prefix.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the progress interval. Zero is clamped to one.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Restrict rows to first-level children with the given tag.
    ///
    /// An empty tag means no restriction.
    #[must_use]
    pub fn with_row_element(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.row_element = if tag.is_empty() { None } else { Some(tag) };
        self
    }
}

/// Validate that explicit labels pair one-to-one with the columns.
///
/// # Examples
/// ```
/// use xml2table::config::validate_labels;
///
/// assert!(validate_labels(&["id", "name"], &["ID", "Name"]).is_ok());
/// assert!(validate_labels(&["id", "name"], &["ID"]).is_err());
/// assert!(validate_labels::<&str, &str>(&[], &[]).is_err());
/// ```
pub fn validate_labels<C, L>(columns: &[C], labels: &[L]) -> Result<()> {
    if columns.is_empty() {
        return Err(Xml2TableError::EmptyColumnSpec);
    }
    if columns.len() != labels.len() {
        return Err(Xml2TableError::LabelCountMismatch {
            columns: columns.len(),
            labels: labels.len(),
        });
    }
    Ok(())
}
