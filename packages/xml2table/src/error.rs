//! Error types for xml2table.
//!
//! Configuration problems (a missing data root, duplicate labels, a path
//! expression that does not compile) abort an extraction before any row is
//! produced. Anomalies inside a record (unsupported matches, missing values)
//! are not errors; they surface as extraction events instead.

use thiserror::Error;

/// Main error type for the xml2table library.
#[derive(Debug, Error)]
pub enum Xml2TableError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The document could not be loaded for path evaluation.
    #[error("XML parsing failed: {0}")]
    XmlLoad(String),

    /// The data root query matched no element.
    #[error("Root not found. Query used: '{query}'")]
    RootNotFound { query: String },

    /// No columns were configured.
    #[error("At least one column is required")]
    EmptyColumnSpec,

    /// Two columns share the same output label.
    #[error("Duplicate column label: '{0}'")]
    DuplicateLabel(String),

    /// Explicit labels do not pair one-to-one with the columns.
    #[error("Got {labels} labels for {columns} columns")]
    LabelCountMismatch { columns: usize, labels: usize },

    /// A path expression could not be compiled or evaluated.
    #[error("Invalid path expression '{expression}': {reason}")]
    InvalidPath { expression: String, reason: String },

    /// Output file extension is not one of the supported formats.
    #[error("Unsupported output format: '{0}'. Expected xlsx, csv or json")]
    UnsupportedFormat(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX serialization error.
    #[error("XLSX serialization failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Xml2TableError {
    /// Whether this error stems from the caller's configuration rather than
    /// from the document or the output sink.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound { .. }
                | Self::EmptyColumnSpec
                | Self::DuplicateLabel(_)
                | Self::LabelCountMismatch { .. }
                | Self::InvalidPath { .. }
                | Self::UnsupportedFormat(_)
        )
    }

    pub(crate) fn invalid_path(expression: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for xml2table operations.
pub type Result<T> = std::result::Result<T, Xml2TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Xml2TableError::RootNotFound {
            query: "records".to_string(),
        };
        assert_eq!(err.to_string(), "Root not found. Query used: 'records'");
    }

    #[test]
    fn test_invalid_path_display() {
        let err = Xml2TableError::invalid_path("a[", "unterminated predicate");
        assert_eq!(
            err.to_string(),
            "Invalid path expression 'a[': unterminated predicate"
        );
    }

    #[test]
    fn test_configuration_errors() {
        assert!(Xml2TableError::DuplicateLabel("id".to_string()).is_configuration_error());
        assert!(Xml2TableError::EmptyColumnSpec.is_configuration_error());
        assert!(!Xml2TableError::Io(std::io::Error::other("disk full")).is_configuration_error());
    }
}
