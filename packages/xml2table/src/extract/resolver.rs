//! Reconciliation of raw path matches into a single cell.

use crate::types::{Cell, ColumnSpec, MissingColumnSet};
use crate::xml::MatchValue;

/// Outcome of resolving one (record, column) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub cell: Cell,
    /// Descriptions of candidates that were skipped as unsupported.
    pub skipped: Vec<String>,
}

/// Resolve the raw matches of one path expression into a cell.
///
/// No match gives [`Cell::Missing`]. Otherwise every supported candidate
/// is trimmed, empty candidates are dropped and the rest are joined with a
/// single space, so a matched element without text gives an empty cell.
///
/// # Examples
/// ```
/// use xml2table::extract::resolve;
/// use xml2table::types::Cell;
/// use xml2table::xml::MatchValue;
///
/// let raw: Vec<_> = ["a", "b ", " c"].map(|s| MatchValue::String(s.to_string())).into();
/// assert_eq!(resolve(&raw).cell, Cell::text("a b c"));
/// assert_eq!(resolve(&[]).cell, Cell::Missing);
/// ```
#[must_use]
pub fn resolve(raw: &[MatchValue]) -> Resolution {
    if raw.is_empty() {
        return Resolution {
            cell: Cell::Missing,
            skipped: Vec::new(),
        };
    }

    let mut parts: Vec<&str> = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();
    for candidate in raw {
        let text = match candidate {
            MatchValue::Element(text) => text.as_deref().unwrap_or_default(),
            MatchValue::String(text) => text.as_str(),
            MatchValue::Unsupported(description) => {
                skipped.push(description.clone());
                continue;
            }
        };
        let text = text.trim();
        if !text.is_empty() {
            parts.push(text);
        }
    }

    Resolution {
        cell: Cell::Text(parts.join(" ")),
        skipped,
    }
}

/// Resolves cells for one extraction and remembers which columns were
/// missing.
#[derive(Debug, Clone)]
pub struct CellResolver {
    missing: MissingColumnSet,
}

impl CellResolver {
    #[must_use]
    pub fn new(spec: &ColumnSpec) -> Self {
        Self {
            missing: MissingColumnSet::new(spec),
        }
    }

    /// Resolve the matches for the column at `column` (declared position).
    pub fn resolve(&mut self, column: usize, raw: &[MatchValue]) -> Resolution {
        let resolution = resolve(raw);
        if resolution.cell.is_missing() {
            self.missing.insert(column);
        }
        resolution
    }

    #[must_use]
    pub fn into_missing(self) -> MissingColumnSet {
        self.missing
    }
}
