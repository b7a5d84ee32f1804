//! Core data types for xml2table.
//!
//! A [`ColumnSpec`] describes what to extract from each record element,
//! a [`Row`] holds one record's resolved [`Cell`]s, and a
//! [`MissingColumnSet`] remembers which columns were absent somewhere.

use std::collections::HashSet;

use crate::error::{Result, Xml2TableError};

/// One configured column: where to find the value and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    /// Path expression evaluated against each record element.
    pub path: String,

    /// Output label of the column.
    pub label: String,
}

impl ColumnEntry {
    /// Create a new column entry.
    #[must_use]
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// Ordered column configuration with unique labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    entries: Vec<ColumnEntry>,
}

impl ColumnSpec {
    /// Build a spec from `(path, label)` pairs.
    ///
    /// # Examples
    /// ```
    /// use xml2table::types::ColumnSpec;
    ///
    /// let spec = ColumnSpec::from_labeled_pairs([("id", "ID"), ("name", "Name")]).unwrap();
    /// assert_eq!(spec.labels().collect::<Vec<_>>(), vec!["ID", "Name"]);
    /// ```
    pub fn from_labeled_pairs<P, L>(pairs: impl IntoIterator<Item = (P, L)>) -> Result<Self>
    where
        P: Into<String>,
        L: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(path, label)| ColumnEntry::new(path, label))
            .collect();
        Self::from_entries(entries)
    }

    /// Build a spec where every path expression is its own label.
    ///
    /// # Examples
    /// ```
    /// use xml2table::types::ColumnSpec;
    ///
    /// let spec = ColumnSpec::from_bare_names(["id", "@type"]).unwrap();
    /// assert_eq!(spec.labels().collect::<Vec<_>>(), vec!["id", "@type"]);
    /// assert!(ColumnSpec::from_bare_names(["id", "id"]).is_err());
    /// ```
    pub fn from_bare_names<P: Into<String>>(names: impl IntoIterator<Item = P>) -> Result<Self> {
        let entries = names
            .into_iter()
            .map(|name| {
                let path = name.into();
                ColumnEntry::new(path.clone(), path)
            })
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<ColumnEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Xml2TableError::EmptyColumnSpec);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.label.as_str()) {
                return Err(Xml2TableError::DuplicateLabel(entry.label.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Entries in declared order.
    #[must_use]
    pub fn entries(&self) -> &[ColumnEntry] {
        &self.entries
    }

    /// Labels in declared order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a spec holds at least one column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of a label in declared order.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }
}

/// Resolved value of one (row, column) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Matched text. May be empty: a matched element without text.
    Text(String),

    /// The path expression matched nothing.
    Missing,
}

impl Cell {
    /// Create a text cell.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text of the cell, if present.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Missing => None,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// One record's cells, aligned with the [`ColumnSpec`] that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells in declared column order.
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Look up the cell for a label.
    #[must_use]
    pub fn get(&self, spec: &ColumnSpec, label: &str) -> Option<&Cell> {
        spec.position(label).and_then(|i| self.cells.get(i))
    }

    /// Cells in declared column order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// Labels of columns that were missing on at least one row.
///
/// Keyed by column label and iterated in declared column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumnSet {
    labels: Vec<String>,
    flags: Vec<bool>,
}

impl MissingColumnSet {
    /// Create an empty set for the columns of `spec`.
    #[must_use]
    pub fn new(spec: &ColumnSpec) -> Self {
        Self {
            labels: spec.labels().map(String::from).collect(),
            flags: vec![false; spec.len()],
        }
    }

    /// Record the column at `index` as missing.
    pub fn insert(&mut self, index: usize) {
        if let Some(flag) = self.flags.get_mut(index) {
            *flag = true;
        }
    }

    /// Record every column as missing.
    pub fn mark_all(&mut self) {
        self.flags.iter_mut().for_each(|f| *f = true);
    }

    /// Merge another set built for the same spec.
    pub fn union(&mut self, other: &Self) {
        for (flag, &theirs) in self.flags.iter_mut().zip(&other.flags) {
            *flag |= theirs;
        }
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.iter().any(|l| l == label)
    }

    /// Missing labels in declared column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .zip(&self.flags)
            .filter(|&(_, &flag)| flag)
            .map(|(label, _)| label.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|&f| f)
    }
}
