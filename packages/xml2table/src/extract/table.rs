//! Columnar table assembled from extracted rows.

use crate::types::{Cell, ColumnSpec, Row};

/// Resolved value kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
}

/// Cells of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Text cells, possibly missing.
    Text(Vec<Cell>),
    /// Numeric column where every value is a whole number.
    Integer(Vec<Option<i64>>),
    /// Numeric column with at least one fractional or exponent value.
    Float(Vec<Option<f64>>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            Self::Text(cells) => cells.len(),
            Self::Integer(values) => values.len(),
            Self::Float(values) => values.len(),
        }
    }
}

/// One labelled column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    /// Path expression the column was extracted with.
    pub path: String,
    pub data: ColumnData,
}

impl Column {
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Text(_) => ColumnKind::Text,
            ColumnData::Integer(_) | ColumnData::Float(_) => ColumnKind::Numeric,
        }
    }

    /// Value at `row`, or `None` past the last row.
    #[must_use]
    pub fn value(&self, row: usize) -> Option<Value<'_>> {
        match &self.data {
            ColumnData::Text(cells) => cells.get(row).map(|cell| match cell {
                Cell::Text(s) => Value::Text(s),
                Cell::Missing => Value::Null,
            }),
            ColumnData::Integer(values) => values
                .get(row)
                .map(|v| v.map_or(Value::Null, Value::Integer)),
            ColumnData::Float(values) => values
                .get(row)
                .map(|v| v.map_or(Value::Null, Value::Float)),
        }
    }
}

/// A single table value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'t> {
    Text(&'t str),
    Integer(i64),
    Float(f64),
    /// Missing text or numeric value.
    Null,
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Null => Ok(()),
        }
    }
}

/// Rows of an extraction in document order, stored by column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Columns in declared order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Value at (`row`, `label`).
    #[must_use]
    pub fn value(&self, row: usize, label: &str) -> Option<Value<'_>> {
        self.column(label).and_then(|c| c.value(row))
    }

    /// Iterate rows as values in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value<'_>>> + '_ {
        (0..self.row_count).map(move |row| {
            self.columns
                .iter()
                .map(|c| c.value(row).unwrap_or(Value::Null))
                .collect()
        })
    }

    pub(crate) fn map_columns(self, f: impl FnMut(Column) -> Column) -> Self {
        let columns: Vec<Column> = self.columns.into_iter().map(f).collect();
        debug_assert!(columns.iter().all(|c| c.data.len() == self.row_count));
        Self {
            columns,
            row_count: self.row_count,
        }
    }
}

/// Transpose rows into a [`Table`] with the columns of `spec`.
///
/// Column order follows `spec` and row order follows `rows`. Every column
/// starts as text, including columns missing on every row.
#[must_use]
pub fn assemble(rows: Vec<Row>, spec: &ColumnSpec) -> Table {
    let row_count = rows.len();
    let mut cells: Vec<Vec<Cell>> = (0..spec.len())
        .map(|_| Vec::with_capacity(row_count))
        .collect();

    for row in rows {
        let mut row_cells = row.into_cells().into_iter();
        for column in &mut cells {
            column.push(row_cells.next().unwrap_or(Cell::Missing));
        }
    }

    let columns = spec
        .entries()
        .iter()
        .zip(cells)
        .map(|(entry, cells)| Column {
            label: entry.label.clone(),
            path: entry.path.clone(),
            data: ColumnData::Text(cells),
        })
        .collect();

    Table { columns, row_count }
}
