//! Column-wide numeric coercion.
//!
//! A text column becomes numeric only when every present cell parses as a
//! number; a single failure keeps the whole column as text.

use std::sync::LazyLock;

use regex::Regex;

use super::table::{Column, ColumnData, Table};
use crate::types::Cell;

/// Optional sign, digits with optional fraction, optional exponent.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").expect("valid regex")
});

/// Whole numbers only.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid regex"));

/// A successfully parsed cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Float(x) => x,
        }
    }
}

/// Parse a cell's text as a number.
///
/// # Examples
/// ```
/// use xml2table::extract::{parse_number, Number};
///
/// assert_eq!(parse_number("42"), Some(Number::Integer(42)));
/// assert_eq!(parse_number("-1.5e3"), Some(Number::Float(-1500.0)));
/// assert_eq!(parse_number("1,000"), None);
/// assert_eq!(parse_number("NaN"), None);
/// assert_eq!(parse_number("1e999"), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<Number> {
    if !NUMBER_PATTERN.is_match(text) {
        return None;
    }
    if INTEGER_PATTERN.is_match(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::Integer(n));
        }
    }
    // Out-of-range values parse as infinity, which no writer can represent
    text.parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(Number::Float)
}

/// Rewrite every text column whose present cells are all numeric.
#[must_use]
pub fn coerce(table: Table) -> Table {
    table.map_columns(coerce_column)
}

fn coerce_column(mut column: Column) -> Column {
    let numeric = match &column.data {
        ColumnData::Text(cells) => parse_cells(cells),
        _ => None,
    };

    if let Some(data) = numeric {
        tracing::debug!(label = %column.label, "Column coerced to numeric");
        column.data = data;
    }
    column
}

fn parse_cells(cells: &[Cell]) -> Option<ColumnData> {
    let parsed: Vec<Option<Number>> = cells
        .iter()
        .map(|cell| match cell {
            Cell::Missing => Ok(None),
            Cell::Text(text) => parse_number(text).map(Some).ok_or(()),
        })
        .collect::<Result<_, ()>>()
        .ok()?;

    // A column with no present value stays text
    if parsed.iter().all(Option::is_none) {
        return None;
    }

    if parsed
        .iter()
        .flatten()
        .all(|n| matches!(n, Number::Integer(_)))
    {
        let values = parsed
            .into_iter()
            .map(|v| {
                v.and_then(|n| match n {
                    Number::Integer(i) => Some(i),
                    Number::Float(_) => None,
                })
            })
            .collect();
        Some(ColumnData::Integer(values))
    } else {
        let values = parsed
            .into_iter()
            .map(|v| v.map(Number::as_f64))
            .collect();
        Some(ColumnData::Float(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::table::{assemble, ColumnKind, Value};
    use crate::types::{ColumnSpec, Row};

    fn single_column(values: &[Option<&str>]) -> Table {
        let spec = ColumnSpec::from_bare_names(["v"]).unwrap();
        let rows = values
            .iter()
            .map(|v| Row::new(vec![v.map_or(Cell::Missing, Cell::text)]))
            .collect();
        coerce(assemble(rows, &spec))
    }

    #[test]
    fn test_parse_number_grammar() {
        assert_eq!(parse_number("+7"), Some(Number::Integer(7)));
        assert_eq!(parse_number("007"), Some(Number::Integer(7)));
        assert_eq!(parse_number("3."), Some(Number::Float(3.0)));
        assert_eq!(parse_number(".5"), Some(Number::Float(0.5)));
        assert_eq!(parse_number("1E2"), Some(Number::Float(100.0)));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number("$5"), None);
        assert_eq!(parse_number(" 5"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("٣"), None);
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert_eq!(
            parse_number("99999999999999999999"),
            Some(Number::Float(1e20))
        );
    }

    #[test]
    fn test_out_of_range_float_keeps_text() {
        assert_eq!(parse_number("1e999"), None);
        assert_eq!(parse_number("-1e999"), None);

        let table = single_column(&[Some("1.5"), Some("1e999")]);
        let column = table.column("v").unwrap();
        assert_eq!(column.kind(), ColumnKind::Text);
        assert_eq!(table.value(1, "v"), Some(Value::Text("1e999")));
    }

    #[test]
    fn test_numeric_with_missing() {
        let table = single_column(&[Some("1"), Some("2"), None, Some("3")]);
        let column = table.column("v").unwrap();
        assert_eq!(column.kind(), ColumnKind::Numeric);
        assert_eq!(
            column.data,
            ColumnData::Integer(vec![Some(1), Some(2), None, Some(3)])
        );
        assert_eq!(table.value(2, "v"), Some(Value::Null));
    }

    #[test]
    fn test_one_failure_keeps_text() {
        let table = single_column(&[Some("1"), Some("x"), Some("3")]);
        let column = table.column("v").unwrap();
        assert_eq!(column.kind(), ColumnKind::Text);
        assert_eq!(table.value(0, "v"), Some(Value::Text("1")));
        assert_eq!(table.value(2, "v"), Some(Value::Text("3")));
    }

    #[test]
    fn test_mixed_integer_and_float() {
        let table = single_column(&[Some("1"), Some("2.5")]);
        assert_eq!(
            table.column("v").unwrap().data,
            ColumnData::Float(vec![Some(1.0), Some(2.5)])
        );
    }

    #[test]
    fn test_empty_string_blocks_coercion() {
        let table = single_column(&[Some("1"), Some("")]);
        assert_eq!(table.column("v").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn test_all_missing_stays_text() {
        let table = single_column(&[None, None]);
        assert_eq!(table.column("v").unwrap().kind(), ColumnKind::Text);
    }
}
