//! Plain-text preview of the first rows of a table.

use crate::extract::Table;

/// Render the first `rows` rows of `table` as right-aligned text columns.
///
/// The first column holds the zero-based row index. Missing values render
/// as empty cells.
///
/// # Examples
/// ```
/// use xml2table::extract::assemble;
/// use xml2table::output::preview;
/// use xml2table::types::{Cell, ColumnSpec, Row};
///
/// let spec = ColumnSpec::from_labeled_pairs([("id", "ID"), ("name", "Name")]).unwrap();
/// let rows = vec![Row::new(vec![Cell::text("7"), Cell::text("Alice")])];
/// let table = assemble(rows, &spec);
/// assert_eq!(preview(&table, 10), "   ID   Name\n0   7  Alice\n");
/// ```
#[must_use]
pub fn preview(table: &Table, rows: usize) -> String {
    let shown = rows.min(table.row_count());

    let mut lines: Vec<Vec<String>> = Vec::with_capacity(shown + 1);
    let mut header = vec![String::new()];
    header.extend(table.columns().iter().map(|c| c.label.clone()));
    lines.push(header);
    for (index, values) in table.rows().take(shown).enumerate() {
        let mut line = vec![index.to_string()];
        line.extend(values.iter().map(|v| single_line(&v.to_string())));
        lines.push(line);
    }

    let columns = table.columns().len() + 1;
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            lines
                .iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:>width$}"))
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{assemble, coerce};
    use crate::types::{Cell, ColumnSpec, Row};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_limits_rows() {
        let spec = ColumnSpec::from_bare_names(["v"]).unwrap();
        let rows = (0..5).map(|i| Row::new(vec![Cell::text(i.to_string())])).collect();
        let table = coerce(assemble(rows, &spec));

        assert_eq!(preview(&table, 2), "   v\n0  0\n1  1\n");
    }

    #[test]
    fn test_preview_missing_and_multiline_values() {
        let spec = ColumnSpec::from_bare_names(["a", "b"]).unwrap();
        let rows = vec![Row::new(vec![Cell::Missing, Cell::text("x\n  y")])];
        let table = assemble(rows, &spec);

        assert_eq!(preview(&table, 10), "   a    b\n0     x y\n");
    }

    #[test]
    fn test_preview_empty_table_shows_header() {
        let spec = ColumnSpec::from_bare_names(["id"]).unwrap();
        assert_eq!(preview(&assemble(Vec::new(), &spec), 10), "  id\n");
    }
}
