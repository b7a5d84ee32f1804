//! XLSX workbook output.

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};

use crate::error::Result;
use crate::extract::{Table, Value};

fn row_index(index: usize) -> std::result::Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn column_index(index: usize) -> std::result::Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Render `table` as a single-sheet workbook.
///
/// The first row holds the column labels in bold. Numeric values are
/// written as number cells; missing values leave the cell blank.
pub fn render(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (index, column) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, column_index(index)?, &column.label, &header)?;
    }

    for (index, values) in table.rows().enumerate() {
        let row = row_index(index + 1)?;
        for (col, value) in values.into_iter().enumerate() {
            let col = column_index(col)?;
            match value {
                Value::Text(text) => {
                    sheet.write_string(row, col, text)?;
                }
                Value::Integer(n) => {
                    sheet.write_number(row, col, n as f64)?;
                }
                Value::Float(x) => {
                    sheet.write_number(row, col, x)?;
                }
                Value::Null => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{assemble, coerce};
    use crate::types::{Cell, ColumnSpec, Row};

    #[test]
    fn test_render_produces_zip_container() {
        let spec = ColumnSpec::from_labeled_pairs([("id", "ID"), ("name", "Name")]).unwrap();
        let rows = vec![
            Row::new(vec![Cell::text("7"), Cell::text("Alice")]),
            Row::new(vec![Cell::text("9"), Cell::Missing]),
        ];
        let table = coerce(assemble(rows, &spec));

        let bytes = render(&table).unwrap();
        // XLSX files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_empty_table() {
        let spec = ColumnSpec::from_bare_names(["id"]).unwrap();
        let bytes = render(&assemble(Vec::new(), &spec)).unwrap();
        assert!(!bytes.is_empty());
    }
}
