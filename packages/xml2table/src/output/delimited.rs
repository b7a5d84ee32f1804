//! CSV output.

use crate::error::{Result, Xml2TableError};
use crate::extract::Table;

/// Render `table` as CSV with a header row of column labels.
///
/// Missing values become empty fields.
pub fn render(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns().iter().map(|c| c.label.as_str()))?;
    for values in table.rows() {
        writer.write_record(values.iter().map(ToString::to_string))?;
    }
    writer
        .into_inner()
        .map_err(|e| Xml2TableError::Io(e.into_error()))
}
