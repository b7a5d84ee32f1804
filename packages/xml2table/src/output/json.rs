//! JSON "table" output: a field schema followed by one record per row.
//!
//! ```json
//! {"schema":{"fields":[{"name":"ID","type":"integer"}]},"data":[{"ID":7}]}
//! ```

use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::extract::{ColumnData, Table, Value};

#[derive(Serialize)]
struct TableDocument<'t> {
    schema: Schema<'t>,
    data: Vec<Record<'t>>,
}

#[derive(Serialize)]
struct Schema<'t> {
    fields: Vec<Field<'t>>,
}

#[derive(Serialize)]
struct Field<'t> {
    name: &'t str,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// One row as a map from label to value, keys in column order.
struct Record<'t> {
    labels: &'t [&'t str],
    values: Vec<Value<'t>>,
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.labels.iter().zip(&self.values))
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(n) => serializer.serialize_i64(n),
            Self::Float(x) => serializer.serialize_f64(x),
            Self::Null => serializer.serialize_none(),
        }
    }
}

fn field_type(data: &ColumnData) -> &'static str {
    match data {
        ColumnData::Text(_) => "string",
        ColumnData::Integer(_) => "integer",
        ColumnData::Float(_) => "number",
    }
}

/// Render `table` as a JSON table document.
pub fn render(table: &Table) -> Result<Vec<u8>> {
    let labels: Vec<&str> = table.columns().iter().map(|c| c.label.as_str()).collect();
    let document = TableDocument {
        schema: Schema {
            fields: table
                .columns()
                .iter()
                .map(|c| Field {
                    name: &c.label,
                    kind: field_type(&c.data),
                })
                .collect(),
        },
        data: table
            .rows()
            .map(|values| Record {
                labels: &labels,
                values,
            })
            .collect(),
    };
    Ok(serde_json::to_vec(&document)?)
}
