//! Row-aligned table of sampled columns, with CSV and JSON export

use crate::column::ColumnData;
use crate::error::{Result, TableMillError};
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use std::path::Path;

/// The output of one `DataGenerator::sample` call: named column
/// sequences of shared length, in generator insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<(String, ColumnData)>,
    num_rows: usize,
}

impl Table {
    /// Assemble a table, checking that every column has the same length
    pub fn new(columns: Vec<(String, ColumnData)>) -> Result<Self> {
        let num_rows = columns.first().map(|(_, data)| data.len()).unwrap_or(0);
        for (name, data) in &columns {
            if data.len() != num_rows {
                return Err(TableMillError::sampling(format!(
                    "column '{}' has {} rows, expected {}",
                    name,
                    data.len(),
                    num_rows
                )));
            }
        }
        Ok(Self { columns, num_rows })
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in output order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Look up a column's data by name
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, data)| data)
    }

    /// Render the table as an array of JSON row objects.
    /// Missing numeric cells become `null`.
    pub fn to_json_records(&self) -> Value {
        let records: Vec<Value> = (0..self.num_rows)
            .map(|row| {
                let mut record = serde_json::Map::new();
                for (name, data) in &self.columns {
                    record.insert(name.clone(), json_cell(data, row));
                }
                Value::Object(record)
            })
            .collect();
        Value::Array(records)
    }

    /// Write the table as pretty-printed JSON records
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.to_json_records())?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Write the table as CSV: a header of column names, then one record
    /// per row. Missing numeric cells are empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.column_names())?;
        for row in 0..self.num_rows {
            let record: Vec<String> = self
                .columns
                .iter()
                .map(|(_, data)| csv_cell(data, row))
                .collect();
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table as a CSV file
    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = fs::File::create(path)?;
        self.write_csv(file)
    }
}

fn json_cell(data: &ColumnData, row: usize) -> Value {
    match data {
        ColumnData::Float(values) => match values[row] {
            Some(v) => json!(v),
            None => Value::Null,
        },
        ColumnData::Integer(values) => match values[row] {
            Some(v) => json!(v),
            None => Value::Null,
        },
        ColumnData::Categorical(values) => json!(values[row]),
    }
}

fn csv_cell(data: &ColumnData, row: usize) -> String {
    match data {
        ColumnData::Float(values) => values[row].map(|v| v.to_string()).unwrap_or_default(),
        ColumnData::Integer(values) => values[row].map(|v| v.to_string()).unwrap_or_default(),
        ColumnData::Categorical(values) => values[row].clone(),
    }
}
