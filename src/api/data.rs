//! Tabular chart data, uploaded separately from the chart metadata as CSV.

use csv::{ReaderBuilder, WriterBuilder};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// Rectangular table of string cells under named columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Builds a table, rejecting rows whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> ChartResult<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(ChartError::InvalidData(format!(
                "row {index} has {} cells, expected {}",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Builds a table from JSON records; columns follow first appearance and
    /// missing cells are left empty.
    pub fn from_records(records: &[IndexMap<String, Value>]) -> ChartResult<Self> {
        let columns: IndexSet<&String> = records.iter().flat_map(|record| record.keys()).collect();
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(*column).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self::new(columns.into_iter().cloned().collect(), rows)
    }

    pub fn from_csv(input: &str) -> ChartResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());
        let columns = reader
            .headers()
            .map_err(|e| ChartError::InvalidData(format!("failed to read csv header: {e}")))?
            .iter()
            .map(str::to_owned)
            .collect();
        let rows = reader
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_owned).collect())
                    .map_err(|e| ChartError::InvalidData(format!("failed to read csv row: {e}")))
            })
            .collect::<ChartResult<Vec<Vec<String>>>>()?;
        Self::new(columns, rows)
    }

    pub fn to_csv(&self) -> ChartResult<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        let write_error =
            |e: csv::Error| ChartError::InvalidData(format!("failed to write csv: {e}"));
        writer.write_record(&self.columns).map_err(write_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(write_error)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ChartError::InvalidData(format!("failed to flush csv: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| ChartError::InvalidData(format!("csv output is not utf-8: {e}")))
    }

    pub fn push_row(&mut self, row: Vec<String>) -> ChartResult<()> {
        if row.len() != self.columns.len() {
            return Err(ChartError::InvalidData(format!(
                "row has {} cells, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cells of `name`, top to bottom.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// A table without rows has nothing to upload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
