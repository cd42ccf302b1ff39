//! CSV ingestion against a declared schema.
//!
//! The exact column names and kinds are a deployment-time contract between
//! the engine and its data source, so the loader takes an explicit [`Schema`]
//! rather than sniffing cell types. The header row must contain every schema
//! column; extra file columns are ignored. Numeric cells parse as integer
//! first, then float; anything else is a load-time error naming the row and
//! column.

use crate::column::{ColumnKind, Value};
use crate::table::{Schema, Table};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a table from a CSV file on disk. The table is named after the file
/// stem ("bank_marketing.csv" -> "bank_marketing").
pub fn load_csv(path: &Path, schema: &Schema) -> Result<Table, String> {
    let file =
        File::open(path).map_err(|e| format!("Failed to open '{}': {}", path.display(), e))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string();
    let table = read_csv(file, name, schema)?;
    log::info!(
        "Loaded {} rows x {} columns from '{}'",
        table.len(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

/// Read a table from any CSV source (the first record is the header).
pub fn read_csv<R: Read>(reader: R, name: String, schema: &Schema) -> Result<Table, String> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| format!("Failed to read CSV header: {}", e))?
        .clone();

    // Map each schema column to its position in the file.
    let mut positions: Vec<(String, ColumnKind, usize)> = Vec::with_capacity(schema.len());
    for (col_name, kind) in schema_columns(schema) {
        let pos = headers
            .iter()
            .position(|h| h.trim() == col_name)
            .ok_or_else(|| format!("CSV header is missing column '{}'", col_name))?;
        positions.push((col_name, kind, pos));
    }

    let mut rows: Vec<HashMap<String, Value>> = Vec::new();
    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| format!("Row {}: {}", row_idx + 1, e))?;

        let mut row = HashMap::with_capacity(positions.len());
        for (col_name, kind, pos) in &positions {
            let cell = record.get(*pos).ok_or_else(|| {
                format!("Row {}: missing field for column '{}'", row_idx + 1, col_name)
            })?;
            row.insert(col_name.clone(), parse_cell(cell, *kind, row_idx, col_name)?);
        }
        rows.push(row);
    }

    let mut table = Table::new(name, schema.clone());
    table.append_rows(rows)?;
    Ok(table)
}

fn schema_columns(schema: &Schema) -> Vec<(String, ColumnKind)> {
    (0..schema.len())
        .map(|i| {
            let (name, kind) = schema.get_column_info(i).unwrap();
            (name.to_string(), kind)
        })
        .collect()
}

fn parse_cell(cell: &str, kind: ColumnKind, row_idx: usize, column: &str) -> Result<Value, String> {
    let cell = cell.trim();
    match kind {
        ColumnKind::Categorical => Ok(Value::Text(cell.to_string())),
        ColumnKind::Numeric => {
            if let Ok(v) = cell.parse::<i64>() {
                return Ok(Value::Int(v));
            }
            cell.parse::<f64>().map(Value::Float).map_err(|_| {
                format!(
                    "Row {}: column '{}' has non-numeric value '{}'",
                    row_idx + 1,
                    column,
                    cell
                )
            })
        }
    }
}
