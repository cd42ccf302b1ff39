//! BankLens table implementation.
//!
//! A Table is a collection of typed columns under a fixed schema. Tables are
//! append-only while being loaded and treated as immutable afterwards: there
//! are no update or delete operations, which is what lets filter views and
//! aggregates run without any coordination.
//!
//! # Examples
//!
//! ```
//! use banklens::{ColumnKind, Schema, Table, Value};
//! use std::collections::HashMap;
//!
//! let schema = Schema::new(vec![
//!     ("job".to_string(), ColumnKind::Categorical),
//!     ("age".to_string(), ColumnKind::Numeric),
//! ]);
//!
//! let mut table = Table::new("bank".to_string(), schema);
//!
//! let mut row = HashMap::new();
//! row.insert("job".to_string(), Value::Text("admin".to_string()));
//! row.insert("age".to_string(), Value::Int(34));
//! table.append_row(row).unwrap();
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.get_value(0, "age").unwrap(), Value::Int(34));
//! ```

use crate::column::{Column, ColumnKind, Value};
use std::collections::HashMap;

/// Schema definition: ordered column names with their declared kinds.
///
/// # Examples
///
/// ```
/// use banklens::{ColumnKind, Schema};
///
/// let schema = Schema::new(vec![
///     ("job".to_string(), ColumnKind::Categorical),
///     ("y".to_string(), ColumnKind::Numeric),
/// ]);
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.get_column_index("y"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<(String, ColumnKind)>,
}

impl Schema {
    pub fn new(columns: Vec<(String, ColumnKind)>) -> Self {
        Schema { columns }
    }

    /// Returns the number of columns in the schema.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns a list of all column names, in declaration order.
    pub fn get_column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the index of a column by name, or None if not found.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    /// Returns the declared kind of a column by name, or None if not found.
    pub fn get_column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kind)| *kind)
    }

    /// Returns (name, kind) for the column at the given index.
    pub fn get_column_info(&self, index: usize) -> Option<(&str, ColumnKind)> {
        self.columns
            .get(index)
            .map(|(name, kind)| (name.as_str(), *kind))
    }

    pub(crate) fn columns(&self) -> &[(String, ColumnKind)] {
        &self.columns
    }
}

/// Root table owning its data.
#[derive(Debug)]
pub struct Table {
    name: String,
    schema: Schema,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create a new empty table for the given schema.
    pub fn new(name: String, schema: Schema) -> Self {
        let columns: Vec<Column> = schema
            .columns()
            .iter()
            .map(|(col_name, kind)| Column::new(col_name.clone(), *kind))
            .collect();

        Table {
            name,
            schema,
            columns,
            row_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Number of columns; constant for the table's lifetime.
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Returns a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, String> {
        let col_idx = self
            .schema
            .get_column_index(name)
            .ok_or_else(|| format!("Column '{}' not found", name))?;
        Ok(&self.columns[col_idx])
    }

    pub fn get_value(&self, row: usize, column: &str) -> Result<Value, String> {
        let col_idx = self
            .schema
            .get_column_index(column)
            .ok_or_else(|| format!("Column '{}' not found", column))?;

        self.columns[col_idx].get(row)
    }

    pub fn get_row(&self, row: usize) -> Result<HashMap<String, Value>, String> {
        if row >= self.row_count {
            return Err(format!("Row {} out of range [0, {})", row, self.row_count));
        }

        let mut result = HashMap::new();
        for col in &self.columns {
            result.insert(col.name().to_string(), col.get(row)?);
        }

        Ok(result)
    }

    /// Append one row. The row must carry a kind-compatible value for every
    /// schema column; nothing is inserted on error.
    pub fn append_row(&mut self, row: HashMap<String, Value>) -> Result<(), String> {
        for col_name in self.schema.get_column_names() {
            let value = row
                .get(col_name)
                .ok_or_else(|| format!("Missing value for column '{}'", col_name))?;
            let kind = self.schema.get_column_kind(col_name).unwrap();
            if !value.fits(kind) {
                return Err(format!(
                    "Column '{}' is {:?} but got {:?}",
                    col_name, kind, value
                ));
            }
        }

        for col in self.columns.iter_mut() {
            let value = row.get(col.name()).unwrap().clone();
            col.append(value)?;
        }

        self.row_count += 1;
        Ok(())
    }

    /// Append multiple rows at once (bulk insert).
    ///
    /// All rows are validated before any is inserted, so a bad row leaves the
    /// table untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of rows inserted
    /// * `Err(message)` - Error naming the first offending row and column
    pub fn append_rows(&mut self, rows: Vec<HashMap<String, Value>>) -> Result<usize, String> {
        if rows.is_empty() {
            return Ok(0);
        }

        for (row_idx, row) in rows.iter().enumerate() {
            for (col_name, kind) in self.schema.columns() {
                match row.get(col_name) {
                    None => {
                        return Err(format!(
                            "Row {}: Missing value for column '{}'",
                            row_idx, col_name
                        ));
                    }
                    Some(value) if !value.fits(*kind) => {
                        return Err(format!(
                            "Row {}: Column '{}' is {:?} but got {:?}",
                            row_idx, col_name, kind, value
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        let num_rows = rows.len();
        for row in rows {
            for col in self.columns.iter_mut() {
                let value = row.get(col.name()).unwrap().clone();
                col.append(value)?;
            }
            self.row_count += 1;
        }

        Ok(num_rows)
    }

    pub fn iter_rows(&self) -> TableRowIterator<'_> {
        TableRowIterator {
            table: self,
            index: 0,
        }
    }
}

/// Iterator over table rows as column-name-to-value maps.
pub struct TableRowIterator<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Iterator for TableRowIterator<'a> {
    type Item = HashMap<String, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.table.len() {
            return None;
        }
        let row = self.table.get_row(self.index).ok()?;
        self.index += 1;
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_schema() -> Schema {
        Schema::new(vec![
            ("job".to_string(), ColumnKind::Categorical),
            ("age".to_string(), ColumnKind::Numeric),
            ("y".to_string(), ColumnKind::Numeric),
        ])
    }

    fn row(job: &str, age: i64, y: i64) -> HashMap<String, Value> {
        let mut r = HashMap::new();
        r.insert("job".to_string(), Value::Text(job.to_string()));
        r.insert("age".to_string(), Value::Int(age));
        r.insert("y".to_string(), Value::Int(y));
        r
    }

    #[test]
    fn test_append_and_query() {
        let mut table = Table::new("bank".to_string(), bank_schema());
        table.append_row(row("admin", 34, 1)).unwrap();
        table.append_row(row("services", 29, 0)).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(
            table.get_value(0, "job").unwrap(),
            Value::Text("admin".to_string())
        );
        assert_eq!(table.get_value(1, "age").unwrap(), Value::Int(29));

        let r = table.get_row(1).unwrap();
        assert_eq!(r.get("y").unwrap(), &Value::Int(0));
    }

    #[test]
    fn test_append_row_missing_column() {
        let mut table = Table::new("bank".to_string(), bank_schema());
        let mut bad = HashMap::new();
        bad.insert("job".to_string(), Value::Text("admin".to_string()));

        let err = table.append_row(bad).unwrap_err();
        assert!(err.contains("Missing value"));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_append_row_kind_mismatch() {
        let mut table = Table::new("bank".to_string(), bank_schema());
        let mut bad = row("admin", 34, 1);
        bad.insert("age".to_string(), Value::Text("thirty".to_string()));

        let err = table.append_row(bad).unwrap_err();
        assert!(err.contains("age"));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_append_rows_validates_all_before_insert() {
        let mut table = Table::new("bank".to_string(), bank_schema());
        let mut bad = row("services", 29, 0);
        bad.remove("y");

        let err = table
            .append_rows(vec![row("admin", 34, 1), bad])
            .unwrap_err();
        assert!(err.contains("Row 1"));
        assert_eq!(table.len(), 0);

        let count = table
            .append_rows(vec![row("admin", 34, 1), row("services", 29, 0)])
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_column_lookup() {
        let table = Table::new("bank".to_string(), bank_schema());
        assert!(table.column("balance").is_err());
        assert!(table.get_value(0, "balance").is_err());
    }

    #[test]
    fn test_iter_rows_in_order() {
        let mut table = Table::new("bank".to_string(), bank_schema());
        table
            .append_rows(vec![row("admin", 34, 1), row("services", 29, 0)])
            .unwrap();

        let ages: Vec<Value> = table
            .iter_rows()
            .map(|r| r.get("age").unwrap().clone())
            .collect();
        assert_eq!(ages, vec![Value::Int(34), Value::Int(29)]);
    }

    #[test]
    fn test_get_row_out_of_range() {
        let table = Table::new("bank".to_string(), bank_schema());
        assert!(table.get_row(0).is_err());
    }
}
