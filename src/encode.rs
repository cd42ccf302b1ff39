//! Categorical encoding for BankLens tables.
//!
//! The encoder replaces every categorical column with small integer codes and
//! records the label-to-code assignment so that user-facing string selections
//! can be translated back into codes when building filter criteria.
//!
//! Codes are assigned over the distinct labels of a column in sorted
//! (lexicographic) order, 0-based. The assignment is therefore deterministic
//! for a fixed input and stable under row reordering: the same table always
//! produces the same codes.
//!
//! # Examples
//!
//! ```
//! use banklens::{encode, ColumnKind, Schema, Table, Value};
//! use std::collections::HashMap;
//!
//! let schema = Schema::new(vec![("job".to_string(), ColumnKind::Categorical)]);
//! let mut table = Table::new("bank".to_string(), schema);
//! for job in ["services", "admin", "services"] {
//!     let mut row = HashMap::new();
//!     row.insert("job".to_string(), Value::Text(job.to_string()));
//!     table.append_row(row).unwrap();
//! }
//!
//! let (encoded, book) = encode(&table).unwrap();
//! assert_eq!(book.map("job").unwrap().code_of("admin"), Some(0));
//! assert_eq!(encoded.get_value(0, "job").unwrap(), Value::Int(1));
//! ```

use crate::column::{ColumnKind, Value};
use crate::table::{Schema, Table};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Bijection between the distinct labels of one categorical column and their
/// integer codes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeMap {
    /// Maps label to its code.
    label_to_code: HashMap<String, i64>,
    /// Stores labels by code (index = code), sorted lexicographically.
    code_to_label: Vec<String>,
}

impl CodeMap {
    /// Build a code map from an iterator of observed labels. Duplicates are
    /// collapsed; codes follow the sorted order of the distinct labels.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = labels.into_iter().collect();

        let mut label_to_code = HashMap::with_capacity(distinct.len());
        let mut code_to_label = Vec::with_capacity(distinct.len());
        for (code, label) in distinct.into_iter().enumerate() {
            label_to_code.insert(label.to_string(), code as i64);
            code_to_label.push(label.to_string());
        }

        CodeMap {
            label_to_code,
            code_to_label,
        }
    }

    /// Returns the code for a label, or None if the label was never observed.
    pub fn code_of(&self, label: &str) -> Option<i64> {
        self.label_to_code.get(label).copied()
    }

    /// Resolve a code back to its label.
    pub fn label_of(&self, code: i64) -> Option<&str> {
        if code < 0 {
            return None;
        }
        self.code_to_label.get(code as usize).map(|s| s.as_str())
    }

    /// All labels in code order (which is sorted order).
    pub fn labels(&self) -> &[String] {
        &self.code_to_label
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.code_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_label.is_empty()
    }
}

/// The code maps of every categorical column in a table, built once per
/// session by [`encode`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeBook {
    maps: HashMap<String, CodeMap>,
}

impl CodeBook {
    /// Returns the code map for a categorical column, or None if the column
    /// was not categorical (or not present) in the source table.
    pub fn map(&self, column: &str) -> Option<&CodeMap> {
        self.maps.get(column)
    }

    /// Translate a user-facing label selection into the column's code.
    /// Unknown columns and unknown labels are configuration errors.
    pub fn code_for(&self, column: &str, label: &str) -> Result<i64, String> {
        let map = self
            .maps
            .get(column)
            .ok_or_else(|| format!("No code map for column '{}'", column))?;
        map.code_of(label)
            .ok_or_else(|| format!("Unknown label '{}' for column '{}'", label, column))
    }

    /// Names of the encoded columns.
    pub fn columns(&self) -> Vec<&str> {
        self.maps.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// Encode every categorical column of `table` into integer codes.
///
/// Returns a new table of identical shape whose categorical columns have
/// become Numeric code columns, plus the [`CodeBook`] needed to translate
/// labels to codes. Numeric columns pass through unchanged; an empty table
/// encodes to an empty table with an empty book (no error conditions).
pub fn encode(table: &Table) -> Result<(Table, CodeBook), String> {
    let mut maps: HashMap<String, CodeMap> = HashMap::new();

    for i in 0..table.schema().len() {
        let (name, kind) = table.schema().get_column_info(i).unwrap();
        if kind != ColumnKind::Categorical {
            continue;
        }
        let column = table.column(name)?;
        let labels = column.values().iter().filter_map(|v| v.as_text());
        maps.insert(name.to_string(), CodeMap::from_labels(labels));
    }

    // Same column order, categorical kinds rewritten to numeric.
    let encoded_schema = Schema::new(
        (0..table.schema().len())
            .map(|i| {
                let (name, kind) = table.schema().get_column_info(i).unwrap();
                let kind = match kind {
                    ColumnKind::Categorical => ColumnKind::Numeric,
                    ColumnKind::Numeric => ColumnKind::Numeric,
                };
                (name.to_string(), kind)
            })
            .collect(),
    );

    let mut encoded = Table::new(table.name().to_string(), encoded_schema);
    for row in table.iter_rows() {
        let mut out = HashMap::with_capacity(row.len());
        for (col_name, value) in row {
            let value = match maps.get(&col_name) {
                Some(map) => {
                    let label = value
                        .as_text()
                        .ok_or_else(|| format!("Non-text value in column '{}'", col_name))?;
                    // Every label was observed in the pass above.
                    Value::Int(map.code_of(label).unwrap())
                }
                None => value,
            };
            out.insert(col_name, value);
        }
        encoded.append_row(out)?;
    }

    Ok((encoded, CodeBook { maps }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let schema = Schema::new(vec![
            ("job".to_string(), ColumnKind::Categorical),
            ("age".to_string(), ColumnKind::Numeric),
        ]);
        let mut table = Table::new("bank".to_string(), schema);
        for (job, age) in [("services", 29), ("admin", 34), ("technician", 41), ("admin", 52)] {
            let mut row = HashMap::new();
            row.insert("job".to_string(), Value::Text(job.to_string()));
            row.insert("age".to_string(), Value::Int(age));
            table.append_row(row).unwrap();
        }
        table
    }

    #[test]
    fn test_codes_follow_sorted_label_order() {
        let (_, book) = encode(&sample_table()).unwrap();
        let map = book.map("job").unwrap();

        assert_eq!(map.labels(), &["admin", "services", "technician"]);
        assert_eq!(map.code_of("admin"), Some(0));
        assert_eq!(map.code_of("services"), Some(1));
        assert_eq!(map.code_of("technician"), Some(2));
        assert_eq!(map.code_of("retired"), None);
    }

    #[test]
    fn test_encoded_table_same_shape() {
        let table = sample_table();
        let (encoded, _) = encode(&table).unwrap();

        assert_eq!(encoded.len(), table.len());
        assert_eq!(encoded.column_count(), table.column_count());
        assert_eq!(
            encoded.schema().get_column_kind("job"),
            Some(ColumnKind::Numeric)
        );

        // Row order preserved, categorical cells replaced by codes.
        assert_eq!(encoded.get_value(0, "job").unwrap(), Value::Int(1));
        assert_eq!(encoded.get_value(1, "job").unwrap(), Value::Int(0));
        assert_eq!(encoded.get_value(3, "job").unwrap(), Value::Int(0));
        // Numeric columns pass through unchanged.
        assert_eq!(encoded.get_value(2, "age").unwrap(), Value::Int(41));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let table = sample_table();
        let (_, book1) = encode(&table).unwrap();
        let (_, book2) = encode(&table).unwrap();

        let m1 = book1.map("job").unwrap();
        let m2 = book2.map("job").unwrap();
        assert_eq!(m1.labels(), m2.labels());
        for label in m1.labels() {
            assert_eq!(m1.code_of(label), m2.code_of(label));
        }
    }

    #[test]
    fn test_label_code_round_trip() {
        let (_, book) = encode(&sample_table()).unwrap();
        let map = book.map("job").unwrap();

        for label in map.labels() {
            let code = map.code_of(label).unwrap();
            assert_eq!(map.label_of(code), Some(label.as_str()));
        }
        assert_eq!(map.label_of(-1), None);
        assert_eq!(map.label_of(99), None);
    }

    #[test]
    fn test_encode_empty_table() {
        let schema = Schema::new(vec![("job".to_string(), ColumnKind::Categorical)]);
        let table = Table::new("empty".to_string(), schema);

        let (encoded, book) = encode(&table).unwrap();
        assert!(encoded.is_empty());
        assert_eq!(encoded.column_count(), 1);
        assert!(book.map("job").unwrap().is_empty());
    }

    #[test]
    fn test_codebook_code_for() {
        let (_, book) = encode(&sample_table()).unwrap();

        assert_eq!(book.code_for("job", "admin").unwrap(), 0);
        assert!(book.code_for("job", "retired").unwrap_err().contains("retired"));
        assert!(book.code_for("age", "34").unwrap_err().contains("age"));
    }
}
