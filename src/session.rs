//! Session context: the one-time setup shared by every interaction.
//!
//! A [`Session`] replaces the original dashboards' process-wide dataframe
//! with an explicit immutable object: the encoded table, the code book, and
//! the designated outcome column, built once at startup and passed by
//! reference to every operation. Changing a filter reruns only the
//! filter-and-summarize pass; the encoding is cached for the session's
//! lifetime.

use crate::column::Value;
use crate::criteria::CriteriaSet;
use crate::encode::{encode, CodeBook};
use crate::loader::load_csv;
use crate::stats::{summarize, Summary};
use crate::table::{Schema, Table};
use crate::view::FilterView;
use std::path::Path;
use std::rc::Rc;

/// Immutable per-dataset context: encoded table + code book + outcome column.
///
/// # Examples
///
/// ```
/// use banklens::{ColumnKind, CriteriaSet, Schema, Session, Table, Value};
/// use std::collections::HashMap;
///
/// let schema = Schema::new(vec![
///     ("job".to_string(), ColumnKind::Categorical),
///     ("y".to_string(), ColumnKind::Numeric),
/// ]);
/// let mut table = Table::new("bank".to_string(), schema);
/// for (job, y) in [("admin", 1), ("services", 0)] {
///     let mut row = HashMap::new();
///     row.insert("job".to_string(), Value::Text(job.to_string()));
///     row.insert("y".to_string(), Value::Int(y));
///     table.append_row(row).unwrap();
/// }
///
/// let session = Session::new(table, "y").unwrap();
/// let criteria = CriteriaSet::new()
///     .equals_label("job", Some("admin"), session.codebook())
///     .unwrap();
/// let view = session.filter(&criteria).unwrap();
/// let summary = session.summarize(&view).unwrap();
/// assert_eq!(summary.row_count, 1);
/// assert_eq!(summary.outcome_rate, Some(1.0));
/// ```
#[derive(Debug)]
pub struct Session {
    table: Rc<Table>,
    codebook: CodeBook,
    outcome_column: String,
}

impl Session {
    /// Build a session from an already-loaded table. Runs the categorical
    /// encoding pass once; the outcome column must exist in the schema.
    pub fn new(table: Table, outcome_column: &str) -> Result<Self, String> {
        if table.schema().get_column_index(outcome_column).is_none() {
            return Err(format!(
                "Outcome column '{}' not found in table '{}'",
                outcome_column,
                table.name()
            ));
        }

        let (encoded, codebook) = encode(&table)?;
        log::debug!(
            "Session over '{}': {} rows, {} columns, {} categorical",
            encoded.name(),
            encoded.len(),
            encoded.column_count(),
            codebook.len()
        );

        Ok(Session {
            table: Rc::new(encoded),
            codebook,
            outcome_column: outcome_column.to_string(),
        })
    }

    /// Load a CSV against the declared schema and build the session from it.
    pub fn from_csv(path: &Path, schema: &Schema, outcome_column: &str) -> Result<Self, String> {
        let table = load_csv(path, schema)?;
        Session::new(table, outcome_column)
    }

    /// The encoded table (categorical columns hold integer codes).
    pub fn table(&self) -> &Rc<Table> {
        &self.table
    }

    pub fn codebook(&self) -> &CodeBook {
        &self.codebook
    }

    pub fn outcome_column(&self) -> &str {
        &self.outcome_column
    }

    /// Sorted distinct labels of a categorical column, for populating the
    /// sidebar selectbox/multiselect.
    pub fn options(&self, column: &str) -> Result<&[String], String> {
        if self.table.schema().get_column_index(column).is_none() {
            return Err(format!("Column '{}' not found", column));
        }
        self.codebook
            .map(column)
            .map(|m| m.labels())
            .ok_or_else(|| format!("Column '{}' is not categorical", column))
    }

    /// The per-interaction recomputation: build the view for the current
    /// criteria. The source table is never mutated.
    pub fn filter(&self, criteria: &CriteriaSet) -> Result<FilterView, String> {
        let view = FilterView::new(
            format!("{}_filtered", self.table.name()),
            self.table.clone(),
            criteria,
        )?;
        log::debug!(
            "Filter pass: {} active criteria, {} of {} rows",
            criteria.active().count(),
            view.len(),
            self.table.len()
        );
        Ok(view)
    }

    /// Summarize a view against the session's outcome column.
    pub fn summarize(&self, view: &FilterView) -> Result<Summary, String> {
        summarize(view, &self.outcome_column)
    }

    /// Decode a code back to its label, for chart axis ticks.
    pub fn label(&self, column: &str, value: &Value) -> Option<&str> {
        let code = value.as_i64()?;
        self.codebook.map(column)?.label_of(code)
    }
}
