//! Filtered views over BankLens tables.
//!
//! A [`FilterView`] is a read-only subsequence of a source table's rows: the
//! rows satisfying every active criterion of a [`CriteriaSet`], in source
//! order. The view holds only an index mapping; it never copies or mutates
//! the table. Because the table is immutable after load, a view stays valid
//! for the whole session and is simply rebuilt when the criteria change.

use crate::column::Value;
use crate::criteria::CriteriaSet;
use crate::table::Table;
use std::collections::HashMap;
use std::rc::Rc;

/// A stable, order-preserving filtered view of a table.
///
/// # Examples
///
/// ```
/// use banklens::{ColumnKind, CriteriaSet, FilterView, Schema, Table, Value};
/// use std::collections::HashMap;
/// use std::rc::Rc;
///
/// let schema = Schema::new(vec![("y".to_string(), ColumnKind::Numeric)]);
/// let mut table = Table::new("bank".to_string(), schema);
/// for y in [1, 0, 1] {
///     let mut row = HashMap::new();
///     row.insert("y".to_string(), Value::Int(y));
///     table.append_row(row).unwrap();
/// }
///
/// let criteria = CriteriaSet::new().equals("y", Value::Int(1));
/// let view = FilterView::new("subscribed".to_string(), Rc::new(table), &criteria).unwrap();
/// assert_eq!(view.len(), 2);
/// assert_eq!(view.source_indices(), &[0, 2]);
/// ```
#[derive(Debug)]
pub struct FilterView {
    name: String,
    source: Rc<Table>,
    view_to_source: Vec<usize>,
}

impl FilterView {
    /// Build a view of the rows matching `criteria`.
    ///
    /// Every referenced column is validated against the source schema up
    /// front; a criterion naming an unknown column is a configuration error,
    /// never silently dropped. An empty criteria set yields the full table.
    pub fn new(name: String, source: Rc<Table>, criteria: &CriteriaSet) -> Result<Self, String> {
        for criterion in criteria.iter() {
            if source.schema().get_column_index(criterion.column()).is_none() {
                return Err(format!(
                    "Criterion references unknown column '{}'",
                    criterion.column()
                ));
            }
        }

        let mut view_to_source = Vec::new();
        'rows: for i in 0..source.len() {
            for criterion in criteria.active() {
                let cell = source.get_value(i, criterion.column())?;
                if !criterion.accepts(&cell) {
                    continue 'rows;
                }
            }
            view_to_source.push(i);
        }

        Ok(FilterView {
            name,
            source,
            view_to_source,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows in the view.
    pub fn len(&self) -> usize {
        self.view_to_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_source.is_empty()
    }

    /// The source table this view indexes into.
    pub fn source(&self) -> &Table {
        &self.source
    }

    /// Source row indices of the view's rows, in view (= source) order.
    pub fn source_indices(&self) -> &[usize] {
        &self.view_to_source
    }

    pub fn get_row(&self, index: usize) -> Result<HashMap<String, Value>, String> {
        let source_index = *self.view_to_source.get(index).ok_or_else(|| {
            format!("Index {} out of range [0, {})", index, self.len())
        })?;
        self.source.get_row(source_index)
    }

    pub fn get_value(&self, row: usize, column: &str) -> Result<Value, String> {
        let source_index = *self.view_to_source.get(row).ok_or_else(|| {
            format!("Row {} out of range [0, {})", row, self.len())
        })?;
        self.source.get_value(source_index, column)
    }

    /// First `n` rows of the view, for the data-preview tab.
    pub fn head(&self, n: usize) -> Result<Vec<HashMap<String, Value>>, String> {
        (0..n.min(self.len())).map(|i| self.get_row(i)).collect()
    }

    pub fn iter_rows(&self) -> ViewRowIterator<'_> {
        ViewRowIterator {
            view: self,
            index: 0,
        }
    }
}

/// Iterator over view rows as column-name-to-value maps.
pub struct ViewRowIterator<'a> {
    view: &'a FilterView,
    index: usize,
}

impl<'a> Iterator for ViewRowIterator<'a> {
    type Item = HashMap<String, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.view.len() {
            return None;
        }
        let row = self.view.get_row(self.index).ok()?;
        self.index += 1;
        Some(row)
    }
}
