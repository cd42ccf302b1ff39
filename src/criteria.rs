//! Filter criteria for BankLens views.
//!
//! A [`Criterion`] is one user-selected condition on one column: equality
//! against a single value (the sidebar selectbox) or membership in a set of
//! values (the multiselect). A [`CriteriaSet`] is the conjunction of the
//! active criteria; an empty set means "no restriction".
//!
//! Criteria are serde-tagged so the widget collaborator can ship them as
//! JSON, e.g. `{"type": "equals", "column": "job", "value": 4}`.

use crate::column::Value;
use crate::encode::CodeBook;
use serde::{Deserialize, Serialize};

/// A single filter condition on one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Criterion {
    /// Row passes if the column equals the value.
    Equals { column: String, value: Value },
    /// Row passes if the column equals any of the values. An empty set is
    /// the "All" sentinel: the criterion is inactive and restricts nothing.
    OneOf { column: String, values: Vec<Value> },
}

impl Criterion {
    /// The column this criterion refers to.
    pub fn column(&self) -> &str {
        match self {
            Criterion::Equals { column, .. } => column,
            Criterion::OneOf { column, .. } => column,
        }
    }

    /// An inactive criterion is excluded from evaluation.
    pub fn is_active(&self) -> bool {
        match self {
            Criterion::Equals { .. } => true,
            Criterion::OneOf { values, .. } => !values.is_empty(),
        }
    }

    /// Evaluate this criterion against one cell value.
    pub fn accepts(&self, cell: &Value) -> bool {
        match self {
            Criterion::Equals { value, .. } => cell.same_as(value),
            Criterion::OneOf { values, .. } => values.iter().any(|v| cell.same_as(v)),
        }
    }
}

/// Conjunction of filter criteria.
///
/// Built either directly from values or from user-facing labels translated
/// through a [`CodeBook`]:
///
/// ```
/// use banklens::{CriteriaSet, Value};
///
/// let criteria = CriteriaSet::new()
///     .equals("job", Value::Int(0))
///     .one_of("education", vec![Value::Int(1), Value::Int(2)]);
/// assert_eq!(criteria.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriteriaSet {
    criteria: Vec<Criterion>,
}

impl CriteriaSet {
    pub fn new() -> Self {
        CriteriaSet::default()
    }

    pub fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    /// Add an equality criterion.
    pub fn equals(mut self, column: &str, value: Value) -> Self {
        self.criteria.push(Criterion::Equals {
            column: column.to_string(),
            value,
        });
        self
    }

    /// Add a membership criterion. An empty value set is kept but inactive.
    pub fn one_of(mut self, column: &str, values: Vec<Value>) -> Self {
        self.criteria.push(Criterion::OneOf {
            column: column.to_string(),
            values,
        });
        self
    }

    /// Add an equality criterion from a user-facing label, translated to the
    /// column's code. `None` is the "All" selection and adds nothing.
    pub fn equals_label(
        mut self,
        column: &str,
        label: Option<&str>,
        book: &CodeBook,
    ) -> Result<Self, String> {
        if let Some(label) = label {
            let code = book.code_for(column, label)?;
            self.criteria.push(Criterion::Equals {
                column: column.to_string(),
                value: Value::Int(code),
            });
        }
        Ok(self)
    }

    /// Add a membership criterion from user-facing labels. An empty selection
    /// adds nothing (no restriction).
    pub fn one_of_labels(
        mut self,
        column: &str,
        labels: &[&str],
        book: &CodeBook,
    ) -> Result<Self, String> {
        if labels.is_empty() {
            return Ok(self);
        }
        let values = labels
            .iter()
            .map(|label| book.code_for(column, label).map(Value::Int))
            .collect::<Result<Vec<Value>, String>>()?;
        self.criteria.push(Criterion::OneOf {
            column: column.to_string(),
            values,
        });
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    /// The active criteria, i.e. those that actually restrict rows.
    pub fn active(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter().filter(|c| c.is_active())
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
