//! Column storage for BankLens tables.
//!
//! A Column is an array-like random-access container holding the cells of one
//! table column. Every column has a declared [`ColumnKind`] fixed at load
//! time; values are kind-checked on append so that downstream passes (the
//! encoder, the filter evaluator, the aggregators) never have to re-inspect
//! cell types.

use serde::{Deserialize, Serialize};

/// Declared kind of a column.
///
/// The kind is part of the schema, declared alongside the data source rather
/// than inferred per operation from the cells themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Continuous or integer-valued numbers, including encoder-produced codes.
    Numeric,
    /// Discrete text labels drawn from a small set (job type, education, ...).
    Categorical,
}

/// A single cell value.
///
/// Numeric columns hold `Int` or `Float`; categorical columns hold `Text`
/// until the encoder replaces them with `Int` codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric reading of the value, coercing `Int` to `f64`.
    /// Returns None for text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    /// Returns true if this value belongs in a column of the given kind.
    pub fn fits(&self, kind: ColumnKind) -> bool {
        match kind {
            ColumnKind::Numeric => matches!(self, Value::Int(_) | Value::Float(_)),
            ColumnKind::Categorical => matches!(self, Value::Text(_)),
        }
    }

    /// Equality used by filter criteria: numeric values compare by magnitude
    /// (so `Int(1)` matches `Float(1.0)`), text compares exactly.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.as_text() == other.as_text(),
        }
    }
}

/// One column of a table: a declared kind plus its cells in row order.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: String, kind: ColumnKind) -> Self {
        Column {
            name,
            kind,
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Kind-check and append a value.
    pub fn append(&mut self, value: Value) -> Result<(), String> {
        if !value.fits(self.kind) {
            return Err(format!(
                "Column '{}' is {:?} but got {:?}",
                self.name, self.kind, value
            ));
        }
        self.values.push(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<Value, String> {
        self.values.get(index).cloned().ok_or_else(|| {
            format!(
                "Index {} out of range [0, {}) in column '{}'",
                index,
                self.values.len(),
                self.name
            )
        })
    }

    /// Numeric reading of a cell (None for text cells or out-of-range index).
    pub fn get_number(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(|v| v.as_number())
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_get() {
        let mut col = Column::new("age".to_string(), ColumnKind::Numeric);
        col.append(Value::Int(34)).unwrap();
        col.append(Value::Float(41.5)).unwrap();

        assert_eq!(col.len(), 2);
        assert_eq!(col.get(0).unwrap(), Value::Int(34));
        assert_eq!(col.get(1).unwrap(), Value::Float(41.5));
    }

    #[test]
    fn test_kind_check_on_append() {
        let mut col = Column::new("job".to_string(), ColumnKind::Categorical);
        col.append(Value::Text("admin".to_string())).unwrap();

        let err = col.append(Value::Int(3)).unwrap_err();
        assert!(err.contains("job"));
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn test_get_out_of_range() {
        let col = Column::new("y".to_string(), ColumnKind::Numeric);
        assert!(col.get(0).is_err());
        assert!(col.get_number(0).is_none());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Int(7).as_number(), Some(7.0));
        assert_eq!(Value::Float(0.5).as_number(), Some(0.5));
        assert_eq!(Value::Text("yes".to_string()).as_text(), Some("yes"));
        assert_eq!(Value::Text("yes".to_string()).as_number(), None);
    }

    #[test]
    fn test_same_as_coerces_numerics() {
        assert!(Value::Int(1).same_as(&Value::Float(1.0)));
        assert!(!Value::Int(1).same_as(&Value::Int(2)));
        assert!(Value::Text("a".to_string()).same_as(&Value::Text("a".to_string())));
        assert!(!Value::Text("1".to_string()).same_as(&Value::Int(1)));
    }

    #[test]
    fn test_value_untagged_json() {
        assert_eq!(serde_json::to_string(&Value::Int(4)).unwrap(), "4");
        assert_eq!(
            serde_json::to_string(&Value::Text("admin".to_string())).unwrap(),
            "\"admin\""
        );
        let v: Value = serde_json::from_str("4").unwrap();
        assert_eq!(v, Value::Int(4));
    }
}
