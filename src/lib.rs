//! BankLens - Tabular Filter & Summary Engine
//!
//! The data engine behind a pair of bank-marketing dashboards: load a CSV
//! into an immutable columnar table, encode categorical columns to integer
//! codes, apply the user's sidebar filters, and compute the metric-card
//! summary and chart-ready aggregates over the filtered view. Rendering and
//! widgets live elsewhere; everything this crate returns is plain data,
//! serializable to JSON.
//!
//! The usual flow is one [`Session`] per dataset, then one filter-and-
//! summarize pass per user interaction:
//!
//! ```
//! use banklens::{ColumnKind, CriteriaSet, Schema, Session, Table, Value};
//! use std::collections::HashMap;
//!
//! let schema = Schema::new(vec![
//!     ("job".to_string(), ColumnKind::Categorical),
//!     ("y".to_string(), ColumnKind::Numeric),
//! ]);
//! let mut table = Table::new("bank".to_string(), schema);
//! let mut row = HashMap::new();
//! row.insert("job".to_string(), Value::Text("admin".to_string()));
//! row.insert("y".to_string(), Value::Int(1));
//! table.append_row(row).unwrap();
//!
//! let session = Session::new(table, "y").unwrap();
//! let view = session.filter(&CriteriaSet::new()).unwrap();
//! assert_eq!(session.summarize(&view).unwrap().row_count, 1);
//! ```

pub mod column;
pub mod criteria;
pub mod encode;
pub mod loader;
pub mod session;
pub mod stats;
pub mod table;
pub mod view;

pub use column::{Column, ColumnKind, Value};
pub use criteria::{CriteriaSet, Criterion};
pub use encode::{encode, CodeBook, CodeMap};
pub use loader::{load_csv, read_csv};
pub use session::Session;
pub use stats::{
    correlation_matrix, grouped_counts, histogram, render_payload, summarize, value_counts,
    CorrelationMatrix, GroupedCount, HistogramBin, Summary, ValueCount,
};
pub use table::{Schema, Table};
pub use view::FilterView;
