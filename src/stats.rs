//! Summary statistics and chart-ready aggregates over filtered views.
//!
//! Everything here is a pure function of a [`FilterView`]: the metric-card
//! scalars ([`summarize`]), the per-value counts behind the subscription and
//! demographic histograms, equal-width binning for continuous columns, and
//! the Pearson correlation matrix behind the heatmap tab. Outputs are plain
//! serializable data; rendering belongs to the caller.

use crate::column::{ColumnKind, Value};
use crate::view::FilterView;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// The metric-card scalars of a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of rows in the view.
    pub row_count: usize,
    /// Number of columns; constant across filters.
    pub column_count: usize,
    /// Mean of the designated binary outcome column, or None for an empty
    /// view (a mean over zero rows is undefined, never a division by zero).
    pub outcome_rate: Option<f64>,
}

impl Summary {
    /// The summary as a JSON mapping of named scalars, the shape handed to
    /// the rendering collaborator.
    pub fn to_json(&self) -> Result<serde_json::Value, String> {
        serde_json::to_value(self).map_err(|e| format!("Failed to serialize summary: {}", e))
    }
}

/// Occurrence count of one distinct value in a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: Value,
    pub count: usize,
}

/// Occurrence count of one (value, group) pair, for grouped histograms such
/// as "job vs subscription".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedCount {
    pub value: Value,
    pub group: Value,
    pub count: usize,
}

/// One equal-width histogram bin over `[lo, hi)` (the last bin is closed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Pearson correlation over the numeric columns of a view.
///
/// `values[i][j]` is the correlation of `columns[i]` with `columns[j]`.
/// Undefined entries (fewer than two rows, zero variance) are NaN.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Compute the metric-card summary of a view.
///
/// The outcome column must exist in the view's schema; for an empty view the
/// rate is None rather than a numeric error.
pub fn summarize(view: &FilterView, outcome_column: &str) -> Result<Summary, String> {
    let column = view.source().column(outcome_column)?;

    let outcome_rate = if view.is_empty() {
        None
    } else {
        let mut sum = 0.0;
        for &i in view.source_indices() {
            let v = column.get_number(i).ok_or_else(|| {
                format!("Non-numeric value in outcome column '{}'", outcome_column)
            })?;
            sum += v;
        }
        Some(sum / view.len() as f64)
    };

    Ok(Summary {
        row_count: view.len(),
        column_count: view.source().column_count(),
        outcome_rate,
    })
}

/// Count occurrences of each distinct value in a column, sorted by value.
pub fn value_counts(view: &FilterView, column: &str) -> Result<Vec<ValueCount>, String> {
    let col = view.source().column(column)?;

    let mut counts: Vec<(Value, usize)> = Vec::new();
    for &i in view.source_indices() {
        let cell = col.get(i)?;
        match counts.iter_mut().find(|(v, _)| v.same_as(&cell)) {
            Some((_, n)) => *n += 1,
            None => counts.push((cell, 1)),
        }
    }
    counts.sort_by(|(a, _), (b, _)| cmp_values(a, b));

    Ok(counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect())
}

/// Count occurrences of each (value, group) pair, sorted by value then group.
/// This backs the grouped bar charts (e.g. `column = "job"`, `by = "y"`).
pub fn grouped_counts(
    view: &FilterView,
    column: &str,
    by: &str,
) -> Result<Vec<GroupedCount>, String> {
    let col = view.source().column(column)?;
    let group_col = view.source().column(by)?;

    let mut counts: Vec<(Value, Value, usize)> = Vec::new();
    for &i in view.source_indices() {
        let cell = col.get(i)?;
        let group = group_col.get(i)?;
        match counts
            .iter_mut()
            .find(|(v, g, _)| v.same_as(&cell) && g.same_as(&group))
        {
            Some((_, _, n)) => *n += 1,
            None => counts.push((cell, group, 1)),
        }
    }
    counts.sort_by(|(av, ag, _), (bv, bg, _)| {
        cmp_values(av, bv).then_with(|| cmp_values(ag, bg))
    });

    Ok(counts
        .into_iter()
        .map(|(value, group, count)| GroupedCount {
            value,
            group,
            count,
        })
        .collect())
}

/// Equal-width histogram of a numeric column.
///
/// An empty view yields no bins. A constant column yields a single bin
/// holding every row. `bins` must be at least 1.
pub fn histogram(view: &FilterView, column: &str, bins: usize) -> Result<Vec<HistogramBin>, String> {
    if bins == 0 {
        return Err("Histogram needs at least one bin".to_string());
    }
    if view.source().schema().get_column_kind(column) != Some(ColumnKind::Numeric) {
        return Err(format!("Column '{}' is not numeric", column));
    }
    let col = view.source().column(column)?;

    let mut numbers = Vec::with_capacity(view.len());
    for &i in view.source_indices() {
        let v = col
            .get_number(i)
            .ok_or_else(|| format!("Non-numeric value in column '{}'", column))?;
        numbers.push(v);
    }

    if numbers.is_empty() {
        return Ok(Vec::new());
    }

    let lo = numbers.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = numbers.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if lo == hi {
        return Ok(vec![HistogramBin {
            lo,
            hi,
            count: numbers.len(),
        }]);
    }

    let width = (hi - lo) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|b| HistogramBin {
            lo: lo + b as f64 * width,
            hi: lo + (b + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for v in numbers {
        let mut bin = ((v - lo) / width) as usize;
        // The maximum lands in the last (closed) bin.
        if bin >= bins {
            bin = bins - 1;
        }
        result[bin].count += 1;
    }

    Ok(result)
}

/// Pearson correlation matrix over all numeric columns of the view.
pub fn correlation_matrix(view: &FilterView) -> Result<CorrelationMatrix, String> {
    let schema = view.source().schema();
    let mut columns = Vec::new();
    for i in 0..schema.len() {
        let (name, kind) = schema.get_column_info(i).unwrap();
        if kind == ColumnKind::Numeric {
            columns.push(name.to_string());
        }
    }

    let mut series: Vec<Vec<f64>> = Vec::with_capacity(columns.len());
    for name in &columns {
        let col = view.source().column(name)?;
        let mut values = Vec::with_capacity(view.len());
        for &i in view.source_indices() {
            let v = col
                .get_number(i)
                .ok_or_else(|| format!("Non-numeric value in column '{}'", name))?;
            values.push(v);
        }
        series.push(values);
    }

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}

/// Pearson correlation coefficient of two equal-length series.
/// NaN when fewer than two points or either series has zero variance.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for i in 0..n {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

/// Display ordering for count outputs: numbers before text, numbers by
/// magnitude, text lexicographically.
fn cmp_values(a: &Value, b: &Value) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.as_text().cmp(&b.as_text()),
    }
}

/// Group a view's rows plus a summary into the JSON payload handed to the
/// rendering collaborator.
pub fn render_payload(
    view: &FilterView,
    summary: &Summary,
    preview_rows: usize,
) -> Result<serde_json::Value, String> {
    let head: Vec<HashMap<String, Value>> = view.head(preview_rows)?;
    let mut payload = serde_json::Map::new();
    payload.insert("summary".to_string(), summary.to_json()?);
    payload.insert(
        "preview".to_string(),
        serde_json::to_value(head).map_err(|e| format!("Failed to serialize preview: {}", e))?,
    );
    Ok(serde_json::Value::Object(payload))
}
