use banklens::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;
use std::rc::Rc;

const JOBS: [&str; 6] = [
    "admin",
    "blue-collar",
    "management",
    "retired",
    "services",
    "technician",
];
const EDUCATIONS: [&str; 4] = ["primary", "secondary", "tertiary", "unknown"];

fn build_table(rows: usize) -> Table {
    let schema = Schema::new(vec![
        ("job".to_string(), ColumnKind::Categorical),
        ("education".to_string(), ColumnKind::Categorical),
        ("age".to_string(), ColumnKind::Numeric),
        ("y".to_string(), ColumnKind::Numeric),
    ]);
    let mut table = Table::new("bank".to_string(), schema);
    let rows: Vec<HashMap<String, Value>> = (0..rows)
        .map(|i| {
            let mut row = HashMap::new();
            row.insert(
                "job".to_string(),
                Value::Text(JOBS[i % JOBS.len()].to_string()),
            );
            row.insert(
                "education".to_string(),
                Value::Text(EDUCATIONS[i % EDUCATIONS.len()].to_string()),
            );
            row.insert("age".to_string(), Value::Int(18 + (i % 60) as i64));
            row.insert("y".to_string(), Value::Int((i % 5 == 0) as i64));
            row
        })
        .collect();
    table.append_rows(rows).unwrap();
    table
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [100, 1000, 10000].iter() {
        let table = build_table(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| encode(black_box(&table)).unwrap());
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1000, 10000].iter() {
        let session = Session::new(build_table(*size), "y").unwrap();
        let criteria = CriteriaSet::new()
            .equals_label("job", Some("admin"), session.codebook())
            .unwrap()
            .one_of_labels("education", &["secondary", "tertiary"], session.codebook())
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| session.filter(black_box(&criteria)).unwrap());
        });
    }
    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for size in [100, 1000, 10000].iter() {
        let session = Session::new(build_table(*size), "y").unwrap();
        let view = session.filter(&CriteriaSet::new()).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| session.summarize(black_box(&view)).unwrap());
        });
    }
    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_matrix");

    for size in [100, 1000, 10000].iter() {
        let session = Session::new(build_table(*size), "y").unwrap();
        let view = session.filter(&CriteriaSet::new()).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| correlation_matrix(black_box(&view)).unwrap());
        });
    }
    group.finish();
}

fn bench_view_row_access(c: &mut Criterion) {
    let table = Rc::new(build_table(10000));
    let view = FilterView::new("all".to_string(), table, &CriteriaSet::new()).unwrap();

    c.bench_function("view_get_row", |b| {
        b.iter(|| view.get_row(black_box(5000)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_filter,
    bench_summarize,
    bench_correlation,
    bench_view_row_access
);
criterion_main!(benches);
