/// Bank Marketing Dashboard Demo
///
/// This demo runs the whole engine end to end, printing what each dashboard
/// tab would render:
/// - Loading a CSV and building a session (encode once)
/// - Applying sidebar filters (selectbox + multiselect)
/// - Metric cards, data preview, histograms, correlation heatmap data

use banklens::{
    correlation_matrix, grouped_counts, histogram, render_payload, value_counts, ColumnKind,
    CriteriaSet, Schema, Session, Table, Value,
};

const BANK_CSV: &str = "\
job,education,age,housing,y
admin,tertiary,34,yes,1
blue-collar,secondary,41,no,0
admin,secondary,29,yes,1
technician,tertiary,52,no,0
services,secondary,37,yes,0
admin,tertiary,45,no,1
blue-collar,primary,33,yes,0
technician,secondary,26,no,1
";

fn load_session() -> Result<Session, String> {
    let schema = Schema::new(vec![
        ("job".to_string(), ColumnKind::Categorical),
        ("education".to_string(), ColumnKind::Categorical),
        ("age".to_string(), ColumnKind::Numeric),
        ("housing".to_string(), ColumnKind::Categorical),
        ("y".to_string(), ColumnKind::Numeric),
    ]);
    let table: Table = banklens::read_csv(BANK_CSV.as_bytes(), "bank_marketing".to_string(), &schema)?;
    Session::new(table, "y")
}

fn main() -> Result<(), String> {
    env_logger::init();

    println!("=== BankLens Dashboard Demo ===\n");

    // 1. Load the dataset and build the session
    println!("1. Loading dataset...");
    let session = load_session()?;
    println!(
        "   Session over '{}': {} rows, {} columns\n",
        session.table().name(),
        session.table().len(),
        session.table().column_count()
    );

    // 2. Sidebar options come straight from the code book
    println!("2. Sidebar filter options...");
    println!("   Job types:  {:?}", session.options("job")?);
    println!("   Educations: {:?}\n", session.options("education")?);

    // 3. Apply the user's selections
    println!("3. Applying filters (job = admin OR technician, education in {{secondary, tertiary}})...");
    let criteria = CriteriaSet::new()
        .one_of_labels("job", &["admin", "technician"], session.codebook())?
        .one_of_labels("education", &["secondary", "tertiary"], session.codebook())?;
    let view = session.filter(&criteria)?;
    println!("   {} of {} rows match\n", view.len(), session.table().len());

    // 4. Metric cards
    println!("4. Metric cards...");
    let summary = session.summarize(&view)?;
    println!("   Total Records:  {}", summary.row_count);
    println!("   Total Features: {}", summary.column_count);
    match summary.outcome_rate {
        Some(rate) => println!("   Subscription Rate: {:.2}%\n", rate * 100.0),
        None => println!("   Subscription Rate: n/a (no rows)\n"),
    }

    // 5. Data preview tab
    println!("5. Data preview (first 3 rows)...");
    for (i, row) in view.head(3)?.into_iter().enumerate() {
        let job = row.get("job").cloned().unwrap_or(Value::Int(-1));
        println!(
            "   Row {}: job={} age={:?} y={:?}",
            i,
            session.label("job", &job).unwrap_or("?"),
            row.get("age").unwrap(),
            row.get("y").unwrap()
        );
    }
    println!();

    // 6. Visual analytics tab: subscription + grouped histograms
    println!("6. Subscription histogram...");
    for vc in value_counts(&view, "y")? {
        println!("   y={:?}: {} rows", vc.value, vc.count);
    }
    println!("   Job vs subscription:");
    for gc in grouped_counts(&view, "job", "y")? {
        println!(
            "   job={} y={:?}: {} rows",
            session.label("job", &gc.value).unwrap_or("?"),
            gc.group,
            gc.count
        );
    }
    println!();

    // 7. Demographics tab: age distribution
    println!("7. Age distribution (4 bins)...");
    for bin in histogram(&view, "age", 4)? {
        println!("   [{:5.1}, {:5.1}): {}", bin.lo, bin.hi, bin.count);
    }
    println!();

    // 8. Correlation heatmap tab
    println!("8. Correlation matrix...");
    let matrix = correlation_matrix(&view)?;
    println!("   columns: {:?}", matrix.columns);
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let cells: Vec<String> = row.iter().map(|v| format!("{:+.2}", v)).collect();
        println!("   {:10} {}", name, cells.join(" "));
    }
    println!();

    // 9. The JSON payload a rendering collaborator would receive
    println!("9. Render payload...");
    let payload = render_payload(&view, &summary, 2)?;
    println!("   {}", serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?);

    Ok(())
}
