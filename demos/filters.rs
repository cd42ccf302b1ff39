/// Filter Criteria Demo
///
/// This demo walks through the filter evaluator's behaviors:
/// - The identity law (no criteria -> full table)
/// - Equality and membership criteria, built from labels
/// - Conjunction across criteria
/// - The "All" / empty-multiselect sentinel
/// - Configuration errors for unknown columns and labels

use banklens::{ColumnKind, CriteriaSet, Schema, Session, Table, Value};
use std::collections::HashMap;

fn build_session() -> Result<Session, String> {
    let schema = Schema::new(vec![
        ("job".to_string(), ColumnKind::Categorical),
        ("education".to_string(), ColumnKind::Categorical),
        ("y".to_string(), ColumnKind::Numeric),
    ]);
    let mut table = Table::new("bank".to_string(), schema);
    let rows = [
        ("admin", "tertiary", 1),
        ("blue-collar", "secondary", 0),
        ("admin", "secondary", 1),
        ("services", "primary", 0),
    ];
    for (job, education, y) in rows {
        let mut row = HashMap::new();
        row.insert("job".to_string(), Value::Text(job.to_string()));
        row.insert("education".to_string(), Value::Text(education.to_string()));
        row.insert("y".to_string(), Value::Int(y));
        table.append_row(row)?;
    }
    Session::new(table, "y")
}

fn main() -> Result<(), String> {
    env_logger::init();

    println!("=== BankLens Filter Demo ===\n");

    let session = build_session()?;
    let book = session.codebook();

    // 1. Identity law
    println!("1. No criteria...");
    let view = session.filter(&CriteriaSet::new())?;
    println!("   {} rows (full table)\n", view.len());

    // 2. Equality on a label
    println!("2. job = admin...");
    let criteria = CriteriaSet::new().equals_label("job", Some("admin"), book)?;
    let view = session.filter(&criteria)?;
    println!("   rows {:?}\n", view.source_indices());

    // 3. Membership
    println!("3. education in {{secondary, tertiary}}...");
    let criteria = CriteriaSet::new().one_of_labels("education", &["secondary", "tertiary"], book)?;
    let view = session.filter(&criteria)?;
    println!("   rows {:?}\n", view.source_indices());

    // 4. Conjunction
    println!("4. job = admin AND education in {{secondary}}...");
    let criteria = CriteriaSet::new()
        .equals_label("job", Some("admin"), book)?
        .one_of_labels("education", &["secondary"], book)?;
    let view = session.filter(&criteria)?;
    println!("   rows {:?}", view.source_indices());
    let summary = session.summarize(&view)?;
    println!("   outcome rate {:?}\n", summary.outcome_rate);

    // 5. The "All" selection restricts nothing
    println!("5. job = All, education = []...");
    let criteria = CriteriaSet::new()
        .equals_label("job", None, book)?
        .one_of_labels("education", &[], book)?;
    let view = session.filter(&criteria)?;
    println!("   {} rows (unrestricted)\n", view.len());

    // 6. Criteria sets travel as JSON
    println!("6. Criteria as JSON...");
    let criteria = CriteriaSet::new()
        .equals("job", Value::Int(0))
        .one_of("education", vec![Value::Int(1), Value::Int(2)]);
    println!(
        "   {}\n",
        serde_json::to_string(&criteria).map_err(|e| e.to_string())?
    );

    // 7. Configuration errors
    println!("7. Configuration errors...");
    let bad_column = CriteriaSet::new().equals("balance", Value::Int(0));
    println!("   unknown column: {:?}", session.filter(&bad_column).err());
    let bad_label = CriteriaSet::new().equals_label("job", Some("astronaut"), book);
    println!("   unknown label:  {:?}", bad_label.err());

    Ok(())
}
