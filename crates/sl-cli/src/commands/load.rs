//! Load command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, LoadArgs};
use crate::commands::common::{self, load_config};

/// Execute the load command
pub fn execute(args: &LoadArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let run = common::run_load(global, &args.input, &config)?;

    if args.json {
        let counts: serde_json::Map<String, serde_json::Value> = run
            .report
            .tables
            .iter()
            .map(|t| (t.table.clone(), serde_json::Value::from(t.rows)))
            .collect();
        let output = serde_json::to_string_pretty(&counts).context("Failed to serialize counts")?;
        println!("{output}");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = run
        .report
        .tables
        .iter()
        .map(|t| vec![t.table.clone(), t.rows.to_string()])
        .collect();
    common::print_table(&["TABLE", "ROWS"], &rows);
    println!(
        "\nLoaded {} rows into {} tables ({})",
        run.report.total_rows(),
        run.report.tables.len(),
        config.database.path
    );
    if config.database.path == ":memory:" {
        eprintln!("Note: the database is in memory; pass --database to keep the result.");
    }
    Ok(())
}
