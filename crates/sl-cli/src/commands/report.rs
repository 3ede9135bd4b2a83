//! Report command implementation

use anyhow::{Context, Result};
use sl_db::execute_query;

use crate::cli::{GlobalArgs, ReportArgs};
use crate::commands::common::{self, load_config};

/// Execute the report command
pub fn execute(args: &ReportArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let run = common::run_load(global, &args.input, &config)?;
    common::verbose(
        global,
        &format!(
            "Loaded {} fact rows",
            run.schema
                .table(sl_core::FACT_TABLE)
                .map_or(0, |t| t.len())
        ),
    );

    for query in &config.queries {
        println!("== {} ==", query.name);
        let result = execute_query(&run.storage, &query.sql)
            .with_context(|| format!("Report query '{}' failed", query.name))?;
        common::print_result(&result.columns, &result.rows, args.json)?;
        println!();
    }
    Ok(())
}
