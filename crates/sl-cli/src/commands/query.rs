//! Query command implementation

use anyhow::{Context, Result};
use sl_db::execute_query;

use crate::cli::{GlobalArgs, QueryArgs};
use crate::commands::common::{self, load_config, open_storage};

/// Execute the query command
pub fn execute(args: &QueryArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    if config.database.path == ":memory:" {
        eprintln!("Warning: querying an empty in-memory database; pass --database to query a loaded file.");
    }
    let storage = open_storage(&config)?;

    common::verbose(global, &format!("Executing: {}", args.sql));
    let result = execute_query(&storage, &args.sql).context("Failed to execute query")?;
    common::print_result(&result.columns, &result.rows, args.json)
}
