//! Plan command implementation

use anyhow::{Context, Result};
use sl_core::LifecyclePlan;
use sl_db::ddl::create_table_sql;

use crate::cli::{GlobalArgs, PlanArgs, PlanOutput};
use crate::commands::common::{self, load_catalog, load_config};

/// Execute the plan command
pub fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let catalog = load_catalog(&config)?;
    let plan = LifecyclePlan::for_catalog(&catalog).context("Failed to order schema")?;

    match args.output {
        PlanOutput::Table => print_steps(&plan),
        PlanOutput::Json => {
            let output =
                serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            println!("{output}");
        }
        PlanOutput::Ddl => {
            for name in &plan.create_order {
                let def = catalog
                    .get(name)
                    .with_context(|| format!("Table '{name}' missing from catalog"))?;
                println!("{};\n", create_table_sql(def));
            }
        }
    }
    Ok(())
}

fn print_steps(plan: &LifecyclePlan) {
    let rows: Vec<Vec<String>> = plan
        .drop_order
        .iter()
        .zip(&plan.create_order)
        .zip(&plan.insert_order)
        .enumerate()
        .map(|(i, ((drop, create), insert))| {
            vec![
                (i + 1).to_string(),
                drop.to_string(),
                create.to_string(),
                insert.to_string(),
            ]
        })
        .collect();
    common::print_table(&["STEP", "DROP", "CREATE", "INSERT"], &rows);
}
