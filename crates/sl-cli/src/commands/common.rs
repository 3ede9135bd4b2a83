//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use sl_core::{
    build_star_schema, shipment_catalog, Config, PipelineOptions, SchemaCatalog, StarSchema,
    UnmatchedPolicy,
};
use sl_db::{apply_schema, read_csv_table, DuckDbStorage, LoadOrchestrator, LoadReport};
use std::path::Path;

use crate::cli::{GlobalArgs, InputArgs};

/// Load starload.yml from `--config`, or from the working directory if one
/// exists there, then apply command-line overrides.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(Path::new(path)).context("Failed to load config")?,
        None => Config::load_or_default(Path::new(".")).context("Failed to load config")?,
    };
    if let Some(db) = &global.database {
        config.database.path = db.clone();
    }
    Ok(config)
}

/// The shipment catalog with configured offsets applied.
pub(crate) fn load_catalog(config: &Config) -> Result<SchemaCatalog> {
    shipment_catalog()
        .with_offsets(&config.offsets)
        .context("Invalid offsets in config")
}

pub(crate) fn open_storage(config: &Config) -> Result<DuckDbStorage> {
    DuckDbStorage::open(&config.database.path)
        .with_context(|| format!("Failed to open database '{}'", config.database.path))
}

/// CSV path from `--input`, falling back to `input` in starload.yml.
pub(crate) fn resolve_input(args: &InputArgs, config: &Config) -> Result<String> {
    match args.input.as_ref().or(config.input.as_ref()) {
        Some(path) => Ok(path.clone()),
        None => bail!("No input file: pass --input or set `input` in starload.yml"),
    }
}

pub(crate) fn pipeline_options(args: &InputArgs, config: &Config) -> PipelineOptions {
    let unmatched = if args.strict {
        UnmatchedPolicy::Reject
    } else {
        config.unmatched
    };
    PipelineOptions { unmatched }
}

/// Everything a completed load leaves behind.
pub(crate) struct LoadRun {
    pub(crate) storage: DuckDbStorage,
    pub(crate) schema: StarSchema,
    pub(crate) report: LoadReport,
}

/// Ingest, transform, recreate the schema and load it.
pub(crate) fn run_load(global: &GlobalArgs, args: &InputArgs, config: &Config) -> Result<LoadRun> {
    let input = resolve_input(args, config)?;
    let catalog = load_catalog(config)?;
    let storage = open_storage(config)?;

    verbose(global, &format!("Reading {input}"));
    let raw = read_csv_table(
        &storage,
        Path::new(&input),
        &config.date_columns,
        Some(catalog.raw_columns().as_slice()),
    )
    .with_context(|| format!("Failed to read input '{input}'"))?;
    verbose(global, &format!("Read {} rows", raw.len()));

    let schema = build_star_schema(&raw, &catalog, pipeline_options(args, config))
        .context("Failed to build star schema")?;
    for (name, rows) in schema.row_counts() {
        verbose(global, &format!("Built {name} ({rows} rows)"));
    }

    apply_schema(&storage, schema.catalog(), schema.plan())
        .context("Failed to recreate schema")?;
    let report = LoadOrchestrator::new(&storage)
        .load(&schema)
        .context("Load failed; no rows were committed")?;

    Ok(LoadRun {
        storage,
        schema,
        report,
    })
}

pub(crate) fn verbose(global: &GlobalArgs, message: &str) {
    if global.verbose {
        eprintln!("[verbose] {message}");
    }
}

/// Compute the display width of each column.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a left-aligned table with a dashed separator under the header.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}

/// Query rows as JSON objects keyed by column; `"null"` cells become `null`.
pub(crate) fn rows_to_json(columns: &[String], rows: &[Vec<String>]) -> serde_json::Value {
    let json_rows: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let map: serde_json::Map<String, serde_json::Value> = columns
                .iter()
                .zip(row.iter())
                .map(|(col, val)| {
                    let json_val = if val == "null" {
                        serde_json::Value::Null
                    } else {
                        serde_json::Value::String(val.clone())
                    };
                    (col.clone(), json_val)
                })
                .collect();
            serde_json::Value::Object(map)
        })
        .collect();
    serde_json::Value::Array(json_rows)
}

/// Print a query result as a table or JSON.
pub(crate) fn print_result(columns: &[String], rows: &[Vec<String>], json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(&rows_to_json(columns, rows))
            .context("Failed to serialize result")?;
        println!("{output}");
        return Ok(());
    }

    if rows.is_empty() {
        println!("(0 rows)");
        return Ok(());
    }
    let headers: Vec<&str> = columns.iter().map(|s| s.as_str()).collect();
    print_table(&headers, rows);
    println!("\n({} rows)", rows.len());
    Ok(())
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
