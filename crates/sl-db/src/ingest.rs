//! Raw input ingestion: a flat CSV extract read into a core [`Table`].

use crate::duckdb::DuckDbStorage;
use crate::error::{DbError, DbResult};
use crate::row_helpers::from_duckdb;
use duckdb::types::Value as DuckValue;
use sl_core::{Table, TableName};
use std::path::Path;

/// Name given to the ingested raw table.
pub const RAW_TABLE: &str = "raw_shipments";

/// Read a CSV file through DuckDB's `read_csv_auto`, casting `date_columns`
/// to `DATE` so the transform sees normalized dates.
///
/// Column types are whatever DuckDB infers; rows keep file order. With
/// `columns` set, only those columns are kept (in file order) and the rest
/// are never converted, so an extra column of a type the core model cannot
/// carry does not fail the read. Kept columns missing from the file are left
/// for the transform to report.
pub fn read_csv_table(
    db: &DuckDbStorage,
    path: &Path,
    date_columns: &[String],
    columns: Option<&[&str]>,
) -> DbResult<Table> {
    let display = path.display().to_string();
    let csv_err = |message: String| DbError::CsvError {
        path: display.clone(),
        message,
    };

    if !path.exists() {
        return Err(csv_err("file does not exist".to_string()));
    }

    let sql = select_csv_sql(&display, date_columns);
    log::debug!("{sql}");

    let mut stmt = db.conn().prepare(&sql).map_err(|e| csv_err(e.to_string()))?;

    // DuckDB 1.4 panics on `stmt.column_count()` before execution, so rows
    // are collected first and column names read afterwards.
    let raw_rows: Vec<Vec<DuckValue>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            (0..col_count).map(|i| row.get::<_, DuckValue>(i)).collect()
        })
        .map_err(|e| csv_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| csv_err(e.to_string()))?;

    let file_columns: Vec<String> = (0..stmt.column_count())
        .map(|i| stmt.column_name(i).map_or("?".to_string(), |v| v.to_string()))
        .collect();
    let kept: Vec<(usize, String)> = file_columns
        .into_iter()
        .enumerate()
        .filter(|(_, c)| columns.map_or(true, |k| k.contains(&c.as_str())))
        .collect();

    let names: Vec<String> = kept.iter().map(|(_, c)| c.clone()).collect();
    let mut table = Table::new(TableName::new(RAW_TABLE), names);
    for raw in raw_rows {
        let row = kept
            .iter()
            .map(|(idx, column)| {
                let value = raw.get(*idx).cloned().unwrap_or(DuckValue::Null);
                from_duckdb(value).map_err(|message| DbError::Conversion {
                    column: column.clone(),
                    message,
                })
            })
            .collect::<DbResult<Vec<_>>>()?;
        table.push_row(row)?;
    }

    log::info!(
        "Read {} rows, {} columns from {}",
        table.len(),
        table.columns().len(),
        display
    );
    Ok(table)
}

fn select_csv_sql(path: &str, date_columns: &[String]) -> String {
    let source = format!("read_csv_auto('{}')", path.replace('\'', "''"));
    if date_columns.is_empty() {
        return format!("SELECT * FROM {source}");
    }
    let casts: Vec<String> = date_columns
        .iter()
        .map(|c| format!("CAST({c} AS DATE) AS {c}"))
        .collect();
    format!("SELECT * REPLACE ({}) FROM {source}", casts.join(", "))
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
