//! Ad-hoc query execution and table introspection helpers.
//!
//! Returns plain Rust types so callers don't need a direct `duckdb` dependency.

use crate::duckdb::DuckDbStorage;
use crate::error::{DbError, DbResult};
use crate::row_helpers::get_column_as_string;
use sl_core::TableName;

/// Result of executing an ad-hoc SQL query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Column names from the result set.
    pub columns: Vec<String>,
    /// Rows of string-coerced values.
    pub rows: Vec<Vec<String>>,
}

/// Execute an ad-hoc SQL query and return all results as strings.
///
/// The text is passed through as-is; nothing here enforces that it is
/// read-only.
pub fn execute_query(db: &DuckDbStorage, sql: &str) -> DbResult<QueryResult> {
    let mut stmt = db
        .conn()
        .prepare(sql)
        .map_err(|e| DbError::QueryError(format!("prepare failed: {e}")))?;

    // DuckDB 1.4 panics on `stmt.column_count()` before execution, so we
    // collect all rows via `query_map` first, then read column metadata.
    let rows: Vec<Vec<String>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            Ok((0..col_count)
                .map(|i| get_column_as_string(row, i))
                .collect())
        })
        .map_err(|e| DbError::QueryError(format!("query failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DbError::QueryError(format!("row error: {e}")))?;

    let columns: Vec<String> = (0..stmt.column_count())
        .map(|i| {
            stmt.column_name(i)
                .map_or("?".to_string(), |v| v.to_string())
        })
        .collect();

    Ok(QueryResult { columns, rows })
}

/// List all tables in the `main` schema.
pub fn list_tables(db: &DuckDbStorage) -> DbResult<Vec<String>> {
    let result = execute_query(
        db,
        "SELECT table_name FROM information_schema.tables \
         WHERE table_schema = 'main' \
         ORDER BY table_name",
    )?;
    Ok(result.rows.into_iter().filter_map(|r| r.into_iter().next()).collect())
}

/// Row count of one table.
pub fn table_row_count(db: &DuckDbStorage, table: &str) -> DbResult<i64> {
    let table = TableName::try_new(table).ok_or_else(|| {
        DbError::QueryError(format!(
            "invalid table name '{table}': must be a plain SQL identifier"
        ))
    })?;
    let count: i64 = db
        .conn()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .map_err(|e| DbError::QueryError(format!("count failed for {table}: {e}")))?;
    Ok(count)
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
