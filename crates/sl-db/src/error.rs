//! Error types for sl-db

use sl_core::CoreError;
use thiserror::Error;

/// Storage operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// CSV ingestion error (D004)
    #[error("[D004] CSV load failed for '{path}': {message}")]
    CsvError { path: String, message: String },

    /// DROP TABLE failed for a reason other than absence (D005)
    #[error("[D005] Failed to drop '{table}': {message}")]
    DropFailed { table: String, message: String },

    /// CREATE TABLE failed (D006)
    #[error("[D006] Failed to create '{table}': {message}\n  statement: {sql}")]
    CreateFailed {
        table: String,
        sql: String,
        message: String,
    },

    /// INSERT failed, e.g. on a constraint violation (D007)
    #[error("[D007] Failed to insert into '{table}' (row {row}): {message}")]
    InsertFailed {
        table: String,
        row: usize,
        message: String,
    },

    /// Transaction management error (D008)
    #[error("[D008] Transaction failed: {0}")]
    TransactionError(String),

    /// Ad-hoc query error (D009)
    #[error("[D009] Query failed: {0}")]
    QueryError(String),

    /// A value could not be converted between storage and core types (D010)
    #[error("[D010] Unsupported value in column '{column}': {message}")]
    Conversion { column: String, message: String },

    /// Transform or catalog failure surfaced through the storage layer
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants for catalog
        // lookups, so classify on the message.
        let msg = err.to_string();
        if msg.contains("Table with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
