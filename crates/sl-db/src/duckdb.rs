//! DuckDB storage backend implementation

use crate::ddl::{create_table_sql, drop_table_sql, insert_sql};
use crate::error::{DbError, DbResult};
use crate::row_helpers::to_duckdb;
use crate::traits::Storage;
use duckdb::Connection;
use sl_core::{Table, TableDef, TableName};
use std::path::Path;

/// DuckDB storage backend.
///
/// Single-threaded: the load runs sequentially, so the connection is owned
/// directly.
pub struct DuckDbStorage {
    conn: Connection,
}

impl DuckDbStorage {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open (or create) a DuckDB database file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Open from a path string (handles the `:memory:` special case)
    pub fn open(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute one or more statements
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn.execute_batch(sql).map_err(DbError::from)
    }

    /// Check if a table exists in the `main` schema
    pub fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'main' AND table_name = ?",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl Storage for DuckDbStorage {
    fn backend(&self) -> &'static str {
        "duckdb"
    }

    fn drop_table_if_exists(&self, table: &TableName) -> DbResult<()> {
        let sql = drop_table_sql(table);
        log::debug!("{sql}");
        self.conn
            .execute_batch(&sql)
            .map_err(|e| DbError::DropFailed {
                table: table.to_string(),
                message: e.to_string(),
            })
    }

    fn create_table(&self, def: &TableDef) -> DbResult<()> {
        let sql = create_table_sql(def);
        log::debug!("{sql}");
        self.conn
            .execute_batch(&sql)
            .map_err(|e| DbError::CreateFailed {
                table: def.name.to_string(),
                sql: sql.clone(),
                message: e.to_string(),
            })
    }

    fn insert_many(&self, def: &TableDef, table: &Table) -> DbResult<usize> {
        let columns = def.stored_columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let indices = table.indices(&names)?;

        let sql = insert_sql(def);
        let insert_err = |row: usize, e: duckdb::Error| DbError::InsertFailed {
            table: def.name.to_string(),
            row,
            message: e.to_string(),
        };

        let mut stmt = self.conn.prepare(&sql).map_err(|e| insert_err(0, e))?;
        for (i, row) in table.rows().iter().enumerate() {
            let params = indices.iter().map(|&idx| to_duckdb(&row[idx]));
            stmt.execute(duckdb::params_from_iter(params))
                .map_err(|e| insert_err(i, e))?;
        }
        Ok(table.len())
    }

    fn begin(&self) -> DbResult<()> {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))
    }

    fn commit(&self) -> DbResult<()> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))
    }

    fn rollback(&self) -> DbResult<()> {
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
