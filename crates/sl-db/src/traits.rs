//! Storage trait definition

use crate::error::{DbError, DbResult};
use sl_core::{Table, TableDef, TableName};

/// The storage operations the load lifecycle needs.
///
/// Calls are synchronous and issued from one thread; a backend owns a single
/// session and `begin`/`commit`/`rollback` act on it.
pub trait Storage {
    /// Backend identifier for logging
    fn backend(&self) -> &'static str;

    /// Drop a table; a table that does not exist is not an error.
    fn drop_table_if_exists(&self, table: &TableName) -> DbResult<()>;

    /// Create an empty table with the stored columns, primary key and
    /// foreign-key constraints of `def`.
    fn create_table(&self, def: &TableDef) -> DbResult<()>;

    /// Insert the stored columns of every row of `table`, returning the row
    /// count.
    fn insert_many(&self, def: &TableDef, table: &Table) -> DbResult<usize>;

    fn begin(&self) -> DbResult<()>;

    fn commit(&self) -> DbResult<()>;

    fn rollback(&self) -> DbResult<()>;
}

/// Execute `body` within a `begin` / `commit` pair, rolling back on error.
///
/// A failed rollback is logged; the error from `body` is the one returned.
pub fn transaction<S, T, F>(storage: &S, body: F) -> DbResult<T>
where
    S: Storage + ?Sized,
    F: FnOnce(&S) -> DbResult<T>,
{
    storage.begin()?;

    match body(storage) {
        Ok(value) => {
            if let Err(commit_err) = storage.commit() {
                if let Err(e) = storage.rollback() {
                    log::warn!("Rollback after failed commit also failed: {e}");
                }
                return Err(DbError::TransactionError(format!(
                    "COMMIT failed: {commit_err}"
                )));
            }
            Ok(value)
        }
        Err(err) => {
            if let Err(e) = storage.rollback() {
                log::warn!("Rollback failed: {e}");
            }
            Err(err)
        }
    }
}
