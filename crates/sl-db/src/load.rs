//! Transactional load of a built star schema.

use crate::error::DbResult;
use crate::traits::{transaction, Storage};
use sl_core::StarSchema;

/// Rows written to one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub table: String,
    pub rows: usize,
}

/// Outcome of a committed load, in insert order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub tables: Vec<LoadedTable>,
}

impl LoadReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Inserts every table of a [`StarSchema`] inside one transaction.
pub struct LoadOrchestrator<'a, S: Storage + ?Sized> {
    storage: &'a S,
}

impl<'a, S: Storage + ?Sized> LoadOrchestrator<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Insert all tables in parents-before-children order.
    ///
    /// All-or-nothing: the first failing insert rolls back every table
    /// written by this call. The schema must already exist (see
    /// [`apply_schema`](crate::lifecycle::apply_schema)).
    pub fn load(&self, schema: &StarSchema) -> DbResult<LoadReport> {
        let report = transaction(self.storage, |storage| {
            let mut report = LoadReport::default();
            for (def, table) in schema.tables() {
                let rows = storage.insert_many(def, table)?;
                log::debug!("Inserted {rows} row(s) into {}", def.name);
                report.tables.push(LoadedTable {
                    table: def.name.to_string(),
                    rows,
                });
            }
            Ok(report)
        })?;

        log::info!(
            "Committed {} rows across {} tables",
            report.total_rows(),
            report.tables.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "load_test.rs"]
mod tests;
