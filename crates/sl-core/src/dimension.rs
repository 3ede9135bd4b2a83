//! Dimension table construction.
//!
//! A dimension is built in three steps: project its columns out of the wide
//! input, deduplicate and key it, then resolve each foreign key by joining
//! onto an already-built parent's natural key. Rows whose parent value is
//! unknown are removed by the join (or rejected under
//! [`UnmatchedPolicy::Reject`]).

use crate::catalog::{KeyStrategy, RowSource, TableDef};
use crate::derive::append_date_parts;
use crate::error::{CoreError, CoreResult};
use crate::join::{keyed_join, UnmatchedPolicy};
use crate::surrogate::{dedup_first_seen, renumber_rows, SurrogateKeyAssigner};
use crate::table::{Table, TableSet};

/// Builds one dimension table from the wide input.
#[derive(Debug, Clone, Copy)]
pub struct DimensionBuilder<'a> {
    def: &'a TableDef,
    policy: UnmatchedPolicy,
}

impl<'a> DimensionBuilder<'a> {
    pub fn new(def: &'a TableDef, policy: UnmatchedPolicy) -> Self {
        Self { def, policy }
    }

    /// Build the dimension. Every parent it references must already be in
    /// `built`.
    pub fn build(&self, raw: &Table, built: &TableSet) -> CoreResult<Table> {
        let def = self.def;
        let source = self.source_rows(raw)?;
        let natural_key = def.natural_key_names();

        let mut table = match def.key_strategy {
            KeyStrategy::Sequence { offset } => {
                let subset: Vec<&str> = source.columns().iter().map(String::as_str).collect();
                SurrogateKeyAssigner {
                    subset: &subset,
                    natural_key: &natural_key,
                    key_column: &def.surrogate_key,
                    offset,
                }
                .assign(&source, def.name.clone())?
            }
            KeyStrategy::Natural => {
                let mut table = source;
                dedup_first_seen(&mut table, &natural_key)?;
                table
            }
        };

        for parts in &def.derived {
            append_date_parts(&mut table, parts)?;
        }

        let mut dropped_total = 0;
        for fk in &def.foreign_keys {
            let parent = built
                .get(&fk.parent)
                .ok_or_else(|| CoreError::MissingParent {
                    table: def.name.to_string(),
                    parent: fk.parent.to_string(),
                })?;
            let outcome = keyed_join(table, parent, &fk.join, &fk.parent_key, &fk.column)?;
            if outcome.dropped > 0 {
                if self.policy == UnmatchedPolicy::Reject {
                    return Err(CoreError::UnresolvedForeignKey {
                        table: def.name.to_string(),
                        column: fk.column.clone(),
                        parent: fk.parent.to_string(),
                        dropped: outcome.dropped,
                    });
                }
                log::warn!(
                    "{}: dropped {} row(s) with no match in {} for {}",
                    def.name,
                    outcome.dropped,
                    fk.parent,
                    fk.column
                );
            }
            dropped_total += outcome.dropped;
            table = outcome.table;
        }

        // Keys stay dense even when the joins removed rows; nothing
        // references this table until it is returned.
        if dropped_total > 0 {
            if let Some(offset) = def.offset() {
                renumber_rows(&mut table, &def.surrogate_key, offset)?;
            }
        }

        let columns = def.columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let table = table.project(def.name.clone(), &names)?;
        log::info!("Built {} ({} rows)", def.name, table.len());
        Ok(table)
    }

    /// Rows feeding the key assigner, before deduplication.
    fn source_rows(&self, raw: &Table) -> CoreResult<Table> {
        let def = self.def;
        match &def.source {
            RowSource::Input => raw.project(def.name.clone(), &def.input_columns()),
            RowSource::Union(groups) => {
                let targets = def.natural_key_names();
                let mut combined =
                    Table::new(def.name.clone(), targets.iter().map(|c| c.to_string()).collect());
                for group in groups {
                    let cols: Vec<&str> = group.iter().map(String::as_str).collect();
                    if cols.len() != targets.len() {
                        return Err(CoreError::RowWidth {
                            table: def.name.to_string(),
                            expected: targets.len(),
                            found: cols.len(),
                        });
                    }
                    combined.extend(raw.project_as(def.name.clone(), &cols, &targets)?)?;
                }
                Ok(combined)
            }
        }
    }
}

#[cfg(test)]
#[path = "dimension_test.rs"]
mod tests;
