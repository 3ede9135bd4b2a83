//! Fact table assembly.
//!
//! The fact projection carries every natural key needed to reach a
//! dimension. Each key is swapped for the dimension's surrogate key through a
//! keyed inner join, in the order the dimensions were built, and the natural
//! keys are dropped from the final row.

use crate::catalog::{KeyStrategy, TableDef};
use crate::error::{CoreError, CoreResult};
use crate::join::{keyed_join, UnmatchedPolicy};
use crate::surrogate::number_rows;
use crate::table::{Table, TableSet};
use crate::value::Value;
use std::collections::HashSet;

/// Builds one fact table from the wide input and the finished dimensions.
#[derive(Debug, Clone, Copy)]
pub struct FactAssembler<'a> {
    def: &'a TableDef,
    policy: UnmatchedPolicy,
}

impl<'a> FactAssembler<'a> {
    pub fn new(def: &'a TableDef, policy: UnmatchedPolicy) -> Self {
        Self { def, policy }
    }

    pub fn assemble(&self, raw: &Table, built: &TableSet) -> CoreResult<Table> {
        let def = self.def;
        let mut table = raw.project(def.name.clone(), &def.input_columns())?;

        if def.key_strategy == KeyStrategy::Natural {
            self.check_grain_unique(&table)?;
        }

        let mut edges = Vec::with_capacity(def.foreign_keys.len());
        for fk in &def.foreign_keys {
            let dimension = built.get(&fk.parent).ok_or_else(|| CoreError::MissingParent {
                table: def.name.to_string(),
                parent: fk.parent.to_string(),
            })?;
            edges.push((built.position(&fk.parent), fk, dimension));
        }
        edges.sort_by_key(|(position, _, _)| *position);

        for (_, fk, dimension) in edges {
            let before = table.len();
            let outcome = keyed_join(table, dimension, &fk.join, &fk.parent_key, &fk.column)?;
            if outcome.dropped > 0 {
                if self.policy == UnmatchedPolicy::Reject {
                    return Err(CoreError::FactJoinCardinality {
                        table: def.name.to_string(),
                        dimension: fk.parent.to_string(),
                        before,
                        after: outcome.table.len(),
                    });
                }
                log::warn!(
                    "{}: {} fact row(s) had no match in {}",
                    def.name,
                    outcome.dropped,
                    fk.parent
                );
            }
            table = outcome.table;
        }

        // Numbered after the joins so the sequence has no gaps.
        if let KeyStrategy::Sequence { offset } = def.key_strategy {
            number_rows(&mut table, &def.surrogate_key, offset)?;
        }

        let columns = def.columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let table = table.project(def.name.clone(), &names)?;
        log::info!("Assembled {} ({} rows)", def.name, table.len());
        Ok(table)
    }

    fn check_grain_unique(&self, table: &Table) -> CoreResult<()> {
        let def = self.def;
        let mut seen: HashSet<&Value> = HashSet::with_capacity(table.len());
        for (row, value) in table.column_values(&def.surrogate_key)?.into_iter().enumerate() {
            if value.is_null() {
                return Err(CoreError::NullGrainKey {
                    table: def.name.to_string(),
                    column: def.surrogate_key.clone(),
                    row,
                });
            }
            if !seen.insert(value) {
                return Err(CoreError::DuplicateGrainKey {
                    table: def.name.to_string(),
                    column: def.surrogate_key.clone(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fact_test.rs"]
mod tests;
