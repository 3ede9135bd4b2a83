//! Surrogate-key assignment with natural-key deduplication.
//!
//! Deduplication keeps the **first** row seen for each natural key, in input
//! order. When two rows share a natural key but differ in other attributes,
//! the earlier row's attributes are the ones that survive.

use crate::error::{CoreError, CoreResult};
use crate::table::Table;
use crate::table_name::TableName;
use crate::value::Value;
use std::collections::HashSet;

/// Deduplicates a projection by natural key and numbers the survivors.
#[derive(Debug, Clone, Copy)]
pub struct SurrogateKeyAssigner<'a> {
    /// Columns that make up a row of the output table.
    pub subset: &'a [&'a str],
    /// Columns identifying uniqueness; each must be in `subset`. Empty means
    /// every input row is distinct.
    pub natural_key: &'a [&'a str],
    /// Name of the appended surrogate-key column.
    pub key_column: &'a str,
    /// First key value handed out.
    pub offset: i64,
}

impl SurrogateKeyAssigner<'_> {
    /// Produce `name` with columns `subset + [key_column]`, one row per
    /// distinct natural key, keys `offset, offset + 1, ...` in first-seen
    /// order. Zero input rows yield an empty table.
    pub fn assign(&self, input: &Table, name: TableName) -> CoreResult<Table> {
        if let Some(col) = self.natural_key.iter().find(|c| !self.subset.contains(*c)) {
            return Err(CoreError::MissingColumn {
                table: name.to_string(),
                column: col.to_string(),
            });
        }

        let mut projected = input.project(name, self.subset)?;
        dedup_first_seen(&mut projected, self.natural_key)?;

        log::debug!(
            "Assigned {} surrogate key(s) for {} starting at {} ({} input rows)",
            projected.len(),
            projected.name(),
            self.offset,
            input.len()
        );
        number_rows(&mut projected, self.key_column, self.offset)?;
        Ok(projected)
    }
}

/// Remove every row whose `natural_key` values were already seen earlier in
/// the table. An empty key removes nothing.
pub fn dedup_first_seen(table: &mut Table, natural_key: &[&str]) -> CoreResult<()> {
    if natural_key.is_empty() {
        return Ok(());
    }
    let key_idx = table.indices(natural_key)?;
    let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(table.len());
    table.retain_rows(|row| {
        let key: Vec<Value> = key_idx.iter().map(|&i| row[i].clone()).collect();
        seen.insert(key)
    });
    Ok(())
}

/// Overwrite `key_column` with `offset, offset + 1, ...` in row order.
pub fn renumber_rows(table: &mut Table, key_column: &str, offset: i64) -> CoreResult<()> {
    let idx = table.column_index(key_column)?;
    let keys = key_sequence(table, offset)?;
    for (row, key) in table.rows_mut().iter_mut().zip(keys) {
        row[idx] = key;
    }
    Ok(())
}

/// Append `key_column` holding `offset, offset + 1, ...` in row order.
pub fn number_rows(table: &mut Table, key_column: &str, offset: i64) -> CoreResult<()> {
    let keys = key_sequence(table, offset)?;
    table.append_column(key_column, keys)
}

fn key_sequence(table: &Table, offset: i64) -> CoreResult<Vec<Value>> {
    let overflow = || CoreError::KeyOverflow {
        table: table.name().to_string(),
        offset,
        rows: table.len(),
    };
    (0..table.len())
        .map(|i| {
            i64::try_from(i)
                .ok()
                .and_then(|i| offset.checked_add(i))
                .map(Value::Int)
                .ok_or_else(overflow)
        })
        .collect()
}

#[cfg(test)]
#[path = "surrogate_test.rs"]
mod tests;
