//! Keyed inner joins against deduplicated natural keys.
//!
//! Every join in the pipeline is one-to-one by construction: the parent side
//! is unique on its join columns, so each child row matches at most once.
//! A parent that is not unique fails fast instead of fanning out rows.

use crate::catalog::JoinPair;
use crate::error::{CoreError, CoreResult};
use crate::table::Table;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do with rows whose join key has no parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    /// Drop them, as an inner join does (default).
    #[default]
    Drop,
    /// Fail the run, naming the table and foreign key.
    Reject,
}

/// Result of a keyed join.
#[derive(Debug)]
pub struct JoinOutcome {
    pub table: Table,
    /// Left rows with no matching parent row, removed by the inner join.
    pub dropped: usize,
}

/// Inner-join `left` to `parent` on `on`, appending `parent.take` to each
/// surviving left row as column `output`.
///
/// Left rows without a match are dropped and counted. Join columns are left
/// in place; callers drop them once no later join needs them.
pub fn keyed_join(
    mut left: Table,
    parent: &Table,
    on: &[JoinPair],
    take: &str,
    output: &str,
) -> CoreResult<JoinOutcome> {
    if left.has_column(output) {
        return Err(CoreError::DuplicateColumn {
            table: left.name().to_string(),
            column: output.to_string(),
        });
    }

    let locals: Vec<&str> = on.iter().map(|p| p.local.as_str()).collect();
    let parents: Vec<&str> = on.iter().map(|p| p.parent.as_str()).collect();
    let left_idx = left.indices(&locals)?;
    let parent_idx = parent.indices(&parents)?;
    let take_idx = parent.column_index(take)?;

    let mut index: HashMap<Vec<Value>, Value> = HashMap::with_capacity(parent.len());
    for row in parent.rows() {
        let key: Vec<Value> = parent_idx.iter().map(|&i| row[i].clone()).collect();
        if index.insert(key, row[take_idx].clone()).is_some() {
            return Err(CoreError::NonUniqueJoinKey {
                table: left.name().to_string(),
                parent: parent.name().to_string(),
                key: parents.join(", "),
            });
        }
    }

    let before = left.len();
    let mut matched = Vec::with_capacity(before);
    left.retain_rows(|row| {
        let key: Vec<Value> = left_idx.iter().map(|&i| row[i].clone()).collect();
        match index.get(&key) {
            Some(v) => {
                matched.push(v.clone());
                true
            }
            None => false,
        }
    });
    left.append_column(output, matched)?;

    let dropped = before - left.len();
    log::debug!(
        "Joined {} to {} on ({}): {} -> {} rows",
        left.name(),
        parent.name(),
        locals.join(", "),
        before,
        left.len()
    );
    Ok(JoinOutcome {
        table: left,
        dropped,
    })
}

#[cfg(test)]
#[path = "join_test.rs"]
mod tests;
