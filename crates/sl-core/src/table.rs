//! In-memory tabular data: raw records, dimension tables and fact tables.

use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use crate::value::Value;

/// One row of the wide input, as an ordered column -> value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, Value)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter. Setting an existing column replaces its value.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| c == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }
}

/// A named table with an ordered column list and row-major values.
///
/// Raw input, dimension tables and fact tables all share this shape; the
/// catalog decides which columns a given table must carry.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: TableName,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: TableName, columns: Vec<String>) -> Self {
        Self {
            name,
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from records. Columns are ordered by first appearance;
    /// a record missing a column contributes `Null` for it.
    pub fn from_records(name: TableName, records: &[RawRecord]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for col in record.columns() {
                if !columns.iter().any(|c| c == col) {
                    columns.push(col.to_string());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self {
            name,
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &TableName {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Position of `column`, or `MissingColumn` naming this table.
    pub fn column_index(&self, column: &str) -> CoreResult<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| CoreError::MissingColumn {
                table: self.name.to_string(),
                column: column.to_string(),
            })
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> CoreResult<()> {
        if row.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                table: self.name.to_string(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Cell at (`row`, `column`), if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Row `row` as a record, mostly useful for assertions.
    pub fn record(&self, row: usize) -> Option<RawRecord> {
        let values = self.rows.get(row)?;
        let mut record = RawRecord::new();
        for (col, v) in self.columns.iter().zip(values) {
            record.set(col, v.clone());
        }
        Some(record)
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, column: &str) -> CoreResult<Vec<&Value>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Copy `columns` (in the given order) into a new table called `name`.
    pub fn project(&self, name: TableName, columns: &[&str]) -> CoreResult<Table> {
        let indices = self.indices(columns).map_err(|e| rename_missing(e, &name))?;
        let rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
            .collect();
        Ok(Table {
            name,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Like [`project`](Self::project), but renames column `columns[i]` to
    /// `targets[i]`.
    pub fn project_as(
        &self,
        name: TableName,
        columns: &[&str],
        targets: &[&str],
    ) -> CoreResult<Table> {
        let mut projected = self.project(name, columns)?;
        projected.columns = targets.iter().map(|c| c.to_string()).collect();
        Ok(projected)
    }

    /// Resolve several column positions at once.
    pub fn indices(&self, columns: &[&str]) -> CoreResult<Vec<usize>> {
        columns.iter().map(|c| self.column_index(c)).collect()
    }

    /// Append a column. `values` must hold one value per row.
    pub fn append_column(&mut self, column: &str, values: Vec<Value>) -> CoreResult<()> {
        if values.len() != self.rows.len() {
            return Err(CoreError::RowWidth {
                table: self.name.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.columns.push(column.to_string());
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.push(v);
        }
        Ok(())
    }

    /// Remove the named columns; names that are not present are ignored.
    pub fn drop_columns(&mut self, columns: &[&str]) {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !columns.contains(&c.as_str()))
            .collect();
        if keep.iter().all(|k| *k) {
            return;
        }
        self.columns = retain_by_mask(std::mem::take(&mut self.columns), &keep);
        for row in &mut self.rows {
            *row = retain_by_mask(std::mem::take(row), &keep);
        }
    }

    /// Keep only the rows for which `keep` returns true.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[Value]) -> bool) {
        self.rows.retain(|r| keep(r));
    }

    /// Append the rows of `other`, which must have identical columns.
    pub fn extend(&mut self, other: Table) -> CoreResult<()> {
        if other.columns != self.columns {
            return Err(CoreError::RowWidth {
                table: self.name.to_string(),
                expected: self.columns.len(),
                found: other.columns.len(),
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<Value>> {
        &mut self.rows
    }
}

/// Built tables in the order they were produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    tables: Vec<Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. A table of the same name is replaced in place.
    pub fn insert(&mut self, table: Table) {
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(slot) => *slot = table,
            None => self.tables.push(table),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Production order of `name`, if built.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, k)| k.then_some(item))
        .collect()
}

fn rename_missing(err: CoreError, table: &TableName) -> CoreError {
    match err {
        CoreError::MissingColumn { column, .. } => CoreError::MissingColumn {
            table: table.to_string(),
            column,
        },
        other => other,
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
