//! Schema catalog: table declarations, keys, and foreign-key edges.
//!
//! The catalog is plain data. Ordering questions (which table must exist
//! before which) are answered by the [`TableDag`](crate::dag::TableDag) built
//! from its foreign-key edges.

use crate::dag::TableDag;
use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use crate::value::DataType;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Role of a table in the star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Dimension,
    Fact,
}

/// How a table's primary key is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Dense sequence `offset, offset + 1, ...` in first-seen order.
    Sequence { offset: i64 },
    /// The single natural-key column already identifies the row.
    Natural,
}

/// A column declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    /// Non-stored columns exist in memory (for joins) but are never persisted.
    pub stored: bool,
}

impl ColumnDef {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            stored: true,
        }
    }

    pub fn join_only(name: &str, data_type: DataType) -> Self {
        Self {
            stored: false,
            ..Self::new(name, data_type)
        }
    }
}

/// One column pairing of a natural-key join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinPair {
    /// Column on the referencing (child) side.
    pub local: String,
    /// Natural-key column on the parent side.
    pub parent: String,
}

/// A dependency edge: `column` must resolve to exactly one `parent.parent_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub column: String,
    pub parent: TableName,
    pub parent_key: String,
    pub join: Vec<JoinPair>,
}

impl ForeignKey {
    pub fn local_columns(&self) -> Vec<&str> {
        self.join.iter().map(|p| p.local.as_str()).collect()
    }

    pub fn parent_columns(&self) -> Vec<&str> {
        self.join.iter().map(|p| p.parent.as_str()).collect()
    }
}

/// Calendar attributes derived from a date column: `<prefix>_year`,
/// `<prefix>_quarter`, `<prefix>_month`, `<prefix>_day`, `<prefix>_week_day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateParts {
    pub source: String,
    pub prefix: String,
}

impl DateParts {
    pub fn columns(&self) -> Vec<ColumnDef> {
        let p = &self.prefix;
        vec![
            ColumnDef::new(&format!("{p}_year"), DataType::Integer),
            ColumnDef::new(&format!("{p}_quarter"), DataType::Integer),
            ColumnDef::new(&format!("{p}_month"), DataType::Integer),
            ColumnDef::new(&format!("{p}_day"), DataType::Integer),
            ColumnDef::new(&format!("{p}_week_day"), DataType::Text),
        ]
    }
}

/// Where a table's rows come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSource {
    /// Projected straight out of the wide input.
    Input,
    /// Concatenation of several raw column groups, each mapped positionally
    /// onto the natural key (e.g. origin and destination countries).
    Union(Vec<Vec<String>>),
}

/// Declaration of one star-schema table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDef {
    pub name: TableName,
    pub kind: TableKind,
    pub surrogate_key: String,
    pub key_strategy: KeyStrategy,
    pub natural_key: Vec<ColumnDef>,
    pub attributes: Vec<ColumnDef>,
    pub derived: Vec<DateParts>,
    pub foreign_keys: Vec<ForeignKey>,
    pub source: RowSource,
}

impl TableDef {
    /// A dimension keyed by a dense sequence starting at `offset`.
    pub fn dimension(name: &str, surrogate_key: &str, offset: i64) -> Self {
        Self {
            name: TableName::new(name),
            kind: TableKind::Dimension,
            surrogate_key: surrogate_key.to_string(),
            key_strategy: KeyStrategy::Sequence { offset },
            natural_key: Vec::new(),
            attributes: Vec::new(),
            derived: Vec::new(),
            foreign_keys: Vec::new(),
            source: RowSource::Input,
        }
    }

    /// A fact table whose grain is identified by the raw column `grain`.
    pub fn fact(name: &str, grain: &str, data_type: DataType) -> Self {
        Self {
            name: TableName::new(name),
            kind: TableKind::Fact,
            surrogate_key: grain.to_string(),
            key_strategy: KeyStrategy::Natural,
            natural_key: vec![ColumnDef::new(grain, data_type)],
            attributes: Vec::new(),
            derived: Vec::new(),
            foreign_keys: Vec::new(),
            source: RowSource::Input,
        }
    }

    /// A fact table whose rows are numbered from `offset` into `key`.
    pub fn sequenced_fact(name: &str, key: &str, offset: i64) -> Self {
        Self {
            kind: TableKind::Fact,
            ..Self::dimension(name, key, offset)
        }
    }

    pub fn key(mut self, column: &str, data_type: DataType) -> Self {
        self.natural_key.push(ColumnDef::new(column, data_type));
        self
    }

    pub fn join_only_key(mut self, column: &str, data_type: DataType) -> Self {
        self.natural_key.push(ColumnDef::join_only(column, data_type));
        self
    }

    pub fn attribute(mut self, column: &str, data_type: DataType) -> Self {
        self.attributes.push(ColumnDef::new(column, data_type));
        self
    }

    pub fn date_parts(mut self, source: &str, prefix: &str) -> Self {
        self.derived.push(DateParts {
            source: source.to_string(),
            prefix: prefix.to_string(),
        });
        self
    }

    /// Declare `column` as a foreign key to `parent.parent_key`, resolved by
    /// joining local columns onto the parent's natural-key columns.
    pub fn references(
        mut self,
        column: &str,
        parent: &str,
        parent_key: &str,
        join: &[(&str, &str)],
    ) -> Self {
        self.foreign_keys.push(ForeignKey {
            column: column.to_string(),
            parent: TableName::new(parent),
            parent_key: parent_key.to_string(),
            join: join
                .iter()
                .map(|(local, parent)| JoinPair {
                    local: local.to_string(),
                    parent: parent.to_string(),
                })
                .collect(),
        });
        self
    }

    pub fn union_of(mut self, groups: &[&[&str]]) -> Self {
        self.source = RowSource::Union(
            groups
                .iter()
                .map(|g| g.iter().map(|c| c.to_string()).collect())
                .collect(),
        );
        self
    }

    pub fn natural_key_names(&self) -> Vec<&str> {
        self.natural_key.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn offset(&self) -> Option<i64> {
        match self.key_strategy {
            KeyStrategy::Sequence { offset } => Some(offset),
            KeyStrategy::Natural => None,
        }
    }

    pub fn parents(&self) -> impl Iterator<Item = &TableName> {
        self.foreign_keys.iter().map(|fk| &fk.parent)
    }

    /// Raw columns this table projects from the wide input: natural key,
    /// attributes, then any foreign-key join columns not already included.
    pub fn input_columns(&self) -> Vec<&str> {
        let mut cols: Vec<&str> = Vec::new();
        let declared = self
            .natural_key
            .iter()
            .chain(&self.attributes)
            .map(|c| c.name.as_str());
        let joins = self
            .foreign_keys
            .iter()
            .flat_map(|fk| fk.join.iter().map(|p| p.local.as_str()));
        for col in declared.chain(joins) {
            if !cols.contains(&col) {
                cols.push(col);
            }
        }
        cols
    }

    /// Columns this table reads from the wide raw input.
    pub fn raw_columns(&self) -> Vec<&str> {
        match &self.source {
            RowSource::Input => self.input_columns(),
            RowSource::Union(groups) => {
                let mut cols: Vec<&str> = Vec::new();
                for col in groups.iter().flatten() {
                    if !cols.contains(&col.as_str()) {
                        cols.push(col);
                    }
                }
                cols
            }
        }
    }

    /// Every column the finished in-memory table carries, in order:
    /// surrogate key, natural key, attributes, derived, foreign keys.
    pub fn columns(&self) -> Vec<ColumnDef> {
        let mut cols = Vec::new();
        if self.key_strategy != KeyStrategy::Natural {
            cols.push(ColumnDef::new(&self.surrogate_key, DataType::Integer));
        }
        cols.extend(self.natural_key.iter().cloned());
        cols.extend(self.attributes.iter().cloned());
        cols.extend(self.derived.iter().flat_map(DateParts::columns));
        cols.extend(
            self.foreign_keys
                .iter()
                .map(|fk| ColumnDef::new(&fk.column, DataType::Integer)),
        );
        cols
    }

    /// The persisted subset of [`columns`](Self::columns).
    pub fn stored_columns(&self) -> Vec<ColumnDef> {
        self.columns().into_iter().filter(|c| c.stored).collect()
    }

    /// Type of the surrogate key as stored.
    pub fn key_type(&self) -> DataType {
        match self.key_strategy {
            KeyStrategy::Sequence { .. } => DataType::Integer,
            KeyStrategy::Natural => self
                .natural_key
                .first()
                .map_or(DataType::Integer, |c| c.data_type),
        }
    }
}

/// The full set of table declarations for one star schema.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaCatalog {
    tables: Vec<TableDef>,
}

impl SchemaCatalog {
    /// Validate and wrap a set of table declarations.
    ///
    /// Rejects duplicate names, references to undeclared tables or columns,
    /// and cyclic foreign-key graphs.
    pub fn new(tables: Vec<TableDef>) -> CoreResult<Self> {
        let catalog = Self { tables };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> CoreResult<()> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(CoreError::DuplicateTable {
                    name: table.name.to_string(),
                });
            }
        }

        for table in &self.tables {
            for fk in &table.foreign_keys {
                let parent = self.get(&fk.parent).ok_or_else(|| CoreError::UnknownTable {
                    table: fk.parent.to_string(),
                    referenced_by: table.name.to_string(),
                })?;

                let parent_cols = parent.columns();
                let missing = fk
                    .parent_columns()
                    .into_iter()
                    .chain(std::iter::once(fk.parent_key.as_str()))
                    .find(|c| !parent_cols.iter().any(|pc| pc.name == *c));
                if let Some(column) = missing {
                    return Err(CoreError::MissingColumn {
                        table: parent.name.to_string(),
                        column: column.to_string(),
                    });
                }
            }
        }

        self.dag().validate()
    }

    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    pub fn get(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Build the dependency graph (edges run parent -> child).
    pub fn dag(&self) -> TableDag {
        let mut dag = TableDag::new();
        for table in &self.tables {
            dag.add_table(&table.name);
        }
        for table in &self.tables {
            for parent in table.parents() {
                dag.add_dependency(&table.name, parent);
            }
        }
        dag
    }

    /// Tables with every parent before its children.
    pub fn topological_order(&self) -> CoreResult<Vec<TableName>> {
        self.dag().topological_order()
    }

    /// Tables with every child before its parents.
    pub fn reverse_topological_order(&self) -> CoreResult<Vec<TableName>> {
        self.dag().reverse_topological_order()
    }

    /// Every raw input column some table reads, deduplicated in catalog
    /// order.
    pub fn raw_columns(&self) -> Vec<&str> {
        let mut cols: Vec<&str> = Vec::new();
        for col in self.tables.iter().flat_map(TableDef::raw_columns) {
            if !cols.contains(&col) {
                cols.push(col);
            }
        }
        cols
    }

    /// Tables holding a foreign key to `name`.
    pub fn referencing(&self, name: &str) -> Vec<&TableName> {
        self.tables
            .iter()
            .filter(|t| t.parents().any(|p| p == name))
            .map(|t| &t.name)
            .collect()
    }

    /// Replace sequence start offsets, keyed by table name.
    pub fn with_offsets(mut self, offsets: &HashMap<String, i64>) -> CoreResult<Self> {
        for (name, offset) in offsets {
            let table = self
                .tables
                .iter_mut()
                .find(|t| t.name == name.as_str())
                .ok_or_else(|| CoreError::ConfigInvalid {
                    message: format!("offset given for unknown table '{name}'"),
                })?;
            match &mut table.key_strategy {
                KeyStrategy::Sequence { offset: current } => *current = *offset,
                KeyStrategy::Natural => {
                    return Err(CoreError::ConfigInvalid {
                        message: format!(
                            "table '{name}' is keyed by its natural key and takes no offset"
                        ),
                    })
                }
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
