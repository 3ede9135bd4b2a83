//! Error types for sl-core

use thiserror::Error;

/// Core error type for Starload
#[derive(Error, Debug)]
pub enum CoreError {
    /// S001: Foreign-key edges in the catalog form a cycle
    #[error("[S001] Cyclic schema: {cycle}")]
    CyclicSchema { cycle: String },

    /// S002: A foreign key references a table the catalog does not declare
    #[error("[S002] Table '{referenced_by}' references unknown table '{table}'")]
    UnknownTable { table: String, referenced_by: String },

    /// S003: Two catalog entries share a name
    #[error("[S003] Duplicate table in catalog: {name}")]
    DuplicateTable { name: String },

    /// S004: A column required by a projection or join is absent
    #[error("[S004] Column '{column}' not found while building '{table}'")]
    MissingColumn { table: String, column: String },

    /// S005: No input rows to key
    #[error("[S005] Empty input: no rows available to build '{table}'")]
    EmptyInput { table: String },

    /// S006: Strict join rejected rows with no matching parent
    #[error("[S006] Unresolved foreign key {table}.{column} -> {parent}: {dropped} row(s) had no match")]
    UnresolvedForeignKey {
        table: String,
        column: String,
        parent: String,
        dropped: usize,
    },

    /// S007: The parent side of a join is not unique on its join key
    #[error("[S007] Non-unique join key ({key}) on '{parent}' while building '{table}'")]
    NonUniqueJoinKey {
        table: String,
        parent: String,
        key: String,
    },

    /// S008: Strict fact join did not conserve the row count
    #[error("[S008] Fact join cardinality changed for '{table}' joining '{dimension}': {before} -> {after} rows")]
    FactJoinCardinality {
        table: String,
        dimension: String,
        before: usize,
        after: usize,
    },

    /// S009: The raw grain identifier of a fact is not unique
    #[error("[S009] Duplicate grain key {table}.{column} = {value}")]
    DuplicateGrainKey {
        table: String,
        column: String,
        value: String,
    },

    /// S010: A table was built before one of its parents
    #[error("[S010] '{table}' requires '{parent}' to be built first")]
    MissingParent { table: String, parent: String },

    /// S011: A date-part derivation met a non-date value
    #[error("[S011] Invalid date value in {table}.{column}: {value}")]
    InvalidDateValue {
        table: String,
        column: String,
        value: String,
    },

    /// S012: A row does not match the table's column count
    #[error("[S012] Row width mismatch in '{table}': expected {expected} values, found {found}")]
    RowWidth {
        table: String,
        expected: usize,
        found: usize,
    },

    /// S013: A join would introduce a column the table already has
    #[error("[S013] Column '{column}' already exists in '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// S014: A key sequence would run past the largest representable key
    #[error("[S014] Surrogate keys for '{table}' overflow: offset {offset} cannot number {rows} row(s)")]
    KeyOverflow {
        table: String,
        offset: i64,
        rows: usize,
    },

    /// S015: The raw grain identifier of a fact is missing
    #[error("[S015] Null grain key in {table}.{column} at row {row}")]
    NullGrainKey {
        table: String,
        column: String,
        row: usize,
    },

    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: IO error with file path context
    #[error("[C003] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C004: YAML parse error
    #[error("[C004] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
