//! sl-db - Storage layer for Starload
//!
//! This crate provides the `Storage` trait, its DuckDB implementation, and
//! the operations that move a built star schema into it: schema lifecycle
//! (drop and create), the transactional load, CSV ingestion of the raw input,
//! and an ad-hoc query passthrough.

pub mod ddl;
pub mod duckdb;
pub mod error;
pub mod ingest;
pub mod lifecycle;
pub mod load;
pub mod query;
pub(crate) mod row_helpers;
pub mod traits;

pub use crate::duckdb::DuckDbStorage;
pub use error::{DbError, DbResult};
pub use ingest::{read_csv_table, RAW_TABLE};
pub use lifecycle::apply_schema;
pub use load::{LoadOrchestrator, LoadReport, LoadedTable};
pub use query::{execute_query, list_tables, table_row_count, QueryResult};
pub use traits::{transaction, Storage};
