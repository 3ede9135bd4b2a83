//! sl-core - Core library for Starload
//!
//! Turns a flat, denormalized stream of shipment records into a star schema:
//! deduplicated, surrogate-keyed dimension tables and a fact table that
//! references them. This crate is pure computation; persisting the result is
//! the job of `sl-db`.

pub mod catalog;
pub mod config;
pub mod dag;
pub mod derive;
pub mod dimension;
pub mod error;
pub mod fact;
pub mod join;
pub mod lifecycle;
pub mod pipeline;
pub mod shipments;
pub mod surrogate;
pub mod table;
pub mod table_name;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod value;

pub use catalog::{
    ColumnDef, DateParts, ForeignKey, JoinPair, KeyStrategy, RowSource, SchemaCatalog, TableDef,
    TableKind,
};
pub use config::{Config, DatabaseConfig, NamedQuery};
pub use dag::TableDag;
pub use dimension::DimensionBuilder;
pub use error::{CoreError, CoreResult};
pub use fact::FactAssembler;
pub use join::{keyed_join, JoinOutcome, UnmatchedPolicy};
pub use lifecycle::LifecyclePlan;
pub use pipeline::{build_star_schema, PipelineOptions, StarSchema};
pub use shipments::{shipment_catalog, FACT_TABLE};
pub use surrogate::SurrogateKeyAssigner;
pub use table::{RawRecord, Table, TableSet};
pub use table_name::TableName;
pub use value::{DataType, Value};
