//! The dimensional transform pipeline.
//!
//! One call consumes one raw snapshot and produces every table of the
//! catalog, fully materialized, in parent-before-child order. Nothing is
//! written to storage here.

use crate::catalog::{SchemaCatalog, TableDef, TableKind};
use crate::dimension::DimensionBuilder;
use crate::error::{CoreError, CoreResult};
use crate::fact::FactAssembler;
use crate::join::UnmatchedPolicy;
use crate::lifecycle::LifecyclePlan;
use crate::table::{Table, TableSet};

/// Knobs for one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub unmatched: UnmatchedPolicy,
}

/// Every built table plus the catalog and plan needed to persist them.
#[derive(Debug, Clone)]
pub struct StarSchema {
    catalog: SchemaCatalog,
    plan: LifecyclePlan,
    tables: TableSet,
}

impl StarSchema {
    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn plan(&self) -> &LifecyclePlan {
        &self.plan
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Tables in insert order, each with its declaration.
    pub fn tables(&self) -> impl Iterator<Item = (&TableDef, &Table)> {
        self.plan.insert_order.iter().filter_map(|name| {
            Some((self.catalog.get(name)?, self.tables.get(name)?))
        })
    }

    /// Row count per table, in insert order.
    pub fn row_counts(&self) -> Vec<(String, usize)> {
        self.tables()
            .map(|(def, table)| (def.name.to_string(), table.len()))
            .collect()
    }

    /// Swap in a table by name, bypassing the transform.
    #[cfg(any(test, feature = "test-support"))]
    pub fn replace_table(&mut self, table: Table) {
        self.tables.insert(table);
    }
}

/// Build every table of `catalog` from `raw`.
///
/// Fails with `EmptyInput` when `raw` has no rows; every other failure names
/// the table being built.
pub fn build_star_schema(
    raw: &Table,
    catalog: &SchemaCatalog,
    options: PipelineOptions,
) -> CoreResult<StarSchema> {
    if raw.is_empty() {
        return Err(CoreError::EmptyInput {
            table: raw.name().to_string(),
        });
    }

    let plan = LifecyclePlan::for_catalog(catalog)?;
    log::info!(
        "Building {} tables from {} input rows",
        plan.insert_order.len(),
        raw.len()
    );

    let mut built = TableSet::new();
    for name in &plan.insert_order {
        let def = catalog.get(name).ok_or_else(|| CoreError::UnknownTable {
            table: name.to_string(),
            referenced_by: "lifecycle plan".to_string(),
        })?;
        let table = match def.kind {
            TableKind::Dimension => {
                DimensionBuilder::new(def, options.unmatched).build(raw, &built)?
            }
            TableKind::Fact => FactAssembler::new(def, options.unmatched).assemble(raw, &built)?,
        };
        built.insert(table);
    }

    Ok(StarSchema {
        catalog: catalog.clone(),
        plan,
        tables: built,
    })
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
