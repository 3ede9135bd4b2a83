//! Drop / create / insert ordering derived from the catalog's FK graph.

use crate::catalog::SchemaCatalog;
use crate::error::CoreResult;
use crate::table_name::TableName;
use serde::Serialize;

/// Order in which the storage layer must touch each table.
///
/// Foreign-key constraints reject creating a child before its parent and
/// dropping a parent while a child still references it, so drops run
/// children-first and creates/inserts run parents-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecyclePlan {
    pub drop_order: Vec<TableName>,
    pub create_order: Vec<TableName>,
    pub insert_order: Vec<TableName>,
}

impl LifecyclePlan {
    /// Compute the plan, failing with `CyclicSchema` if no order exists.
    pub fn for_catalog(catalog: &SchemaCatalog) -> CoreResult<Self> {
        let dag = catalog.dag();
        let create_order = dag.topological_order()?;
        let drop_order = dag.reverse_topological_order()?;
        Ok(Self {
            drop_order,
            insert_order: create_order.clone(),
            create_order,
        })
    }
}

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod tests;
