//! Schema lifecycle execution: drop everything, then recreate it empty.

use crate::error::{DbError, DbResult};
use crate::traits::Storage;
use sl_core::{LifecyclePlan, SchemaCatalog};

/// Drop every catalog table children-first, then create them parents-first.
///
/// Safe to re-run against a populated store: tables that do not exist yet
/// are skipped by the drop, and the result is a clean, empty schema.
pub fn apply_schema<S: Storage + ?Sized>(
    storage: &S,
    catalog: &SchemaCatalog,
    plan: &LifecyclePlan,
) -> DbResult<()> {
    for table in &plan.drop_order {
        storage.drop_table_if_exists(table)?;
    }

    for name in &plan.create_order {
        let def = catalog
            .get(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))?;
        storage.create_table(def)?;
    }

    log::info!(
        "Applied schema on {}: dropped and created {} tables",
        storage.backend(),
        plan.create_order.len()
    );
    Ok(())
}
