//! DDL rendering for catalog tables.

use sl_core::{DataType, TableDef, TableName};

/// Storage column type for a logical type.
pub fn sql_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Integer => "BIGINT",
        DataType::Float => "DOUBLE",
        DataType::Text => "VARCHAR",
        DataType::Date => "DATE",
    }
}

/// `CREATE TABLE` for the stored columns of `def`.
///
/// The surrogate key is `NOT NULL PRIMARY KEY`; each foreign key becomes a
/// `FOREIGN KEY ... REFERENCES parent(parent_key)` constraint.
pub fn create_table_sql(def: &TableDef) -> String {
    let mut lines: Vec<String> = def
        .stored_columns()
        .iter()
        .map(|col| {
            if col.name == def.surrogate_key {
                format!("    {} {} NOT NULL PRIMARY KEY", col.name, sql_type(col.data_type))
            } else {
                format!("    {} {}", col.name, sql_type(col.data_type))
            }
        })
        .collect();

    lines.extend(def.foreign_keys.iter().map(|fk| {
        format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.parent, fk.parent_key
        )
    }));

    format!("CREATE TABLE {} (\n{}\n)", def.name, lines.join(",\n"))
}

pub fn drop_table_sql(table: &TableName) -> String {
    format!("DROP TABLE IF EXISTS {table}")
}

/// Positional-parameter `INSERT` for the stored columns of `def`.
pub fn insert_sql(def: &TableDef) -> String {
    let columns: Vec<String> = def.stored_columns().into_iter().map(|c| c.name).collect();
    let params = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        def.name,
        columns.join(", "),
        params
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_core::shipment_catalog;

    #[test]
    fn test_create_dimension_with_foreign_key() {
        let catalog = shipment_catalog();
        let sql = create_table_sql(catalog.get("dim_product").unwrap());
        assert_eq!(
            sql,
            "CREATE TABLE dim_product (\n\
             \x20   product_id BIGINT NOT NULL PRIMARY KEY,\n\
             \x20   product_name VARCHAR,\n\
             \x20   unit_price DOUBLE,\n\
             \x20   category_id BIGINT,\n\
             \x20   FOREIGN KEY (category_id) REFERENCES dim_category(category_id)\n\
             )"
        );
    }

    #[test]
    fn test_join_only_columns_are_not_created() {
        let catalog = shipment_catalog();
        let sql = create_table_sql(catalog.get("dim_date").unwrap());
        assert!(!sql.contains("shipment_date DATE"));
        assert!(sql.contains("shipment_date_id BIGINT"));
        assert!(sql.contains("REFERENCES dim_delivery_date(delivery_date_id)"));
    }

    #[test]
    fn test_fact_keyed_by_grain() {
        let catalog = shipment_catalog();
        let sql = create_table_sql(catalog.get("fact_shipment").unwrap());
        assert!(sql.contains("shipment_id BIGINT NOT NULL PRIMARY KEY"));
        assert_eq!(sql.matches("FOREIGN KEY").count(), 5);
    }

    #[test]
    fn test_insert_uses_stored_columns() {
        let catalog = shipment_catalog();
        assert_eq!(
            insert_sql(catalog.get("dim_date").unwrap()),
            "INSERT INTO dim_date (date_id, shipment_date_id, delivery_date_id) VALUES (?, ?, ?)"
        );
    }

    #[test]
    fn test_sql_types() {
        assert_eq!(sql_type(DataType::Integer), "BIGINT");
        assert_eq!(sql_type(DataType::Date), "DATE");
    }
}
