//! Integration tests for the full ingest, transform, and load path.
//!
//! Each test writes the sample shipment extract to a temporary CSV, reads it
//! back through DuckDB, builds the star schema, and loads it.

use sl_core::test_utils::sample_shipments;
use sl_core::{
    build_star_schema, shipment_catalog, Config, PipelineOptions, StarSchema, Table, Value,
    FACT_TABLE,
};
use sl_db::{
    apply_schema, execute_query, list_tables, read_csv_table, table_row_count, DbError,
    DuckDbStorage, LoadOrchestrator,
};
use std::io::Write;

// ── Helpers ────────────────────────────────────────────────────────────

fn sample_csv() -> tempfile::NamedTempFile {
    let table = sample_shipments();
    let mut text = table.columns().join(",");
    text.push('\n');
    for row in table.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|v| match v {
                Value::Float(x) => format!("{x:.2}"),
                other => other.to_string(),
            })
            .collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn ingest_and_build(db: &DuckDbStorage) -> StarSchema {
    let csv = sample_csv();
    let config = Config::default();
    let catalog = shipment_catalog();
    let raw = read_csv_table(
        db,
        csv.path(),
        &config.date_columns,
        Some(catalog.raw_columns().as_slice()),
    )
    .unwrap();
    build_star_schema(&raw, &catalog, PipelineOptions::default()).unwrap()
}

fn count(db: &DuckDbStorage, table: &str) -> i64 {
    table_row_count(db, table).unwrap()
}

fn structure(db: &DuckDbStorage) -> Vec<Vec<String>> {
    let columns = execute_query(
        db,
        "SELECT table_name, column_name, data_type, is_nullable \
         FROM information_schema.columns WHERE table_schema = 'main' \
         ORDER BY table_name, ordinal_position",
    )
    .unwrap();
    let constraints = execute_query(
        db,
        "SELECT table_name, constraint_type, constraint_text \
         FROM duckdb_constraints() WHERE schema_name = 'main' \
         ORDER BY table_name, constraint_type, constraint_text",
    )
    .unwrap();
    columns.rows.into_iter().chain(constraints.rows).collect()
}

// ── Tests ──────────────────────────────────────────────────────────────

#[test]
fn test_csv_to_star_schema_end_to_end() {
    let db = DuckDbStorage::in_memory().unwrap();
    let schema = ingest_and_build(&db);

    apply_schema(&db, schema.catalog(), schema.plan()).unwrap();
    let report = LoadOrchestrator::new(&db).load(&schema).unwrap();

    for loaded in &report.tables {
        assert_eq!(count(&db, &loaded.table), loaded.rows as i64, "{}", loaded.table);
    }
    assert_eq!(count(&db, FACT_TABLE), 5);
    assert_eq!(count(&db, "dim_country"), 3);
    assert_eq!(count(&db, "dim_date"), 4);

    let mut tables = list_tables(&db).unwrap();
    tables.sort();
    let mut expected: Vec<String> = shipment_catalog()
        .tables()
        .iter()
        .map(|t| t.name.to_string())
        .collect();
    expected.sort();
    assert_eq!(tables, expected);
}

#[test]
fn test_every_fact_row_joins_every_dimension() {
    let db = DuckDbStorage::in_memory().unwrap();
    let schema = ingest_and_build(&db);
    apply_schema(&db, schema.catalog(), schema.plan()).unwrap();
    LoadOrchestrator::new(&db).load(&schema).unwrap();

    let result = execute_query(
        &db,
        "SELECT COUNT(*) FROM fact_shipment f \
         JOIN dim_date d USING (date_id) \
         JOIN dim_shipment_date sd ON sd.shipment_date_id = d.shipment_date_id \
         JOIN dim_delivery_date dd ON dd.delivery_date_id = d.delivery_date_id \
         JOIN dim_courier co USING (courier_id) \
         JOIN dim_origin o ON o.origin_id = co.origin_id \
         JOIN dim_destination de ON de.destination_id = co.destination_id \
         JOIN dim_customer cu USING (customer_id) \
         JOIN dim_city ci ON ci.city_id = cu.city_id \
         JOIN dim_payment pa ON pa.payment_id = cu.payment_id \
         JOIN dim_product p USING (product_id) \
         JOIN dim_category ca ON ca.category_id = p.category_id \
         JOIN dim_shipping s USING (shipping_id)",
    )
    .unwrap();
    assert_eq!(result.rows, vec![vec!["5".to_string()]]);
}

#[test]
fn test_default_report_queries_run() {
    let db = DuckDbStorage::in_memory().unwrap();
    let schema = ingest_and_build(&db);
    apply_schema(&db, schema.catalog(), schema.plan()).unwrap();
    LoadOrchestrator::new(&db).load(&schema).unwrap();

    let config = Config::default();
    let revenue = execute_query(&db, &config.queries[0].sql).unwrap();
    assert_eq!(revenue.columns, vec!["customer_name", "total_cost"]);
    assert_eq!(
        revenue.rows,
        vec![
            vec!["Ada".to_string(), "2800".to_string()],
            vec!["Bola".to_string(), "1000".to_string()],
            vec!["Chen".to_string(), "2850".to_string()],
        ]
    );

    for query in &config.queries[1..] {
        let result = execute_query(&db, &query.sql).unwrap();
        assert!(!result.rows.is_empty(), "{}", query.name);
    }
}

#[test]
fn test_failed_load_commits_nothing() {
    let db = DuckDbStorage::in_memory().unwrap();
    let mut schema = ingest_and_build(&db);
    apply_schema(&db, schema.catalog(), schema.plan()).unwrap();

    // Point the last fact row at a product that does not exist.
    let fact = schema.table(FACT_TABLE).unwrap();
    let idx = fact.column_index("product_id").unwrap();
    let mut corrupted = Table::new(fact.name().clone(), fact.columns().to_vec());
    for (i, row) in fact.rows().iter().enumerate() {
        let mut row = row.clone();
        if i == fact.len() - 1 {
            row[idx] = Value::Int(999);
        }
        corrupted.push_row(row).unwrap();
    }
    schema.replace_table(corrupted);

    let err = LoadOrchestrator::new(&db).load(&schema).unwrap_err();
    match err {
        DbError::InsertFailed { table, row, .. } => {
            assert_eq!(table, FACT_TABLE);
            assert_eq!(row, 4);
        }
        other => panic!("unexpected error: {other}"),
    }

    for def in schema.catalog().tables() {
        assert_eq!(count(&db, &def.name), 0, "{} kept rows", def.name);
    }
}

#[test]
fn test_schema_lifecycle_is_idempotent() {
    let db = DuckDbStorage::in_memory().unwrap();
    let schema = ingest_and_build(&db);

    apply_schema(&db, schema.catalog(), schema.plan()).unwrap();
    let first = structure(&db);
    LoadOrchestrator::new(&db).load(&schema).unwrap();

    apply_schema(&db, schema.catalog(), schema.plan()).unwrap();
    let second = structure(&db);
    assert_eq!(first, second);
    assert!(!first.is_empty());
    assert_eq!(count(&db, FACT_TABLE), 0);

    LoadOrchestrator::new(&db).load(&schema).unwrap();
    assert_eq!(count(&db, FACT_TABLE), 5);
}

#[test]
fn test_file_database_persists_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.duckdb");

    {
        let db = DuckDbStorage::from_path(&path).unwrap();
        let schema = ingest_and_build(&db);
        apply_schema(&db, schema.catalog(), schema.plan()).unwrap();
        LoadOrchestrator::new(&db).load(&schema).unwrap();
    }

    let db = DuckDbStorage::open(path.to_str().unwrap()).unwrap();
    assert_eq!(count(&db, FACT_TABLE), 5);
    assert_eq!(count(&db, "dim_customer"), 3);
}

#[test]
fn test_ingested_rows_match_fixture() {
    let db = DuckDbStorage::in_memory().unwrap();
    let csv = sample_csv();
    let raw = read_csv_table(&db, csv.path(), &Config::default().date_columns, None).unwrap();
    let fixture = sample_shipments();

    assert_eq!(raw.columns(), fixture.columns());
    assert_eq!(raw.len(), fixture.len());
    for column in ["shipment_id", "customer_name", "shipment_date", "carrier_rating"] {
        assert_eq!(
            raw.column_values(column).unwrap(),
            fixture.column_values(column).unwrap(),
            "{column}"
        );
    }
}
