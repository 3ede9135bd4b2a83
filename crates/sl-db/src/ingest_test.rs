use super::*;
use chrono::NaiveDate;
use sl_core::Value;
use std::io::Write;

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_reads_rows_in_file_order_with_inferred_types() {
    let file = write_csv(
        "shipment_id,product_name,unit_price,shipment_date\n\
         2,Phone,500.5,2024-02-10\n\
         1,Laptop,900.0,2024-01-05\n",
    );
    let db = DuckDbStorage::in_memory().unwrap();
    let dates = vec!["shipment_date".to_string()];
    let table = read_csv_table(&db, file.path(), &dates, None).unwrap();

    assert_eq!(table.name(), RAW_TABLE);
    assert_eq!(
        table.columns(),
        &["shipment_id", "product_name", "unit_price", "shipment_date"]
    );
    assert_eq!(table.len(), 2);
    assert_eq!(table.value(0, "shipment_id"), Some(&Value::Int(2)));
    assert_eq!(table.value(0, "product_name"), Some(&Value::from("Phone")));
    assert_eq!(table.value(0, "unit_price"), Some(&Value::Float(500.5)));
    assert_eq!(
        table.value(1, "shipment_date"),
        Some(&Value::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()))
    );
}

#[test]
fn test_empty_cells_become_null() {
    let file = write_csv("id,city\n1,\n2,Lagos\n");
    let db = DuckDbStorage::in_memory().unwrap();
    let table = read_csv_table(&db, file.path(), &[], None).unwrap();
    assert_eq!(table.value(0, "city"), Some(&Value::Null));
}

#[test]
fn test_missing_file_is_reported() {
    let db = DuckDbStorage::in_memory().unwrap();
    let err = read_csv_table(&db, Path::new("/nonexistent/shipments.csv"), &[], None).unwrap_err();
    match err {
        DbError::CsvError { path, .. } => assert!(path.ends_with("shipments.csv")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_date_column_is_reported() {
    let file = write_csv("id\n1\n");
    let db = DuckDbStorage::in_memory().unwrap();
    let err = read_csv_table(&db, file.path(), &["shipment_date".to_string()], None).unwrap_err();
    assert!(matches!(err, DbError::CsvError { .. }));
}

#[test]
fn test_select_sql_quotes_path() {
    assert_eq!(
        select_csv_sql("/tmp/o'brien.csv", &[]),
        "SELECT * FROM read_csv_auto('/tmp/o''brien.csv')"
    );
    assert_eq!(
        select_csv_sql("a.csv", &["d".to_string()]),
        "SELECT * REPLACE (CAST(d AS DATE) AS d) FROM read_csv_auto('a.csv')"
    );
}

#[test]
fn test_unread_columns_are_not_converted() {
    let file = write_csv(
        "shipment_id,carrier_name,created_at\n\
         1,DHL,2024-01-01 10:00:00\n\
         2,UPS,2024-01-02 11:30:00\n",
    );
    let db = DuckDbStorage::in_memory().unwrap();
    let table = read_csv_table(
        &db,
        file.path(),
        &[],
        Some(&["carrier_name", "shipment_id"][..]),
    )
    .unwrap();

    assert_eq!(table.columns(), &["shipment_id", "carrier_name"]);
    assert_eq!(table.value(1, "carrier_name"), Some(&Value::from("UPS")));
}

#[test]
fn test_unsupported_type_in_read_column_is_reported() {
    let file = write_csv("id,created_at\n1,2024-01-01 10:00:00\n");
    let db = DuckDbStorage::in_memory().unwrap();
    let err = read_csv_table(&db, file.path(), &[], None).unwrap_err();
    match err {
        DbError::Conversion { column, .. } => assert_eq!(column, "created_at"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_kept_column_absent_from_file_is_skipped() {
    let file = write_csv("id,city\n1,Lagos\n");
    let db = DuckDbStorage::in_memory().unwrap();
    let table = read_csv_table(&db, file.path(), &[], Some(&["city", "country"][..])).unwrap();
    assert_eq!(table.columns(), &["city"]);
}
