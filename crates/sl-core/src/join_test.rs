use super::*;
use crate::table::RawRecord;
use crate::table_name::TableName;

fn pair(local: &str, parent: &str) -> JoinPair {
    JoinPair {
        local: local.to_string(),
        parent: parent.to_string(),
    }
}

fn categories() -> Table {
    Table::from_records(
        TableName::new("dim_category"),
        &[
            RawRecord::new().with("category", "X").with("category_id", 10),
            RawRecord::new().with("category", "Y").with("category_id", 11),
        ],
    )
}

fn products(rows: &[(&str, &str)]) -> Table {
    let records: Vec<RawRecord> = rows
        .iter()
        .map(|(p, c)| RawRecord::new().with("product_name", *p).with("category", *c))
        .collect();
    Table::from_records(TableName::new("dim_product"), &records)
}

#[test]
fn test_join_appends_parent_key() {
    let outcome = keyed_join(
        products(&[("A", "X"), ("B", "Y"), ("C", "X")]),
        &categories(),
        &[pair("category", "category")],
        "category_id",
        "category_id",
    )
    .unwrap();

    assert_eq!(outcome.dropped, 0);
    let table = outcome.table;
    assert_eq!(table.columns(), &["product_name", "category", "category_id"]);
    assert_eq!(table.value(1, "category_id"), Some(&Value::Int(11)));
    assert_eq!(table.value(2, "category_id"), Some(&Value::Int(10)));
}

#[test]
fn test_unmatched_rows_are_dropped_and_counted() {
    let outcome = keyed_join(
        products(&[("A", "X"), ("B", "Z"), ("C", "Y")]),
        &categories(),
        &[pair("category", "category")],
        "category_id",
        "category_id",
    )
    .unwrap();

    assert_eq!(outcome.dropped, 1);
    assert_eq!(outcome.table.len(), 2);
    assert_eq!(
        outcome.table.value(1, "product_name"),
        Some(&Value::from("C"))
    );
}

#[test]
fn test_non_unique_parent_fails_fast() {
    let mut parent = categories();
    parent
        .push_row(vec![Value::from("X"), Value::Int(12)])
        .unwrap();

    let err = keyed_join(
        products(&[("A", "X")]),
        &parent,
        &[pair("category", "category")],
        "category_id",
        "category_id",
    )
    .unwrap_err();
    match err {
        CoreError::NonUniqueJoinKey { table, parent, key } => {
            assert_eq!(table, "dim_product");
            assert_eq!(parent, "dim_category");
            assert_eq!(key, "category");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_join_on_renamed_and_composite_columns() {
    let parent = Table::from_records(
        TableName::new("dim_date"),
        &[
            RawRecord::new()
                .with("shipment_date", "2024-01-01")
                .with("delivery_date", "2024-01-03")
                .with("date_id", 45),
            RawRecord::new()
                .with("shipment_date", "2024-01-01")
                .with("delivery_date", "2024-01-05")
                .with("date_id", 46),
        ],
    );
    let left = Table::from_records(
        TableName::new("fact_shipment"),
        &[RawRecord::new()
            .with("shipped", "2024-01-01")
            .with("delivered", "2024-01-05")],
    );

    let outcome = keyed_join(
        left,
        &parent,
        &[
            pair("shipped", "shipment_date"),
            pair("delivered", "delivery_date"),
        ],
        "date_id",
        "date_id",
    )
    .unwrap();
    assert_eq!(outcome.table.value(0, "date_id"), Some(&Value::Int(46)));
}

#[test]
fn test_output_column_collision_is_rejected() {
    let left = Table::from_records(
        TableName::new("dim_product"),
        &[RawRecord::new().with("category", "X").with("category_id", 1)],
    );
    let err = keyed_join(
        left,
        &categories(),
        &[pair("category", "category")],
        "category_id",
        "category_id",
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateColumn { .. }));
}
