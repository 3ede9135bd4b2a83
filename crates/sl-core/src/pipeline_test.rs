use super::*;
use crate::shipments::{shipment_catalog, FACT_TABLE};
use crate::table_name::TableName;
use crate::test_utils::sample_shipments;
use crate::value::Value;
use std::collections::{HashMap, HashSet};

fn build() -> StarSchema {
    build_star_schema(
        &sample_shipments(),
        &shipment_catalog(),
        PipelineOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_row_counts_for_sample_input() {
    let schema = build();
    let counts: HashMap<String, usize> = schema.row_counts().into_iter().collect();
    let expected = [
        ("dim_category", 2),
        ("dim_payment", 3),
        ("dim_shipping", 3),
        ("dim_country", 3),
        ("dim_city", 3),
        ("dim_origin", 3),
        ("dim_destination", 3),
        ("dim_shipment_date", 3),
        ("dim_delivery_date", 4),
        ("dim_product", 3),
        ("dim_customer", 3),
        ("dim_courier", 3),
        ("dim_date", 4),
        (FACT_TABLE, 5),
    ];
    assert_eq!(counts.len(), expected.len());
    for (table, rows) in expected {
        assert_eq!(counts[table], rows, "{table}");
    }
}

#[test]
fn test_tables_come_out_in_insert_order() {
    let schema = build();
    let order: Vec<String> = schema.tables().map(|(def, _)| def.name.to_string()).collect();
    let planned: Vec<String> = schema
        .plan()
        .insert_order
        .iter()
        .map(TableName::to_string)
        .collect();
    assert_eq!(order, planned);
    assert_eq!(order.last().map(String::as_str), Some(FACT_TABLE));
}

#[test]
fn test_natural_keys_are_unique() {
    let schema = build();
    for (def, table) in schema.tables() {
        let key = def.natural_key_names();
        let idx = table.indices(&key).unwrap();
        let mut seen = HashSet::new();
        for row in table.rows() {
            let values: Vec<&Value> = idx.iter().map(|&i| &row[i]).collect();
            assert!(seen.insert(values), "duplicate natural key in {}", def.name);
        }
    }
}

#[test]
fn test_surrogate_keys_are_contiguous_from_offset() {
    let schema = build();
    for (def, table) in schema.tables() {
        let Some(offset) = def.offset() else {
            continue;
        };
        let keys: Vec<Value> = table
            .column_values(&def.surrogate_key)
            .unwrap()
            .into_iter()
            .cloned()
            .collect();
        let expected: Vec<Value> = (offset..offset + table.len() as i64).map(Value::Int).collect();
        assert_eq!(keys, expected, "{}", def.name);
    }
}

#[test]
fn test_every_foreign_key_resolves() {
    let schema = build();
    for (def, table) in schema.tables() {
        for fk in &def.foreign_keys {
            let parent = schema.table(&fk.parent).unwrap();
            let keys: HashSet<&Value> = parent
                .column_values(&fk.parent_key)
                .unwrap()
                .into_iter()
                .collect();
            for value in table.column_values(&fk.column).unwrap() {
                assert!(
                    keys.contains(value),
                    "{}.{} = {value} has no row in {}",
                    def.name,
                    fk.column,
                    fk.parent
                );
            }
        }
    }
}

#[test]
fn test_first_seen_attributes_win() {
    let schema = build();
    let products = schema.table("dim_product").unwrap();
    let laptop = products.record(0).unwrap();
    assert_eq!(laptop.get("product_name"), Some(&Value::from("Laptop")));
    assert_eq!(laptop.get("unit_price"), Some(&Value::Float(900.0)));
}

#[test]
fn test_repeated_runs_are_identical() {
    let first = build();
    let second = build();
    for ((_, a), (_, b)) in first.tables().zip(second.tables()) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_offsets_shift_keys() {
    let catalog = shipment_catalog()
        .with_offsets(&HashMap::from([("dim_category".to_string(), 500)]))
        .unwrap();
    let schema =
        build_star_schema(&sample_shipments(), &catalog, PipelineOptions::default()).unwrap();
    let products = schema.table("dim_product").unwrap();
    let categories: Vec<&Value> = products.column_values("category_id").unwrap();
    assert_eq!(
        categories,
        vec![&Value::Int(500), &Value::Int(500), &Value::Int(501)]
    );
}

#[test]
fn test_empty_input_is_rejected() {
    let raw = Table::new(TableName::new("raw_shipments"), sample_shipments().columns().to_vec());
    let err = build_star_schema(&raw, &shipment_catalog(), PipelineOptions::default()).unwrap_err();
    assert!(matches!(err, CoreError::EmptyInput { ref table } if table == "raw_shipments"));
}

#[test]
fn test_missing_input_column_names_the_table() {
    let mut raw = sample_shipments();
    raw.drop_columns(&["carrier_rating"]);
    let err = build_star_schema(&raw, &shipment_catalog(), PipelineOptions::default()).unwrap_err();
    match err {
        CoreError::MissingColumn { table, column } => {
            assert_eq!(table, "dim_courier");
            assert_eq!(column, "carrier_rating");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_strict_policy_passes_clean_input() {
    let options = PipelineOptions {
        unmatched: UnmatchedPolicy::Reject,
    };
    let schema = build_star_schema(&sample_shipments(), &shipment_catalog(), options).unwrap();
    assert_eq!(schema.table(FACT_TABLE).unwrap().len(), 5);
}

#[test]
fn test_offset_near_key_limit_fails_without_panicking() {
    let catalog = shipment_catalog()
        .with_offsets(&HashMap::from([("dim_payment".to_string(), i64::MAX)]))
        .unwrap();
    let err = build_star_schema(&sample_shipments(), &catalog, PipelineOptions::default())
        .unwrap_err();
    match err {
        CoreError::KeyOverflow {
            table,
            offset,
            rows,
        } => {
            assert_eq!(table, "dim_payment");
            assert_eq!(offset, i64::MAX);
            assert_eq!(rows, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}
