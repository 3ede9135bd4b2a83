//! The courier-delivery star schema.
//!
//! Thirteen dimensions and one fact table, keyed off a single wide shipment
//! record. Origin and destination share one country dimension built from
//! both columns.

use crate::catalog::{SchemaCatalog, TableDef};
use crate::value::DataType::{Date, Float, Integer, Text};

pub const FACT_TABLE: &str = "fact_shipment";

/// Raw columns normalized to dates before the transform runs.
pub const DATE_COLUMNS: &[&str] = &["shipment_date", "delivery_date"];

/// Table declarations with their default start offsets.
pub fn shipment_tables() -> Vec<TableDef> {
    vec![
        TableDef::dimension("dim_category", "category_id", 10).key("category", Text),
        TableDef::dimension("dim_payment", "payment_id", 20).key("payment_method", Text),
        TableDef::dimension("dim_shipping", "shipping_id", 35)
            .key("shipping_priority", Text)
            .key("mode_of_transport", Text),
        TableDef::dimension("dim_country", "country_id", 5)
            .key("country", Text)
            .union_of(&[&["origin_country"], &["destination_country"]]),
        TableDef::dimension("dim_city", "city_id", 50)
            .key("customer_city", Text)
            .attribute("customer_state", Text)
            .attribute("customer_country", Text),
        TableDef::dimension("dim_origin", "origin_id", 40)
            .key("origin_city", Text)
            .attribute("origin_state", Text)
            .references("country_id", "dim_country", "country_id", &[("origin_country", "country")]),
        TableDef::dimension("dim_destination", "destination_id", 15)
            .key("destination_city", Text)
            .attribute("destination_state", Text)
            .references(
                "country_id",
                "dim_country",
                "country_id",
                &[("destination_country", "country")],
            ),
        TableDef::dimension("dim_shipment_date", "shipment_date_id", 60)
            .key("shipment_date", Date)
            .date_parts("shipment_date", "shipment"),
        TableDef::dimension("dim_delivery_date", "delivery_date_id", 25)
            .key("delivery_date", Date)
            .date_parts("delivery_date", "delivery"),
        TableDef::dimension("dim_product", "product_id", 30)
            .key("product_name", Text)
            .attribute("unit_price", Float)
            .references("category_id", "dim_category", "category_id", &[("category", "category")]),
        TableDef::dimension("dim_customer", "customer_id", 80)
            .key("customer_name", Text)
            .attribute("customer_segment", Text)
            .references(
                "payment_id",
                "dim_payment",
                "payment_id",
                &[("payment_method", "payment_method")],
            )
            .references("city_id", "dim_city", "city_id", &[("customer_city", "customer_city")]),
        TableDef::dimension("dim_courier", "courier_id", 70)
            .key("carrier_name", Text)
            .attribute("carrier_rating", Float)
            .references("origin_id", "dim_origin", "origin_id", &[("origin_city", "origin_city")])
            .references(
                "destination_id",
                "dim_destination",
                "destination_id",
                &[("destination_city", "destination_city")],
            ),
        TableDef::dimension("dim_date", "date_id", 45)
            .join_only_key("shipment_date", Date)
            .join_only_key("delivery_date", Date)
            .references(
                "shipment_date_id",
                "dim_shipment_date",
                "shipment_date_id",
                &[("shipment_date", "shipment_date")],
            )
            .references(
                "delivery_date_id",
                "dim_delivery_date",
                "delivery_date_id",
                &[("delivery_date", "delivery_date")],
            ),
        TableDef::fact(FACT_TABLE, "shipment_id", Integer)
            .attribute("quantity", Integer)
            .attribute("total_cost", Float)
            .references(
                "date_id",
                "dim_date",
                "date_id",
                &[
                    ("shipment_date", "shipment_date"),
                    ("delivery_date", "delivery_date"),
                ],
            )
            .references("courier_id", "dim_courier", "courier_id", &[("carrier_name", "carrier_name")])
            .references(
                "customer_id",
                "dim_customer",
                "customer_id",
                &[("customer_name", "customer_name")],
            )
            .references("product_id", "dim_product", "product_id", &[("product_name", "product_name")])
            .references(
                "shipping_id",
                "dim_shipping",
                "shipping_id",
                &[
                    ("shipping_priority", "shipping_priority"),
                    ("mode_of_transport", "mode_of_transport"),
                ],
            ),
    ]
}

/// The validated shipment catalog with default offsets.
pub fn shipment_catalog() -> SchemaCatalog {
    match SchemaCatalog::new(shipment_tables()) {
        Ok(catalog) => catalog,
        Err(e) => panic!("built-in shipment catalog is invalid: {e}"),
    }
}
