//! Shared test fixtures for sl-core and downstream crates

use crate::table::{RawRecord, Table};
use crate::table_name::TableName;
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

struct Shipment<'a> {
    id: i64,
    product: (&'a str, f64, &'a str),
    customer: (&'a str, &'a str, &'a str),
    customer_place: (&'a str, &'a str, &'a str),
    carrier: (&'a str, f64),
    transport: (&'a str, &'a str),
    origin: (&'a str, &'a str, &'a str),
    destination: (&'a str, &'a str, &'a str),
    dates: (&'a str, &'a str),
    quantity: i64,
    total_cost: f64,
}

impl Shipment<'_> {
    fn record(&self) -> RawRecord {
        RawRecord::new()
            .with("shipment_id", self.id)
            .with("product_name", self.product.0)
            .with("unit_price", self.product.1)
            .with("category", self.product.2)
            .with("customer_name", self.customer.0)
            .with("customer_segment", self.customer.1)
            .with("payment_method", self.customer.2)
            .with("customer_city", self.customer_place.0)
            .with("customer_state", self.customer_place.1)
            .with("customer_country", self.customer_place.2)
            .with("carrier_name", self.carrier.0)
            .with("carrier_rating", self.carrier.1)
            .with("mode_of_transport", self.transport.0)
            .with("shipping_priority", self.transport.1)
            .with("origin_city", self.origin.0)
            .with("origin_state", self.origin.1)
            .with("origin_country", self.origin.2)
            .with("destination_city", self.destination.0)
            .with("destination_state", self.destination.1)
            .with("destination_country", self.destination.2)
            .with("shipment_date", date(self.dates.0))
            .with("delivery_date", date(self.dates.1))
            .with("quantity", self.quantity)
            .with("total_cost", self.total_cost)
    }
}

/// Five shipments in the wide input shape.
///
/// Shipment 4 repeats product "Laptop" with a different unit price (900.0
/// is seen first); shipment 5 repeats every natural key of shipment 2.
pub fn sample_records() -> Vec<RawRecord> {
    let lagos = ("Lagos", "LA", "Nigeria");
    let abuja = ("Abuja", "FC", "Nigeria");
    let accra = ("Accra", "GA", "Ghana");
    let nairobi = ("Nairobi", "NB", "Kenya");

    [
        Shipment {
            id: 1,
            product: ("Laptop", 900.0, "Electronics"),
            customer: ("Ada", "Consumer", "Card"),
            customer_place: lagos,
            carrier: ("DHL", 4.5),
            transport: ("Air", "High"),
            origin: lagos,
            destination: accra,
            dates: ("2024-01-05", "2024-01-08"),
            quantity: 2,
            total_cost: 1800.0,
        },
        Shipment {
            id: 2,
            product: ("Phone", 500.0, "Electronics"),
            customer: ("Bola", "Corporate", "Transfer"),
            customer_place: abuja,
            carrier: ("UPS", 4.0),
            transport: ("Road", "Low"),
            origin: abuja,
            destination: lagos,
            dates: ("2024-02-10", "2024-02-15"),
            quantity: 1,
            total_cost: 500.0,
        },
        Shipment {
            id: 3,
            product: ("Desk", 250.0, "Furniture"),
            customer: ("Ada", "Consumer", "Card"),
            customer_place: lagos,
            carrier: ("DHL", 4.5),
            transport: ("Air", "High"),
            origin: lagos,
            destination: accra,
            dates: ("2024-01-05", "2024-01-09"),
            quantity: 4,
            total_cost: 1000.0,
        },
        Shipment {
            id: 4,
            product: ("Laptop", 950.0, "Electronics"),
            customer: ("Chen", "Home Office", "Cash"),
            customer_place: accra,
            carrier: ("FedEx", 3.5),
            transport: ("Sea", "Medium"),
            origin: accra,
            destination: nairobi,
            dates: ("2024-04-20", "2024-05-02"),
            quantity: 3,
            total_cost: 2850.0,
        },
        Shipment {
            id: 5,
            product: ("Phone", 500.0, "Electronics"),
            customer: ("Bola", "Corporate", "Transfer"),
            customer_place: abuja,
            carrier: ("UPS", 4.0),
            transport: ("Road", "Low"),
            origin: abuja,
            destination: lagos,
            dates: ("2024-02-10", "2024-02-15"),
            quantity: 1,
            total_cost: 500.0,
        },
    ]
    .iter()
    .map(Shipment::record)
    .collect()
}

/// [`sample_records`] as a raw table.
pub fn sample_shipments() -> Table {
    Table::from_records(TableName::new("raw_shipments"), &sample_records())
}
