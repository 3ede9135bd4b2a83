//! Conversions between DuckDB values and core [`Value`]s.

use chrono::{Datelike, NaiveDate};
use duckdb::types::Value as DuckValue;
use sl_core::Value;

/// `NaiveDate::num_days_from_ce` of 1970-01-01, DuckDB's DATE epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Bind value for a core cell.
pub(crate) fn to_duckdb(value: &Value) -> DuckValue {
    match value {
        Value::Null => DuckValue::Null,
        Value::Int(n) => DuckValue::BigInt(*n),
        Value::Float(x) => DuckValue::Double(*x),
        Value::Text(s) => DuckValue::Text(s.clone()),
        Value::Date(d) => DuckValue::Date32(d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE),
    }
}

/// Core cell for a fetched value. Types with no core counterpart are
/// returned as `Err` with a description of the value.
pub(crate) fn from_duckdb(value: DuckValue) -> Result<Value, String> {
    Ok(match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(b) => Value::Int(i64::from(b)),
        DuckValue::TinyInt(n) => Value::Int(i64::from(n)),
        DuckValue::SmallInt(n) => Value::Int(i64::from(n)),
        DuckValue::Int(n) => Value::Int(i64::from(n)),
        DuckValue::BigInt(n) => Value::Int(n),
        DuckValue::UTinyInt(n) => Value::Int(i64::from(n)),
        DuckValue::USmallInt(n) => Value::Int(i64::from(n)),
        DuckValue::UInt(n) => Value::Int(i64::from(n)),
        DuckValue::UBigInt(n) => {
            Value::Int(i64::try_from(n).map_err(|_| format!("{n} overflows BIGINT"))?)
        }
        DuckValue::HugeInt(n) => {
            Value::Int(i64::try_from(n).map_err(|_| format!("{n} overflows BIGINT"))?)
        }
        DuckValue::Float(x) => Value::Float(f64::from(x)),
        DuckValue::Double(x) => Value::Float(x),
        DuckValue::Text(s) => Value::Text(s),
        DuckValue::Enum(s) => Value::Text(s),
        DuckValue::Date32(days) => Value::Date(date_from_days(days)?),
        other => return Err(format!("{other:?}")),
    })
}

fn date_from_days(days: i32) -> Result<NaiveDate, String> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| format!("DATE {days} days from epoch is out of range"))
}

/// Render one column of a result row for display.
///
/// Falls back to the driver's debug form for types the core model does not
/// carry (decimals, timestamps, intervals, nested types).
pub(crate) fn get_column_as_string(row: &duckdb::Row<'_>, idx: usize) -> String {
    match row.get::<_, DuckValue>(idx) {
        Ok(DuckValue::Decimal(d)) => d.to_string(),
        Ok(value) => match from_duckdb(value) {
            Ok(v) => v.to_string(),
            Err(raw) => raw,
        },
        Err(_) => "null".to_string(),
    }
}
