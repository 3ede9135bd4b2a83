//! Calendar attributes derived from date columns.

use crate::catalog::DateParts;
use crate::error::{CoreError, CoreResult};
use crate::table::Table;
use crate::value::Value;
use chrono::Datelike;

/// Append the `<prefix>_year/_quarter/_month/_day/_week_day` columns
/// computed from `parts.source`. Null dates give null parts.
pub fn append_date_parts(table: &mut Table, parts: &DateParts) -> CoreResult<()> {
    let mut year = Vec::with_capacity(table.len());
    let mut quarter = Vec::with_capacity(table.len());
    let mut month = Vec::with_capacity(table.len());
    let mut day = Vec::with_capacity(table.len());
    let mut week_day = Vec::with_capacity(table.len());

    for value in table.column_values(&parts.source)? {
        match value {
            Value::Date(d) => {
                year.push(Value::Int(i64::from(d.year())));
                quarter.push(Value::Int(i64::from((d.month() - 1) / 3 + 1)));
                month.push(Value::Int(i64::from(d.month())));
                day.push(Value::Int(i64::from(d.day())));
                week_day.push(Value::Text(d.format("%A").to_string()));
            }
            Value::Null => {
                for col in [&mut year, &mut quarter, &mut month, &mut day, &mut week_day] {
                    col.push(Value::Null);
                }
            }
            other => {
                return Err(CoreError::InvalidDateValue {
                    table: table.name().to_string(),
                    column: parts.source.clone(),
                    value: other.to_string(),
                })
            }
        }
    }

    let columns = parts.columns();
    for (def, values) in columns.iter().zip([year, quarter, month, day, week_day]) {
        table.append_column(&def.name, values)?;
    }
    Ok(())
}
