//! Configuration types and parsing for starload.yml

use crate::error::{CoreError, CoreResult};
use crate::join::UnmatchedPolicy;
use crate::shipments::DATE_COLUMNS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "starload.yml";

const DEFAULT_DB_PATH: &str = ":memory:";

/// Run configuration from starload.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the flat CSV extract
    #[serde(default)]
    pub input: Option<String>,

    /// Storage connection
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Raw columns cast to DATE at ingestion
    #[serde(default = "default_date_columns")]
    pub date_columns: Vec<String>,

    /// Handling of rows whose foreign key has no parent
    #[serde(default)]
    pub unmatched: UnmatchedPolicy,

    /// Surrogate-key start offsets, by table name
    #[serde(default)]
    pub offsets: HashMap<String, i64>,

    /// Named analytical queries for `starload report`
    #[serde(default = "default_queries")]
    pub queries: Vec<NamedQuery>,
}

/// Storage connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// A report query and the label printed above its result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedQuery {
    pub name: String,
    pub sql: String,
}

impl NamedQuery {
    fn new(name: &str, sql: &str) -> Self {
        Self {
            name: name.to_string(),
            sql: sql.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            database: DatabaseConfig::default(),
            date_columns: default_date_columns(),
            unmatched: UnmatchedPolicy::default(),
            offsets: HashMap::new(),
            queries: default_queries(),
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_date_columns() -> Vec<String> {
    DATE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

fn default_queries() -> Vec<NamedQuery> {
    vec![
        NamedQuery::new(
            "Revenue by customer",
            "SELECT c.customer_name, SUM(f.total_cost) AS total_cost \
             FROM fact_shipment f \
             INNER JOIN dim_customer c ON c.customer_id = f.customer_id \
             GROUP BY c.customer_name ORDER BY c.customer_name",
        ),
        NamedQuery::new(
            "Cost by courier",
            "SELECT c.carrier_name, SUM(f.total_cost) AS total_cost \
             FROM fact_shipment f \
             INNER JOIN dim_courier c ON f.courier_id = c.courier_id \
             GROUP BY c.carrier_name ORDER BY c.carrier_name",
        ),
        NamedQuery::new(
            "Average quantity by shipment period",
            "SELECT sd.shipment_year, sd.shipment_quarter, sd.shipment_month, \
             AVG(f.quantity) AS avg_quantity \
             FROM fact_shipment f \
             INNER JOIN dim_date d ON d.date_id = f.date_id \
             INNER JOIN dim_shipment_date sd ON sd.shipment_date_id = d.shipment_date_id \
             GROUP BY sd.shipment_year, sd.shipment_quarter, sd.shipment_month \
             ORDER BY sd.shipment_year, sd.shipment_quarter, sd.shipment_month",
        ),
    ]
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `starload.yml` from `dir` if present, otherwise the defaults
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        if let Some(col) = self
            .date_columns
            .iter()
            .find(|c| !crate::table_name::is_identifier(c))
        {
            return Err(CoreError::ConfigInvalid {
                message: format!("date column '{col}' is not a valid column name"),
            });
        }
        if let Some(q) = self.queries.iter().find(|q| q.sql.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: format!("query '{}' has no SQL", q.name),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
