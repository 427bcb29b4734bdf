//! Input schemas and run configuration
//!
//! Column positions of each export are described by an [`InputSchema`] and
//! handed to the loader explicitly. Defaults match the Etsy listing export,
//! the warehouse (Money S3) stock export and our own `low_stock.csv`.

use crate::error::{ReconcileError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Column positions for one CSV export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    pub sku_column: usize,
    /// Title column for listings, quantity column for stock files
    pub value_column: usize,
}

impl InputSchema {
    pub const fn new(sku_column: usize, value_column: usize) -> Self {
        Self {
            sku_column,
            value_column,
        }
    }

    /// Etsy listing export: title in column 0, SKU in column 23
    pub const fn etsy_listings() -> Self {
        Self::new(23, 0)
    }

    /// Warehouse stock export: SKU in column 3, quantity in column 4
    pub const fn warehouse_stock() -> Self {
        Self::new(3, 4)
    }

    /// A previously written low stock report: `SKU,QUANTITY`
    pub const fn low_stock_report() -> Self {
        Self::new(0, 1)
    }
}

/// Schemas for all three inputs of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub listings: InputSchema,
    pub stock: InputSchema,
    pub prior_low_stock: InputSchema,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            listings: InputSchema::etsy_listings(),
            stock: InputSchema::warehouse_stock(),
            prior_low_stock: InputSchema::low_stock_report(),
        }
    }
}

impl SchemaConfig {
    /// Parse schema overrides from JSON; omitted sections keep their defaults
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| ReconcileError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ReconcileError::io(path, e))?;
        let schema = Self::from_json_str(&json, path)?;
        log::debug!("Loaded schema config from {}: {:?}", path.display(), schema);
        Ok(schema)
    }
}

/// Fully resolved configuration for one reconciliation run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub listings_path: PathBuf,
    pub stock_path: PathBuf,
    /// Previous `low_stock.csv`; enables the restock and new low stock reports
    pub prior_low_stock_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Folder under `output_dir` holding the dated report snapshots
    pub reports_dir_name: String,
    pub schema: SchemaConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            listings_path: PathBuf::from("etsy.csv"),
            stock_path: PathBuf::from("sklad.csv"),
            prior_low_stock_path: None,
            output_dir: PathBuf::from("."),
            reports_dir_name: "reports".to_string(),
            schema: SchemaConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_matches_export_layouts() {
        let schema = SchemaConfig::default();
        assert_eq!(schema.listings, InputSchema::new(23, 0));
        assert_eq!(schema.stock, InputSchema::new(3, 4));
        assert_eq!(schema.prior_low_stock, InputSchema::new(0, 1));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let json = r#"{ "stock": { "sku_column": 0, "value_column": 2 } }"#;
        let schema = SchemaConfig::from_json_str(json, Path::new("schema.json")).unwrap();

        assert_eq!(schema.stock, InputSchema::new(0, 2));
        assert_eq!(schema.listings, InputSchema::etsy_listings());
        assert_eq!(schema.prior_low_stock, InputSchema::low_stock_report());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let result = SchemaConfig::from_json_str("{ not json", Path::new("schema.json"));
        assert!(matches!(result, Err(ReconcileError::Config { .. })));
    }

    #[test]
    fn missing_schema_file_is_io_error() {
        let result = SchemaConfig::from_json_file("/this/schema/does/not/exist.json");
        assert!(matches!(result, Err(ReconcileError::Io { .. })));
    }
}
