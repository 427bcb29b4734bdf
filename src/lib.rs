//! Stock Reconcile - Etsy listings vs. warehouse stock
//!
//! Compares the Etsy listing export with the warehouse stock export and
//! writes CSV reports of low stock, listings with unknown SKUs and, given
//! the previous low stock report, restocked and newly low SKUs.

pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod reporter;

pub use app::{run, run_with, stale_low_stock, RunSummary};
pub use classifier::{
    classify_low_stock, classify_new_low_stock, classify_restock, classify_wrong_sku,
    LowStockReport, RestockLine, StockLevel, StockLine, WrongSkuLine,
};
pub use config::{InputSchema, RunConfig, SchemaConfig};
pub use error::{ReconcileError, Result};
pub use index::{ListingIndex, SkuIndex, StockIndex};
pub use loader::{load_listings, load_stock, parse_quantity};
pub use reporter::{
    DestinationResolver, FsStore, MemoryStore, ReportKind, ReportOutcome, ReportStore, Reporter,
    RunDestinations,
};
