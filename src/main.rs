//! Stock Reconcile - Etsy listings vs. warehouse stock
//!
//! Reads both CSV exports, writes the low stock / wrong SKU reports and,
//! with `--ols`, the restock and new low stock reports.

use clap::Parser;
use std::path::PathBuf;
use stock_reconcile::{ReportOutcome, RunConfig, SchemaConfig};

/// Compare Etsy listings with warehouse stock and report low stock
#[derive(Parser, Debug)]
#[command(name = "stock_reconcile")]
#[command(version, about, long_about = None)]
struct Args {
    /// Etsy listing export
    #[arg(long, default_value = "etsy.csv")]
    etsy: PathBuf,

    /// Warehouse stock export
    #[arg(long, default_value = "sklad.csv")]
    money: PathBuf,

    /// Previous low_stock.csv; enables the restock and new low stock reports
    #[arg(long)]
    ols: Option<PathBuf>,

    /// JSON file overriding the CSV column positions
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Folder the reports are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Folder under the output folder holding dated report snapshots
    #[arg(long, default_value = "reports")]
    reports_dir: String,
}

impl Args {
    fn into_config(self) -> stock_reconcile::Result<RunConfig> {
        let schema = match &self.schema {
            Some(path) => SchemaConfig::from_json_file(path)?,
            None => SchemaConfig::default(),
        };

        Ok(RunConfig {
            listings_path: self.etsy,
            stock_path: self.money,
            prior_low_stock_path: self.ols,
            output_dir: self.output_dir,
            reports_dir_name: self.reports_dir,
            schema,
        })
    }
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=stock_reconcile=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = args
        .into_config()
        .and_then(|config| stock_reconcile::run(&config));

    match result {
        Ok(summary) => {
            let skipped = summary
                .reports
                .iter()
                .filter(|(_, outcome)| *outcome == ReportOutcome::Empty)
                .count();
            log::info!(
                "Done: {} report(s) written, {} empty",
                summary.written_count(),
                skipped
            );
        }
        Err(e) => {
            log::error!("Reconciliation failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
