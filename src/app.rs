//! One reconciliation run: load both exports, classify, write the reports.

use crate::classifier::{
    classify_low_stock, classify_new_low_stock, classify_restock, classify_wrong_sku,
};
use crate::config::RunConfig;
use crate::error::Result;
use crate::loader::{load_listings, load_stock};
use crate::reporter::{
    DestinationResolver, FsStore, ReportKind, ReportOutcome, ReportStore, Reporter,
    RunDestinations,
};
use log::{info, warn};
use std::path::PathBuf;

/// Outcome of every report a run produced, in write order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: Vec<(ReportKind, ReportOutcome)>,
}

impl RunSummary {
    pub fn outcome(&self, kind: ReportKind) -> Option<&ReportOutcome> {
        self.reports
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }

    pub fn written_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ReportOutcome::Written(_)))
            .count()
    }
}

/// Run against the filesystem, snapshotting into a folder stamped with the local time
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let destinations = RunDestinations::now(&config.output_dir, &config.reports_dir_name);
    info!("Report snapshot folder: {}", destinations.snapshot_dir().display());

    let mut reporter = Reporter::new(destinations, FsStore);
    let summary = run_with(config, &mut reporter)?;

    if let Some(stale) = stale_low_stock(config, &summary) {
        warn!(
            "{} is left over from an earlier run; do not pass it as --ols next time",
            stale.display()
        );
    }
    Ok(summary)
}

/// The `low_stock.csv` in the output folder when this run found no low stock
/// and therefore did not replace it.
pub fn stale_low_stock(config: &RunConfig, summary: &RunSummary) -> Option<PathBuf> {
    if summary.outcome(ReportKind::LowStock) != Some(&ReportOutcome::Empty) {
        return None;
    }
    let path = config.output_dir.join(ReportKind::LowStock.file_name());
    path.exists().then_some(path)
}

/// Run with any destination resolver and store. Stops at the first error.
pub fn run_with<D, S>(config: &RunConfig, reporter: &mut Reporter<D, S>) -> Result<RunSummary>
where
    D: DestinationResolver,
    S: ReportStore,
{
    let mut summary = RunSummary::default();

    info!("Etsy CSV filepath: {}", config.listings_path.display());
    let listings = load_listings(&config.listings_path, &config.schema.listings)?;
    info!("Stock CSV filepath: {}", config.stock_path.display());
    let stock = load_stock(&config.stock_path, &config.schema.stock)?;
    info!(
        "Loaded {} listed SKUs and {} stocked SKUs",
        listings.len(),
        stock.len()
    );

    let low = classify_low_stock(&listings, &stock);
    for (kind, rows) in [
        (ReportKind::LowStock, &low.all),
        (ReportKind::LowStockSubZero, &low.sub_zero),
        (ReportKind::LowStockSubTen, &low.sub_ten),
        (ReportKind::LowStockSubFifty, &low.sub_fifty),
    ] {
        let outcome = reporter.publish(kind, rows)?;
        summary.reports.push((kind, outcome));
    }

    let wrong_sku = classify_wrong_sku(&listings, &stock);
    let outcome = reporter.publish(ReportKind::WrongSku, &wrong_sku)?;
    summary.reports.push((ReportKind::WrongSku, outcome));

    if let Some(prior_path) = &config.prior_low_stock_path {
        info!("Old low stock CSV filepath: {}", prior_path.display());
        let prior = load_stock(prior_path, &config.schema.prior_low_stock)?;

        let restocks = classify_restock(&prior, &stock);
        let outcome = reporter.publish(ReportKind::Restocked, &restocks)?;
        summary.reports.push((ReportKind::Restocked, outcome));

        let fresh = classify_new_low_stock(&prior, &low.low_stock);
        let outcome = reporter.publish(ReportKind::NewLowStock, &fresh)?;
        summary.reports.push((ReportKind::NewLowStock, outcome));
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
