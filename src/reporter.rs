//! CSV report formatting and writing.
//!
//! Each report is written to the output folder and mirrored into a dated
//! snapshot folder (`reports/<stamp>/`). Where files end up is decided by a
//! [`DestinationResolver`], how they are stored by a [`ReportStore`], so the
//! reporter itself only formats text.

use crate::classifier::{RestockLine, StockLine, WrongSkuLine};
use crate::error::{ReconcileError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One data line of a report
pub trait ReportRow {
    fn to_csv_line(&self) -> String;
}

impl ReportRow for StockLine {
    fn to_csv_line(&self) -> String {
        format!("{},{}", self.sku, self.quantity)
    }
}

impl ReportRow for WrongSkuLine {
    fn to_csv_line(&self) -> String {
        format!("{},\"{}\"", self.sku, self.title)
    }
}

impl ReportRow for RestockLine {
    fn to_csv_line(&self) -> String {
        format!("{},{},{}", self.sku, self.old_quantity, self.new_quantity)
    }
}

/// The reports a run can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    LowStock,
    LowStockSubZero,
    LowStockSubTen,
    LowStockSubFifty,
    WrongSku,
    Restocked,
    NewLowStock,
}

impl ReportKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::LowStock => "low_stock.csv",
            ReportKind::LowStockSubZero => "low_stock_sub0.csv",
            ReportKind::LowStockSubTen => "low_stock_sub10.csv",
            ReportKind::LowStockSubFifty => "low_stock_sub50.csv",
            ReportKind::WrongSku => "wrong_sku.csv",
            ReportKind::Restocked => "restocked.csv",
            ReportKind::NewLowStock => "low_stock_new.csv",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            ReportKind::Restocked => "SKU,OLD QUANTITY,NEW QUANTITY",
            ReportKind::WrongSku => "SKU,TITLE",
            _ => "SKU,QUANTITY",
        }
    }

    /// Human readable name used in "nothing found" notices
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::LowStock => "low stock",
            ReportKind::LowStockSubZero => "low stock below 0",
            ReportKind::LowStockSubTen => "low stock below 10",
            ReportKind::LowStockSubFifty => "low stock below 50",
            ReportKind::WrongSku => "wrong SKUs",
            ReportKind::Restocked => "restocks",
            ReportKind::NewLowStock => "new low stock",
        }
    }
}

/// Header plus rows, newline separated, without a trailing newline
pub fn format_report(header: &str, rows: &[String]) -> String {
    let mut text = String::from(header);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}

/// Snapshot folder name for a run, e.g. `20261610_95` for 2026-10-16 09:05.
///
/// Fields are year, day, month, hour, minute without zero padding, matching
/// the folders earlier runs already produced.
pub fn snapshot_folder_name(at: &NaiveDateTime) -> String {
    format!(
        "{}{}{}_{}{}",
        at.year(),
        at.day(),
        at.month(),
        at.hour(),
        at.minute()
    )
}

/// Decides every path a report file is written to
pub trait DestinationResolver {
    fn destinations(&self, file_name: &str) -> Vec<PathBuf>;
}

/// Output folder plus its dated snapshot folder
#[derive(Debug, Clone)]
pub struct RunDestinations {
    output_dir: PathBuf,
    snapshot_dir: PathBuf,
}

impl RunDestinations {
    pub fn new(output_dir: impl Into<PathBuf>, reports_dir_name: &str, at: &NaiveDateTime) -> Self {
        let output_dir = output_dir.into();
        let snapshot_dir = output_dir
            .join(reports_dir_name)
            .join(snapshot_folder_name(at));
        Self {
            output_dir,
            snapshot_dir,
        }
    }

    /// Stamped with the current local time
    pub fn now(output_dir: impl Into<PathBuf>, reports_dir_name: &str) -> Self {
        Self::new(
            output_dir,
            reports_dir_name,
            &chrono::Local::now().naive_local(),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }
}

impl DestinationResolver for RunDestinations {
    fn destinations(&self, file_name: &str) -> Vec<PathBuf> {
        vec![
            self.output_dir.join(file_name),
            self.snapshot_dir.join(file_name),
        ]
    }
}

/// Persists finished report text
pub trait ReportStore {
    fn store(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes reports to disk, creating missing folders. Existing files are replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl ReportStore for FsStore {
    fn store(&mut self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ReconcileError::io(parent, e))?;
                log::debug!("Created directory: {}", parent.display());
            }
        }
        fs::write(path, contents).map_err(|e| ReconcileError::io(path, e))
    }
}

/// Keeps reports in memory, keyed by path
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub files: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

impl ReportStore for MemoryStore {
    fn store(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// What publishing a report did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Written(Vec<PathBuf>),
    /// Nothing to report, no file written
    Empty,
}

pub struct Reporter<D, S> {
    resolver: D,
    store: S,
}

impl<D: DestinationResolver, S: ReportStore> Reporter<D, S> {
    pub fn new(resolver: D, store: S) -> Self {
        Self { resolver, store }
    }

    pub fn resolver(&self) -> &D {
        &self.resolver
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write `header` and `rows` to every destination of `file_name`
    pub fn write_report(
        &mut self,
        file_name: &str,
        rows: &[String],
        header: &str,
    ) -> Result<Vec<PathBuf>> {
        let contents = format_report(header, rows);
        let paths = self.resolver.destinations(file_name);
        for path in &paths {
            self.store.store(path, &contents)?;
        }
        Ok(paths)
    }

    /// Write a report of `kind`, or log a notice and skip it when `rows` is empty
    pub fn publish<R: ReportRow>(&mut self, kind: ReportKind, rows: &[R]) -> Result<ReportOutcome> {
        if rows.is_empty() {
            info!("No {} found", kind.label());
            return Ok(ReportOutcome::Empty);
        }

        let lines: Vec<String> = rows.iter().map(R::to_csv_line).collect();
        let paths = self.write_report(kind.file_name(), &lines, kind.header())?;
        info!("Changed file: {} ({} rows)", kind.file_name(), lines.len());
        Ok(ReportOutcome::Written(paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn memory_reporter() -> Reporter<RunDestinations, MemoryStore> {
        let destinations = RunDestinations::new("out", "reports", &stamp(2026, 10, 16, 9, 5));
        Reporter::new(destinations, MemoryStore::default())
    }

    #[test]
    fn format_has_no_trailing_newline() {
        let rows = vec!["A,1".to_string(), "B,2".to_string()];
        assert_eq!(format_report("SKU,QUANTITY", &rows), "SKU,QUANTITY\nA,1\nB,2");
    }

    #[test]
    fn format_header_only() {
        assert_eq!(format_report("SKU,TITLE", &[]), "SKU,TITLE");
    }

    #[test]
    fn snapshot_folder_is_year_day_month_unpadded() {
        assert_eq!(snapshot_folder_name(&stamp(2026, 10, 16, 9, 5)), "20261610_95");
        assert_eq!(snapshot_folder_name(&stamp(2025, 3, 1, 14, 30)), "202513_1430");
    }

    #[test]
    fn row_formats() {
        let stock = StockLine {
            sku: "A".to_string(),
            quantity: -3,
        };
        let wrong = WrongSkuLine {
            sku: "B".to_string(),
            title: "Mug, large".to_string(),
        };
        let restock = RestockLine {
            sku: "C".to_string(),
            old_quantity: 10,
            new_quantity: 60,
        };

        assert_eq!(stock.to_csv_line(), "A,-3");
        assert_eq!(wrong.to_csv_line(), "B,\"Mug, large\"");
        assert_eq!(restock.to_csv_line(), "C,10,60");
    }

    #[test]
    fn headers_per_kind() {
        assert_eq!(ReportKind::LowStockSubTen.header(), "SKU,QUANTITY");
        assert_eq!(ReportKind::NewLowStock.header(), "SKU,QUANTITY");
        assert_eq!(ReportKind::WrongSku.header(), "SKU,TITLE");
        assert_eq!(ReportKind::Restocked.header(), "SKU,OLD QUANTITY,NEW QUANTITY");
    }

    #[test]
    fn write_report_mirrors_into_snapshot_folder() {
        let mut reporter = memory_reporter();
        let rows = vec!["A,1".to_string()];

        let paths = reporter
            .write_report("low_stock.csv", &rows, "SKU,QUANTITY")
            .unwrap();

        let plain = Path::new("out").join("low_stock.csv");
        let mirrored = Path::new("out/reports/20261610_95").join("low_stock.csv");
        assert_eq!(paths, vec![plain.clone(), mirrored.clone()]);
        assert_eq!(reporter.store().get(&plain), Some("SKU,QUANTITY\nA,1"));
        assert_eq!(reporter.store().get(&mirrored), Some("SKU,QUANTITY\nA,1"));
    }

    #[test]
    fn publish_skips_empty_reports() {
        let mut reporter = memory_reporter();
        let rows: Vec<StockLine> = Vec::new();

        let outcome = reporter.publish(ReportKind::LowStockSubZero, &rows).unwrap();

        assert_eq!(outcome, ReportOutcome::Empty);
        assert!(reporter.store().files.is_empty());
    }

    #[test]
    fn publish_quotes_titles() {
        let mut reporter = memory_reporter();
        let rows = vec![WrongSkuLine {
            sku: "X1".to_string(),
            title: "Widget".to_string(),
        }];

        let outcome = reporter.publish(ReportKind::WrongSku, &rows).unwrap();

        let plain = Path::new("out").join("wrong_sku.csv");
        assert!(matches!(outcome, ReportOutcome::Written(ref paths) if paths.len() == 2));
        assert_eq!(reporter.store().get(&plain), Some("SKU,TITLE\nX1,\"Widget\""));
    }
}
